//! Terminal output for command results.
//!
//! Everything here builds strings; the caller decides where they go. Layout math
//! (widths, truncation, padding) is done on display width, not byte length, so titles
//! in any script line up.

use chrono::Utc;
use colored::Colorize;
use scenestashapp::commands::{CmdMessage, CmdResult, MessageLevel};
use scenestashapp::model::{parse_timestamp, PaginationInfo, ScriptSnip};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const TIME_WIDTH: usize = 14;
pub const STASH_MARKER: &str = "★";
const UNTITLED: &str = "(untitled)";

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        out.push_str(&style_message(message));
        out.push('\n');
    }
    out
}

fn style_message(message: &CmdMessage) -> String {
    match message.level {
        MessageLevel::Info => message.content.dimmed().to_string(),
        MessageLevel::Success => message.content.green().to_string(),
        MessageLevel::Warning => message.content.yellow().to_string(),
        MessageLevel::Error => message.content.red().to_string(),
    }
}

/// One line per script: stash marker, position, title, id and age.
///
/// Positions continue across pages when `result.pagination` is set.
pub fn render_script_list(result: &CmdResult) -> String {
    if result.scripts.is_empty() {
        return "No scripts found.\n".to_string();
    }

    let offset = result
        .pagination
        .as_ref()
        .map(|p| p.current_page.saturating_sub(1) as usize * p.limit as usize)
        .unwrap_or(0);

    let mut out = String::new();
    for (i, script) in result.scripts.iter().enumerate() {
        let stashed = result.is_stashed(&script.id);
        let left_prefix = if stashed {
            format!("  {} ", STASH_MARKER)
        } else {
            "    ".to_string()
        };
        let idx_str = format!("{}. ", offset + i + 1);
        let id_str = format!(" {}", script.id);
        let time_ago = format_time_ago(&script.created_at);

        let fixed_width =
            left_prefix.width() + idx_str.width() + id_str.width() + 2 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);

        let title = script.display_title().unwrap_or(UNTITLED);
        let title_display = truncate_to_width(title, available);
        let padding = available.saturating_sub(title_display.width());

        let marker = if stashed {
            left_prefix.yellow()
        } else {
            left_prefix.normal()
        };
        out.push_str(&format!(
            "{}{}{}{}{}  {}\n",
            marker,
            idx_str,
            title_display,
            " ".repeat(padding),
            id_str.dimmed(),
            time_ago.dimmed()
        ));
    }

    if let Some(pagination) = &result.pagination {
        out.push('\n');
        out.push_str(&format!("{}\n", render_pagination(pagination).dimmed()));
    }
    out
}

fn render_pagination(pagination: &PaginationInfo) -> String {
    let mut footer = format!(
        "Page {} of {} · {} script(s)",
        pagination.current_page,
        pagination.total_pages.max(1),
        pagination.total_scripts
    );
    if let (Some(by), Some(order)) = (pagination.sort_by, pagination.sort_order) {
        footer.push_str(&format!(" · sorted by {} {}", by, order));
    }
    footer
}

/// Scripts in full: heading, metadata line, then every line of dialogue.
pub fn render_full_scripts(result: &CmdResult) -> String {
    let mut out = String::new();
    for (i, script) in result.scripts.iter().enumerate() {
        if i > 0 {
            out.push_str("\n================================\n\n");
        }
        out.push_str(&render_full_script(script, result.is_stashed(&script.id)));
    }
    out
}

fn render_full_script(script: &ScriptSnip, stashed: bool) -> String {
    let mut out = String::new();
    let title = script.display_title().unwrap_or(UNTITLED);
    if stashed {
        out.push_str(&format!("{} {}\n", STASH_MARKER.yellow(), title.bold()));
    } else {
        out.push_str(&format!("{}\n", title.bold()));
    }

    let mut meta = vec![script.id.clone()];
    if !script.characters.is_empty() {
        meta.push(script.characters.join(", "));
    }
    meta.push(format!("created {}", format_time_ago(&script.created_at).trim()));
    out.push_str(&format!("{}\n", meta.join(" · ").dimmed()));
    out.push_str("--------------------------------\n");

    if script.lines.is_empty() {
        out.push_str(&format!("{}\n", "(no lines)".dimmed()));
    }
    for line in &script.lines {
        out.push_str(&format!("{}: {}\n", line.character.cyan(), line.dialogue));
    }
    out
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

/// Right-aligned relative age. Unparseable timestamps are shown as sent.
fn format_time_ago(raw: &str) -> String {
    let Some(timestamp) = parse_timestamp(raw) else {
        return format!("{:>width$}", raw, width = TIME_WIDTH);
    };
    let duration = Utc::now().signed_duration_since(timestamp);

    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    // Pad singulars so "1 day  ago" lines up with "2 days ago".
    let time_str = time_str
        .replace("hour ago", "hour  ago")
        .replace("minute ago", "minute  ago")
        .replace("second ago", "second  ago")
        .replace("day ago", "day  ago")
        .replace("week ago", "week  ago")
        .replace("month ago", "month  ago")
        .replace("year ago", "year  ago");

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
