//! # CLI Layer
//!
//! This module is **one possible UI client** for scenestash; the application lives in
//! `scenestashapp`.
//!
//! The CLI is the only place that:
//! - Parses arguments
//! - Installs the log subscriber
//! - Reads input files and stdin
//! - Writes to stdout and stderr
//!
//! ## Flow
//!
//! 1. Parse arguments with clap
//! 2. Resolve configuration, then apply `--api-url` / `--data-dir`
//! 3. Build the facade via [`initialize`]
//! 4. Dispatch to one `SceneStashApi` method, which returns a `CmdResult`
//! 5. Render the result as styled text, or as JSON with `--json`
//!
//! Styled output goes to stdout; logs and the top-level error go to stderr.

use super::render::{render_full_scripts, render_messages, render_script_list};
use super::setup::{Cli, Commands, StashCommands};
use anyhow::anyhow;
use clap::Parser;
use colored::Colorize;
use scenestashapp::api::SceneStashApi;
use scenestashapp::client::HttpClient;
use scenestashapp::commands::CmdResult;
use scenestashapp::config::SceneStashConfig;
use scenestashapp::init::initialize;
use scenestashapp::model::{ListQuery, ScriptFormData};
use scenestashapp::stash::fs_backend::FsBackend;
use std::io::Read;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// How a result is shown in styled mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    List,
    Full,
    MessagesOnly,
}

struct AppContext {
    api: SceneStashApi<HttpClient, FsBackend>,
    json: bool,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = SceneStashConfig::load(cli.config.as_deref())?;
    if let Some(url) = &cli.api_url {
        config.api_base_url = url.clone();
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }

    let ctx = initialize(config)?;
    tracing::debug!(
        api = %ctx.config.api_base_url,
        data_dir = %ctx.data_dir.display(),
        "context ready"
    );
    let mut app = AppContext {
        api: ctx.api,
        json: cli.json,
    };
    if let Some(warning) = app.api.take_load_warning() {
        eprintln!("{}", warning.yellow());
    }

    let (result, view) = dispatch(&mut app, cli.command).await?;
    present(&app, &result, view)
}

async fn dispatch(
    app: &mut AppContext,
    command: Option<Commands>,
) -> anyhow::Result<(CmdResult, View)> {
    tracing::debug!(?command, "dispatching");
    let api = &mut app.api;
    let outcome = match command {
        Some(Commands::Random {
            count,
            exclude_stashed,
        }) => (api.draw_random(count, exclude_stashed).await?, View::Full),
        Some(Commands::List {
            page,
            limit,
            search,
            sort_by,
            sort_order,
        }) => {
            let mut query = ListQuery::default().page(page).limit(limit);
            if let Some(term) = search {
                query = query.search(term);
            }
            query.sort_by = sort_by;
            query.sort_order = sort_order;
            (api.list_scripts(&query).await?, View::List)
        }
        Some(Commands::Show { id }) => (api.show_script(&id).await?, View::Full),
        Some(Commands::Create { file }) => {
            let form = read_form(&file)?;
            (api.create_script(&form).await?, View::Full)
        }
        Some(Commands::Update { id, file }) => {
            let form = read_form(&file)?;
            (api.update_script(&id, &form).await?, View::Full)
        }
        Some(Commands::Delete { id }) => (api.delete_script(&id).await?, View::MessagesOnly),
        Some(Commands::Stash { action }) => match action.unwrap_or(StashCommands::List) {
            StashCommands::List => (api.list_stash().await?, View::List),
            StashCommands::Add { id, no_verify } => {
                (api.stash_script(&id, !no_verify).await?, View::MessagesOnly)
            }
            StashCommands::Remove { id } => (api.unstash_script(&id)?, View::MessagesOnly),
            StashCommands::Clear => (api.clear_stash()?, View::MessagesOnly),
            StashCommands::Prune => (api.prune_stash().await?, View::MessagesOnly),
        },
        None => (api.draw_random(1, false).await?, View::Full),
    };
    Ok(outcome)
}

fn present(app: &AppContext, result: &CmdResult, view: View) -> anyhow::Result<()> {
    if app.json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    match view {
        // Empty results already say so in their messages.
        View::List if result.scripts.is_empty() => {}
        View::List => print!("{}", render_script_list(result)),
        View::Full => print!("{}", render_full_scripts(result)),
        View::MessagesOnly => {}
    }
    print!("{}", render_messages(&result.messages));
    Ok(())
}

/// Read a script form from a JSON file, or from stdin when `path` is `-`.
fn read_form(path: &Path) -> anyhow::Result<ScriptFormData> {
    let raw = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow!("Failed to read script from stdin: {}", e))?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))?
    };
    serde_json::from_str(&raw)
        .map_err(|e| anyhow!("Invalid script JSON in {}: {}", path.display(), e))
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("scenestashapp=debug,scenestash=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    };

    // Ignore a subscriber that is already installed.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
