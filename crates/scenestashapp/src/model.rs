//! # Domain Model: Scripts as the Server Sends Them
//!
//! A script snippet is a short dialogue excerpt: an optional title, the names of the
//! characters that speak, and the ordered lines they speak.
//!
//! ## Ownership
//!
//! - [`ScriptSnip`] is the **read model**. The server assigns its `id` and timestamps,
//!   and the client never builds one except by parsing a response. Edits go through a
//!   fresh create/update round trip.
//! - [`ScriptFormData`] is the **write model**. Callers build it to describe a create or
//!   update; nothing is validated here, the server is the source of truth.
//!
//! ## Wire Format
//!
//! Field names are camelCase on the wire (`createdAt`, `totalScripts`, `sortBy`).
//! Timestamps are kept as the opaque strings the server sent; [`parse_timestamp`] exists
//! for presentation only.
//!
//! ## Extra Form Fields
//!
//! A form loaded from a JSON file may carry fields beyond title, characters and lines
//! (e.g. an `id` left over from a previous export). Those land in
//! [`ScriptFormData::extra`]. Creating a script forwards them untouched; updating a
//! script rebuilds the payload from the three form fields and drops them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// One line of dialogue. `character` echoes a name from the script's character list,
/// but nothing enforces that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptLine {
    pub character: String,
    pub dialogue: String,
}

impl ScriptLine {
    pub fn new(character: impl Into<String>, dialogue: impl Into<String>) -> Self {
        Self {
            character: character.into(),
            dialogue: dialogue.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptSnip {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub lines: Vec<ScriptLine>,
    pub created_at: String,
    pub updated_at: String,
}

impl ScriptSnip {
    /// The title for display, or `None` when the server sent none (or an empty one).
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptFormData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub lines: Vec<ScriptLine>,
    /// Anything else the caller attached.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScriptFormData {
    pub fn new(title: Option<String>, characters: Vec<String>, lines: Vec<ScriptLine>) -> Self {
        Self {
            title,
            characters,
            lines,
            extra: Map::new(),
        }
    }

    /// Pre-fills a form from an existing script, as an edit screen would.
    pub fn from_script(script: &ScriptSnip) -> Self {
        Self::new(
            script.title.clone(),
            script.characters.clone(),
            script.lines.clone(),
        )
    }
}

/// The update body: exactly title, characters and lines, borrowed from a form.
#[derive(Debug, Serialize)]
pub(crate) struct ScriptPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    pub characters: &'a [String],
    pub lines: &'a [ScriptLine],
}

impl<'a> From<&'a ScriptFormData> for ScriptPayload<'a> {
    fn from(form: &'a ScriptFormData) -> Self {
        Self {
            title: form.title.as_deref(),
            characters: &form.characters,
            lines: &form.lines,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "createdAt")]
    CreatedAt,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::CreatedAt => "createdAt",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SortField::Title),
            "createdAt" | "created-at" | "created_at" => Ok(SortField::CreatedAt),
            other => Err(format!(
                "Invalid sort field: {} (expected title or createdAt)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!(
                "Invalid sort order: {} (expected asc or desc)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub total_scripts: u64,
    pub current_page: u32,
    pub total_pages: u32,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedScriptsResponse {
    pub data: Vec<ScriptSnip>,
    pub pagination: PaginationInfo,
}

/// Parameters for the paginated list. Unset optionals are never sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: None,
            sort_by: None,
            sort_order: None,
        }
    }
}

impl ListQuery {
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn sort(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort_by = Some(field);
        self.sort_order = Some(order);
        self
    }

    /// Query pairs in wire order: page, limit, then whichever optionals are set.
    /// An empty search term counts as unset.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) {
            pairs.push(("search", term.to_string()));
        }
        if let Some(field) = self.sort_by {
            pairs.push(("sortBy", field.as_str().to_string()));
        }
        if let Some(order) = self.sort_order {
            pairs.push(("sortOrder", order.as_str().to_string()));
        }
        pairs
    }
}

/// Best-effort parse of a server timestamp. Returns `None` for anything that is not RFC 3339.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
