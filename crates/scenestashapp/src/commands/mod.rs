//! # Command Layer
//!
//! Commands compose the two leaf components, the API client and the stash, into the
//! operations a user actually performs: browse a page, read one script, draw a few at
//! random, work with the stash. The API client and the stash never call each other;
//! when an operation needs both, it is written here.
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: no stdout, stderr, colors or exit codes
//! - **Argument parsing**: that's the CLI layer's job
//! - **Retries**: a failed call is reported once, as is
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`], not strings:
//! - `scripts`: scripts to display, in display order
//! - `pagination`: page info for list results
//! - `stashed_ids`: the stash at the time the command finished, so a UI can mark
//!   stashed scripts without reading the store again
//! - `messages`: structured messages with levels (info, success, warning, error)
//!
//! ## Testing Strategy
//!
//! Command tests run against [`fake::FakeApi`] and a `MemBackend`-backed stash, so
//! they touch neither the network nor the filesystem.
//!
//! ## Command Modules
//!
//! - [`scripts`]: list, show, create, update, delete
//! - [`random`]: draw random scripts
//! - [`stash`]: list, add, remove, clear and prune the stash

use crate::model::{PaginationInfo, ScriptSnip};
use crate::stash::{StashBackend, StashStore};
use serde::Serialize;

pub mod random;
pub mod scripts;
pub mod stash;

#[cfg(test)]
pub(crate) mod fake;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CmdResult {
    pub scripts: Vec<ScriptSnip>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
    pub stashed_ids: Vec<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_scripts(mut self, scripts: Vec<ScriptSnip>) -> Self {
        self.scripts = scripts;
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationInfo) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Snapshot the stash into the result.
    pub fn with_stash<B: StashBackend>(mut self, stash: &StashStore<B>) -> Self {
        self.stashed_ids = stash.ids().to_vec();
        self
    }

    pub fn is_stashed(&self, id: &str) -> bool {
        self.stashed_ids.iter().any(|s| s == id)
    }
}

/// `"Title" (id)` when there is a title, otherwise just the id.
pub(crate) fn describe(script: &ScriptSnip) -> String {
    match script.display_title() {
        Some(title) => format!("\"{}\" ({})", title, script.id),
        None => script.id.clone(),
    }
}
