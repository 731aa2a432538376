//! # Scenestash Architecture
//!
//! Scenestash is a **UI-agnostic library** for reading and writing short dialogue
//! scripts held by a remote API, plus a local "stash" of bookmarked script IDs. The CLI
//! in the `scenestash` crate is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (scenestash crate)                                     │
//! │  - Parses arguments, renders output, owns stdout/stderr     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Facade (api.rs)                                        │
//! │  - One method per user operation, returns CmdResult         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - Composes the client and the stash                        │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                             │
//!                 ▼                             ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Client (client/)             │ │  Stash (stash/)           │
//! │  - HTTP calls, error          │ │  - Bookmarked IDs,        │
//! │    normalization              │ │    persisted locally      │
//! └───────────────────────────────┘ └───────────────────────────┘
//! ```
//!
//! The client and the stash are leaves: neither knows the other exists.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Nothing in this crate prints, exits, or reads the environment outside
//! [`config`]. Logging goes through `tracing`; installing a subscriber is the
//! binary's job.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade
//! - [`commands`]: Operations that combine client and stash
//! - [`client`]: HTTP client and error normalization
//! - [`stash`]: Bookmark store and its storage backends
//! - [`model`]: Wire types (`ScriptSnip`, `ScriptFormData`, pagination)
//! - [`config`]: Layered configuration
//! - [`init`]: Builds a facade from configuration
//! - [`error`]: Error types

pub mod api;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod stash;
