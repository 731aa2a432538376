//! # Startup Wiring
//!
//! [`initialize`] turns a resolved [`SceneStashConfig`] into a ready facade: an
//! [`HttpClient`] pointed at the configured base URL and a stash opened from the
//! configured data directory.
//!
//! Overrides (e.g. CLI flags) are applied by the caller to the config before this runs.

use crate::api::SceneStashApi;
use crate::client::HttpClient;
use crate::config::SceneStashConfig;
use crate::error::Result;
use crate::stash::fs_backend::FsBackend;
use crate::stash::StashStore;
use std::path::PathBuf;

pub struct SceneStashContext {
    pub api: SceneStashApi<HttpClient, FsBackend>,
    pub config: SceneStashConfig,
    pub data_dir: PathBuf,
}

pub fn initialize(config: SceneStashConfig) -> Result<SceneStashContext> {
    let client = HttpClient::new(&config.api_base_url)?;
    let data_dir = config.resolved_data_dir()?;
    let stash = StashStore::open(FsBackend::new(&data_dir))?;
    Ok(SceneStashContext {
        api: SceneStashApi::new(client, stash),
        config,
        data_dir,
    })
}
