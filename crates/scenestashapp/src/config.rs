//! # Configuration
//!
//! Configuration is loaded with [`confique`], which layers environment variables over a
//! TOML file over compiled defaults. It is resolved once at startup and passed down;
//! nothing below the CLI reads the environment.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `SCENESTASH_API_BASE_URL`, `SCENESTASH_DATA_DIR`.
//! 2. **Config file**: `scenestash.toml` in the OS config directory (via `directories`).
//! 3. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! The CLI's `--api-url` and `--data-dir` flags override the resolved values.
//!
//! ## Available Settings
//!
//! | Key            | Default                       | Description                        |
//! |----------------|-------------------------------|------------------------------------|
//! | `api_base_url` | `http://localhost:3000/api`   | Base URL of the scripts API        |
//! | `data_dir`     | OS data directory             | Where the stash file is kept       |

use crate::error::{Result, SceneError};
use confique::Config;
use directories::ProjectDirs;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
pub const CONFIG_FILENAME: &str = "scenestash.toml";

#[derive(Config, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SceneStashConfig {
    /// Base URL of the scripts API.
    #[config(env = "SCENESTASH_API_BASE_URL", default = "http://localhost:3000/api")]
    pub api_base_url: String,

    /// Directory holding the stash. Falls back to the OS data directory.
    #[config(env = "SCENESTASH_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

impl Default for SceneStashConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            data_dir: None,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "scenestash", "scenestash")
}

impl SceneStashConfig {
    /// Load from the environment, then `config_file` (or the default config file
    /// location when `None`), then defaults.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let file = config_file
            .map(Path::to_path_buf)
            .or_else(Self::default_config_file);

        let mut builder = Self::builder().env();
        if let Some(path) = &file {
            tracing::debug!(path = %path.display(), "reading config file");
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|e| SceneError::Config(e.to_string()))
    }

    /// `scenestash.toml` in the OS config directory.
    pub fn default_config_file() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
    }

    /// The directory the stash lives in.
    pub fn resolved_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                SceneError::Config(
                    "Could not determine a data directory; set SCENESTASH_DATA_DIR".to_string(),
                )
            })
    }
}
