//! Environment-driven storage settings

use std::env;
use std::path::PathBuf;

use blockfit_types::DEFAULT_BLOCK_SET_ID;

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory backing the file store
    pub data_dir: PathBuf,
    /// Block set to start with when none has been stored yet
    pub block_set_id: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".blockfit"),
            block_set_id: DEFAULT_BLOCK_SET_ID.to_string(),
        }
    }
}

impl StoreConfig {
    /// Create from environment variables.
    ///
    /// - `BLOCKFIT_DATA_DIR`: store directory (default `$XDG_CONFIG_HOME/blockfit`,
    ///   then `$HOME/.config/blockfit`, then `./.blockfit`)
    /// - `BLOCKFIT_BLOCK_SET`: initial block set id
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// [`StoreConfig::from_env`] over an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let data_dir = non_empty("BLOCKFIT_DATA_DIR")
            .map(PathBuf::from)
            .or_else(|| non_empty("XDG_CONFIG_HOME").map(|d| PathBuf::from(d).join("blockfit")))
            .or_else(|| non_empty("HOME").map(|h| PathBuf::from(h).join(".config").join("blockfit")))
            .unwrap_or_else(|| PathBuf::from(".blockfit"));

        let block_set_id =
            non_empty("BLOCKFIT_BLOCK_SET").unwrap_or_else(|| DEFAULT_BLOCK_SET_ID.to_string());

        Self {
            data_dir,
            block_set_id,
        }
    }
}
