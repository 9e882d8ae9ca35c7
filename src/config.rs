use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::DEFAULT_TTL;
use crate::chat::ReplyDelay;
use crate::recipes::client::DEFAULT_API_BASE;

const ENV_PREFIX: &str = "BAKEMATCH_";

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_owned()
}

fn default_cache() -> bool {
    true
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_TTL.as_secs()
}

fn default_min_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    2000
}

/// Settings read from `BAKEMATCH_*` environment variables (and `.env`).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_cache")]
    pub cache: bool,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    pub favorites_path: Option<PathBuf>,
}

impl Environment {
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        envy::prefixed(ENV_PREFIX)
            .from_env::<Self>()
            .context("Failed to read BAKEMATCH_* environment variables")
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn reply_delay(&self) -> ReplyDelay {
        ReplyDelay {
            min: Duration::from_millis(self.min_delay_ms),
            max: Duration::from_millis(self.max_delay_ms.max(self.min_delay_ms)),
        }
    }
}
