//! Cache configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::default_true;
use crate::cache::MokaCacheConfig;

/// Policy response cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether caching is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// TTL for cached policy responses in seconds (default: 5 minutes)
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Maximum number of cached entries
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

const fn default_ttl_secs() -> u64 {
    5 * 60 // 5 minutes
}

const fn default_max_entries() -> u64 {
    1024
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
        }
    }
}

impl CacheConfig {
    /// Get the TTL as a Duration
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Convert to the Moka cache configuration
    #[must_use]
    pub const fn to_moka_config(&self) -> MokaCacheConfig {
        MokaCacheConfig {
            max_entries: self.max_entries,
            default_ttl: self.ttl(),
            time_to_idle: None,
        }
    }
}
