//! Application configuration DTO.
//!
//! Plain data mapped from the TOML file. Values the file does not carry fall
//! back to [`AppConfig::default`]. Numbers must not be negative and the
//! request timeout must be at least one second.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub feed: FeedConfig,
    pub lookup: LookupConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend root, without trailing slash.
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupConfig {
    pub debounce_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for rolling log files; stdout only when unset.
    pub directory: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            feed: FeedConfig {
                page_size: DEFAULT_PAGE_SIZE,
            },
            lookup: LookupConfig {
                debounce_ms: DEFAULT_DEBOUNCE_MS,
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Create AppConfig from a parsed TOML document.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let section = |name: &str, key: &str| toml_value.get(name).and_then(|s| s.get(key));

        let non_negative = |name: &str, key: &str| -> anyhow::Result<Option<u64>> {
            match section(name, key).and_then(|v| v.as_integer()) {
                Some(n) if n < 0 => anyhow::bail!("[{name}] {key} must not be negative"),
                Some(n) => Ok(Some(n as u64)),
                None => Ok(None),
            }
        };

        let timeout_secs =
            non_negative("api", "timeout_secs")?.unwrap_or(defaults.api.timeout_secs);
        if timeout_secs == 0 {
            anyhow::bail!("[api] timeout_secs must be at least 1");
        }

        Ok(Self {
            api: ApiConfig {
                base_url: section("api", "base_url")
                    .and_then(|v| v.as_str())
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.api.base_url),
                timeout_secs,
            },
            feed: FeedConfig {
                page_size: non_negative("feed", "page_size")?
                    .map(|n| u32::try_from(n))
                    .transpose()?
                    .unwrap_or(defaults.feed.page_size),
            },
            lookup: LookupConfig {
                debounce_ms: non_negative("lookup", "debounce_ms")?
                    .unwrap_or(defaults.lookup.debounce_ms),
            },
            logging: LoggingConfig {
                directory: section("logging", "directory")
                    .and_then(|v| v.as_str())
                    .filter(|dir| !dir.is_empty())
                    .map(PathBuf::from),
            },
        })
    }
}
