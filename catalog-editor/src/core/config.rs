//! Editor configuration
//!
//! # 环境变量
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | CATALOG_API_URL | https://dummyjson.com | Catalog API base URL |
//! | CATALOG_PAGE_SIZE | 10 | Products fetched per list |
//! | CATALOG_REQUEST_TIMEOUT_SECS | 0 | Request timeout, 0 = none |
//! | LOG_LEVEL | info | Default log level (`RUST_LOG` overrides) |
//! | LOG_DIR | unset | Directory for daily rolling log files |

use catalog_client::ClientConfig;
use catalog_client::config::{DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub page_size: u32,
    /// `None` leaves requests without a client-side timeout
    pub request_timeout_secs: Option<u64>,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key/value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_url: lookup("CATALOG_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            page_size: lookup("CATALOG_PAGE_SIZE")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            request_timeout_secs: lookup("CATALOG_REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: lookup("LOG_DIR").filter(|dir| !dir.trim().is_empty()),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.api_url.clone()).with_page_size(self.page_size);
        match self.request_timeout_secs {
            Some(secs) => config.with_timeout(secs),
            None => config,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
