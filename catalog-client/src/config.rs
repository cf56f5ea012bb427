//! Client configuration

/// Default upstream catalog API
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Default number of records fetched by a list call
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Client configuration for connecting to the catalog API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL (e.g., "https://dummyjson.com")
    pub base_url: String,

    /// Request timeout in seconds; `None` leaves requests unbounded
    pub timeout: Option<u64>,

    /// Records per list call
    pub page_size: u32,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Set the list page size
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::HttpCatalogClient> {
        crate::HttpCatalogClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
