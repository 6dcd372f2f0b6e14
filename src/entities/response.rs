//! Response envelopes shared by every endpoint.
//!
//! Successful responses look like `{ success, message, data }`. For list
//! endpoints `data` is itself a paginated envelope whose `data` array is the
//! working collection.

use serde::{Deserialize, Serialize};

/// `{ success, message, data }` wrapper around every response body
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

const fn default_success() -> bool {
    true
}

/// Paginated list envelope; metadata fields default so partial envelopes decode
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub last_page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub from: Option<u64>,
    #[serde(default)]
    pub to: Option<u64>,
    #[serde(default)]
    pub next_page_url: Option<String>,
    #[serde(default)]
    pub prev_page_url: Option<String>,
}

impl<T> Page<T> {
    /// A page with no records, used when the server omits the envelope.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            data: Vec::new(),
            current_page: 0,
            last_page: 0,
            per_page: 0,
            total: 0,
            from: None,
            to: None,
            next_page_url: None,
            prev_page_url: None,
        }
    }

    /// True when the server reports more pages after this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next_page_url.is_some() || self.current_page < self.last_page
    }
}

/// `?page=&limit=` parameters for list endpoints
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Builds a request when either value is given, filling the other with its default.
    #[must_use]
    pub fn from_parts(page: Option<u32>, limit: Option<u32>) -> Option<Self> {
        if page.is_none() && limit.is_none() {
            return None;
        }
        Some(Self {
            page: page.unwrap_or(Self::DEFAULT_PAGE).max(1),
            limit: limit.unwrap_or(Self::DEFAULT_LIMIT).max(1),
        })
    }

    /// Query pairs in the order the API documents them.
    #[must_use]
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [("page", self.page.to_string()), ("limit", self.limit.to_string())]
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}
