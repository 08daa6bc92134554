use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::paging;
use crate::domain::{PageRequest, SortOrder};

/// Error body: `{"timestamp", "message", "details"}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExceptionResponse {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub details: String,
}

impl ExceptionResponse {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            timestamp: Utc::now(),
            message: message.into(),
            details: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }
}

/// `?page=&size=&direction=` on the paged list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_size")]
    pub size: u64,

    #[serde(default)]
    pub direction: Option<String>,
}

const fn default_page() -> u64 {
    paging::DEFAULT_PAGE
}

const fn default_size() -> u64 {
    paging::DEFAULT_SIZE
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_size(),
            direction: None,
        }
    }
}

impl PageParams {
    #[must_use]
    pub fn to_request(&self) -> PageRequest {
        let order = self
            .direction
            .as_deref()
            .map(SortOrder::from_param)
            .unwrap_or_default();
        PageRequest::new(self.page, self.size, order)
    }
}
