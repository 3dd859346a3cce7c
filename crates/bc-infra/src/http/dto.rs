//! Wire envelopes the backend wraps around domain payloads.

use serde::{Deserialize, Serialize};

use bc_core::models::{AuthUser, Page};

/// Body of every non-2xx response that carries one.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserEnvelope {
    pub user: AuthUser,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageEnvelope<T> {
    #[serde(alias = "items")]
    pub data: Vec<T>,
    pub page: u32,
    #[serde(alias = "total_pages")]
    pub total_pages: u32,
}

impl<T> From<PageEnvelope<T>> for Page<T> {
    fn from(envelope: PageEnvelope<T>) -> Self {
        Page {
            items: envelope.data,
            page: envelope.page,
            total_pages: envelope.total_pages,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ListEnvelope<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct PageParams {
    pub page: u32,
    pub limit: u32,
}
