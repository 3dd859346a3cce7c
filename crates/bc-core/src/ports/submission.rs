use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::form::{Draft, FormField};

/// Outcome of a successful wizard submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Id of the created or updated resource, when the backend returns one.
    pub resource_id: Option<String>,
    /// Confirmation text for the success screen.
    pub message: Option<String>,
}

impl SubmissionReceipt {
    pub fn for_resource(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            resource_id: Some(id.into()),
            message: Some(message.into()),
        }
    }
}

/// Turns a validated draft into a backend call.
#[async_trait]
pub trait SubmissionPort<F: FormField>: Send + Sync {
    async fn submit(&self, draft: &Draft<F>) -> Result<SubmissionReceipt, ApiError>;
}
