use std::sync::Arc;

use bc_core::error::ApiError;
use bc_core::models::AdoptionProcess;
use bc_core::ports::AdoptionPort;

use super::session::SessionContext;

/// Adoption processes of the logged-in account.
pub struct AdoptionProcesses {
    port: Arc<dyn AdoptionPort>,
    session: Arc<SessionContext>,
}

impl AdoptionProcesses {
    pub fn new(port: Arc<dyn AdoptionPort>, session: Arc<SessionContext>) -> Self {
        Self { port, session }
    }

    /// Most recently updated first. Anonymous visitors get a 401 without a
    /// round trip.
    pub async fn list(&self) -> Result<Vec<AdoptionProcess>, ApiError> {
        self.session.require_user().await?;
        let mut processes = self.port.list().await?;
        processes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(processes)
    }

    /// Processes still waiting on a decision.
    pub async fn open(&self) -> Result<Vec<AdoptionProcess>, ApiError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|process| !process.stage.is_closed())
            .collect())
    }
}
