use async_trait::async_trait;

use crate::error::ApiError;
use crate::form::FileRef;
use crate::ids::{AnimalId, OngId};
use crate::models::{Animal, AnimalPayload, AnimalQuery, AnimalSummary, Page};

#[async_trait]
pub trait AnimalPort: Send + Sync {
    /// `page` is 1-based.
    async fn list(
        &self,
        query: &AnimalQuery,
        page: u32,
        limit: u32,
    ) -> Result<Page<AnimalSummary>, ApiError>;

    async fn get(&self, id: &AnimalId) -> Result<Animal, ApiError>;

    async fn create(&self, payload: AnimalPayload, photos: Vec<FileRef>)
        -> Result<Animal, ApiError>;

    async fn update(
        &self,
        id: &AnimalId,
        payload: AnimalPayload,
        photos: Vec<FileRef>,
    ) -> Result<Animal, ApiError>;

    async fn list_by_ong(&self, ong: &OngId) -> Result<Vec<AnimalSummary>, ApiError>;
}
