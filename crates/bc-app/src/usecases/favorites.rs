//! Favorite animals with optimistic toggling.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::warn;

use bc_core::error::ApiError;
use bc_core::ids::AnimalId;
use bc_core::models::AnimalSummary;
use bc_core::ports::FavoritePort;

pub struct Favorites {
    port: Arc<dyn FavoritePort>,
    ids: Mutex<HashSet<AnimalId>>,
}

impl Favorites {
    pub fn new(port: Arc<dyn FavoritePort>) -> Self {
        Self {
            port,
            ids: Mutex::new(HashSet::new()),
        }
    }

    /// Fetch the favorites list and refresh the cached id set.
    pub async fn load(&self) -> Result<Vec<AnimalSummary>, ApiError> {
        let animals = self.port.list().await?;
        *self.ids.lock().await = animals.iter().map(|a| a.id.clone()).collect();
        Ok(animals)
    }

    pub async fn is_favorite(&self, animal: &AnimalId) -> bool {
        self.ids.lock().await.contains(animal)
    }

    /// Flip the favorite flag right away and confirm with the backend; the
    /// flag is restored when the request fails. Returns the new state.
    pub async fn toggle(&self, animal: &AnimalId) -> Result<bool, ApiError> {
        let now_favorite = {
            let mut ids = self.ids.lock().await;
            if ids.remove(animal) {
                false
            } else {
                ids.insert(animal.clone());
                true
            }
        };

        let result = if now_favorite {
            self.port.add(animal).await
        } else {
            self.port.remove(animal).await
        };

        if let Err(err) = result {
            warn!(%animal, error = %err, "favorite toggle failed; rolling back");
            let mut ids = self.ids.lock().await;
            if now_favorite {
                ids.remove(animal);
            } else {
                ids.insert(animal.clone());
            }
            return Err(err);
        }
        Ok(now_favorite)
    }
}
