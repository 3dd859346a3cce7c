//! Infinite-scroll animal feed.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info_span, Instrument};

use bc_core::error::ApiError;
use bc_core::ids::AnimalId;
use bc_core::models::{AnimalQuery, AnimalSummary};
use bc_core::ports::AnimalPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeedLoad {
    /// Number of new cards appended (duplicates excluded).
    Appended(usize),
    /// The last page was already loaded.
    Exhausted,
    /// Another load is in flight; this call did nothing.
    Busy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedSnapshot {
    pub query: AnimalQuery,
    pub items: Vec<AnimalSummary>,
    pub has_more: bool,
}

#[derive(Default)]
struct FeedState {
    query: AnimalQuery,
    items: Vec<AnimalSummary>,
    seen: HashSet<AnimalId>,
    next_page: u32,
    exhausted: bool,
    /// Bumped by `reset`; responses for an older generation are dropped.
    generation: u64,
}

pub struct AnimalFeed {
    animals: Arc<dyn AnimalPort>,
    page_size: u32,
    state: Mutex<FeedState>,
    loading: AtomicBool,
}

struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl AnimalFeed {
    pub fn new(animals: Arc<dyn AnimalPort>, page_size: u32) -> Self {
        Self {
            animals,
            page_size: page_size.max(1),
            state: Mutex::new(FeedState {
                next_page: 1,
                ..FeedState::default()
            }),
            loading: AtomicBool::new(false),
        }
    }

    /// Fetch the next page and append it.
    pub async fn load_more(&self) -> Result<FeedLoad, ApiError> {
        if self.loading.swap(true, Ordering::SeqCst) {
            return Ok(FeedLoad::Busy);
        }
        let _loading = LoadingGuard(&self.loading);

        let (query, page, generation) = {
            let state = self.state.lock().await;
            if state.exhausted {
                return Ok(FeedLoad::Exhausted);
            }
            (state.query.clone(), state.next_page, state.generation)
        };

        let span = info_span!("usecase.feed.load_more", page);
        let result = self
            .animals
            .list(&query, page, self.page_size)
            .instrument(span)
            .await?;

        let mut state = self.state.lock().await;
        if state.generation != generation {
            debug!(page, "dropping page of a replaced query");
            return Ok(FeedLoad::Appended(0));
        }
        let is_last = result.is_last() || result.items.is_empty();
        let mut appended = 0;
        for item in result.items {
            if state.seen.insert(item.id.clone()) {
                state.items.push(item);
                appended += 1;
            }
        }
        state.next_page = result.page.max(page) + 1;
        state.exhausted = is_last;
        debug!(page, appended, exhausted = state.exhausted, "feed page loaded");
        Ok(FeedLoad::Appended(appended))
    }

    /// Start over with a new filter; the next `load_more` fetches page 1.
    pub async fn reset(&self, query: AnimalQuery) {
        let mut state = self.state.lock().await;
        let generation = state.generation + 1;
        *state = FeedState {
            query,
            next_page: 1,
            generation,
            ..FeedState::default()
        };
    }

    pub async fn snapshot(&self) -> FeedSnapshot {
        let state = self.state.lock().await;
        FeedSnapshot {
            query: state.query.clone(),
            items: state.items.clone(),
            has_more: !state.exhausted,
        }
    }
}
