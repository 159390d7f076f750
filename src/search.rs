//! Debounced city search against the geocoding endpoint.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::model::{Coordinate, PlaceCandidate};
use crate::provider::WeatherProvider;

/// Quiet period after the last keystroke before a search request goes out.
pub const DEBOUNCE: Duration = Duration::from_millis(500);
/// Queries shorter than this never hit the network.
pub const MIN_QUERY_LEN: usize = 3;

/// Search state: the query text, the candidate list, and at most one
/// pending debounce timer. Every keystroke aborts the previous timer, so at
/// most one geocoding request is issued per quiet period. Search failures
/// are silent to the user (empty list); they never touch session-level
/// error state.
#[derive(Debug)]
pub struct SearchBox {
    provider: Arc<dyn WeatherProvider>,
    debounce: Duration,
    query: String,
    results: Arc<Mutex<Vec<PlaceCandidate>>>,
    pending: Option<JoinHandle<()>>,
}

impl SearchBox {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            debounce: DEBOUNCE,
            query: String::new(),
            results: Arc::new(Mutex::new(Vec::new())),
            pending: None,
        }
    }

    /// Record a keystroke: rearm the debounce timer with the new query.
    /// Must be called from within a tokio runtime.
    pub fn input(&mut self, text: &str) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        text.clone_into(&mut self.query);

        let provider = Arc::clone(&self.provider);
        let results = Arc::clone(&self.results);
        let query = self.query.clone();
        let debounce = self.debounce;

        self.pending = Some(tokio::spawn(async move {
            sleep(debounce).await;
            run_search(&*provider, &results, &query).await;
        }));
    }

    /// Pick a candidate by index. Clears the query text and the candidate
    /// list; the returned coordinate is handed to the weather fetch.
    pub fn select(&mut self, index: usize) -> Option<Coordinate> {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        self.query.clear();

        let mut results = self.results.lock();
        let picked = (index < results.len()).then(|| results.swap_remove(index).coordinate);
        results.clear();
        picked
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Snapshot of the current candidate list.
    pub fn results(&self) -> Vec<PlaceCandidate> {
        self.results.lock().clone()
    }
}

impl Drop for SearchBox {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

async fn run_search(
    provider: &dyn WeatherProvider,
    results: &Mutex<Vec<PlaceCandidate>>,
    query: &str,
) {
    if query.chars().count() < MIN_QUERY_LEN {
        results.lock().clear();
        return;
    }

    match provider.search_city(query).await {
        Ok(found) => *results.lock() = found,
        Err(err) => {
            tracing::warn!(query, error = %err, "city search failed");
            results.lock().clear();
        }
    }
}
