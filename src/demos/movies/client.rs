//! Catalogue client capability.
//!
//! The movies feedback only sees [`MoviesClient`]. Production code passes an
//! [`HttpMoviesClient`]; tests pass a [`StubMoviesClient`]. Fault injection
//! is a [`FaultSwitch`] handed to the client, never process-wide state.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use thiserror::Error;

use crate::config::MoviesConfig;

use super::model::{Movie, Results};

/// Errors a catalogue request can end with.
#[derive(Debug, Error)]
pub enum MoviesError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Catalogue returned HTTP {status}")]
    Status { status: u16 },

    #[error("Failed to decode catalogue page: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Simulated failure for page {page}")]
    Simulated { page: u32 },
}

/// Source of catalogue pages.
#[async_trait]
pub trait MoviesClient: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<Results, MoviesError>;
}

/// Shared on/off switch for simulated failures.
#[derive(Debug, Clone, Default)]
pub struct FaultSwitch {
    failing: Arc<AtomicBool>,
}

impl FaultSwitch {
    pub fn new(failing: bool) -> Self {
        Self {
            failing: Arc::new(AtomicBool::new(failing)),
        }
    }

    pub fn is_failing(&self) -> bool {
        self.failing.load(Ordering::SeqCst)
    }

    pub fn set(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Flip the switch, returning the new value.
    pub fn toggle(&self) -> bool {
        !self.failing.fetch_xor(true, Ordering::SeqCst)
    }
}

/// Client for the TMDB discover endpoint.
pub struct HttpMoviesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    faults: FaultSwitch,
}

impl HttpMoviesClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, faults: FaultSwitch) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            faults,
        }
    }

    pub fn from_config(config: &MoviesConfig, faults: FaultSwitch) -> Self {
        Self::new(
            config.base_url.clone(),
            config.resolved_api_key().unwrap_or_default(),
            faults,
        )
    }

    fn page_url(&self, page: u32) -> String {
        // An empty key makes the API reject the request, which is how
        // failures are simulated against the real service.
        let api_key = if self.faults.is_failing() {
            ""
        } else {
            self.api_key.as_str()
        };
        format!(
            "{}/3/discover/movie?api_key={}&sort_by=popularity.desc&page={}",
            self.base_url.trim_end_matches('/'),
            api_key,
            page
        )
    }
}

#[async_trait]
impl MoviesClient for HttpMoviesClient {
    async fn fetch_page(&self, page: u32) -> Result<Results, MoviesError> {
        let started = std::time::Instant::now();
        let response = self.http.get(self.page_url(page)).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(page, status = status.as_u16(), "catalogue request rejected");
            return Err(MoviesError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let results: Results = serde_json::from_slice(&body)?;
        tracing::debug!(
            page,
            movies = results.results.len(),
            latency_ms = started.elapsed().as_millis() as u64,
            "catalogue page fetched"
        );
        Ok(results)
    }
}

/// Scripted catalogue with a request log.
///
/// Serves `total_pages` synthetic pages of `per_page` movies each. Movie ids
/// are `page * 1000 + position`.
pub struct StubMoviesClient {
    total_pages: u32,
    per_page: u32,
    latency: Option<Duration>,
    faults: FaultSwitch,
    failing_pages: Mutex<HashSet<u32>>,
    requests: Mutex<Vec<u32>>,
}

impl StubMoviesClient {
    pub fn new(total_pages: u32, per_page: u32) -> Self {
        Self {
            total_pages,
            per_page,
            latency: None,
            faults: FaultSwitch::default(),
            failing_pages: Mutex::new(HashSet::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Delay every response on the Tokio clock.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn with_faults(mut self, faults: FaultSwitch) -> Self {
        self.faults = faults;
        self
    }

    /// Fail requests for `page` until [`StubMoviesClient::heal_page`].
    pub fn fail_page(&self, page: u32) {
        self.failing_pages.lock().insert(page);
    }

    pub fn heal_page(&self, page: u32) {
        self.failing_pages.lock().remove(&page);
    }

    /// Pages requested so far, in request order.
    pub fn requests(&self) -> Vec<u32> {
        self.requests.lock().clone()
    }

    pub fn page(&self, page: u32) -> Results {
        let first = u64::from(page.saturating_sub(1)) * u64::from(self.per_page);
        Results {
            page,
            total_results: self.total_pages.saturating_mul(self.per_page),
            total_pages: self.total_pages,
            results: (0..self.per_page)
                .map(|position| {
                    let id = u64::from(page) * 1000 + u64::from(position);
                    Movie {
                        id,
                        overview: String::new(),
                        title: format!("Movie #{}", first + u64::from(position) + 1),
                        poster_path: Some(format!("/poster-{}.jpg", id)),
                        is_favourite: false,
                    }
                })
                .collect(),
        }
    }
}

#[async_trait]
impl MoviesClient for StubMoviesClient {
    async fn fetch_page(&self, page: u32) -> Result<Results, MoviesError> {
        self.requests.lock().push(page);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.faults.is_failing() || self.failing_pages.lock().contains(&page) {
            return Err(MoviesError::Simulated { page });
        }
        Ok(self.page(page))
    }
}
