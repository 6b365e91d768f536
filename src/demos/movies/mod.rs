//! Movies: continuous pagination over a movie catalogue.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `model.rs` - Catalogue payload types
//! - `state.rs` - Loaded movies, last batch and loading status
//! - `event.rs` - Fetch results and user actions
//! - `reducer.rs` - State transitions (pure, no side effects)
//! - `feedback.rs` - Lensing feedback fetching `next_page` while loading
//! - `client.rs` - Catalogue client capability (HTTP and scripted)

mod client;
mod event;
mod feedback;
mod model;
mod reducer;
mod state;

pub use client::{FaultSwitch, HttpMoviesClient, MoviesClient, MoviesError, StubMoviesClient};
pub use event::MoviesEvent;
pub use feedback::when_loading;
pub use model::{Movie, Results, POSTER_BASE_URL};
pub use reducer::MoviesReducer;
pub use state::{MoviesState, Status};

use std::sync::Arc;

use crate::store::Store;

/// Store that starts loading page 1 immediately.
pub fn make_store(client: Arc<dyn MoviesClient>) -> Store<MoviesState, MoviesEvent> {
    Store::new::<MoviesReducer>(MoviesState::default(), when_loading(client))
}
