//! Events for the movies screen.

use crate::mvi::Event;

use super::model::{Movie, Results};

#[derive(Debug, Clone, PartialEq)]
pub enum MoviesEvent {
    /// A page was fetched.
    DidLoad(Results),

    /// Fetching a page failed.
    DidFail(String),

    /// User toggled the favourite star of the movie shown at `index`.
    DidLike { movie: Movie, index: usize },

    /// User asked to try the failed page again.
    Retry,
}

impl Event for MoviesEvent {}
