//! State for the movies screen.

use crate::mvi::State;

use super::model::{Movie, Results};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    /// A page request is (or is about to be) in flight.
    #[default]
    Loading,
    /// Every page is loaded.
    Idle,
    /// The last request failed; waiting for a retry.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MoviesState {
    /// Last page received.
    pub batch: Results,
    pub movies: Vec<Movie>,
    pub status: Status,
}

impl State for MoviesState {}

impl MoviesState {
    /// Page that follows the last one received.
    pub fn next_page(&self) -> u32 {
        self.batch.page + 1
    }

    /// Page to fetch right now, if any.
    pub fn loading_page(&self) -> Option<u32> {
        match self.status {
            Status::Loading => Some(self.next_page()),
            Status::Idle | Status::Failed(_) => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, Status::Loading)
    }
}
