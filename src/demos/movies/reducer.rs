//! Reducer for the movies screen.

use crate::mvi::Reducer;

use super::event::MoviesEvent;
use super::state::{MoviesState, Status};

pub struct MoviesReducer;

impl Reducer for MoviesReducer {
    type State = MoviesState;
    type Event = MoviesEvent;

    fn reduce(mut state: Self::State, event: Self::Event) -> Self::State {
        match event {
            MoviesEvent::DidLoad(batch) => {
                if !state.is_loading() {
                    return state;
                }
                state.status = if batch.has_more() {
                    Status::Loading
                } else {
                    Status::Idle
                };
                state.movies.extend(batch.results.iter().cloned());
                state.batch = batch;
                state
            }

            MoviesEvent::DidFail(message) => {
                if state.is_loading() {
                    state.status = Status::Failed(message);
                }
                state
            }

            MoviesEvent::DidLike { movie, index } => {
                if let Some(existing) = state.movies.get_mut(index) {
                    if existing.id == movie.id {
                        existing.is_favourite = !existing.is_favourite;
                    }
                }
                state
            }

            MoviesEvent::Retry => {
                if matches!(state.status, Status::Failed(_)) {
                    state.status = Status::Loading;
                }
                state
            }
        }
    }
}
