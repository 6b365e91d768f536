//! Feedbacks for the movies screen.

use std::sync::Arc;

use crate::effect::Effect;
use crate::feedback::Feedback;

use super::client::{MoviesClient, MoviesError};
use super::event::MoviesEvent;
use super::state::MoviesState;

/// Fetch `next_page` while the screen is loading.
///
/// Every loaded page bumps `next_page`, which supersedes the finished fetch
/// and requests the following page. Leaving `Loading` (failure, last page)
/// cancels the slot, so `Retry` requests the same page again.
pub fn when_loading(client: Arc<dyn MoviesClient>) -> Feedback<MoviesState, MoviesEvent> {
    Feedback::lensing_optional(MoviesState::loading_page, move |page| {
        let client = Arc::clone(&client);
        Effect::task(
            async move { client.fetch_page(page).await },
            MoviesEvent::DidLoad,
            move |err: MoviesError| {
                tracing::warn!(page, error = %err, "movie page fetch failed");
                MoviesEvent::DidFail(err.to_string())
            },
        )
    })
    .labelled("movies.when_loading")
}
