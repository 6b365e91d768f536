//! Unidirectional state container with feedback-driven effects.
//!
//! A [`Store`] owns one state value and folds events into it with a pure
//! [`Reducer`]. [`Feedback`]s watch the published states and run
//! [`Effect`]s whose events flow back into the store.

pub mod config;
pub mod demos;
pub mod effect;
pub mod feedback;
pub mod logging;
pub mod mvi;
pub mod store;

pub use effect::{Effect, Timer, TokioTimer};
pub use feedback::{Feedback, MiddlewarePolicy};
pub use mvi::{Event, Reducer, State};
pub use store::{Sender, Store, StoreError, StorePhase};
