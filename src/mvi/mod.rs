//! Model-View-Intent (MVI) primitives shared by every store.
//!
//! # Architecture
//!
//! ```text
//! Event ──→ Reducer ──→ State ──→ Feedback ──→ Effect
//!   ↑                                            │
//!   └────────────────────────────────────────────┘
//! ```
//!
//! - **State**: Value owned by a store, replaced wholesale on every event
//! - **Event**: User intent or the outcome of an effect
//! - **Reducer**: Pure function that folds an event into state

mod event;
mod reducer;
mod state;

pub use event::Event;
pub use reducer::Reducer;
pub use state::State;
