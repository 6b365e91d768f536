//! Reference screens built on the store.
//!
//! Each demo is an MVI feature module (`state`, `event`, `reducer`,
//! `feedback`). Rendering is left to the caller: it reads `Store::state`
//! and forwards user intent with `Store::send`.

pub mod movies;
pub mod traffic_light;
