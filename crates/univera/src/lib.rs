//! UniVera directory service: college and student accommodation listings,
//! per-user favorites, side-by-side comparison and an assistant chat relay.
//!
//! The favorites reconciler ([`favorites::reconcile`]) and the listing view
//! ([`listing::view`]) are pure functions over already-loaded data. Everything
//! that touches a store or the network sits behind the repository and
//! transport traits so the HTTP layer can be exercised with in-memory adapters.

pub mod accounts;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod favorites;
pub mod listing;
pub mod store;
pub mod telemetry;
