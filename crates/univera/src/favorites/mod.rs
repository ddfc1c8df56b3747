//! Favorites: canonical profile ids reconciled with the legacy per-user records.
//!
//! [`reconcile`] and [`project`] are pure; [`FavoritesService`] does the store
//! I/O around them and the router exposes it over HTTP.

pub mod legacy;
pub mod reconcile;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use legacy::{LegacyFavoriteRecord, LegacyRecord};
pub use reconcile::{
    project, reconcile, FavoriteEntities, MasterIndex, MasterLists, MergedFavorites,
};
pub use repository::LegacyFavoriteRepository;
pub use router::favorites_router;
pub use service::{
    FavoriteCounts, FavoritesError, FavoritesOverview, FavoritesService, ToggleOutcome,
};
