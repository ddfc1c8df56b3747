use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::reconcile::{project, reconcile, FavoriteEntities, MasterLists, MergedFavorites};
use super::repository::LegacyFavoriteRepository;
use crate::accounts::{Identity, ProfileFavorites, ProfileRepository, UserId};
use crate::catalog::{Accommodation, CatalogRepository, College, EntityId, EntityKind};
use crate::store::RepositoryError;

/// Service wiring the reconciler to the profile, legacy, and catalog stores.
pub struct FavoritesService<P, L, C> {
    profiles: Arc<P>,
    legacy: Arc<L>,
    catalog: Arc<C>,
}

/// Merged ids plus the entities they resolve to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FavoritesOverview {
    pub ids: MergedFavorites,
    pub colleges: Vec<College>,
    pub pgs: Vec<Accommodation>,
}

impl FavoritesOverview {
    fn new(ids: MergedFavorites, entities: FavoriteEntities) -> Self {
        Self {
            ids,
            colleges: entities.colleges,
            pgs: entities.accommodations,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    Added,
    Removed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FavoriteCounts {
    pub colleges: usize,
    pub pgs: usize,
    pub total: usize,
}

impl From<&ProfileFavorites> for FavoriteCounts {
    fn from(favorites: &ProfileFavorites) -> Self {
        let colleges = favorites.ids(EntityKind::College).len();
        let pgs = favorites.ids(EntityKind::Accommodation).len();
        Self {
            colleges,
            pgs,
            total: colleges + pgs,
        }
    }
}

impl<P, L, C> FavoritesService<P, L, C>
where
    P: ProfileRepository + 'static,
    L: LegacyFavoriteRepository + 'static,
    C: CatalogRepository + 'static,
{
    pub fn new(profiles: Arc<P>, legacy: Arc<L>, catalog: Arc<C>) -> Self {
        Self {
            profiles,
            legacy,
            catalog,
        }
    }

    /// Reconcile and project the signed-in user's favorites.
    ///
    /// A failing legacy store degrades to "no legacy records"; profile and catalog
    /// failures are reported so callers can tell them apart from an empty list.
    pub fn load(&self, identity: &Identity) -> Result<FavoritesOverview, FavoritesError> {
        let user_id = signed_in(identity)?;
        let canonical = self.canonical(user_id)?;

        let legacy = match self.legacy.legacy_favorites(user_id) {
            Ok(records) => records,
            Err(error) => {
                warn!(user = %user_id.0, %error, "legacy favorites unavailable; skipping");
                Vec::new()
            }
        };

        let colleges = self.catalog.colleges().map_err(FavoritesError::Catalog)?;
        let accommodations = self
            .catalog
            .accommodations()
            .map_err(FavoritesError::Catalog)?;
        let masters = MasterLists::new(&colleges, &accommodations);

        let merged = reconcile(&canonical, &legacy, &masters);
        let entities = project(&merged, &masters);
        debug!(
            user = %user_id.0,
            colleges = entities.colleges.len(),
            pgs = entities.accommodations.len(),
            "favorites reconciled"
        );

        Ok(FavoritesOverview::new(merged, entities))
    }

    /// Remove the id when it is already a canonical favorite, otherwise add it.
    pub fn toggle(
        &self,
        identity: &Identity,
        kind: EntityKind,
        id: &EntityId,
    ) -> Result<ToggleOutcome, FavoritesError> {
        let user_id = signed_in(identity)?;
        let canonical = self.canonical(user_id)?;

        if canonical.contains(kind, id) {
            self.profiles
                .remove_favorite(user_id, kind, id)
                .map_err(FavoritesError::Write)?;
            Ok(ToggleOutcome::Removed)
        } else {
            self.profiles
                .add_favorite(user_id, kind, id)
                .map_err(FavoritesError::Write)?;
            Ok(ToggleOutcome::Added)
        }
    }

    /// Canonical counts for the header badge; legacy records are not counted.
    pub fn badge_count(&self, identity: &Identity) -> Result<FavoriteCounts, FavoritesError> {
        let user_id = signed_in(identity)?;
        let canonical = self.canonical(user_id)?;
        Ok(FavoriteCounts::from(&canonical))
    }

    fn canonical(&self, user_id: &UserId) -> Result<ProfileFavorites, FavoritesError> {
        let profile = self
            .profiles
            .fetch(user_id)
            .map_err(FavoritesError::Profile)?;
        Ok(profile.map(|profile| profile.favorites).unwrap_or_default())
    }
}

fn signed_in(identity: &Identity) -> Result<&UserId, FavoritesError> {
    identity.user_id().ok_or(FavoritesError::Unauthenticated)
}

#[derive(Debug, thiserror::Error)]
pub enum FavoritesError {
    #[error("sign in to manage favorites")]
    Unauthenticated,
    #[error("failed to load favorites: {0}")]
    Profile(RepositoryError),
    #[error("failed to load catalog: {0}")]
    Catalog(RepositoryError),
    #[error("failed to update favorites: {0}")]
    Write(RepositoryError),
}
