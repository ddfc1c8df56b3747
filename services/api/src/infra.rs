use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use univera::accounts::{ProfileRepository, ProfileUpdate, UserId, UserProfile};
use univera::catalog::{
    Accommodation, CatalogRepository, CatalogSnapshot, College, EntityId, EntityKind,
};
use univera::favorites::{LegacyFavoriteRecord, LegacyFavoriteRepository};
use univera::store::RepositoryError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCatalog {
    colleges: Arc<Mutex<Vec<College>>>,
    accommodations: Arc<Mutex<Vec<Accommodation>>>,
}

impl InMemoryCatalog {
    pub(crate) fn new(colleges: Vec<College>, accommodations: Vec<Accommodation>) -> Self {
        Self {
            colleges: Arc::new(Mutex::new(colleges)),
            accommodations: Arc::new(Mutex::new(accommodations)),
        }
    }
}

impl CatalogRepository for InMemoryCatalog {
    fn colleges(&self) -> Result<Vec<College>, RepositoryError> {
        let guard = self.colleges.lock().expect("catalog mutex poisoned");
        Ok(guard.clone())
    }

    fn accommodations(&self) -> Result<Vec<Accommodation>, RepositoryError> {
        let guard = self.accommodations.lock().expect("catalog mutex poisoned");
        Ok(guard.clone())
    }

    fn insert_college(&self, college: College) -> Result<College, RepositoryError> {
        let mut guard = self.colleges.lock().expect("catalog mutex poisoned");
        if guard.iter().any(|existing| existing.id == college.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(college.clone());
        Ok(college)
    }

    fn insert_accommodation(
        &self,
        accommodation: Accommodation,
    ) -> Result<Accommodation, RepositoryError> {
        let mut guard = self.accommodations.lock().expect("catalog mutex poisoned");
        if guard.iter().any(|existing| existing.id == accommodation.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(accommodation.clone());
        Ok(accommodation)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileRepository {
    profiles: Arc<Mutex<HashMap<UserId, UserProfile>>>,
}

impl InMemoryProfileRepository {
    pub(crate) fn new(profiles: Vec<UserProfile>) -> Self {
        let profiles = profiles
            .into_iter()
            .map(|profile| (profile.uid.clone(), profile))
            .collect();
        Self {
            profiles: Arc::new(Mutex::new(profiles)),
        }
    }
}

impl ProfileRepository for InMemoryProfileRepository {
    fn fetch(&self, user_id: &UserId) -> Result<Option<UserProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        Ok(guard.get(user_id).cloned())
    }

    fn add_favorite(
        &self,
        user_id: &UserId,
        kind: EntityKind,
        id: &EntityId,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.profiles.lock().expect("profile mutex poisoned");
        let profile = guard
            .entry(user_id.clone())
            .or_insert_with(|| UserProfile::new(user_id.clone(), "", ""));
        profile.favorites.insert(kind, id.clone());
        Ok(())
    }

    fn remove_favorite(
        &self,
        user_id: &UserId,
        kind: EntityKind,
        id: &EntityId,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.profiles.lock().expect("profile mutex poisoned");
        if let Some(profile) = guard.get_mut(user_id) {
            profile.favorites.remove(kind, id);
        }
        Ok(())
    }

    fn update(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, RepositoryError> {
        let mut guard = self.profiles.lock().expect("profile mutex poisoned");
        let profile = guard.get_mut(user_id).ok_or(RepositoryError::NotFound)?;
        update.apply(profile, Utc::now());
        Ok(profile.clone())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryLegacyFavorites {
    records: Arc<HashMap<UserId, Vec<LegacyFavoriteRecord>>>,
}

impl LegacyFavoriteRepository for InMemoryLegacyFavorites {
    fn legacy_favorites(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<LegacyFavoriteRecord>, RepositoryError> {
        Ok(self.records.get(user_id).cloned().unwrap_or_default())
    }
}

/// Store adapters sharing one seeded snapshot.
#[derive(Default, Clone)]
pub(crate) struct InMemoryStores {
    pub(crate) catalog: InMemoryCatalog,
    pub(crate) profiles: InMemoryProfileRepository,
    pub(crate) legacy: InMemoryLegacyFavorites,
}

impl InMemoryStores {
    pub(crate) fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        let CatalogSnapshot {
            colleges,
            pgs,
            users,
            legacy_favorites,
        } = snapshot;

        let records = legacy_favorites
            .into_iter()
            .map(|(user, records)| (UserId(user), records))
            .collect();

        Self {
            catalog: InMemoryCatalog::new(colleges, pgs),
            profiles: InMemoryProfileRepository::new(users),
            legacy: InMemoryLegacyFavorites {
                records: Arc::new(records),
            },
        }
    }
}
