use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::accounts::{ProfileRepository, ProfileUpdate, UserId, UserProfile};
use crate::catalog::{Accommodation, CatalogRepository, College, EntityId, EntityKind};
use crate::favorites::{
    favorites_router, FavoritesService, LegacyFavoriteRecord, LegacyFavoriteRepository,
};
use crate::store::RepositoryError;

pub(super) fn college(id: &str, rating: Option<f64>, nirf: Option<u32>) -> College {
    serde_json::from_value(json!({
        "id": id,
        "name": format!("College {id}"),
        "location": "Chennai",
        "state": "Tamil Nadu",
        "rating": rating,
        "nirf_ranking": nirf,
    }))
    .expect("college fixture")
}

pub(super) fn accommodation(id: &str) -> Accommodation {
    serde_json::from_value(json!({
        "id": id,
        "name": format!("Stay {id}"),
        "type": "PG",
        "location": "Guindy, Chennai",
        "rent": 9000,
    }))
    .expect("accommodation fixture")
}

pub(super) fn ids(values: &[&str]) -> Vec<EntityId> {
    values.iter().copied().map(EntityId::from).collect()
}

pub(super) fn user() -> UserId {
    UserId("student-1".to_string())
}

#[derive(Default, Clone)]
pub(super) struct MemoryProfiles {
    pub(super) profiles: Arc<Mutex<HashMap<UserId, UserProfile>>>,
}

impl MemoryProfiles {
    pub(super) fn with_favorites(colleges: &[&str], pgs: &[&str]) -> Self {
        let mut profile = UserProfile::new(user(), "student@example.com", "Student");
        profile.favorites.colleges = ids(colleges);
        profile.favorites.pgs = ids(pgs);
        let repository = Self::default();
        repository
            .profiles
            .lock()
            .expect("profile mutex poisoned")
            .insert(user(), profile);
        repository
    }

    pub(super) fn favorites_of(&self, user_id: &UserId) -> Option<(Vec<EntityId>, Vec<EntityId>)> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        guard.get(user_id).map(|profile| {
            (
                profile.favorites.colleges.clone(),
                profile.favorites.pgs.clone(),
            )
        })
    }
}

impl ProfileRepository for MemoryProfiles {
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
        update.apply(profile, chrono::Utc::now());
        Ok(profile.clone())
    }
}

pub(super) struct UnavailableProfiles;

impl ProfileRepository for UnavailableProfiles {
    fn fetch(&self, _user_id: &UserId) -> Result<Option<UserProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("profile store offline".to_string()))
    }

    fn add_favorite(
        &self,
        _user_id: &UserId,
        _kind: EntityKind,
        _id: &EntityId,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("profile store offline".to_string()))
    }

    fn remove_favorite(
        &self,
        _user_id: &UserId,
        _kind: EntityKind,
        _id: &EntityId,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("profile store offline".to_string()))
    }

    fn update(
        &self,
        _user_id: &UserId,
        _update: &ProfileUpdate,
    ) -> Result<UserProfile, RepositoryError> {
        Err(RepositoryError::Unavailable("profile store offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryLegacy {
    records: Arc<Mutex<HashMap<UserId, Vec<LegacyFavoriteRecord>>>>,
}

impl MemoryLegacy {
    pub(super) fn with_records(records: Vec<LegacyFavoriteRecord>) -> Self {
        let repository = Self::default();
        repository
            .records
            .lock()
            .expect("legacy mutex poisoned")
            .insert(user(), records);
        repository
    }
}

impl LegacyFavoriteRepository for MemoryLegacy {
    fn legacy_favorites(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<LegacyFavoriteRecord>, RepositoryError> {
        let guard = self.records.lock().expect("legacy mutex poisoned");
        Ok(guard.get(user_id).cloned().unwrap_or_default())
    }
}

pub(super) struct UnavailableLegacy;

impl LegacyFavoriteRepository for UnavailableLegacy {
    fn legacy_favorites(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<LegacyFavoriteRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("permission denied".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryCatalog {
    colleges: Vec<College>,
    accommodations: Vec<Accommodation>,
}

impl MemoryCatalog {
    pub(super) fn new(colleges: Vec<College>, accommodations: Vec<Accommodation>) -> Self {
        Self {
            colleges,
            accommodations,
        }
    }
}

impl CatalogRepository for MemoryCatalog {
    fn colleges(&self) -> Result<Vec<College>, RepositoryError> {
        Ok(self.colleges.clone())
    }

    fn accommodations(&self) -> Result<Vec<Accommodation>, RepositoryError> {
        Ok(self.accommodations.clone())
    }

    fn insert_college(&self, _college: College) -> Result<College, RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn insert_accommodation(
        &self,
        _accommodation: Accommodation,
    ) -> Result<Accommodation, RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }
}

pub(super) fn catalog() -> MemoryCatalog {
    MemoryCatalog::new(
        vec![college("a", Some(4.5), Some(10)), college("b", Some(3.9), None)],
        vec![accommodation("p1"), accommodation("p2")],
    )
}

pub(super) type MemoryService = FavoritesService<MemoryProfiles, MemoryLegacy, MemoryCatalog>;

pub(super) fn build_service(
    profiles: MemoryProfiles,
    legacy: MemoryLegacy,
) -> (MemoryService, Arc<MemoryProfiles>) {
    let profiles = Arc::new(profiles);
    let service = FavoritesService::new(profiles.clone(), Arc::new(legacy), Arc::new(catalog()));
    (service, profiles)
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    favorites_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
