use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::accounts::{
    profile_router, ProfileRepository, ProfileService, ProfileUpdate, UserId, UserProfile,
};
use crate::catalog::{EntityId, EntityKind};
use crate::store::RepositoryError;

pub(super) const STUDENT: &str = "student-1";

pub(super) fn student() -> UserId {
    UserId(STUDENT.to_string())
}

#[derive(Clone)]
pub(super) struct MemoryProfiles {
    profiles: Arc<Mutex<HashMap<UserId, UserProfile>>>,
}

impl MemoryProfiles {
    pub(super) fn seeded() -> Self {
        let mut profile = UserProfile::new(student(), "student@example.com", "Student");
        profile.location = Some("Pune".to_string());
        profile.favorites.colleges = vec![EntityId::from("iitm")];
        let profiles = HashMap::from([(student(), profile)]);
        Self {
            profiles: Arc::new(Mutex::new(profiles)),
        }
    }

    pub(super) fn empty() -> Self {
        Self {
            profiles: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub(super) fn stored(&self, user_id: &UserId) -> Option<UserProfile> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        guard.get(user_id).cloned()
    }
}

impl ProfileRepository for MemoryProfiles {
    fn fetch(&self, user_id: &UserId) -> Result<Option<UserProfile>, RepositoryError> {
        Ok(self.stored(user_id))
    }

    fn add_favorite(
        &self,
        _user_id: &UserId,
        _kind: EntityKind,
        _id: &EntityId,
    ) -> Result<(), RepositoryError> {
        Ok(())
    }

    fn remove_favorite(
        &self,
        _user_id: &UserId,
        _kind: EntityKind,
        _id: &EntityId,
    ) -> Result<(), RepositoryError> {
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

pub(super) fn build_service<P: ProfileRepository + 'static>(profiles: P) -> ProfileService<P> {
    ProfileService::new(Arc::new(profiles))
}

pub(super) fn router_with_service<P: ProfileRepository + 'static>(
    service: ProfileService<P>,
) -> axum::Router {
    profile_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
