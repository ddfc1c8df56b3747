//! Signed-in identity and the user profile document.
//!
//! Authentication itself happens upstream; the auth proxy forwards the verified
//! user id in the [`USER_ID_HEADER`] header. Everything here is either plain data
//! or the [`ProfileRepository`] seam backed by the document store.

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{EntityId, EntityKind};
use crate::store::RepositoryError;

pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use router::profile_router;
pub use service::{ProfileError, ProfileService};

/// Header carrying the verified user id of the caller.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Identifier wrapper for user accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Authentication state of the caller driving a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    SignedIn(UserId),
    SignedOut,
}

impl Identity {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| Identity::SignedIn(UserId(value.to_string())))
            .unwrap_or(Identity::SignedOut)
    }

    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Identity::SignedIn(user_id) => Some(user_id),
            Identity::SignedOut => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// Canonical favorite source: id arrays embedded in the profile document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFavorites {
    #[serde(default)]
    pub colleges: Vec<EntityId>,
    #[serde(default)]
    pub pgs: Vec<EntityId>,
}

impl ProfileFavorites {
    pub fn ids(&self, kind: EntityKind) -> &[EntityId] {
        match kind {
            EntityKind::College => &self.colleges,
            EntityKind::Accommodation => &self.pgs,
        }
    }

    pub fn ids_mut(&mut self, kind: EntityKind) -> &mut Vec<EntityId> {
        match kind {
            EntityKind::College => &mut self.colleges,
            EntityKind::Accommodation => &mut self.pgs,
        }
    }

    pub fn contains(&self, kind: EntityKind, id: &EntityId) -> bool {
        self.ids(kind).contains(id)
    }

    /// Set-insert; returns `false` when the id was already present.
    pub fn insert(&mut self, kind: EntityKind, id: EntityId) -> bool {
        let ids = self.ids_mut(kind);
        if ids.contains(&id) {
            return false;
        }
        ids.push(id);
        true
    }

    /// Set-remove; returns `false` when the id was not present.
    pub fn remove(&mut self, kind: EntityKind, id: &EntityId) -> bool {
        let ids = self.ids_mut(kind);
        let before = ids.len();
        ids.retain(|existing| existing != id);
        ids.len() != before
    }

    pub fn total(&self) -> usize {
        self.colleges.len() + self.pgs.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    pub notifications: bool,
    pub newsletter: bool,
    pub dark_mode: bool,
    pub language: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            notifications: true,
            newsletter: false,
            dark_mode: false,
            language: "en".to_string(),
        }
    }
}

/// Profile document stored per user. Only `role` and `favorites` are consulted by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: UserId,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub login_count: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub favorites: ProfileFavorites,
}

fn default_active() -> bool {
    true
}

impl UserProfile {
    pub fn new(uid: UserId, email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            uid,
            email: email.into(),
            display_name: display_name.into(),
            photo_url: None,
            role: Role::User,
            email_verified: false,
            phone_number: None,
            location: None,
            interests: Vec::new(),
            created_at: None,
            updated_at: None,
            last_login_at: None,
            login_count: 0,
            is_active: true,
            preferences: Preferences::default(),
            favorites: ProfileFavorites::default(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Partial edit from the profile screen. Absent fields are left untouched;
/// `preferences` replaces the whole block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[serde(default)]
    pub preferences: Option<Preferences>,
}

impl ProfileUpdate {
    /// Trim text, drop blank interests, and turn blank phone/location into "unset".
    pub fn normalized(self) -> Self {
        Self {
            display_name: self.display_name.map(|name| name.trim().to_string()),
            phone_number: self.phone_number.map(|phone| phone.trim().to_string()),
            location: self.location.map(|location| location.trim().to_string()),
            interests: self.interests.map(|interests| {
                let mut kept: Vec<String> = Vec::with_capacity(interests.len());
                for interest in interests {
                    let interest = interest.trim();
                    if !interest.is_empty() && !kept.iter().any(|existing| existing == interest) {
                        kept.push(interest.to_string());
                    }
                }
                kept
            }),
            preferences: self.preferences.map(|mut preferences| {
                preferences.language = preferences.language.trim().to_string();
                preferences
            }),
        }
    }

    /// Write the edit into `profile` and stamp `updated_at`.
    pub fn apply(&self, profile: &mut UserProfile, now: DateTime<Utc>) {
        if let Some(name) = &self.display_name {
            profile.display_name = name.clone();
        }
        if let Some(phone) = &self.phone_number {
            profile.phone_number = Some(phone.clone()).filter(|phone| !phone.is_empty());
        }
        if let Some(location) = &self.location {
            profile.location = Some(location.clone()).filter(|location| !location.is_empty());
        }
        if let Some(interests) = &self.interests {
            profile.interests = interests.clone();
        }
        if let Some(preferences) = &self.preferences {
            profile.preferences = preferences.clone();
        }
        profile.updated_at = Some(now);
    }
}

/// Storage abstraction over the profile documents.
///
/// `add_favorite`/`remove_favorite` are idempotent set operations on the canonical
/// list; serializing concurrent writes is the store's job.
pub trait ProfileRepository: Send + Sync {
    fn fetch(&self, user_id: &UserId) -> Result<Option<UserProfile>, RepositoryError>;
    fn add_favorite(
        &self,
        user_id: &UserId,
        kind: EntityKind,
        id: &EntityId,
    ) -> Result<(), RepositoryError>;
    fn remove_favorite(
        &self,
        user_id: &UserId,
        kind: EntityKind,
        id: &EntityId,
    ) -> Result<(), RepositoryError>;
    /// Apply `update` to an existing profile; `NotFound` when there is no document.
    fn update(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, RepositoryError>;
}
