use std::sync::Arc;

use tracing::info;

use super::{Identity, ProfileRepository, ProfileUpdate, UserProfile};
use crate::store::RepositoryError;

/// Profile screen: read and edit the caller's own document.
pub struct ProfileService<P> {
    profiles: Arc<P>,
}

impl<P> ProfileService<P>
where
    P: ProfileRepository + 'static,
{
    pub fn new(profiles: Arc<P>) -> Self {
        Self { profiles }
    }

    pub fn profile(&self, identity: &Identity) -> Result<UserProfile, ProfileError> {
        let user_id = identity.user_id().ok_or(ProfileError::Unauthenticated)?;
        self.profiles
            .fetch(user_id)?
            .ok_or(ProfileError::NotFound)
    }

    pub fn update(
        &self,
        identity: &Identity,
        update: ProfileUpdate,
    ) -> Result<UserProfile, ProfileError> {
        let user_id = identity.user_id().ok_or(ProfileError::Unauthenticated)?;
        let update = update.normalized();
        if matches!(update.display_name.as_deref(), Some("")) {
            return Err(ProfileError::BlankDisplayName);
        }
        if matches!(&update.preferences, Some(preferences) if preferences.language.is_empty()) {
            return Err(ProfileError::BlankLanguage);
        }

        let profile = match self.profiles.update(user_id, &update) {
            Ok(profile) => profile,
            Err(RepositoryError::NotFound) => return Err(ProfileError::NotFound),
            Err(error) => return Err(ProfileError::Repository(error)),
        };
        info!(user = %user_id.0, "profile updated");
        Ok(profile)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("sign in required")]
    Unauthenticated,
    #[error("profile not found")]
    NotFound,
    #[error("display name cannot be blank")]
    BlankDisplayName,
    #[error("language cannot be blank")]
    BlankLanguage,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
