use super::legacy::LegacyFavoriteRecord;
use crate::accounts::UserId;
use crate::store::RepositoryError;

/// Read-only access to the per-user legacy favorites collection.
pub trait LegacyFavoriteRepository: Send + Sync {
    fn legacy_favorites(&self, user_id: &UserId)
        -> Result<Vec<LegacyFavoriteRecord>, RepositoryError>;
}
