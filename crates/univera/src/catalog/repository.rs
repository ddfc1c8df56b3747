use super::domain::{Accommodation, College};
use crate::store::RepositoryError;

/// Storage abstraction over the two listing collections, loaded wholesale.
pub trait CatalogRepository: Send + Sync {
    fn colleges(&self) -> Result<Vec<College>, RepositoryError>;
    fn accommodations(&self) -> Result<Vec<Accommodation>, RepositoryError>;
    fn insert_college(&self, college: College) -> Result<College, RepositoryError>;
    fn insert_accommodation(
        &self,
        accommodation: Accommodation,
    ) -> Result<Accommodation, RepositoryError>;
}
