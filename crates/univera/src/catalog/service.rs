use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use super::domain::{Accommodation, CatalogEntity, College, EntityId, EntityKind};
use super::intake::{AccommodationSubmission, CatalogIntake, CollegeSubmission, IntakeViolation};
use super::repository::CatalogRepository;
use crate::accounts::{Identity, ProfileRepository};
use crate::listing::{
    accommodation_facets, college_facets, comparison_candidates, view, AccommodationFacets,
    AccommodationSearchParams, CollegeFacets, CollegeSearchParams, ComparisonError,
    ComparisonSelection, ComparisonTable, ListView,
};
use crate::store::RepositoryError;

/// Query string of the comparison endpoints: `ids=a,b,c&q=needle`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CompareParams {
    #[serde(default)]
    pub ids: String,
    #[serde(default)]
    pub q: String,
}

impl CompareParams {
    pub fn ids(&self) -> Vec<EntityId> {
        self.ids
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(EntityId::from)
            .collect()
    }
}

/// Read side of the listing screens plus admin-only intake.
pub struct CatalogService<C, P> {
    catalog: Arc<C>,
    profiles: Arc<P>,
    intake: CatalogIntake,
}

impl<C, P> CatalogService<C, P>
where
    C: CatalogRepository + 'static,
    P: ProfileRepository + 'static,
{
    pub fn new(catalog: Arc<C>, profiles: Arc<P>) -> Self {
        Self {
            catalog,
            profiles,
            intake: CatalogIntake,
        }
    }

    pub fn search_colleges(
        &self,
        params: &CollegeSearchParams,
    ) -> Result<ListView<College>, CatalogError> {
        let colleges = self.catalog.colleges()?;
        Ok(view(&colleges, &params.to_query(), params.sort_key()))
    }

    pub fn search_accommodations(
        &self,
        params: &AccommodationSearchParams,
    ) -> Result<ListView<Accommodation>, CatalogError> {
        let accommodations = self.catalog.accommodations()?;
        Ok(view(&accommodations, &params.to_query(), params.sort_key()))
    }

    pub fn college(&self, id: &EntityId) -> Result<College, CatalogError> {
        find(self.catalog.colleges()?, id)
    }

    pub fn accommodation(&self, id: &EntityId) -> Result<Accommodation, CatalogError> {
        find(self.catalog.accommodations()?, id)
    }

    pub fn college_facets(&self) -> Result<CollegeFacets, CatalogError> {
        Ok(college_facets(&self.catalog.colleges()?))
    }

    pub fn accommodation_facets(&self) -> Result<AccommodationFacets, CatalogError> {
        Ok(accommodation_facets(&self.catalog.accommodations()?))
    }

    /// Colleges offered in the comparison picker, excluding those already chosen.
    pub fn compare_candidates(&self, params: &CompareParams) -> Result<Vec<College>, CatalogError> {
        let colleges = self.catalog.colleges()?;
        let candidates = comparison_candidates(&colleges, &params.ids(), &params.q);
        Ok(candidates.into_iter().cloned().collect())
    }

    /// Build the comparison table for the requested ids, capped at the column limit.
    pub fn compare(&self, params: &CompareParams) -> Result<ComparisonTable, CatalogError> {
        let colleges = self.catalog.colleges()?;
        let mut selection = ComparisonSelection::default();
        selection.preselect(&colleges, &params.ids());

        let selected: Vec<&College> = selection
            .ids()
            .iter()
            .filter_map(|id| colleges.iter().find(|college| &college.id == id))
            .collect();
        Ok(ComparisonTable::build(&selected)?)
    }

    pub fn add_college(
        &self,
        identity: &Identity,
        submission: CollegeSubmission,
    ) -> Result<College, CatalogError> {
        self.require_admin(identity)?;
        let college = self.intake.college(submission)?;
        let stored = self.catalog.insert_college(college)?;
        info!(id = %stored.id, name = %stored.name, "college added");
        Ok(stored)
    }

    pub fn add_accommodation(
        &self,
        identity: &Identity,
        submission: AccommodationSubmission,
    ) -> Result<Accommodation, CatalogError> {
        self.require_admin(identity)?;
        let accommodation = self.intake.accommodation(submission)?;
        let stored = self.catalog.insert_accommodation(accommodation)?;
        info!(id = %stored.id, name = %stored.name, "accommodation added");
        Ok(stored)
    }

    fn require_admin(&self, identity: &Identity) -> Result<(), CatalogError> {
        let user_id = identity.user_id().ok_or(CatalogError::Unauthenticated)?;
        match self.profiles.fetch(user_id)? {
            Some(profile) if profile.is_admin() => Ok(()),
            _ => Err(CatalogError::Forbidden),
        }
    }
}

fn find<T: CatalogEntity>(entities: Vec<T>, id: &EntityId) -> Result<T, CatalogError> {
    entities
        .into_iter()
        .find(|entity| entity.entity_id() == id)
        .ok_or_else(|| CatalogError::NotFound {
            kind: T::KIND,
            id: id.clone(),
        })
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("sign in required")]
    Unauthenticated,
    #[error("admin role required")]
    Forbidden,
    #[error("{kind} '{id}' not found")]
    NotFound { kind: EntityKind, id: EntityId },
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Comparison(#[from] ComparisonError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
