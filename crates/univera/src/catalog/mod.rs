//! Catalog of colleges and accommodations: document shapes, store seam, snapshot
//! loading, admin intake, and the listing/comparison endpoints.

pub mod domain;
pub mod intake;
pub(crate) mod lenient;
pub mod repository;
pub mod router;
pub mod service;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use domain::{
    Accommodation, AccommodationType, Branch, CatalogEntity, College, CollegeDistance, CollegeType,
    Contact, EntityId, EntityKind, Fees, Gender, Hostels, Infrastructure, Placement,
    UnknownEntityKind,
};
pub use intake::{
    AccommodationSubmission, BranchSubmission, CatalogIntake, CollegeSubmission, IntakeViolation,
};
pub use repository::CatalogRepository;
pub use router::catalog_router;
pub use service::{CatalogError, CatalogService, CompareParams};
pub use snapshot::{export_colleges_csv, CatalogExportError, CatalogLoadError, CatalogSnapshot};
