//! In-memory filter/sort views shared by the college, accommodation and
//! comparison screens.

pub mod comparison;
pub mod facets;
pub mod params;
pub mod query;
mod view;

pub use comparison::{
    comparison_candidates, CompareTray, ComparisonError, ComparisonSelection, ComparisonTable,
    SelectionError, TrayToggle,
};
pub use facets::{accommodation_facets, college_facets, AccommodationFacets, CollegeFacets};
pub use params::{AccommodationSearchParams, CollegeSearchParams};
pub use query::{Attribute, ListQuery, PriceRange, Predicate, SortKey};
pub use view::{matches_text, satisfies, view, ListView, Listable, UNRANKED};
