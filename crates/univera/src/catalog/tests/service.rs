use std::sync::Arc;

use super::common::*;
use crate::accounts::{Identity, UserId};
use crate::catalog::{CatalogError, CatalogService, CompareParams, EntityId};
use crate::listing::{CollegeSearchParams, ComparisonError, SortKey};
use crate::store::RepositoryError;

fn identity(user: &str) -> Identity {
    Identity::SignedIn(UserId(user.to_string()))
}

fn ids_of(items: &[crate::catalog::College]) -> Vec<&str> {
    items.iter().map(|college| college.id.as_str()).collect()
}

#[test]
fn search_filters_by_state_and_sorts_by_price() {
    let (service, _) = build_service();
    let params = CollegeSearchParams {
        state: Some("Tamil Nadu".to_string()),
        sort: Some(SortKey::Price),
        ..CollegeSearchParams::default()
    };

    let result = service.search_colleges(&params).expect("search");
    assert_eq!(ids_of(&result.items), vec!["cmc", "iitm"]);
    assert_eq!(result.count, 2);
}

#[test]
fn fee_range_excludes_colleges_without_fees() {
    let (service, _) = build_service();
    let params = CollegeSearchParams {
        fee_max: Some(1_000_000.0),
        ..CollegeSearchParams::default()
    };

    let result = service.search_colleges(&params).expect("search");
    assert!(!ids_of(&result.items).contains(&"rvce"));
}

#[test]
fn unknown_college_is_not_found() {
    let (service, _) = build_service();
    let error = service
        .college(&EntityId::from("nowhere"))
        .expect_err("missing college");
    assert!(matches!(error, CatalogError::NotFound { .. }));
}

#[test]
fn facets_follow_encounter_order() {
    let (service, _) = build_service();
    let facets = service.college_facets().expect("facets");
    assert_eq!(facets.states, vec!["Tamil Nadu", "Karnataka"]);
    assert_eq!(facets.branch_categories, vec!["Engineering", "Medical"]);

    let facets = service.accommodation_facets().expect("facets");
    assert_eq!(facets.localities, vec!["Bengaluru", "Chennai"]);
    assert_eq!(facets.food_types, vec!["Veg", "Non-Veg"]);
}

#[test]
fn compare_builds_table_for_requested_colleges() {
    let (service, _) = build_service();
    let params = CompareParams {
        ids: "cmc, iitm".to_string(),
        q: String::new(),
    };

    let table = service.compare(&params).expect("comparison");
    let columns: Vec<&str> = table.columns.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(columns, vec!["iitm", "cmc"]);
    let nirf = table
        .rows
        .iter()
        .find(|row| row.key == "nirf")
        .expect("nirf row");
    assert_eq!(nirf.values, vec!["1", "3"]);
    assert!(nirf.differs);
}

#[test]
fn compare_needs_two_known_colleges() {
    let (service, _) = build_service();
    let params = CompareParams {
        ids: "iitm,ghost".to_string(),
        q: String::new(),
    };
    let error = service.compare(&params).expect_err("single college");
    assert!(matches!(
        error,
        CatalogError::Comparison(ComparisonError::TooFew { found: 1, .. })
    ));
}

#[test]
fn candidates_exclude_selected_colleges() {
    let (service, _) = build_service();
    let params = CompareParams {
        ids: "iitm".to_string(),
        q: "tamil".to_string(),
    };
    let candidates = service.compare_candidates(&params).expect("candidates");
    assert_eq!(ids_of(&candidates), vec!["cmc"]);
}

#[test]
fn only_admins_may_add_colleges() {
    let (service, catalog) = build_service();

    let error = service
        .add_college(&Identity::SignedOut, college_submission())
        .expect_err("signed out");
    assert!(matches!(error, CatalogError::Unauthenticated));

    let error = service
        .add_college(&identity(STUDENT), college_submission())
        .expect_err("not an admin");
    assert!(matches!(error, CatalogError::Forbidden));

    let stored = service
        .add_college(&identity(ADMIN), college_submission())
        .expect("admin adds");
    assert!(catalog.college_ids().contains(&stored.id));
}

#[test]
fn repository_failures_propagate() {
    let service = CatalogService::new(
        Arc::new(UnavailableCatalog),
        Arc::new(StaticProfiles::default()),
    );
    let error = service
        .search_colleges(&CollegeSearchParams::default())
        .expect_err("catalog offline");
    assert!(matches!(
        error,
        CatalogError::Repository(RepositoryError::Unavailable(_))
    ));
}
