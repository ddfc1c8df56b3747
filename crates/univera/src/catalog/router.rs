use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::json;

use super::domain::EntityId;
use super::intake::{AccommodationSubmission, CollegeSubmission};
use super::repository::CatalogRepository;
use super::service::{CatalogError, CatalogService, CompareParams};
use crate::accounts::{Identity, ProfileRepository};
use crate::listing::{AccommodationSearchParams, CollegeSearchParams};
use crate::store::RepositoryError;

type SharedService<C, P> = State<Arc<CatalogService<C, P>>>;

/// Router for the listing, detail, facet, comparison, and admin intake endpoints.
pub fn catalog_router<C, P>(service: Arc<CatalogService<C, P>>) -> Router
where
    C: CatalogRepository + 'static,
    P: ProfileRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/colleges",
            get(search_colleges_handler::<C, P>).post(add_college_handler::<C, P>),
        )
        .route(
            "/api/v1/colleges/facets",
            get(college_facets_handler::<C, P>),
        )
        .route("/api/v1/colleges/:id", get(college_handler::<C, P>))
        .route(
            "/api/v1/pgs",
            get(search_accommodations_handler::<C, P>).post(add_accommodation_handler::<C, P>),
        )
        .route("/api/v1/pgs/facets", get(accommodation_facets_handler::<C, P>))
        .route("/api/v1/pgs/:id", get(accommodation_handler::<C, P>))
        .route(
            "/api/v1/compare/candidates",
            get(compare_candidates_handler::<C, P>),
        )
        .route("/api/v1/compare", get(compare_handler::<C, P>))
        .with_state(service)
}

pub(crate) async fn search_colleges_handler<C, P>(
    State(service): SharedService<C, P>,
    Query(params): Query<CollegeSearchParams>,
) -> Response
where
    C: CatalogRepository + 'static,
    P: ProfileRepository + 'static,
{
    respond(StatusCode::OK, service.search_colleges(&params))
}

pub(crate) async fn search_accommodations_handler<C, P>(
    State(service): SharedService<C, P>,
    Query(params): Query<AccommodationSearchParams>,
) -> Response
where
    C: CatalogRepository + 'static,
    P: ProfileRepository + 'static,
{
    respond(StatusCode::OK, service.search_accommodations(&params))
}

pub(crate) async fn college_handler<C, P>(
    State(service): SharedService<C, P>,
    Path(id): Path<String>,
) -> Response
where
    C: CatalogRepository + 'static,
    P: ProfileRepository + 'static,
{
    respond(StatusCode::OK, service.college(&EntityId(id)))
}

pub(crate) async fn accommodation_handler<C, P>(
    State(service): SharedService<C, P>,
    Path(id): Path<String>,
) -> Response
where
    C: CatalogRepository + 'static,
    P: ProfileRepository + 'static,
{
    respond(StatusCode::OK, service.accommodation(&EntityId(id)))
}

pub(crate) async fn college_facets_handler<C, P>(State(service): SharedService<C, P>) -> Response
where
    C: CatalogRepository + 'static,
    P: ProfileRepository + 'static,
{
    respond(StatusCode::OK, service.college_facets())
}

pub(crate) async fn accommodation_facets_handler<C, P>(
    State(service): SharedService<C, P>,
) -> Response
where
    C: CatalogRepository + 'static,
    P: ProfileRepository + 'static,
{
    respond(StatusCode::OK, service.accommodation_facets())
}

pub(crate) async fn compare_candidates_handler<C, P>(
    State(service): SharedService<C, P>,
    Query(params): Query<CompareParams>,
) -> Response
where
    C: CatalogRepository + 'static,
    P: ProfileRepository + 'static,
{
    respond(StatusCode::OK, service.compare_candidates(&params))
}

pub(crate) async fn compare_handler<C, P>(
    State(service): SharedService<C, P>,
    Query(params): Query<CompareParams>,
) -> Response
where
    C: CatalogRepository + 'static,
    P: ProfileRepository + 'static,
{
    respond(StatusCode::OK, service.compare(&params))
}

pub(crate) async fn add_college_handler<C, P>(
    State(service): SharedService<C, P>,
    headers: HeaderMap,
    axum::Json(submission): axum::Json<CollegeSubmission>,
) -> Response
where
    C: CatalogRepository + 'static,
    P: ProfileRepository + 'static,
{
    let identity = Identity::from_headers(&headers);
    respond(
        StatusCode::CREATED,
        service.add_college(&identity, submission),
    )
}

pub(crate) async fn add_accommodation_handler<C, P>(
    State(service): SharedService<C, P>,
    headers: HeaderMap,
    axum::Json(submission): axum::Json<AccommodationSubmission>,
) -> Response
where
    C: CatalogRepository + 'static,
    P: ProfileRepository + 'static,
{
    let identity = Identity::from_headers(&headers);
    respond(
        StatusCode::CREATED,
        service.add_accommodation(&identity, submission),
    )
}

fn respond<T: Serialize>(status: StatusCode, result: Result<T, CatalogError>) -> Response {
    match result {
        Ok(body) => (status, axum::Json(body)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: CatalogError) -> Response {
    let status = match &error {
        CatalogError::Unauthenticated => StatusCode::UNAUTHORIZED,
        CatalogError::Forbidden => StatusCode::FORBIDDEN,
        CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
        CatalogError::Intake(_) | CatalogError::Comparison(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CatalogError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        CatalogError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
