use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::service::{ProfileError, ProfileService};
use super::{Identity, ProfileRepository, ProfileUpdate};

pub fn profile_router<P>(service: Arc<ProfileService<P>>) -> Router
where
    P: ProfileRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/profile",
            get(profile_handler::<P>).patch(update_handler::<P>),
        )
        .with_state(service)
}

pub(crate) async fn profile_handler<P>(
    State(service): State<Arc<ProfileService<P>>>,
    headers: HeaderMap,
) -> Response
where
    P: ProfileRepository + 'static,
{
    let identity = Identity::from_headers(&headers);
    match service.profile(&identity) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<P>(
    State(service): State<Arc<ProfileService<P>>>,
    headers: HeaderMap,
    axum::Json(update): axum::Json<ProfileUpdate>,
) -> Response
where
    P: ProfileRepository + 'static,
{
    let identity = Identity::from_headers(&headers);
    match service.update(&identity, update) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ProfileError) -> Response {
    let status = match &error {
        ProfileError::Unauthenticated => StatusCode::UNAUTHORIZED,
        ProfileError::NotFound => StatusCode::NOT_FOUND,
        ProfileError::BlankDisplayName | ProfileError::BlankLanguage => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ProfileError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
