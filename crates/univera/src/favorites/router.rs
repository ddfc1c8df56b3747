use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::repository::LegacyFavoriteRepository;
use super::service::{FavoritesError, FavoritesService};
use crate::accounts::{Identity, ProfileRepository};
use crate::catalog::{CatalogRepository, EntityId, EntityKind};

/// Router exposing the favorites page, toggle action, and header badge.
pub fn favorites_router<P, L, C>(service: Arc<FavoritesService<P, L, C>>) -> Router
where
    P: ProfileRepository + 'static,
    L: LegacyFavoriteRepository + 'static,
    C: CatalogRepository + 'static,
{
    Router::new()
        .route("/api/v1/favorites", get(list_handler::<P, L, C>))
        .route("/api/v1/favorites/count", get(count_handler::<P, L, C>))
        .route(
            "/api/v1/favorites/:kind/:id/toggle",
            post(toggle_handler::<P, L, C>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<P, L, C>(
    State(service): State<Arc<FavoritesService<P, L, C>>>,
    headers: HeaderMap,
) -> Response
where
    P: ProfileRepository + 'static,
    L: LegacyFavoriteRepository + 'static,
    C: CatalogRepository + 'static,
{
    let identity = Identity::from_headers(&headers);
    match service.load(&identity) {
        Ok(overview) => (StatusCode::OK, axum::Json(overview)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn count_handler<P, L, C>(
    State(service): State<Arc<FavoritesService<P, L, C>>>,
    headers: HeaderMap,
) -> Response
where
    P: ProfileRepository + 'static,
    L: LegacyFavoriteRepository + 'static,
    C: CatalogRepository + 'static,
{
    let identity = Identity::from_headers(&headers);
    match service.badge_count(&identity) {
        Ok(counts) => (StatusCode::OK, axum::Json(counts)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn toggle_handler<P, L, C>(
    State(service): State<Arc<FavoritesService<P, L, C>>>,
    headers: HeaderMap,
    Path((kind, id)): Path<(String, String)>,
) -> Response
where
    P: ProfileRepository + 'static,
    L: LegacyFavoriteRepository + 'static,
    C: CatalogRepository + 'static,
{
    let kind = match kind.parse::<EntityKind>() {
        Ok(kind) => kind,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::NOT_FOUND, axum::Json(payload)).into_response();
        }
    };

    let identity = Identity::from_headers(&headers);
    let id = EntityId(id);
    match service.toggle(&identity, kind, &id) {
        Ok(outcome) => {
            let payload = json!({
                "kind": kind,
                "id": id,
                "outcome": outcome,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: FavoritesError) -> Response {
    let status = match error {
        FavoritesError::Unauthenticated => StatusCode::UNAUTHORIZED,
        FavoritesError::Profile(_) | FavoritesError::Catalog(_) | FavoritesError::Write(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
