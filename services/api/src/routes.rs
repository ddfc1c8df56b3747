use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use univera::accounts::{profile_router, ProfileRepository, ProfileService};
use univera::catalog::{catalog_router, CatalogRepository, CatalogService};
use univera::chat::{chat_router, ChatService, ChatTransport};
use univera::favorites::{favorites_router, FavoritesService, LegacyFavoriteRepository};

pub(crate) struct DomainServices<C, P, L, T> {
    pub(crate) catalog: Arc<CatalogService<C, P>>,
    pub(crate) favorites: Arc<FavoritesService<P, L, C>>,
    pub(crate) chat: Arc<ChatService<T>>,
    pub(crate) profiles: Arc<ProfileService<P>>,
}

pub(crate) fn with_domain_routes<C, P, L, T>(services: DomainServices<C, P, L, T>) -> axum::Router
where
    C: CatalogRepository + 'static,
    P: ProfileRepository + 'static,
    L: LegacyFavoriteRepository + 'static,
    T: ChatTransport + 'static,
{
    catalog_router(services.catalog)
        .merge(favorites_router(services.favorites))
        .merge(chat_router(services.chat))
        .merge(profile_router(services.profiles))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
