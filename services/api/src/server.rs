use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryStores};
use crate::routes::{with_domain_routes, DomainServices};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};
use univera::accounts::ProfileService;
use univera::catalog::{CatalogService, CatalogSnapshot};
use univera::chat::ChatService;
use univera::config::AppConfig;
use univera::error::AppError;
use univera::favorites::FavoritesService;
use univera::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.catalog.take() {
        config.catalog.snapshot_path = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let stores = match &config.catalog.snapshot_path {
        Some(path) => {
            let snapshot = CatalogSnapshot::from_path(path)?;
            info!(
                path = %path.display(),
                colleges = snapshot.colleges.len(),
                pgs = snapshot.pgs.len(),
                users = snapshot.users.len(),
                "catalog snapshot loaded"
            );
            InMemoryStores::from_snapshot(snapshot)
        }
        None => {
            warn!("no catalog snapshot configured, starting with an empty catalog");
            InMemoryStores::default()
        }
    };

    let chat = ChatService::from_config(&config.chat)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(stores.catalog);
    let profiles = Arc::new(stores.profiles);
    let services = DomainServices {
        catalog: Arc::new(CatalogService::new(catalog.clone(), profiles.clone())),
        favorites: Arc::new(FavoritesService::new(
            profiles.clone(),
            Arc::new(stores.legacy),
            catalog,
        )),
        chat: Arc::new(chat),
        profiles: Arc::new(ProfileService::new(profiles)),
    };

    let app = with_domain_routes(services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "univera api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
