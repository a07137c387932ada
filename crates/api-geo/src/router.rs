use crate::config::WebConfig;
use crate::handlers::{health, index, query, table_geojson, tables};
use crate::layers::{add_request_metadata, make_cors_middleware};
use crate::server::error::ServerResult;
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use core_executor::Database;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        // SQL text is not size-limited.
        .route("/api/query", post(query).layer(DefaultBodyLimit::disable()))
        .route("/api/tables", get(tables))
        .route("/api/geojson/{name}", get(table_geojson))
        .layer(axum::middleware::from_fn(add_request_metadata))
}

/// Wires the router with its state and the service-wide layers.
pub fn make_app(db: Database, config: &WebConfig) -> ServerResult<Router> {
    let state = AppState::new(db);
    let mut router = create_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new());
    if let Some(allow_origin) = config.allow_origin.as_ref() {
        router = router.layer(make_cors_middleware(allow_origin)?);
    }
    Ok(router)
}
