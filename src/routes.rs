use axum::{
    handler::Handler,
    middleware,
    routing::{get, MethodRouter},
    Router,
};
use tower::Layer;
use tower_http::{
    cors::CorsLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

use crate::handlers::{fallback, health, system};
use crate::middleware::{error_envelope, request_id_layer};
use crate::state::AppState;

/// Endpoints listed in the startup log.
pub const ENDPOINTS: &[&str] = &[
    "GET /health",
    "GET /health/detailed",
    "GET /health/live",
    "GET /health/ready",
    "GET /system/status",
    "GET /system/deployment",
    "GET /system/metrics",
    "GET /system/pipeline",
];

/// GET route whose other methods fall through to the not-found handler.
fn get_only<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    get(handler).fallback(fallback::not_found)
}

/// Create the service the server runs: the API router behind trailing-slash
/// normalization, so `/health/live/` is served like `/health/live`.
///
/// Normalization has to wrap the router; as a router layer it would run
/// after routing.
pub fn create_app(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(create_router(state))
}

/// Create the API router.
fn create_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/", get_only(health::health_check))
        .route("/detailed", get_only(health::detailed_health))
        .route("/live", get_only(health::live))
        .route("/ready", get_only(health::ready));

    let system_routes = Router::new()
        .route("/status", get_only(system::status))
        .route("/deployment", get_only(system::deployment))
        .route("/metrics", get_only(system::metrics))
        .route("/pipeline", get_only(system::pipeline));

    let routes = Router::new()
        .nest("/health", health_routes)
        .nest("/system", system_routes);

    with_middleware(routes, state)
}

/// Attach the fallback and the middleware stack shared by every route.
fn with_middleware(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .fallback(fallback::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), error_envelope))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_layer))
        .with_state(state)
}
