//! HTTP routes for the portal.

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{self, AppState};
use crate::middleware::{auth_middleware, require_faculty};

/// Create the router with all portal routes configured
pub fn create_router(state: AppState) -> Router {
    let auth = from_fn_with_state(state.clone(), auth_middleware);

    let portal = Router::new()
        .route("/register", post(handlers::portal::register))
        .route("/login", post(handlers::portal::login))
        .route(
            "/logout",
            post(handlers::portal::logout).layer(auth.clone()),
        )
        .route(
            "/dashboard",
            get(handlers::portal::dashboard).layer(auth.clone()),
        )
        // Outer layer runs first: authenticate, then check the role
        .route(
            "/students",
            get(handlers::portal::list_students)
                .layer(from_fn(require_faculty))
                .layer(auth),
        );

    Router::new()
        .route("/", get(handlers::health::health_check))
        .route("/health", get(handlers::health::health_check))
        .nest("/api/v1/portal", portal)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
