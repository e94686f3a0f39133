//! REST API layer: authorization gate, route handlers, DTOs, and router
//! composition.
//!
//! Resource endpoints are mounted under `/api` behind the bearer gate;
//! `/health` and the OpenAPI document are public.

pub mod auth;
pub mod dto;
pub mod handlers;
pub mod openapi;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::middleware::from_fn_with_state;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::app_state::AppState;
use crate::config::CorsPolicy;

/// Builds the complete application router with state applied.
pub fn build_router(state: AppState) -> Router {
    let gated = handlers::routes()
        .route_layer(from_fn_with_state(state.auth.clone(), auth::require_bearer));

    let router = Router::new()
        .nest("/api", gated)
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
    };

    router.with_state(state)
}

/// Builds the CORS layer for the configured policy.
///
/// Origins that are not valid header values are dropped with a warning.
pub fn cors_layer(policy: &CorsPolicy) -> CorsLayer {
    match policy {
        CorsPolicy::Permissive => CorsLayer::permissive(),
        CorsPolicy::AllowList(origins) => {
            let origins = origins
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(%origin, "ignoring invalid CORS origin");
                        None
                    }
                });
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        }
    }
}
