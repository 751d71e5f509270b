//! Route configuration and setup.
//!
//! Asset routes live in [assets](assets); health checks in [health](health).

mod assets;
mod health;

use crate::api_doc::ApiDoc;
use crate::constants::{HTTP_CONCURRENCY_LIMIT, MAX_REQUEST_BODY_BYTES};
use crate::error::HttpAppError;
use crate::handlers;
use crate::state::AppState;
use axum::{
    error_handling::HandleErrorLayer,
    http::{HeaderValue, Method},
    routing::get,
    BoxError, Json, Router,
};
use depot_core::{AppError, Config};
use depot_infra::{request_id_middleware, security_headers_middleware, SecurityHeaders};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let security_headers = SecurityHeaders {
        hsts: config.is_production(),
    };

    let timeout = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .timeout(config.request_timeout());

    tracing::info!(
        http_concurrency_limit = HTTP_CONCURRENCY_LIMIT,
        max_request_body_bytes = MAX_REQUEST_BODY_BYTES,
        "HTTP limits configured"
    );

    let app = Router::new()
        .merge(assets::routes())
        .merge(health::routes())
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .fallback(handlers::route_not_found)
        .layer(timeout)
        .layer(ConcurrencyLimitLayer::new(HTTP_CONCURRENCY_LIMIT))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(axum::middleware::from_fn_with_state(
            security_headers,
            security_headers_middleware,
        ))
        .with_state(state);

    Ok(app)
}

async fn handle_middleware_error(err: BoxError) -> HttpAppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        AppError::Timeout.into()
    } else {
        AppError::Internal(format!("Unhandled middleware error: {}", err)).into()
    }
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::OPTIONS];

    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|_| anyhow::anyhow!("Invalid CORS origin: {}", o))
            })
            .collect::<Result<Vec<_>, _>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}
