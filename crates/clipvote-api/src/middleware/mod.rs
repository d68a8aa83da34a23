//! Middleware stack for the API server
//!
//! Request IDs, tracing spans, timeouts, CORS and the global HTTP
//! rate limiter.

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request, StatusCode},
    Router,
};
use clipvote_common::config::{CorsConfig, HttpRateLimitConfig};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

use crate::state::AppState;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// Base middleware stack: request ID generation and propagation, a
/// per-request tracing span, and the request timeout (503 on expiry).
///
/// Health routes use this directly so probes bypass the HTTP rate
/// limiter.
pub fn apply_middleware(router: Router<AppState>) -> Router<AppState> {
    let request_id_header = header::HeaderName::from_static(REQUEST_ID_HEADER);

    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(
                request_id_header.clone(),
                MakeRequestUuid,
            ))
            .layer(PropagateRequestIdLayer::new(request_id_header))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_request_span)
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(TimeoutLayer::with_status_code(
                StatusCode::SERVICE_UNAVAILABLE,
                REQUEST_TIMEOUT,
            )),
    )
}

/// Full middleware stack for the API routes: the base stack plus CORS
/// and the global HTTP rate limiter in front of everything.
///
/// The limiter here is global, not per client; the per-voter vote
/// window lives in the service layer.
pub fn apply_middleware_with_config(
    router: Router<AppState>,
    rate_limit_config: &HttpRateLimitConfig,
    cors_config: &CorsConfig,
    is_production: bool,
) -> Router<AppState> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(rate_limit_config.requests_per_second.into())
            .burst_size(rate_limit_config.burst)
            .key_extractor(GlobalKeyExtractor)
            .finish()
            .expect("Failed to create rate limiter configuration"),
    );

    // CORS sits closest to the handlers; the governor wraps the whole
    // stack so over-limit requests are rejected before any other work.
    apply_middleware(router.layer(create_cors_layer(cors_config, is_production)))
        .layer(GovernorLayer {
            config: governor_conf,
        })
}

/// Build the CORS layer from configuration.
///
/// Origins are taken from config. With none configured, development
/// allows any origin and production allows none.
fn create_cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let request_id_header = header::HeaderName::from_static(REQUEST_ID_HEADER);
    let base_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            request_id_header.clone(),
        ])
        .expose_headers([request_id_header, header::RETRY_AFTER]);

    if config.allowed_origins.is_empty() {
        if is_production {
            tracing::warn!(
                "CORS: no allowed origins configured in production; browser requests will be blocked"
            );
            return base_layer.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()));
        }
        tracing::warn!(
            "CORS: allowing any origin (development mode); set CORS_ALLOWED_ORIGINS for production"
        );
        return base_layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    tracing::info!("CORS: allowing {} configured origins", origins.len());
    base_layer.allow_origin(AllowOrigin::list(origins))
}
