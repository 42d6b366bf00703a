//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create Axum Router with the explicit route table
//! - Wire up middleware (request ID, tracing)
//! - Validate the proxy query and dispatch to the upstream client
//! - Map upstream failures to HTTP error statuses
//! - Serve with graceful shutdown

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use url::Url;

use crate::config::ProxyConfig;
use crate::http::request::{propagate_request_id, set_request_id, X_REQUEST_ID};
use crate::http::response::{error_response, preflight_response, relay_response};
use crate::upstream::UpstreamClient;

/// The single recognized proxy path.
pub const PROXY_PATH: &str = "/proxy";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub upstream: Arc<UpstreamClient>,
}

/// Query parameters read by the proxy endpoint. Anything beyond `url`
/// is ignored.
#[derive(Debug, Deserialize)]
struct ProxyQuery {
    url: Option<String>,
}

/// HTTP server for the forwarding proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and
    /// upstream client.
    pub fn new(config: ProxyConfig, upstream: UpstreamClient) -> Self {
        let state = AppState {
            config: Arc::new(config),
            upstream: Arc::new(upstream),
        };

        let router = Self::build_router(state);
        Self { router }
    }

    /// Build the Axum router: the route table plus middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route(PROXY_PATH, get(proxy_handler).options(preflight_handler))
            .fallback(fallback_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id()),
            )
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main forwarding handler.
/// Validates the query, fetches the target, relays bytes or maps the
/// failure to an error status. Exactly one response per request.
async fn proxy_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ProxyQuery>,
) -> Response {
    let request_id = request_id_from(&headers);

    let target = match query.url.as_deref() {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => {
            tracing::debug!(request_id = %request_id, "Missing url parameter");
            return error_response(
                StatusCode::BAD_REQUEST,
                "missing required query parameter: url",
            );
        }
    };

    if state.config.upstream.restrict_targets {
        // Unparseable targets fall through and fail downstream as 502.
        let permitted = Url::parse(&target)
            .map(|parsed| state.config.upstream.permits_target(&parsed))
            .unwrap_or(true);
        if !permitted {
            tracing::warn!(
                request_id = %request_id,
                target = %target,
                "Target outside configured upstream"
            );
            return error_response(
                StatusCode::FORBIDDEN,
                "target url is not the configured upstream",
            );
        }
    }

    tracing::debug!(
        request_id = %request_id,
        target = %target,
        "Forwarding request"
    );

    match state.upstream.fetch(&target).await {
        Ok(body) => relay_response(body),
        Err(err) => {
            tracing::error!(
                request_id = %request_id,
                target = %target,
                error = %err,
                "Upstream fetch failed"
            );
            error_response(
                StatusCode::BAD_GATEWAY,
                &format!("proxy request failed: {err}"),
            )
        }
    }
}

/// CORS preflight handler. Browsers probe before the real GET, so
/// OPTIONS succeeds on any path with the full header set and no body.
async fn preflight_handler() -> Response {
    preflight_response()
}

/// Routing fallback: OPTIONS gets a preflight answer, everything else
/// on an unrecognized path is 404.
async fn fallback_handler(method: Method, uri: Uri) -> Response {
    if method == Method::OPTIONS {
        return preflight_response();
    }

    tracing::warn!(method = %method, path = %uri.path(), "No route matched");
    error_response(StatusCode::NOT_FOUND, "not found")
}

fn request_id_from(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
