//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the landing route and the `/erised/*` routes
//! - Wire up middleware (request ID, tracing, read timeout)
//! - Serve plain HTTP or HTTPS with graceful shutdown

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::{any, on, post, MethodFilter},
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::directive::{ResponseSpec, SearchRoot};
use crate::http::reflect::{
    echo_handler, headers_handler, info_handler, ip_handler, method_not_allowed, shutdown_handler,
};
use crate::http::request::{RequestMeta, UuidRequestId, X_REQUEST_ID};
use crate::http::response::respond;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub search_root: Option<SearchRoot>,
    pub shutdown: Shutdown,
    pub write_timeout: Duration,
}

/// HTTP server for the response simulator.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
    search_root: Option<SearchRoot>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// A relative search path is anchored at the current working directory
    /// now, once, and never changes afterwards.
    pub fn new(config: ServerConfig, shutdown: Shutdown) -> Self {
        let base = std::env::current_dir().unwrap_or_default();
        let search_root = SearchRoot::from_config(&config.search.path, &base);

        let state = AppState {
            search_root: search_root.clone(),
            shutdown,
            write_timeout: Duration::from_secs(config.timeouts.write_secs),
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            search_root,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/", any(landing_handler))
            .route("/{*path}", any(landing_handler))
            // `get` would also answer HEAD
            .route("/erised/headers", on(MethodFilter::GET, headers_handler).fallback(method_not_allowed))
            .route("/erised/info", on(MethodFilter::GET, info_handler).fallback(method_not_allowed))
            .route("/erised/ip", on(MethodFilter::GET, ip_handler).fallback(method_not_allowed))
            .route("/erised/shutdown", post(shutdown_handler).fallback(method_not_allowed))
            .route("/erised/echoserver", any(echo_handler))
            .route("/erised/echoserver/", any(echo_handler))
            .route("/erised/echoserver/{*path}", any(echo_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.read_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// Serve plain HTTP until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        self.log_start(addr, false);

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Stopped accepting connections, draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Serve HTTPS until `shutdown` fires.
    ///
    /// In-flight requests get up to the write timeout to finish.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        self.log_start(addr, true);

        let handle = axum_server::Handle::new();
        let drain = handle.clone();
        let grace = Duration::from_secs(self.config.timeouts.write_secs);
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            tracing::info!(grace = ?grace, "Stopped accepting connections, draining");
            drain.graceful_shutdown(Some(grace));
        });

        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service_with_connect_info::<SocketAddr>())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }

    fn log_start(&self, addr: SocketAddr, https: bool) {
        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            address = %addr,
            https,
            read_timeout_secs = self.config.timeouts.read_secs,
            write_timeout_secs = self.config.timeouts.write_secs,
            search_root = ?self.search_root.as_ref().map(SearchRoot::path),
            "erised server running"
        );
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Landing handler: every path not claimed by an `/erised/*` route.
async fn landing_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let meta = RequestMeta::of(&request);
    meta.log("landing");
    metrics::record_request("landing");

    let spec = ResponseSpec::from_headers(request.headers(), state.search_root.as_ref());
    respond(spec, state.write_timeout).await
}
