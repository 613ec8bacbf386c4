use std::{net::SocketAddr, sync::Arc};

use ambulance_core::Ambulance;
use ambulance_db_memory::create_store;
use ambulance_storage::DynDocumentStore;
use axum::{Router, middleware, routing::get};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{ambulances, conditions, config::AppConfig, handlers, middleware as app_middleware};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: DynDocumentStore<Ambulance>,
    pub base_url: Arc<str>,
}

pub struct AmbulanceServer {
    addr: SocketAddr,
    app: Router,
}

/// Builds the router with the store selected by `cfg.storage`.
pub fn build_app(cfg: &AppConfig) -> Router {
    let store = create_store::<Ambulance>(&cfg.storage);
    build_app_with_store(cfg, store)
}

pub fn build_app_with_store(cfg: &AppConfig, store: DynDocumentStore<Ambulance>) -> Router {
    let body_limit = cfg.server.body_limit_bytes;
    tracing::info!(backend = store.backend_name(), collection = %cfg.storage.collection, "Document store ready");

    let state = AppState {
        store,
        base_url: Arc::from(cfg.base_url()),
    };

    Router::new()
        // Health and info endpoints
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .route("/readyz", get(handlers::readyz))
        // Ambulances
        .route(
            "/api/ambulance",
            axum::routing::post(ambulances::create_ambulance),
        )
        .route(
            "/api/ambulance/{ambulance_id}",
            get(ambulances::get_ambulance)
                .put(ambulances::update_ambulance)
                .delete(ambulances::delete_ambulance),
        )
        // Predefined conditions
        .route(
            "/api/waiting-list/{ambulance_id}/condition",
            get(conditions::list_conditions).post(conditions::create_condition),
        )
        .route(
            "/api/waiting-list/{ambulance_id}/condition/{condition_id}",
            axum::routing::put(conditions::update_condition)
                .delete(conditions::delete_condition),
        )
        .with_state(state)
        // Middleware stack, innermost first: cors -> compression -> trace -> request id -> body limit
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    use tracing::field::Empty;
                    let req_id = req
                        .headers()
                        .get(app_middleware::REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("")
                        .to_string();
                    tracing::info_span!(
                        "http.request",
                        http.method = %req.method(),
                        http.target = %req.uri(),
                        http.status_code = Empty,
                        request_id = %req_id
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record(
                            "http.status_code",
                            tracing::field::display(res.status().as_u16()),
                        );
                        tracing::info!(
                            http.status = %res.status().as_u16(),
                            elapsed_ms = %latency.as_millis(),
                            "request handled"
                        );
                    },
                ),
        )
        // Outside the trace layer so the span sees a generated id
        .layer(middleware::from_fn(app_middleware::request_id))
        .layer(axum::extract::DefaultBodyLimit::max(body_limit))
}

pub struct ServerBuilder {
    addr: SocketAddr,
    config: AppConfig,
    store: Option<DynDocumentStore<Ambulance>>,
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerBuilder {
    pub fn new() -> Self {
        let cfg = AppConfig::default();
        Self {
            addr: cfg.addr(),
            config: cfg,
            store: None,
        }
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.addr = cfg.addr();
        self.config = cfg;
        self
    }

    /// Use an existing store instead of creating one from `storage` config.
    pub fn with_store(mut self, store: DynDocumentStore<Ambulance>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> AmbulanceServer {
        let app = match self.store {
            Some(store) => build_app_with_store(&self.config, store),
            None => build_app(&self.config),
        };

        AmbulanceServer {
            addr: self.addr,
            app,
        }
    }
}

impl AmbulanceServer {
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    // Wait for Ctrl+C
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
