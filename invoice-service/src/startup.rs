use crate::config::InvoiceConfig;
use crate::handlers;
use crate::services::{InvoiceStore, MongoInvoiceStore};
use axum::{
    http::{header, HeaderValue, Method, Request},
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics_middleware, request_id_middleware, security_headers_middleware, REQUEST_ID_HEADER,
};
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub config: InvoiceConfig,
    pub store: Arc<dyn InvoiceStore>,
}

/// Builds the full HTTP surface over `state`.
pub fn build_router(state: AppState) -> Router {
    let invoices = Router::new()
        .route("/", get(handlers::list_invoices))
        .route("/createInvoice", post(handlers::create_invoice))
        .route(
            "/:id",
            get(handlers::get_invoice).delete(handlers::delete_invoice),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .nest("/api/invoices", invoices)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
            let request_id = request
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");

            tracing::info_span!(
                "http_request",
                request_id = %request_id,
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        }))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors_layer(&state.config.cors.allowed_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Invalid CORS origin '{}': {}. Skipping.", o, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub struct Application {
    port: u16,
    server: Box<dyn Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

impl Application {
    /// Connects to MongoDB, prepares indexes and binds the listener.
    pub async fn build(config: InvoiceConfig) -> Result<Self, AppError> {
        let store = MongoInvoiceStore::connect(&config.mongodb.uri, &config.mongodb.database)
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB: {}", e);
                e
            })?;
        store.initialize_indexes().await.map_err(|e| {
            tracing::error!("Failed to initialize database indexes: {}", e);
            e
        })?;

        Self::build_with_store(config, Arc::new(store)).await
    }

    /// Binds the listener over an already constructed store.
    pub async fn build_with_store(
        config: InvoiceConfig,
        store: Arc<dyn InvoiceStore>,
    ) -> Result<Self, AppError> {
        let state = AppState {
            config: config.clone(),
            store,
        };

        let app = build_router(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            state,
        })
    }

    pub fn store(&self) -> Arc<dyn InvoiceStore> {
        self.state.store.clone()
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
