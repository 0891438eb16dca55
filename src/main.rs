//! MindfulCare session service entrypoint.
//!
//! Wires the configuration, the PostgreSQL store, the collaborator clients
//! and the HTTP surface together, then serves until shutdown.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use mindfulcare::adapters::http::{sessions_router, SessionHandlers};
use mindfulcare::adapters::notification::RestNotifier;
use mindfulcare::adapters::payment::RestPaymentGateway;
use mindfulcare::adapters::postgres::PostgresSessionStore;
use mindfulcare::adapters::therapist::RestTherapistDirectory;
use mindfulcare::application::handlers::scheduling::{
    AttachNoteHandler, BookSessionHandler, CancelSessionHandler, CompleteSessionHandler,
    ConfirmSessionHandler, GetSessionHandler, ListSessionsHandler, PreviewPriceHandler,
    TherapistLocks,
};
use mindfulcare::config::AppConfig;
use mindfulcare::ports::{Notifier, PaymentGateway, SessionStore, TherapistDirectory};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    tracing::info!(
        environment = ?config.server.environment,
        "Starting session service"
    );

    // Database
    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Migrations applied");
    }

    // Collaborator clients share one HTTP client
    let http_client = reqwest::Client::builder()
        .timeout(config.collaborators.http_timeout())
        .build()?;

    let store: Arc<dyn SessionStore> = Arc::new(PostgresSessionStore::new(pool));
    let directory: Arc<dyn TherapistDirectory> = Arc::new(RestTherapistDirectory::new(
        config.collaborators.therapist_url.clone(),
        http_client.clone(),
    ));
    let payments: Arc<dyn PaymentGateway> = Arc::new(RestPaymentGateway::new(
        config.collaborators.payment_url.clone(),
        http_client.clone(),
    ));
    let notifier: Arc<dyn Notifier> = Arc::new(RestNotifier::new(
        config.collaborators.notification_url.clone(),
        http_client,
    ));

    let handlers = SessionHandlers {
        book: Arc::new(BookSessionHandler::new(
            store.clone(),
            directory.clone(),
            Arc::new(TherapistLocks::new()),
        )),
        confirm: Arc::new(ConfirmSessionHandler::new(
            store.clone(),
            payments.clone(),
            notifier.clone(),
        )),
        cancel: Arc::new(CancelSessionHandler::new(
            store.clone(),
            payments,
            notifier.clone(),
        )),
        complete: Arc::new(CompleteSessionHandler::new(store.clone(), notifier)),
        attach_note: Arc::new(AttachNoteHandler::new(store.clone())),
        get: Arc::new(GetSessionHandler::new(store.clone())),
        list: Arc::new(ListSessionsHandler::new(store)),
        preview_price: Arc::new(PreviewPriceHandler::new(directory)),
    };

    let app = Router::new()
        .route("/health", get(|| async { StatusCode::OK }))
        .nest("/api/sessions", sessions_router(handlers))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "Listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let parsed: Vec<_> = origins
            .iter()
            .filter_map(|o| o.parse::<axum::http::HeaderValue>().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(parsed)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
