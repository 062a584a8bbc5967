use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use rtha_server::api::{app_router, ApiContext};
use rtha_server::config::{self, Config, StoreBackend};
use rtha_server::directory::FirebaseDirectory;
use rtha_server::reconcile::Reconciler;
use rtha_server::sms::TwilioSender;
use rtha_server::store::{DocumentStore, FirestoreStore, MemoryStore};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let http = reqwest::Client::new();

    let store: Arc<dyn DocumentStore> = match config.store_backend {
        StoreBackend::Firestore => Arc::new(FirestoreStore::new(
            http.clone(),
            config.firestore.base_url.clone(),
            config.firestore.project_id.clone(),
            config.firestore.auth_token.clone(),
        )),
        StoreBackend::Memory => {
            tracing::warn!("running with the in-memory store, data is not persisted");
            Arc::new(MemoryStore::new())
        }
    };

    let ctx = ApiContext::new(
        Arc::new(Reconciler::new(store)),
        Arc::new(TwilioSender::new(
            http.clone(),
            config.twilio.base_url.clone(),
            config.twilio.account_sid.clone(),
            config.twilio.auth_token.clone(),
            config.twilio.phone_number.clone(),
        )),
        Arc::new(FirebaseDirectory::new(
            http,
            config.identity.base_url.clone(),
            config.firestore.project_id.clone(),
            config.identity.auth_token.clone(),
        )),
    );

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };
    tracing::info!(%addr, "listening");

    if let Err(e) = axum::serve(listener, app_router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install ctrl-c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("ctrl-c received, shutting down"),
        _ = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}
