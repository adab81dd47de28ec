// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use axum_server::{tls_rustls::RustlsConfig, Handle};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use toystore_server::{
    api,
    auth::SessionIssuer,
    config::{LogFormat, ServerConfig, StorageBackend},
    payments::{PayPalClient, PaymentAdapter},
    state::AppState,
    storage::{DocumentStore, FileStore, MemoryStore, StoragePaths},
};

/// Time allowed for in-flight requests after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.log_format);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());

    let json_layer = (format == LogFormat::Json)
        .then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (format == LogFormat::Pretty).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(config: ServerConfig) -> Result<(), Box<dyn Error>> {
    // Must happen before any TLS operations.
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("A rustls crypto provider was already installed");
    }

    let store: Arc<dyn DocumentStore> = match config.storage_backend {
        StorageBackend::File => {
            let mut store = FileStore::new(StoragePaths::new(&config.data_dir));
            store.initialize()?;
            info!(data_dir = %config.data_dir.display(), "File store initialized");
            Arc::new(store)
        }
        StorageBackend::Memory => {
            warn!("Using in-memory store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let sessions = match &config.jwt_secret {
        Some(secret) => SessionIssuer::new(secret),
        None => {
            warn!("JWT_SECRET_KEY not set; sessions will not survive a restart");
            SessionIssuer::ephemeral()
        }
    };

    let payments = match config.paypal.clone() {
        Some(paypal) => {
            info!(api_base_url = %paypal.api_base_url, "PayPal checkout enabled");
            PaymentAdapter::new(Arc::new(PayPalClient::new(paypal)?))
        }
        None => {
            warn!("PayPal credentials not set; checkout endpoints will return 503");
            PaymentAdapter::disabled()
        }
    };

    let state = AppState::new(store, sessions).with_payments(payments);
    let app = api::with_middleware(
        api::router(state),
        &config.cors_origins,
        config.request_timeout,
    );

    let shutdown = CancellationToken::new();
    let handle = Handle::new();

    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            shutdown_signal().await;
            shutdown.cancel();
        }
    });
    tokio::spawn({
        let shutdown = shutdown.clone();
        let handle = handle.clone();
        async move {
            shutdown.cancelled().await;
            handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        }
    });

    let addr = config.socket_addr();
    match &config.tls {
        Some(tls) => {
            let rustls_config = RustlsConfig::from_pem_file(&tls.cert, &tls.key).await?;
            info!("Toystore listening on https://{addr} (docs at /docs)");
            axum_server::bind_rustls(addr, rustls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            info!("Toystore listening on http://{addr} (docs at /docs)");
            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
    }

    info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
