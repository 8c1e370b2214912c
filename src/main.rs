#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use roster::config::Configuration;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // configuration selects the exporters, log its errors to stdout only.
    let config = tracing::subscriber::with_default(fmt().finish(), || {
        Configuration::default()
            .path(
                std::env::var("CONFIG_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_default(),
            )
            .read()
    });

    let mut providers = None;
    if let Some(endpoint) = &config.telemetry.otlp_endpoint {
        let tracer = roster::telemetry::setup_tracer(endpoint)?;
        let (logger, bridge) = roster::telemetry::setup_logging(endpoint)?;

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .with(bridge)
            .init();
        providers = Some((tracer, logger));
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }

    let state = roster::initialize_state(config).await?;
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, state.config.port));
    let app = roster::app(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some((tracer, logger)) = providers {
        if let Err(err) = tracer.shutdown() {
            tracing::error!(error = %err, "failed to flush traces");
        }
        if let Err(err) = logger.shutdown() {
            eprintln!("failed to flush logs: {err}");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(err) => {
                tracing::error!(error = %err, "failed to install signal handler")
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
