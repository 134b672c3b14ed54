//! Process-level plumbing shared by the service binaries.
//!
//! Tracing setup, the optional Prometheus exporter, and an HTTP server that
//! drains in-flight requests on shutdown for at most the configured timeout.

use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Server lifecycle errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The listener could not be bound or the server loop failed.
    #[error("HTTP server error: {0}")]
    Io(#[from] std::io::Error),

    /// The server task panicked or was cancelled.
    #[error("HTTP server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// The Prometheus exporter could not be installed.
    #[error("Failed to install metrics exporter: {0}")]
    Metrics(String),
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `log_level` is the default directive.
/// A second call (for example from tests) is ignored.
pub fn init_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{log_level},sqlx=warn,tower_http=info").into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Install the Prometheus recorder and its HTTP listener.
///
/// # Errors
///
/// Returns [`ServerError::Metrics`] if a recorder is already installed or the
/// listener cannot be started.
pub fn install_metrics_exporter(addr: SocketAddr) -> Result<(), ServerError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| ServerError::Metrics(e.to_string()))?;

    info!(%addr, "Prometheus metrics available at http://{addr}/metrics");
    Ok(())
}

/// Serve `router` on `listener` until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns [`ServerError::Io`] if the server loop fails.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown_timeout: Duration,
) -> Result<(), ServerError> {
    serve_with_shutdown(listener, router, shutdown_signal(), shutdown_timeout).await
}

/// Serve `router` on `listener` until `signal` resolves.
///
/// Once the signal fires the listener stops accepting and in-flight requests
/// get `shutdown_timeout` to finish before the server is dropped. A server
/// that stops on its own ends the call without waiting for the signal.
///
/// # Errors
///
/// - [`ServerError::Io`] if the server loop fails
/// - [`ServerError::Task`] if the server task panics
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    router: Router,
    signal: F,
    shutdown_timeout: Duration,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "HTTP server listening for requests");
    }

    let (stop_tx, mut stop_rx) = watch::channel(false);
    let graceful = async move {
        let _ = stop_rx.wait_for(|stopped| *stopped).await;
    };

    let server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(graceful)
            .await
    });

    supervise(server, signal, stop_tx, shutdown_timeout).await
}

async fn supervise<F>(
    mut server: JoinHandle<std::io::Result<()>>,
    signal: F,
    stop: watch::Sender<bool>,
    shutdown_timeout: Duration,
) -> Result<(), ServerError>
where
    F: Future<Output = ()>,
{
    tokio::select! {
        joined = &mut server => {
            warn!("HTTP server stopped before a shutdown signal");
            return Ok(joined??);
        }
        () = signal => {
            info!("Shutdown signal received, draining in-flight requests");
        }
    }

    let _ = stop.send(true);

    let abort = server.abort_handle();
    if let Ok(joined) = tokio::time::timeout(shutdown_timeout, server).await {
        joined??;
        info!("HTTP server stopped");
    } else {
        warn!(timeout = ?shutdown_timeout, "Shutdown timed out, dropping open connections");
        abort.abort();
    }

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
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
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        () = terminate => {
            info!("Received SIGTERM signal");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::routing::get;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_serve_stops_on_signal() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let router = Router::new().route("/", get(|| async { "ok" }));
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(serve_with_shutdown(
            listener,
            router,
            async {
                let _ = rx.await;
            },
            Duration::from_secs(5),
        ));

        tx.send(()).unwrap();
        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing("debug");
        init_tracing("info");
    }

    #[tokio::test]
    async fn test_failed_server_returns_without_signal() {
        let (stop, _) = watch::channel(false);
        let server = tokio::spawn(async {
            Err(std::io::Error::new(std::io::ErrorKind::AddrInUse, "taken"))
        });

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            supervise(server, std::future::pending(), stop, Duration::from_secs(5)),
        )
        .await
        .unwrap();

        assert!(matches!(result, Err(ServerError::Io(_))));
    }

    #[tokio::test]
    async fn test_cancelled_server_task_is_an_error() {
        let (stop, _) = watch::channel(false);
        let server = tokio::spawn(std::future::pending::<std::io::Result<()>>());
        server.abort();

        let result = supervise(server, std::future::pending(), stop, Duration::from_secs(5)).await;

        assert!(matches!(result, Err(ServerError::Task(_))));
    }
}
