//! Customer service binary.
//!
//! ```bash
//! PORT=8081 cargo run -p customer-service
//! ```

use customer_service::{CustomerState, DEFAULT_PORT, build_router};
use reservations_web::{Config, server};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let config = Config::from_env(DEFAULT_PORT)?;
    server::init_tracing(&config.server.log_level);
    tracing::info!(port = config.server.port, "Starting customer service");

    if let Some(addr) = config.server.metrics_addr()? {
        server::install_metrics_exporter(addr)?;
    }

    let state = CustomerState::from_config(config.database.as_ref()).await?;
    let listener = TcpListener::bind(config.server.socket_addr()?).await?;

    server::serve(
        listener,
        build_router(state),
        config.server.shutdown_timeout(),
    )
    .await?;

    Ok(())
}
