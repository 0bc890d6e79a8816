use crate::{config::Config, database::SharedStore, logging, routes};
use log::{error, info};
use std::{io, net::SocketAddr};
use tokio::net::TcpListener;

/// Starts the HTTP server serving the leaderboard API, only returns
/// when the server fails
pub async fn start_server(config: &Config, store: SharedStore) -> io::Result<()> {
    let addr = SocketAddr::new(config.host, config.port);

    let listener = match TcpListener::bind(addr).await {
        Ok(value) => value,
        Err(err) => {
            error!("Failed to bind HTTP server (Address: {}): {}", addr, err);
            return Err(err);
        }
    };

    info!("Server running on (Address: {})", addr);
    logging::log_connection_urls(config.port);

    axum::serve(listener, routes::router(store)).await
}
