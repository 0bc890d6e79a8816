use crate::config::Config;
use dotenvy::dotenv;
use log::info;
use std::io;
use tokio::{select, signal};

mod config;
mod database;
mod env;
mod logging;
mod middleware;
mod routes;
mod servers;
mod utils;

#[tokio::main]
async fn main() -> io::Result<()> {
    // Variables from a .env file are used as defaults for the environment
    dotenv().ok();

    let config = Config::from_env();

    logging::setup(&config.logging);

    info!("Starting Leaderboard Server v{}", env::VERSION);

    let store = database::init(&config.database).await;

    select! {
        result = servers::http::start_server(&config, store) => { result? },
        _ = signal::ctrl_c() => {
            info!("Shutting down");
        }
    }

    Ok(())
}
