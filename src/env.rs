use log::LevelFilter;
use std::{net::IpAddr, net::Ipv4Addr, str::FromStr};

use crate::config::Port;

/// The server version extracted from the Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HTTP_HOST: (&str, IpAddr) = ("HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED));
pub const HTTP_PORT: (&str, Port) = ("PORT", 3000);

/// Full connection string, takes priority over the individual parts
pub const MONGO_URI: &str = "MONGO_URI";
pub const DB_SCHEME: (&str, &str) = ("DB_SCHEME", "mongodb+srv");
pub const DB_HOST: (&str, &str) = ("DB_HOST", "localhost");
pub const DB_USERNAME: &str = "DB_USERNAME";
pub const DB_PASSWORD: &str = "DB_PASSWORD";
pub const DB_NAME: (&str, &str) = ("DB_NAME", "Hard");

pub const LOGGING_LEVEL: (&str, LevelFilter) = ("LOG_LEVEL", LevelFilter::Info);
pub const LOGGING_DIR: (&str, &str) = ("LOGGING_DIR", "data/logs");

#[inline]
pub fn env(pair: (&str, &str)) -> String {
    std::env::var(pair.0).unwrap_or_else(|_| pair.1.to_string())
}

/// Optional variables, empty values are treated as unset
#[inline]
pub fn opt_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

#[inline]
pub fn from_env<F: FromStr>(pair: (&str, F)) -> F {
    if let Ok(value) = std::env::var(pair.0) {
        if let Ok(value) = F::from_str(&value) {
            return value;
        }
    }
    pair.1
}
