//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `ESTOQUE_*` environment variables, or a config
//! file. The database URL additionally falls back to `DATABASE_URL`.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DATABASE_URL_ENV: &str = "DATABASE_URL";

fn default_host() -> String {
    DEFAULT_HOST.to_owned()
}

/// Listener and persistence settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ESTOQUE")]
pub struct ServerSettings {
    /// Interface to bind.
    #[ortho_config(default = default_host())]
    pub host: String,
    /// Port to bind.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// PostgreSQL connection string; products are kept in memory when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = DEFAULT_POOL_MAX_SIZE)]
    pub pool_max_size: u32,
}

impl ServerSettings {
    /// Interface to bind.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port to bind.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Upper bound on pooled database connections.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size
    }

    /// Configured database URL, else `DATABASE_URL`, else `None`.
    pub fn database_url(&self) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| std::env::var(DATABASE_URL_ENV).ok())
            .filter(|url| !url.trim().is_empty())
    }

    /// Resolve `host:port` to the first matching socket address.
    ///
    /// # Errors
    /// Returns an error when the host cannot be resolved.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        (self.host(), self.port())
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    format!("no address for {}:{}", self.host(), self.port()),
                )
            })
    }
}
