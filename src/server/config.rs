/**
 * Server Configuration
 *
 * Reads the server's runtime configuration from environment variables.
 * The database URL is optional: without it the server still starts and
 * serves the health endpoints, and data endpoints answer 503.
 */

use std::net::SocketAddr;

/// Runtime configuration assembled from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `HOST` (default `127.0.0.1`)
    /// - `PORT` (default `8000`)
    /// - `DATABASE_URL` (optional)
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);
        let database_url = std::env::var("DATABASE_URL").ok();

        Self {
            host,
            port,
            database_url,
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_addr_formats_host_and_port() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 9000,
            database_url: None,
        };
        assert_eq!(config.socket_addr().unwrap().port(), 9000);
    }
}
