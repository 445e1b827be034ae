//! Process configuration.
//!
//! Every flag falls back to an environment variable, so the server can be
//! configured purely through `PORT` and `DATABASE_URL`.

use clap::{Parser, ValueEnum};
use menagerie_core::default_log_level;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://menagerie.sqlite3";

/// What `GET /` replies with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HomePage {
    /// Render the `index.html` template.
    Template,
    /// Reply with a plain-text banner.
    Banner,
}

/// Command-line and environment configuration for the server binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "menagerie", version, about = "Animal records web application")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Interface to bind.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Store connection string (`sqlite://path`, `sqlite::memory:`, ...).
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Directory served for unmatched paths.
    #[arg(long, env = "STATIC_DIR", default_value = "public")]
    pub static_dir: PathBuf,

    #[arg(long, env = "HOME_PAGE", value_enum, default_value_t = HomePage::Template)]
    pub home: HomePage,

    /// trace|debug|info|warn|error
    #[arg(long, env = "LOG_LEVEL", default_value = default_log_level())]
    pub log_level: String,

    /// Absolute directory for rolling log files; stderr when unset.
    #[arg(long, env = "LOG_DIR")]
    pub log_dir: Option<String>,
}

impl ServerConfig {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::{HomePage, ServerConfig, DEFAULT_DATABASE_URL, DEFAULT_PORT};
    use clap::Parser;

    #[test]
    fn flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "menagerie",
            "--port",
            "8080",
            "--database-url",
            "sqlite::memory:",
            "--home",
            "banner",
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.home, HomePage::Banner);
        assert_eq!(config.listen_addr().port(), 8080);
    }

    #[test]
    fn defaults_apply_without_flags() {
        let config = ServerConfig::try_parse_from(["menagerie"]).unwrap();
        // PORT / DATABASE_URL may be set in the test environment.
        if std::env::var_os("PORT").is_none() {
            assert_eq!(config.port, DEFAULT_PORT);
        }
        if std::env::var_os("DATABASE_URL").is_none() {
            assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        }
        assert!(config.log_dir.is_none() || std::env::var_os("LOG_DIR").is_some());
    }

    #[test]
    fn rejects_unknown_home_variant() {
        assert!(ServerConfig::try_parse_from(["menagerie", "--home", "splash"]).is_err());
    }
}
