//! Server configuration from command-line flags and environment.

use axum::http::HeaderValue;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_DATABASE: &str = "verse_notes.sqlite3";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

const SQLITE_URL_PREFIX: &str = "sqlite://";

#[derive(Clone, Debug, Eq, Parser, PartialEq)]
#[command(version, about = "Patient records and clinical notes HTTP API")]
pub struct ServerConfig {
    /// SQLite database file; a `sqlite://` prefix is accepted.
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE)]
    pub database: String,

    #[arg(long, env = "VERSENOTES_BIND", default_value = DEFAULT_BIND_ADDR)]
    pub bind: SocketAddr,

    /// The single browser origin allowed to call the API.
    #[arg(long, env = "VERSENOTES_ALLOWED_ORIGIN", default_value = DEFAULT_ALLOWED_ORIGIN)]
    pub allowed_origin: String,

    /// trace|debug|info|warn|error; defaults by build mode.
    #[arg(long, env = "VERSENOTES_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rotating log files; stderr when unset.
    #[arg(long, env = "VERSENOTES_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn database_path(&self) -> PathBuf {
        let raw = self.database.trim();
        PathBuf::from(raw.strip_prefix(SQLITE_URL_PREFIX).unwrap_or(raw))
    }

    pub fn log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(versenotes_core::default_log_level())
    }

    /// Returns the CORS origin as a header value.
    ///
    /// # Errors
    /// - Returns an error when the origin contains bytes not allowed in headers.
    pub fn allowed_origin_header(&self) -> Result<HeaderValue, String> {
        HeaderValue::from_str(self.allowed_origin.trim())
            .map_err(|err| format!("invalid allowed origin `{}`: {err}", self.allowed_origin))
    }
}

#[cfg(test)]
mod tests {
    use super::{ServerConfig, DEFAULT_ALLOWED_ORIGIN};
    use clap::Parser;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> ServerConfig {
        let argv = std::iter::once("versenotesd").chain(args.iter().copied());
        ServerConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn explicit_flags_override_defaults() {
        let config = parse(&[
            "--database",
            "/tmp/notes.db",
            "--bind",
            "127.0.0.1:8080",
            "--allowed-origin",
            "https://clinic.example",
            "--log-level",
            "warn",
        ]);

        assert_eq!(config.database_path(), PathBuf::from("/tmp/notes.db"));
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.log_level(), "warn");
        assert_eq!(
            config.allowed_origin_header().unwrap(),
            "https://clinic.example"
        );
    }

    #[test]
    fn log_level_falls_back_to_build_default() {
        let config = parse(&["--log-dir", "/var/log/versenotes"]);
        let expected = std::env::var("VERSENOTES_LOG_LEVEL")
            .unwrap_or_else(|_| versenotes_core::default_log_level().to_string());
        assert_eq!(config.log_level(), expected);
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/versenotes")));
    }

    #[test]
    fn database_url_prefix_is_stripped() {
        let config = parse(&["--database", "sqlite:///var/lib/versenotes/db.sqlite3"]);
        assert_eq!(
            config.database_path(),
            PathBuf::from("/var/lib/versenotes/db.sqlite3")
        );
    }

    #[test]
    fn invalid_origin_is_rejected() {
        let config = parse(&["--allowed-origin", "http://bad\norigin"]);
        assert!(config.allowed_origin_header().is_err());
    }

    #[test]
    fn default_origin_is_a_valid_header() {
        let config = parse(&["--allowed-origin", DEFAULT_ALLOWED_ORIGIN]);
        assert!(config.allowed_origin_header().is_ok());
    }

    #[test]
    fn malformed_bind_address_fails_to_parse() {
        let result = ServerConfig::try_parse_from(["versenotesd", "--bind", "not-an-address"]);
        assert!(result.is_err());
    }
}
