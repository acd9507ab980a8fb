use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3500`).
    pub port: u16,
    /// JSON document backing the store (default: `db.json`).
    pub db_path: PathBuf,
    /// Allowed CORS origins from comma-separated `CORS_ORIGINS`.
    /// A single `*` mirrors whatever origin the request carries.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Reject every mutating request with 403 (default: `false`).
    pub read_only: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default   |
    /// |------------------------|-----------|
    /// | `HOST`                 | `0.0.0.0` |
    /// | `PORT`                 | `3500`    |
    /// | `DB_PATH`              | `db.json` |
    /// | `CORS_ORIGINS`         | `*`       |
    /// | `REQUEST_TIMEOUT_SECS` | `30`      |
    /// | `READ_ONLY`            | `false`   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3500".into())
            .parse()
            .expect("PORT must be a valid u16");

        let db_path = std::env::var("DB_PATH")
            .unwrap_or_else(|_| "db.json".into())
            .into();

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let read_only = std::env::var("READ_ONLY")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Self {
            host,
            port,
            db_path,
            cors_origins,
            request_timeout_secs,
            read_only,
        }
    }

    /// Whether CORS should accept any origin.
    pub fn cors_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_empty_entries_dropped() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test"),
            ["http://a.test", "http://b.test"]
        );
    }

    #[test]
    fn flags() {
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("nope"));
    }
}
