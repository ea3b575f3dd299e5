//! Runtime settings for the server, taken from the environment with
//! sensible local-development defaults.

use std::env;

pub const DEFAULT_DB_PATH: &str = "admatrix.sqlite";

#[derive(Clone, Debug)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub db_path: String,
}

impl Settings {
    /// Reads `ADMATRIX_HOST`, `ADMATRIX_PORT` and `ADMATRIX_DB`,
    /// falling back to `127.0.0.1:8080` and `admatrix.sqlite`.
    /// An unparsable port falls back to the default rather than aborting.
    pub fn from_env() -> Settings {
        let host = env::var("ADMATRIX_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("ADMATRIX_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let db_path = env::var("ADMATRIX_DB").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
        Settings {
            host,
            port,
            db_path,
        }
    }
}
