//! Runtime configuration loaded from the environment.

use std::{env, path::PathBuf};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Directory holding the built admin frontend, served as static files.
    pub frontend_dir: PathBuf,
    /// Exact origin allowed by CORS; unset means permissive (dev).
    pub cors_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(3001);
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:agri_admin.db".to_string());
        let frontend_dir = env::var("FRONTEND_DIST")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("frontend/dist"));
        let cors_origin = env::var("CORS_ORIGIN").ok();

        Self {
            host,
            port,
            database_url,
            frontend_dir,
            cors_origin,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            database_url: "sqlite::memory:".to_string(),
            frontend_dir: PathBuf::from("frontend/dist"),
            cors_origin: None,
        }
    }
}
