//! Server configuration collected from environment variables.

use std::env;
use std::path::PathBuf;

/// Runtime settings for the storefront server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Path to the SQLite database file.
    pub database_url: String,
    /// Interface the HTTP server binds to.
    pub address: String,
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Secret used to sign session and flash cookies. `None` means a random key per process.
    pub secret: Option<String>,
    /// Cookie domain; `localhost` disables the domain attribute.
    pub domain: String,
    /// Directory where uploaded product images are written.
    pub upload_dir: PathBuf,
    /// Glob used to load Tera templates.
    pub templates: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: "app.db".to_string(),
            address: "127.0.0.1".to_string(),
            port: 8080,
            secret: None,
            domain: "localhost".to_string(),
            upload_dir: PathBuf::from("./assets/uploads"),
            templates: "templates/**/*".to_string(),
        }
    }
}

impl ServerConfig {
    /// Read the configuration from the process environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(value) => value.parse::<u16>().unwrap_or_else(|_| {
                log::warn!("Invalid PORT `{value}`, using {}", defaults.port);
                defaults.port
            }),
            Err(_) => defaults.port,
        };

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            address: env::var("ADDRESS").unwrap_or(defaults.address),
            port,
            secret: env::var("SECRET_KEY").ok().filter(|value| !value.is_empty()),
            domain: env::var("DOMAIN").unwrap_or(defaults.domain),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            templates: env::var("TEMPLATES_DIR").unwrap_or(defaults.templates),
        }
    }

    /// Cookie domain attribute, if one should be set.
    pub fn cookie_domain(&self) -> Option<String> {
        if self.domain.is_empty() || self.domain == "localhost" {
            None
        } else {
            Some(format!(".{}", self.domain))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_domain_is_skipped_for_localhost() {
        let config = ServerConfig::default();
        assert_eq!(config.cookie_domain(), None);

        let config = ServerConfig {
            domain: "shop.example.com".to_string(),
            ..ServerConfig::default()
        };
        assert_eq!(config.cookie_domain().as_deref(), Some(".shop.example.com"));
    }
}
