// common/src/config.rs
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use config::{Config as ConfigFile, File, Environment};

/// Central configuration for the web server
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub web_server_addr: String,
    /// Maximum tracing level ("trace", "debug", "info", "warn", "error")
    pub log_level: String,

    pub uploads: UploadConfig,
    pub contact: ContactConfig,
    pub session: SessionConfig,

    // Stylesheets and other assets referenced by the templates
    pub static_files: StaticFilesConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Directory receiving files posted to /submit
    pub dir: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Append-only file of JSON contact records
    pub data_file: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_seconds: i64,
    pub cleanup_interval_seconds: u64,
    pub secure_cookie: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    pub mount: String,
    pub path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web_server_addr: "127.0.0.1:3000".to_string(),
            log_level: "info".to_string(),
            uploads: UploadConfig::default(),
            contact: ContactConfig::default(),
            session: SessionConfig::default(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self { dir: "files".to_string() }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self { data_file: "public/contact_data.txt".to_string() }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "portal_session".to_string(),
            ttl_seconds: 86400,
            cleanup_interval_seconds: 3600,
            secure_cookie: false,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            mount: "/static".to_string(),
            path: "./static".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        // Get the run mode, defaulting to "development"
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config_dir = env::var("CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                // Check if we're in the project root or a subcrate
                let mut path = PathBuf::from("./config");
                if !path.exists() {
                    path = PathBuf::from("../config");
                }
                path
            });

        tracing::info!("Loading configuration from {}", config_dir.display());
        tracing::info!("Using run mode: {}", run_mode);

        let config = ConfigFile::builder()
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(format!("{}.toml", run_mode))).required(false))
            // Local overrides, never committed
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            // Environment variables with prefix "APP", e.g. APP_SESSION__TTL_SECONDS
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load from files, falling back to plain environment variables
    pub fn from_env() -> Self {
        match Self::load() {
            Ok(config) => {
                tracing::info!("Configuration loaded from files and environment");
                config
            },
            Err(e) => {
                tracing::warn!("Failed to load configuration from files: {}", e);
                tracing::info!("Falling back to environment variables only");
                Self::from_legacy_env()
            }
        }
    }

    fn from_legacy_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = env::var("WEB_SERVER_ADDR") {
            config.web_server_addr = addr;
        }
        if let Ok(dir) = env::var("UPLOAD_DIR") {
            config.uploads.dir = dir;
        }
        if let Ok(file) = env::var("CONTACT_FILE") {
            config.contact.data_file = file;
        }
        if let Ok(path) = env::var("STATIC_FILES_PATH") {
            config.static_files.path = path;
        }
        config.session.secure_cookie = env::var("SECURE_COOKIE")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(config.session.secure_cookie);

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_legacy_layout() {
        let config = Config::default();
        assert_eq!(config.web_server_addr, "127.0.0.1:3000");
        assert_eq!(config.uploads.dir, "files");
        assert_eq!(config.contact.data_file, "public/contact_data.txt");
        assert_eq!(config.session.ttl_seconds, 86400);
        assert!(!config.session.secure_cookie);
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: Config = ConfigFile::builder()
            .set_override("uploads.dir", "/tmp/portal-uploads")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.uploads.dir, "/tmp/portal-uploads");
        assert_eq!(config.contact.data_file, "public/contact_data.txt");
        assert_eq!(config.session.cookie_name, "portal_session");
    }
}
