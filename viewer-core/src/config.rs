//! Viewer configuration: HTTP listener, auth gate, database and logging. Loaded from env.

use std::env;

use crate::error::{Result, ViewerError};

/// Runtime configuration for the viewer.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// PORT
    pub port: u16,
    /// ADMIN_USER
    pub admin_user: String,
    /// ADMIN_PASSWORD; empty leaves the auth gate open
    pub admin_password: String,
    /// DATABASE_URL
    pub database_url: String,
    /// DB_SCHEMA; qualifies the Instance/Chat/Message tables
    pub db_schema: String,
    /// DB_MAX_CONNECTIONS
    pub db_max_connections: u32,
    /// LOG_FILE
    pub log_file: String,
}

impl ViewerConfig {
    /// Load from environment variables. Unset variables fall back to their defaults;
    /// set but unparsable numeric values are an error.
    pub fn load() -> Result<Self> {
        let port = parse_var("PORT", 3000)?;
        let admin_user = env::var("ADMIN_USER").unwrap_or_else(|_| "admin".to_string());
        let admin_password = env::var("ADMIN_PASSWORD").unwrap_or_default();
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://./evolution.db".to_string());
        let db_schema = env::var("DB_SCHEMA").unwrap_or_else(|_| "main".to_string());
        let db_max_connections = parse_var("DB_MAX_CONNECTIONS", 5)?;
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/viewer.log".to_string());

        Ok(Self {
            port,
            admin_user,
            admin_password,
            database_url,
            db_schema,
            db_max_connections,
            log_file,
        })
    }

    /// Whether requests must carry basic-auth credentials.
    pub fn auth_enabled(&self) -> bool {
        !self.admin_password.is_empty()
    }

    /// Validate config: the schema name is interpolated into SQL, so it must be a plain identifier.
    pub fn validate(&self) -> Result<()> {
        if !is_identifier(&self.db_schema) {
            return Err(ViewerError::Config(format!(
                "DB_SCHEMA must be a plain identifier, got {:?}",
                self.db_schema
            )));
        }
        if self.db_max_connections == 0 {
            return Err(ViewerError::Config(
                "DB_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ViewerError::Config(format!("{} is not a valid number: {}", name, raw))),
        _ => Ok(default),
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
