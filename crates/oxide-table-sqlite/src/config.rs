//! Connection settings for a [`Database`](crate::Database).

use std::fmt;
use std::str::FromStr;

use sqlx::sqlite::SqliteConnectOptions;

/// Database used when nothing else is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:my_database.db";

/// URL of a private in-memory database.
pub const IN_MEMORY_URL: &str = "sqlite::memory:";

/// Where to connect and how to set up administrative access.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// sqlx connection URL, e.g. `sqlite:my_database.db`.
    pub url: String,
    /// Create the database file when it does not exist.
    pub create_if_missing: bool,
    /// Passphrase installed right after connecting.
    pub passphrase: Option<String>,
}

impl DatabaseConfig {
    /// Creates a config for the given URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            create_if_missing: true,
            passphrase: None,
        }
    }

    /// Config for a private in-memory database.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY_URL)
    }

    /// Sets whether a missing database file is created.
    #[must_use]
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    /// Sets the passphrase installed after connecting.
    #[must_use]
    pub fn passphrase(mut self, secret: impl Into<String>) -> Self {
        self.passphrase = Some(secret.into());
        self
    }

    /// Parses the URL into sqlx connect options.
    pub fn connect_options(&self) -> Result<SqliteConnectOptions, sqlx::Error> {
        Ok(SqliteConnectOptions::from_str(&self.url)?.create_if_missing(self.create_if_missing))
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_URL)
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url)
            .field("create_if_missing", &self.create_if_missing)
            .field("passphrase", &self.passphrase.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DatabaseConfig::default();
        assert_eq!(config.url, "sqlite:my_database.db");
        assert!(config.create_if_missing);
        assert!(config.passphrase.is_none());
    }

    #[test]
    fn test_setters_chain() {
        let config = DatabaseConfig::in_memory()
            .create_if_missing(false)
            .passphrase("lorem-ipsum");
        assert_eq!(config.url, IN_MEMORY_URL);
        assert!(!config.create_if_missing);
        assert_eq!(config.passphrase.as_deref(), Some("lorem-ipsum"));
    }

    #[test]
    fn test_debug_hides_passphrase() {
        let config = DatabaseConfig::in_memory().passphrase("lorem-ipsum");
        let debug = format!("{config:?}");
        assert!(!debug.contains("lorem-ipsum"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_connect_options_rejects_bad_url() {
        assert!(DatabaseConfig::new("sqlite:data.db?mode=bogus").connect_options().is_err());
        assert!(DatabaseConfig::in_memory().connect_options().is_ok());
    }
}
