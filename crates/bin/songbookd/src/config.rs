//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `songbook.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::collections::HashSet;

use serde::Deserialize;
use url::Url;

use songbook_adapter_http_axum::serializer::UnknownFields;
use songbook_adapter_http_axum::state::ApiSettings;
use songbook_domain::access::{AccessPolicy, ParsePermissionError, Permission, Principal};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// API behaviour.
    pub api: ApiConfig,
    /// Static API tokens.
    pub auth: AuthConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Base URL used for absolute hyperlinks (e.g. `https://music.example.com`).
    pub public_url: Option<String>,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Request handling options.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// `ignore` or `reject` payload keys a resource does not declare.
    pub unknown_fields: UnknownFields,
    /// Access policy applied to every mutation.
    pub policy: AccessPolicy,
}

/// Token table.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub users: Vec<UserConfig>,
}

/// One API user and the token it authenticates with.
#[derive(Debug, Deserialize)]
pub struct UserConfig {
    pub username: String,
    pub token: String,
    #[serde(default)]
    pub superuser: bool,
    /// `<model>.<action>` strings such as `songs.add`.
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Config {
    /// Load configuration from `songbook.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("songbook.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("SONGBOOK_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("SONGBOOK_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("SONGBOOK_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("SONGBOOK_PUBLIC_URL") {
            self.server.public_url = Some(val);
        }
        if let Some(val) = var("SONGBOOK_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = var("SONGBOOK_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        self.public_url()?;
        self.principals()?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Parsed public base URL, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns an error when the value is not an absolute `http`/`https` URL.
    pub fn public_url(&self) -> Result<Option<Url>, ConfigError> {
        let Some(raw) = self.server.public_url.as_deref() else {
            return Ok(None);
        };
        let url = Url::parse(raw).map_err(ConfigError::PublicUrl)?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(ConfigError::Validation(format!(
                "public_url {raw:?} must be an absolute http(s) URL"
            )));
        }
        Ok(Some(url))
    }

    /// `(token, principal)` pairs for the token authenticator.
    ///
    /// # Errors
    ///
    /// Returns an error for blank usernames or tokens, a token containing
    /// whitespace, a token used twice, or a malformed permission string.
    pub fn principals(&self) -> Result<Vec<(String, Principal)>, ConfigError> {
        let mut seen = HashSet::new();
        let mut principals = Vec::with_capacity(self.auth.users.len());
        for user in &self.auth.users {
            if user.username.trim().is_empty() {
                return Err(ConfigError::Validation("username must not be blank".to_string()));
            }
            if user.token.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "token for {} must not be blank",
                    user.username
                )));
            }
            if user.token.contains(char::is_whitespace) {
                return Err(ConfigError::Validation(format!(
                    "token for {} must not contain whitespace",
                    user.username
                )));
            }
            if !seen.insert(user.token.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "token for {} is already assigned",
                    user.username
                )));
            }
            let permissions = user
                .permissions
                .iter()
                .map(|raw| raw.parse::<Permission>())
                .collect::<Result<_, _>>()?;
            principals.push((
                user.token.clone(),
                Principal {
                    username: user.username.clone(),
                    superuser: user.superuser,
                    permissions,
                },
            ));
        }
        Ok(principals)
    }

    /// Settings handed to the HTTP adapter.
    ///
    /// # Errors
    ///
    /// Returns an error when the public URL is invalid.
    pub fn api_settings(&self) -> Result<ApiSettings, ConfigError> {
        Ok(ApiSettings {
            policy: self.api.policy,
            unknown_fields: self.api.unknown_fields,
            public_url: self.public_url()?,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            public_url: None,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:songbook.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "songbookd=info,songbook=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// `server.public_url` is not a URL.
    #[error("invalid public_url")]
    PublicUrl(#[source] url::ParseError),
    /// A user lists a permission that does not exist.
    #[error(transparent)]
    Permission(#[from] ParsePermissionError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use songbook_domain::access::{Action, Model};

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.public_url, None);
        assert_eq!(config.database.url, "sqlite:songbook.db?mode=rwc");
        assert_eq!(config.api.policy, AccessPolicy::ModelPermissionsOrAnonReadOnly);
        assert_eq!(config.api.unknown_fields, UnknownFields::Ignore);
        assert!(config.auth.users.is_empty());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090
            public_url = 'https://music.example.com'

            [database]
            url = 'sqlite:test.db'

            [logging]
            filter = 'debug'

            [api]
            unknown_fields = 'reject'
            policy = 'authenticated-or-read-only'

            [[auth.users]]
            username = 'admin'
            token = 'a'
            superuser = true

            [[auth.users]]
            username = 'editor'
            token = 'e'
            permissions = ['artists.add', 'songs.change']
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.url, "sqlite:test.db");
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.api.unknown_fields, UnknownFields::Reject);
        assert_eq!(config.api.policy, AccessPolicy::AuthenticatedOrReadOnly);
        assert_eq!(config.auth.users.len(), 2);
        assert!(config.validate().is_ok());

        let principals = config.principals().unwrap();
        let (token, editor) = &principals[1];
        assert_eq!(token, "e");
        assert!(!editor.superuser);
        assert!(editor.has_permission(Permission::new(Model::Song, Action::Change)));
        assert!(!editor.has_permission(Permission::new(Model::Song, Action::Delete)));
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_valid_port() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_format_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn should_apply_overrides_over_file_values() {
        let mut config = Config::default();
        config.apply_overrides(vars(&[
            ("SONGBOOK_BIND", "127.0.0.1:8000"),
            ("SONGBOOK_PUBLIC_URL", "http://localhost:8000"),
            ("SONGBOOK_DATABASE_URL", "sqlite::memory:"),
            ("SONGBOOK_LOG", "warn"),
        ]));
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
        assert_eq!(config.server.public_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.database_url(), "sqlite::memory:");
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_prefer_rust_log_over_songbook_log() {
        let mut config = Config::default();
        config.apply_overrides(vars(&[("SONGBOOK_LOG", "warn"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_ignore_unparsable_port_override() {
        let mut config = Config::default();
        config.apply_overrides(vars(&[("SONGBOOK_PORT", "http")]));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_reject_relative_public_url() {
        let mut config = Config::default();
        config.server.public_url = Some("/songbook".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::PublicUrl(_))));

        config.server.public_url = Some("mailto:admin@example.com".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_duplicate_tokens() {
        let toml = "
            [[auth.users]]
            username = 'one'
            token = 'same'

            [[auth.users]]
            username = 'two'
            token = 'same'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_blank_token() {
        let toml = "
            [[auth.users]]
            username = 'one'
            token = ' '
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_token_containing_whitespace() {
        for token in ["my token", " padded", "tab\tkey"] {
            let mut config = Config::default();
            config.auth.users.push(UserConfig {
                username: "one".to_string(),
                token: token.to_string(),
                superuser: true,
                permissions: Vec::new(),
            });
            assert!(
                matches!(config.validate(), Err(ConfigError::Validation(_))),
                "{token:?}"
            );
        }
    }

    #[test]
    fn should_reject_unknown_permission() {
        let toml = "
            [[auth.users]]
            username = 'one'
            token = 't'
            permissions = ['albums.add']
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Permission(_))));
    }

    #[test]
    fn should_reject_unknown_policy() {
        let result: Result<Config, _> = toml::from_str("[api]\npolicy = 'allow-any'");
        assert!(result.is_err());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
