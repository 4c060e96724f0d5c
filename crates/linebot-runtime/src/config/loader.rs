//! Configuration loader using figment.
//!
//! # Feature Flags
//!
//! - `toml-config` *(default)*: enables TOML configuration files
//!   (`linebot.toml`, `config.toml`)
//!
//! # Configuration Priority (lowest to highest)
//!
//! 1. Built-in defaults
//! 2. Programmatic defaults ([`ConfigLoader::merge`])
//! 3. Profile-specific config file (`linebot.{profile}.toml`)
//! 4. Main config file (`linebot.toml`), or the file given to [`ConfigLoader::file`]
//! 5. Environment variables (`LINEBOT_*`)
//! 6. Single-key overrides ([`ConfigLoader::set`], used for CLI flags)
//!
//! # Environment Variable Mapping
//!
//! Environment variables use the `LINEBOT_` prefix with `__` as separator:
//!
//! - `LINEBOT_CHANNEL__ACCESS_TOKEN=xxx` → `channel.access_token = "xxx"`
//! - `LINEBOT_SERVER__PORT=3000` → `server.port = 3000`
//! - `LINEBOT_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//!
//! # Example
//!
//! ```rust,ignore
//! use linebot_runtime::config::ConfigLoader;
//!
//! let config = ConfigLoader::new()
//!     .file("./deploy/linebot.toml")
//!     .load()?;
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Serialized};
#[cfg(feature = "toml-config")]
use figment::providers::{Format, Toml};
use tracing::{debug, info, trace, warn};

use super::error::{ConfigError, ConfigResult};
use super::schema::LineBotConfig;
use super::validation::validate_config;

/// Configuration profile for environment-specific settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Profile {
    /// Development profile (default).
    #[default]
    Development,
    /// Production profile.
    Production,
    /// Custom profile name.
    Custom(String),
}

impl Profile {
    /// Returns the profile name as a string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Custom(name) => name,
        }
    }

    /// Parses a profile name; `prod` and `dev` are accepted as short forms.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "development" | "dev" => Self::Development,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Reads `LINEBOT_PROFILE`, defaulting to development.
    pub fn from_env() -> Self {
        std::env::var("LINEBOT_PROFILE")
            .map(|p| Self::parse(&p))
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration loader with figment-based multi-source support.
pub struct ConfigLoader {
    /// Programmatic defaults.
    figment: Figment,
    /// Single-key overrides, merged last.
    overrides: Figment,
    profile: Profile,
    /// Directories searched for config files.
    search_paths: Vec<PathBuf>,
    load_env: bool,
    /// Specific config file to load (overrides search).
    config_file: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a new configuration loader with defaults.
    pub fn new() -> Self {
        Self {
            figment: Figment::new(),
            overrides: Figment::new(),
            profile: Profile::from_env(),
            search_paths: Vec::new(),
            load_env: true,
            config_file: None,
        }
    }

    /// Sets the configuration profile.
    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.profile = Profile::parse(profile.as_ref());
        self
    }

    /// Adds a search path for configuration files.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Sets a specific configuration file to load.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enables loading environment variables (default: true).
    pub fn with_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Merges additional configuration programmatically.
    pub fn merge(mut self, config: LineBotConfig) -> Self {
        self.figment = self.figment.merge(Serialized::defaults(config));
        self
    }

    /// Sets a single key, e.g. `("logging.level", "debug")`. Overrides every
    /// other source.
    pub fn set<V: serde::Serialize>(mut self, key: &str, value: V) -> Self {
        self.overrides = self.overrides.merge(Serialized::default(key, value));
        self
    }

    /// Loads the configuration without validating it.
    pub fn load_unvalidated(self) -> ConfigResult<LineBotConfig> {
        let profile = self.profile.clone();
        let figment = self.build_figment()?;

        let config: LineBotConfig = figment.extract().map_err(Box::new)?;

        debug!(
            profile = %profile,
            logging_level = %config.logging.level,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Loads and validates the configuration.
    pub fn load(self) -> ConfigResult<LineBotConfig> {
        let config = self.load_unvalidated()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Builds the figment instance with all sources.
    fn build_figment(mut self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(LineBotConfig::default()));

        let user_figment = std::mem::take(&mut self.figment);
        figment = figment.merge(user_figment);

        if let Some(path) = self.config_file.clone() {
            if path.exists() {
                info!(path = %path.display(), "Loading configuration file");
                figment = Self::merge_config_file(figment, &path)?;
            } else {
                return Err(ConfigError::FileNotFound(path));
            }
        } else {
            figment = self.load_config_files(figment);
        }

        if self.load_env {
            trace!("Loading environment variables with LINEBOT_ prefix");
            figment = figment.merge(Env::prefixed("LINEBOT_").split("__"));
        }

        Ok(figment.merge(self.overrides))
    }

    /// Merges a single config file into the figment, dispatching on file extension.
    fn merge_config_file(figment: Figment, path: &Path) -> ConfigResult<Figment> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            #[cfg(feature = "toml-config")]
            "toml" => Ok(figment.merge(Toml::file(path))),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: ext.to_string(),
            }),
        }
    }

    /// Resolves the effective list of search paths.
    fn resolve_search_paths(&self) -> Vec<PathBuf> {
        if self.search_paths.is_empty() {
            let mut paths = Vec::new();
            if let Ok(cwd) = std::env::current_dir() {
                paths.push(cwd);
            }
            if let Some(config_dir) = dirs::config_dir() {
                paths.push(config_dir.join("linebot"));
            }
            paths
        } else {
            self.search_paths.clone()
        }
    }

    /// Searches for and loads configuration files from search paths.
    ///
    /// For each search path, a profile-specific file is merged first, then the
    /// base file; the first base file found ends the search.
    #[cfg(feature = "toml-config")]
    fn load_config_files(&self, mut figment: Figment) -> Figment {
        for search_path in self.resolve_search_paths() {
            for (stem, ext) in [("linebot", "toml"), ("config", "toml")] {
                let profile_path =
                    search_path.join(format!("{stem}.{}.{ext}", self.profile.as_str()));
                if profile_path.exists() {
                    debug!(path = %profile_path.display(), "Loading profile-specific config");
                    figment = figment.merge(Toml::file(&profile_path));
                }

                let base_path = search_path.join(format!("{stem}.{ext}"));
                if base_path.exists() {
                    info!(path = %base_path.display(), "Loading configuration file");
                    return figment.merge(Toml::file(&base_path));
                }
            }
        }

        warn!("No configuration file found, using defaults");
        figment
    }

    #[cfg(not(feature = "toml-config"))]
    fn load_config_files(&self, figment: Figment) -> Figment {
        trace!(paths = ?self.resolve_search_paths(), "Config file support disabled");
        figment
    }
}

/// Loads and validates the configuration from the default locations.
pub fn load_config() -> ConfigResult<LineBotConfig> {
    ConfigLoader::new().load()
}

/// Loads and validates the configuration from `path`, plus environment variables.
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<LineBotConfig> {
    ConfigLoader::new().file(path).load()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{LogFormat, LogLevel};
    use std::fs;

    #[test]
    fn test_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::new()
            .search_path(dir.path())
            .without_env()
            .load_unvalidated()
            .unwrap();

        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.channel.api_base_url, "https://api.line.me");
        assert_eq!(config.server.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.server.path, "/webhook");
        assert!(config.channel.access_token.is_empty());
    }

    #[test]
    fn test_default_config_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigLoader::new()
            .search_path(dir.path())
            .without_env()
            .load();

        assert!(matches!(
            result,
            Err(ConfigError::MissingField("channel.access_token"))
        ));
    }

    #[test]
    fn test_load_from_search_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("linebot.toml"),
            r#"
[channel]
access_token = "from-file"

[server]
port = 3000

[logging]
level = "debug"
format = "pretty"

[logging.filters]
linebot_transport = "trace"
"#,
        )
        .unwrap();

        let config = ConfigLoader::new()
            .search_path(dir.path())
            .without_env()
            .load()
            .unwrap();

        assert_eq!(config.channel.access_token, "from-file");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(
            config.logging.filters.get("linebot_transport"),
            Some(&LogLevel::Trace)
        );
    }

    #[test]
    fn test_profile_file_is_overridden_by_base_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("linebot.production.toml"),
            "[channel]\naccess_token = \"prod\"\n[server]\nport = 443\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("linebot.toml"),
            "[channel]\naccess_token = \"base\"\n",
        )
        .unwrap();

        let config = ConfigLoader::new()
            .profile("prod")
            .search_path(dir.path())
            .without_env()
            .load()
            .unwrap();

        assert_eq!(config.channel.access_token, "base");
        assert_eq!(config.server.port, 443);
    }

    #[test]
    fn test_explicit_file_not_found() {
        let result = ConfigLoader::new()
            .file("/nonexistent/linebot.toml")
            .without_env()
            .load();

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("linebot.ini");
        fs::write(&path, "token=x").unwrap();

        let result = ConfigLoader::new().file(&path).without_env().load();
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedFormat { extension, .. }) if extension == "ini"
        ));
    }

    #[test]
    fn test_unknown_log_level_fails_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("linebot.toml");
        fs::write(
            &path,
            "[channel]\naccess_token = \"t\"\n[logging]\nlevel = \"verbose\"\n",
        )
        .unwrap();

        let result = ConfigLoader::new().file(&path).without_env().load();
        assert!(matches!(result, Err(ConfigError::Extract(_))));
    }

    #[test]
    fn test_set_overrides_single_key() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::new()
            .search_path(dir.path())
            .without_env()
            .set("channel.access_token", "programmatic")
            .set("logging.level", "warn")
            .load()
            .unwrap();

        assert_eq!(config.channel.access_token, "programmatic");
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_set_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("linebot.toml"),
            "[channel]\naccess_token = \"t\"\n[server]\nport = 3000\n",
        )
        .unwrap();

        let config = ConfigLoader::new()
            .search_path(dir.path())
            .without_env()
            .set("server.port", 9000)
            .load()
            .unwrap();

        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("linebot.toml"),
            "[channel]\naccess_token = \"from-file\"\ntimeout_ms = 1000\n",
        )
        .unwrap();

        // SAFETY: no other test loads LINEBOT_ environment variables
        unsafe {
            std::env::set_var("LINEBOT_CHANNEL__TIMEOUT_MS", "2500");
        }
        let config = ConfigLoader::new().search_path(dir.path()).load();
        unsafe {
            std::env::remove_var("LINEBOT_CHANNEL__TIMEOUT_MS");
        }

        let config = config.unwrap();
        assert_eq!(config.channel.access_token, "from-file");
        assert_eq!(config.channel.timeout_ms, 2500);
    }

    #[test]
    fn test_profile_parse() {
        assert_eq!(Profile::parse("PROD"), Profile::Production);
        assert_eq!(Profile::parse("dev"), Profile::Development);
        assert_eq!(Profile::parse("staging"), Profile::Custom("staging".into()));
    }
}
