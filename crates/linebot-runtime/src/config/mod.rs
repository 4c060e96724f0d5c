//! Configuration for the LINE bot.
//!
//! Settings are layered with figment: built-in defaults, then a TOML file,
//! then `LINEBOT_*` environment variables. See [`loader`] for the details.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config, load_config_from_file};
pub use schema::{
    ChannelConfig, LineBotConfig, LogFormat, LogLevel, LogOutput, LoggingConfig, ServerConfig,
    SpanEventConfig,
};
pub use validation::validate_config;
