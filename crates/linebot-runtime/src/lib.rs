//! # LINE bot runtime
//!
//! Process-level concerns around the bot:
//! - Configuration loading and validation ([`config`])
//! - Logging setup ([`logging`])
//! - Wiring and lifecycle ([`LineBotRuntime`])
//!
//! ```ignore
//! use linebot_runtime::LineBotRuntime;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runtime = LineBotRuntime::builder()
//!         .config_file("linebot.toml")
//!         .build()?;
//!
//!     // Serve webhooks until Ctrl+C
//!     runtime.run().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;

pub use config::{ConfigError, ConfigLoader, ConfigResult, LineBotConfig};
pub use error::{RuntimeError, RuntimeResult};
pub use runtime::{LineBotRuntime, RuntimeBuilder};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Logging macros.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
