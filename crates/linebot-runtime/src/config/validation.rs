//! Checks that run after the sources are merged.

use super::error::{ConfigError, ConfigResult};
use super::schema::{ChannelConfig, LineBotConfig, LogOutput, LoggingConfig, ServerConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &LineBotConfig) -> ConfigResult<()> {
    validate_channel(&config.channel)?;
    validate_server(&config.server)?;
    validate_logging(&config.logging)
}

fn validate_channel(channel: &ChannelConfig) -> ConfigResult<()> {
    if channel.access_token.trim().is_empty() {
        return Err(ConfigError::MissingField("channel.access_token"));
    }
    if channel.timeout_ms == 0 {
        return Err(ConfigError::invalid("channel.timeout_ms", "must be greater than 0"));
    }

    let url = &channel.api_base_url;
    if url.is_empty() {
        return Err(ConfigError::MissingField("channel.api_base_url"));
    }
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(ConfigError::invalid(
            "channel.api_base_url",
            format!("must be an http(s) URL, got `{url}`"),
        ));
    }
    Ok(())
}

fn validate_server(server: &ServerConfig) -> ConfigResult<()> {
    if server.host.is_empty() {
        return Err(ConfigError::MissingField("server.host"));
    }
    if !server.path.starts_with('/') {
        return Err(ConfigError::invalid("server.path", "must start with '/'"));
    }
    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::MissingField("logging.file_path"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> LineBotConfig {
        let mut config = LineBotConfig::default();
        config.channel.access_token = "token".to_string();
        config
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn test_validate_missing_token() {
        let mut config = valid();
        config.channel.access_token = "  ".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::MissingField("channel.access_token"))
        ));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = valid();
        config.channel.timeout_ms = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Invalid {
                field: "channel.timeout_ms",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_bad_url() {
        let mut config = valid();
        config.channel.api_base_url = "ftp://api.line.me".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Invalid {
                field: "channel.api_base_url",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_relative_path() {
        let mut config = valid();
        config.server.path = "webhook".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Invalid {
                field: "server.path",
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_error_names_the_field() {
        let mut config = valid();
        config.channel.api_base_url = "api.line.me".to_string();
        let message = validate_config(&config).unwrap_err().to_string();
        assert_eq!(
            message,
            "`channel.api_base_url` must be an http(s) URL, got `api.line.me`"
        );
    }

    #[test]
    fn test_validate_file_output_requires_path() {
        let mut config = valid();
        config.logging.output = LogOutput::File;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::MissingField("logging.file_path"))
        ));

        config.logging.file_path = Some("linebot.log".into());
        assert!(validate_config(&config).is_ok());
    }
}
