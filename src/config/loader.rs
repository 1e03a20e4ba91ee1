//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::SiteConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Render a configuration as the TOML document that would load it.
pub fn render_config(config: &SiteConfig) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_validation_errors_are_joined() {
        let err = parse_config(
            r#"
            [timeouts]
            request_secs = 0

            [site]
            title = ""
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::Validation(ref v) if v.len() == 2));
        assert_eq!(
            err.to_string(),
            "Validation failed: timeouts.request_secs must be greater than zero, \
             site.title must not be empty"
        );
    }

    #[test]
    fn test_rendered_config_loads_back() {
        let mut config = SiteConfig::default();
        config.listener.bind_address = "127.0.0.1:9000".into();
        config.observability.log_format = crate::config::LogFormat::Json;
        config.site.title = "Rendered".into();

        let rendered = render_config(&config).unwrap();
        let loaded = parse_config(&rendered).unwrap();

        assert_eq!(loaded.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(loaded.observability.log_format, crate::config::LogFormat::Json);
        assert_eq!(loaded.observability.log_filter, config.observability.log_filter);
        assert_eq!(loaded.timeouts.request_secs, config.timeouts.request_secs);
        assert_eq!(loaded.site.title, "Rendered");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("log-showcase-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[site]\ntitle = \"Demo\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.site.title, "Demo");

        let _ = fs::remove_file(&path);
    }
}
