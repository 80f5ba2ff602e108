use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Database path is not empty
/// - Every auto-download source is also a persisting source
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.database.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "database.path cannot be empty".to_string(),
        ));
    }

    let search = &config.search;
    if let Some(source) = search
        .auto_download_sources
        .iter()
        .find(|s| !search.persisting_sources.contains(s))
    {
        return Err(ConfigError::ValidationError(format!(
            "search.auto_download_sources contains '{}' which is not a persisting source",
            source.as_str()
        )));
    }

    Ok(())
}
