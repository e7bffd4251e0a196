use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
#[cfg(feature = "clap")]
pub mod overrides;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
#[cfg(feature = "clap")]
pub use overrides::RankingOverrides;
pub use settings::{
    Config, DEFAULT_SUBJECT_TEMPLATE, DigestConfig, LoggingConfig, RankingConfig, SectorConfig,
};

/// Environment variables with this prefix override file values,
/// e.g. `FUNDSCOPE__RANKING__MIN_FUNDS=3`.
pub const ENV_PREFIX: &str = "FUNDSCOPE";

/// Loads the application configuration from a TOML file plus environment overrides.
///
/// The result is validated before it is returned, so callers can hand
/// `config.ranking` straight to the engine.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path.as_ref()))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    finish(builder)
}

/// Parses configuration from an in-memory TOML document. No environment overrides are applied.
pub fn load_config_from_str(toml: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    finish(builder)
}

fn finish(builder: config::Config) -> Result<Config, ConfigError> {
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(
        sectors = config.sectors.len(),
        quartile_threshold = config.ranking.quartile_threshold,
        min_funds = config.ranking.min_funds,
        "Configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
        [ranking]
        quartile_threshold = 15

        [[sectors]]
        code = "IA Global"

        [[sectors]]
        code = "IA UK Smaller Companies"
        name = "UK Smaller Companies"
        monitored = false
    "#;

    #[test]
    fn partial_ranking_section_keeps_defaults() {
        let config = load_config_from_str(SAMPLE).unwrap();

        assert_eq!(config.ranking.quartile_threshold, 15);
        assert_eq!(config.ranking.min_funds, 5);
        assert_eq!(config.digest, DigestConfig::default());
    }

    #[test]
    fn sectors_default_to_monitored_and_code_as_name() {
        let config = load_config_from_str(SAMPLE).unwrap();

        let monitored: Vec<_> = config.monitored_sectors().map(|s| s.code.as_str()).collect();
        assert_eq!(monitored, vec!["IA Global"]);
        assert_eq!(config.sector_name("IA Global"), "IA Global");
        assert_eq!(config.sector_name("IA UK Smaller Companies"), "UK Smaller Companies");
        assert_eq!(config.sector_name("IA Unknown"), "IA Unknown");
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.ranking, RankingConfig::default());
        assert!(config.sectors.is_empty());
    }

    #[test]
    fn zero_min_funds_is_rejected() {
        let err = load_config_from_str("[ranking]\nmin_funds = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn duplicate_sector_codes_are_rejected() {
        let toml = "[[sectors]]\ncode = \"IA Global\"\n[[sectors]]\ncode = \"IA Global\"\n";
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(msg) if msg.contains("IA Global")));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.sectors.len(), 2);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load_config("/definitely/not/here/config.toml").unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }
}
