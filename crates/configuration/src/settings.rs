use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::HashSet;

pub const DEFAULT_SUBJECT_TEMPLATE: &str =
    "FundScope Weekly — {drop_count} Decile Drop{plural} · w/e {week_date}";

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub sectors: Vec<SectorConfig>,
    #[serde(default)]
    pub digest: DigestConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Parameters for the weekly ranking engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Sectors with fewer funds than this use quartile 1 as the top tier instead of decile 1.
    pub quartile_threshold: usize,
    /// Sectors with fewer funds than this are skipped for the week.
    pub min_funds: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            quartile_threshold: 20,
            min_funds: 5,
        }
    }
}

impl RankingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quartile_threshold == 0 {
            return Err(ConfigError::ValidationError(
                "ranking.quartile_threshold must be at least 1".to_string(),
            ));
        }
        if self.min_funds == 0 {
            return Err(ConfigError::ValidationError(
                "ranking.min_funds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A peer group of funds that are ranked against each other.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectorConfig {
    pub code: String,
    /// Display name; the code is used when omitted.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_true")]
    pub monitored: bool,
}

impl SectorConfig {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: None,
            monitored: true,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.code)
    }
}

/// Settings for the weekly digest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    /// Supports `{drop_count}`, `{plural}` and `{week_date}` placeholders.
    pub subject_template: String,
    pub send_even_if_no_drops: bool,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            subject_template: DEFAULT_SUBJECT_TEMPLATE.to_string(),
            send_even_if_no_drops: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<String>,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "fundscope.log".to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ranking.validate()?;

        let mut seen = HashSet::new();
        for sector in &self.sectors {
            if sector.code.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "sector code must not be empty".to_string(),
                ));
            }
            if !seen.insert(sector.code.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate sector code '{}'",
                    sector.code
                )));
            }
        }
        Ok(())
    }

    pub fn monitored_sectors(&self) -> impl Iterator<Item = &SectorConfig> {
        self.sectors.iter().filter(|s| s.monitored)
    }

    /// Looks up a sector's display name, falling back to the code itself.
    pub fn sector_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.sectors
            .iter()
            .find(|s| s.code == code)
            .map(SectorConfig::display_name)
            .unwrap_or(code)
    }
}

fn default_true() -> bool {
    true
}
