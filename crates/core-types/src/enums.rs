use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A return horizon that funds are ranked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonth,
    #[serde(rename = "6m")]
    SixMonth,
}

impl Period {
    /// Every ranked period, in evaluation order.
    pub const ALL: [Period; 3] = [Period::OneMonth, Period::ThreeMonth, Period::SixMonth];

    /// The short label used in records and digests ("1m", "3m", "6m").
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::OneMonth => "1m",
            Period::ThreeMonth => "3m",
            Period::SixMonth => "6m",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1m" => Ok(Period::OneMonth),
            "3m" => Ok(Period::ThreeMonth),
            "6m" => Ok(Period::SixMonth),
            other => Err(CoreError::InvalidInput("period".to_string(), other.to_string())),
        }
    }
}

/// The kind of tier exit an alert reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    DecileDrop,
    QuartileDrop,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::DecileDrop => "decile_drop",
            AlertKind::QuartileDrop => "quartile_drop",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which band counts as "top tier" for a sector/week.
///
/// Small sectors are too thin for deciles to mean much, so below the configured
/// threshold the first quartile is used instead. The mode is resolved once per
/// sector/week and applies to every period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierMode {
    Decile,
    Quartile,
}

impl TierMode {
    /// Quartile mode iff the sector population is strictly below the threshold.
    pub fn for_population(n: usize, quartile_threshold: usize) -> Self {
        if n < quartile_threshold {
            TierMode::Quartile
        } else {
            TierMode::Decile
        }
    }

    pub fn uses_quartiles(&self) -> bool {
        matches!(self, TierMode::Quartile)
    }

    pub fn alert_kind(&self) -> AlertKind {
        match self {
            TierMode::Decile => AlertKind::DecileDrop,
            TierMode::Quartile => AlertKind::QuartileDrop,
        }
    }

    /// Picks the band value this mode is judged on.
    pub fn tier_value(&self, decile: Option<u8>, quartile: Option<u8>) -> Option<u8> {
        match self {
            TierMode::Decile => decile,
            TierMode::Quartile => quartile,
        }
    }

    pub fn is_top(&self, decile: Option<u8>, quartile: Option<u8>) -> bool {
        self.tier_value(decile, quartile) == Some(1)
    }
}
