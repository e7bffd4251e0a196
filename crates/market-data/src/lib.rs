//! Performance data sources.
//!
//! The pipeline talks to every source through [`PerformanceSource`]. A failure for one
//! sector is reported for that sector only; it never reaches the ranking engine.

pub mod error;
pub mod json_dir;
pub mod mock;

use async_trait::async_trait;
use chrono::NaiveDate;
use configuration::SectorConfig;
use core_types::FundPerformanceSnapshot;

pub use error::DataError;
pub use json_dir::JsonDirSource;
pub use mock::{MockSource, generate_sector};

/// Supplies one sector's weekly performance snapshot.
#[async_trait]
pub trait PerformanceSource: Send + Sync {
    async fn fetch_sector(
        &self,
        sector: &SectorConfig,
        week_date: NaiveDate,
    ) -> Result<Vec<FundPerformanceSnapshot>, DataError>;
}
