use crate::error::DataError;
use crate::PerformanceSource;
use async_trait::async_trait;
use chrono::NaiveDate;
use configuration::SectorConfig;
use core_types::FundPerformanceSnapshot;
use std::path::{Path, PathBuf};

/// Reads snapshots exported by an external acquisition job.
///
/// Layout: `<root>/<YYYY-MM-DD>/<sector-slug>.json`, each file a JSON array of
/// fund records in the order they were scraped (that order is the ranking tie-break).
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    root: PathBuf,
}

impl JsonDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn sector_path(&self, sector_code: &str, week_date: NaiveDate) -> PathBuf {
        self.root
            .join(week_date.to_string())
            .join(format!("{}.json", sector_slug(sector_code)))
    }
}

#[async_trait]
impl PerformanceSource for JsonDirSource {
    async fn fetch_sector(
        &self,
        sector: &SectorConfig,
        week_date: NaiveDate,
    ) -> Result<Vec<FundPerformanceSnapshot>, DataError> {
        let path = self.sector_path(&sector.code, week_date);
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| DataError::Io {
                path: path.clone(),
                source,
            })?;
        let funds = parse_snapshot(&path, &text)?;

        let total = funds.len();
        let funds: Vec<_> = funds
            .into_iter()
            .filter(|f| f.sector_code == sector.code)
            .collect();
        if funds.len() != total {
            tracing::warn!(
                sector = %sector.code,
                dropped = total - funds.len(),
                "Dropped fund records filed under a different sector"
            );
        }
        if funds.is_empty() {
            return Err(DataError::EmptySector(sector.code.clone()));
        }
        Ok(funds)
    }
}

fn parse_snapshot(path: &Path, text: &str) -> Result<Vec<FundPerformanceSnapshot>, DataError> {
    serde_json::from_str(text).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// File-name form of a sector code: lowercase alphanumerics joined by single dashes.
pub fn sector_slug(sector_code: &str) -> String {
    sector_code
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
