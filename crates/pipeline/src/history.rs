use crate::error::PipelineError;
use chrono::NaiveDate;
use core_types::RankingRow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Ranking snapshots by sector and week.
///
/// Stands in for the ranking store: the engine only ever needs the most recent
/// snapshot strictly before the week being ranked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingHistory {
    sectors: BTreeMap<String, BTreeMap<NaiveDate, Vec<RankingRow>>>,
}

impl RankingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows of the latest recorded week strictly before `week_date`, or an empty slice.
    pub fn latest_before(&self, sector_code: &str, week_date: NaiveDate) -> &[RankingRow] {
        self.sectors
            .get(sector_code)
            .and_then(|weeks| weeks.range(..week_date).next_back())
            .map(|(_, rows)| rows.as_slice())
            .unwrap_or(&[])
    }

    /// Stores a week's rows, replacing any earlier run for the same week.
    /// An empty row set (a skipped sector) leaves the history untouched.
    pub fn record(&mut self, sector_code: &str, week_date: NaiveDate, rows: Vec<RankingRow>) {
        if rows.is_empty() {
            return;
        }
        self.sectors
            .entry(sector_code.to_string())
            .or_default()
            .insert(week_date, rows);
    }

    pub fn weeks(&self, sector_code: &str) -> Vec<NaiveDate> {
        self.sectors
            .get(sector_code)
            .map(|weeks| weeks.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    /// Loads a history file; a missing file is an empty history.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No ranking history yet, starting empty.");
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(PipelineError::HistoryIo {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&text).map_err(|source| PipelineError::HistoryFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), PipelineError> {
        let text = serde_json::to_string_pretty(self).map_err(|source| {
            PipelineError::HistoryFormat {
                path: path.to_path_buf(),
                source,
            }
        })?;
        std::fs::write(path, text).map_err(|source| PipelineError::HistoryIo {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::PeriodRanking;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn rows(fund: &str, week: NaiveDate) -> Vec<RankingRow> {
        vec![RankingRow {
            fund_id: fund.to_string(),
            sector_code: "IA Global".to_string(),
            week_date: Some(week),
            one_month: PeriodRanking::default(),
            three_month: PeriodRanking::default(),
            six_month: PeriodRanking::default(),
            total_in_sector: 1,
        }]
    }

    #[test]
    fn latest_before_is_strictly_earlier() {
        let mut history = RankingHistory::new();
        history.record("IA Global", date(2), rows("A", date(2)));
        history.record("IA Global", date(9), rows("B", date(9)));

        assert!(history.latest_before("IA Global", date(2)).is_empty());
        assert_eq!(history.latest_before("IA Global", date(9))[0].fund_id, "A");
        assert_eq!(history.latest_before("IA Global", date(16))[0].fund_id, "B");
        assert!(history.latest_before("IA Japan", date(16)).is_empty());
    }

    #[test]
    fn rerunning_a_week_replaces_it() {
        let mut history = RankingHistory::new();
        history.record("IA Global", date(9), rows("A", date(9)));
        history.record("IA Global", date(9), rows("B", date(9)));
        history.record("IA Global", date(16), Vec::new());

        assert_eq!(history.weeks("IA Global"), vec![date(9)]);
        assert_eq!(history.latest_before("IA Global", date(16))[0].fund_id, "B");
    }

    #[test]
    fn survives_a_trip_through_the_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        assert!(RankingHistory::load(&path).unwrap().is_empty());

        let mut history = RankingHistory::new();
        history.record("IA Global", date(9), rows("A", date(9)));
        history.save(&path).unwrap();

        assert_eq!(RankingHistory::load(&path).unwrap(), history);
    }

    #[test]
    fn corrupt_history_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "[1, 2").unwrap();

        assert!(matches!(
            RankingHistory::load(&path),
            Err(PipelineError::HistoryFormat { .. })
        ));
    }
}
