use chrono::NaiveDate;
use core_types::AlertEvent;
use digest::WeeklyDigest;
use ranking::SectorRankingResult;
use serde::Serialize;

/// One sector's ranking for the week.
#[derive(Debug, Clone, Serialize)]
pub struct SectorOutcome {
    pub sector_code: String,
    pub sector_name: String,
    pub result: SectorRankingResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyReport {
    pub week_date: NaiveDate,
    /// Sectors that were fetched, in configured order. Skipped sectors are included.
    pub sectors: Vec<SectorOutcome>,
    pub failed_sectors: Vec<String>,
    pub digest: WeeklyDigest,
}

impl WeeklyReport {
    pub fn alerts(&self) -> impl Iterator<Item = &AlertEvent> {
        self.sectors.iter().flat_map(|s| s.result.alerts.iter())
    }

    pub fn total_funds(&self) -> usize {
        self.sectors.iter().map(|s| s.result.n).sum()
    }

    pub fn summary(&self) -> WeeklySummary {
        WeeklySummary {
            week_date: self.week_date,
            sectors_ok: self.sectors.len(),
            sectors_failed: self.failed_sectors.len(),
            total_funds: self.total_funds(),
            alert_count: self.alerts().count(),
        }
    }
}

/// Headline numbers for one weekly run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeeklySummary {
    pub week_date: NaiveDate,
    pub sectors_ok: usize,
    pub sectors_failed: usize,
    pub total_funds: usize,
    pub alert_count: usize,
}
