use crate::error::PipelineError;
use crate::history::RankingHistory;
use crate::report::{SectorOutcome, WeeklyReport};
use chrono::NaiveDate;
use configuration::{Config, SectorConfig};
use core_types::{FundPerformanceSnapshot, RankingRow};
use digest::{DigestInput, SectorLeaders, WeeklyDigest};
use futures::future::join_all;
use market_data::{DataError, PerformanceSource};
use ranking::{RankingEngine, SectorRankingResult};
use std::collections::HashMap;
use std::sync::Arc;

/// Runs one week across every monitored sector.
pub struct WeeklyPipeline {
    engine: Arc<RankingEngine>,
    source: Arc<dyn PerformanceSource>,
    sectors: Vec<SectorConfig>,
    subject_template: String,
}

/// What a sector task hands back.
type SectorTaskOutput = Result<(Vec<FundPerformanceSnapshot>, SectorRankingResult), DataError>;

impl WeeklyPipeline {
    pub fn new(config: &Config, source: Arc<dyn PerformanceSource>) -> Result<Self, PipelineError> {
        let engine = RankingEngine::new(config.ranking)?;
        Ok(Self {
            engine: Arc::new(engine),
            source,
            sectors: config.monitored_sectors().cloned().collect(),
            subject_template: config.digest.subject_template.clone(),
        })
    }

    pub fn sectors(&self) -> &[SectorConfig] {
        &self.sectors
    }

    /// Fetches and ranks every sector concurrently, records the new rankings into
    /// `history` and builds the week's digest.
    ///
    /// A sector whose data cannot be fetched is listed in `failed_sectors` and leaves
    /// the history untouched; the other sectors are unaffected.
    pub async fn run_week(&self, week_date: NaiveDate, history: &mut RankingHistory) -> WeeklyReport {
        tracing::info!(%week_date, sectors = self.sectors.len(), "Starting weekly ranking run.");

        let tasks: Vec<_> = self
            .sectors
            .iter()
            .map(|sector| {
                let engine = Arc::clone(&self.engine);
                let source = Arc::clone(&self.source);
                let sector = sector.clone();
                let prior: Vec<RankingRow> = history.latest_before(&sector.code, week_date).to_vec();

                tokio::spawn(async move {
                    let funds = source.fetch_sector(&sector, week_date).await?;
                    let result = engine.rank_sector(
                        &sector.code,
                        sector.display_name(),
                        week_date,
                        &funds,
                        &prior,
                    );
                    Ok::<_, DataError>((funds, result))
                })
            })
            .collect();

        let results = join_all(tasks).await;

        let mut sectors = Vec::new();
        let mut failed_sectors = Vec::new();
        let mut fund_names = HashMap::new();

        for (sector, joined) in self.sectors.iter().zip(results) {
            let output: SectorTaskOutput = match joined {
                Ok(output) => output,
                Err(e) => {
                    tracing::error!(sector = %sector.code, error = %e, "Sector task did not complete.");
                    failed_sectors.push(sector.code.clone());
                    continue;
                }
            };
            match output {
                Ok((funds, result)) => {
                    for fund in funds {
                        fund_names.entry(fund.fund_id).or_insert(fund.fund_name);
                    }
                    history.record(&sector.code, week_date, result.rankings.clone());
                    sectors.push(SectorOutcome {
                        sector_code: sector.code.clone(),
                        sector_name: sector.display_name().to_string(),
                        result,
                    });
                }
                Err(e) => {
                    tracing::error!(sector = %sector.code, error = %e, "Failed to fetch sector data.");
                    failed_sectors.push(sector.code.clone());
                }
            }
        }

        let digest = self.build_digest(week_date, &sectors, &failed_sectors, &fund_names);
        let report = WeeklyReport {
            week_date,
            sectors,
            failed_sectors,
            digest,
        };

        let summary = report.summary();
        tracing::info!(
            week_date = %summary.week_date,
            sectors_ok = summary.sectors_ok,
            sectors_failed = summary.sectors_failed,
            total_funds = summary.total_funds,
            alerts = summary.alert_count,
            "Weekly ranking run complete."
        );
        report
    }

    fn build_digest(
        &self,
        week_date: NaiveDate,
        sectors: &[SectorOutcome],
        failed_sectors: &[String],
        fund_names: &HashMap<String, String>,
    ) -> WeeklyDigest {
        let alerts: Vec<_> = sectors
            .iter()
            .flat_map(|s| s.result.alerts.iter().cloned())
            .collect();
        let leaders: Vec<_> = sectors
            .iter()
            .map(|s| SectorLeaders {
                sector_code: s.sector_code.clone(),
                sector_name: s.sector_name.clone(),
                funds: s.result.top3.clone(),
            })
            .collect();
        let sector_names: HashMap<_, _> = self
            .sectors
            .iter()
            .map(|s| (s.code.clone(), s.display_name().to_string()))
            .collect();

        WeeklyDigest::build(
            DigestInput {
                week_date,
                alerts: &alerts,
                leaders: &leaders,
                fund_names,
                sector_names: &sector_names,
                failed_sectors,
                total_funds: sectors.iter().map(|s| s.result.n).sum(),
            },
            &self.subject_template,
        )
    }
}
