use crate::alerts::{AlertDetector, PriorTier};
use crate::binning::{Standing, assign_standings};
use crate::error::RankingError;
use crate::result::SectorRankingResult;
use crate::streak::next_streak;
use crate::top::select_top;
use chrono::NaiveDate;
use configuration::RankingConfig;
use core_types::{FundPerformanceSnapshot, Period, PeriodRanking, RankingRow, TierMode};
use std::collections::HashMap;

/// The weekly sector ranking engine.
///
/// Stateless between calls: the only thing it keeps is its configuration.
#[derive(Debug, Clone)]
pub struct RankingEngine {
    config: RankingConfig,
}

impl RankingEngine {
    pub fn new(config: RankingConfig) -> Result<Self, RankingError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Ranks one sector for one week.
    ///
    /// # Arguments
    ///
    /// * `performances` - This week's snapshot for the sector. Input order is the tie-break.
    /// * `prior` - The ranking rows of the most recent earlier week for this sector, or
    ///   empty. Supplying rows from any other week is a caller error that is not detected.
    ///
    /// # Returns
    ///
    /// Rankings for every fund in input order, tier-exit alerts in fund-then-period order,
    /// and the 6-month top-3. Sectors below `min_funds` come back empty apart from `n`.
    pub fn rank_sector(
        &self,
        sector_code: &str,
        sector_name: &str,
        week_date: NaiveDate,
        performances: &[FundPerformanceSnapshot],
        prior: &[RankingRow],
    ) -> SectorRankingResult {
        let n = performances.len();
        let mode = TierMode::for_population(n, self.config.quartile_threshold);

        if n < self.config.min_funds {
            tracing::warn!(
                sector = sector_name,
                n,
                min_funds = self.config.min_funds,
                "Too few funds to rank, skipping sector"
            );
            return SectorRankingResult::skipped(mode, n);
        }

        let standings: [Vec<Option<Standing>>; 3] = Period::ALL.map(|period| {
            let returns: Vec<_> = performances.iter().map(|f| f.return_for(period)).collect();
            assign_standings(&returns)
        });

        let prior_by_fund: HashMap<&str, &RankingRow> =
            prior.iter().map(|row| (row.fund_id.as_str(), row)).collect();
        let detector = AlertDetector::new(sector_code, week_date, mode);

        let mut rankings = Vec::with_capacity(n);
        let mut alerts = Vec::new();

        for (index, fund) in performances.iter().enumerate() {
            let previous = prior_by_fund.get(fund.fund_id.as_str()).copied();
            let mut row = RankingRow {
                fund_id: fund.fund_id.clone(),
                sector_code: sector_code.to_string(),
                week_date: Some(week_date),
                one_month: PeriodRanking::default(),
                three_month: PeriodRanking::default(),
                six_month: PeriodRanking::default(),
                total_in_sector: n,
            };

            for (period, period_standings) in Period::ALL.into_iter().zip(&standings) {
                let prior_tier = PriorTier::from_row(previous, period, mode);
                let ranking = row.period_mut(period);

                if let Some(standing) = period_standings[index] {
                    ranking.rank = Some(standing.rank);
                    ranking.decile = Some(standing.decile);
                    ranking.quartile = Some(standing.quartile);
                }
                let in_top = mode.is_top(ranking.decile, ranking.quartile);
                ranking.streak = next_streak(prior_tier.streak, in_top);

                if let Some(alert) = detector.detect(
                    &fund.fund_id,
                    period,
                    prior_tier,
                    ranking,
                    fund.return_for(period),
                ) {
                    alerts.push(alert);
                }
            }

            rankings.push(row);
        }

        let top3 = select_top(performances, sector_code, sector_name);

        tracing::debug!(
            sector = sector_name,
            n,
            use_quartiles = mode.uses_quartiles(),
            alerts = alerts.len(),
            "Sector ranked"
        );

        SectorRankingResult {
            rankings,
            alerts,
            top3,
            use_quartiles: mode.uses_quartiles(),
            n,
        }
    }
}
