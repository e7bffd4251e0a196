use chrono::NaiveDate;
use core_types::{AlertEvent, Period, PeriodRanking, RankingRow, TierMode};
use rust_decimal::Decimal;

/// The value of the tier a fund must have held to raise an alert.
const TOP_TIER: u8 = 1;

/// What last week's ranking says about one fund/period.
///
/// A fund with no prior row is "not top" with a zero streak, so it can never
/// alert in its first week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorTier {
    pub was_top: bool,
    pub streak: u32,
}

impl PriorTier {
    /// Reads prior membership using this week's tier mode.
    pub fn from_row(row: Option<&RankingRow>, period: Period, mode: TierMode) -> Self {
        match row {
            Some(row) => {
                let prior = row.period(period);
                Self {
                    was_top: mode.is_top(prior.decile, prior.quartile),
                    streak: prior.streak,
                }
            }
            None => Self::default(),
        }
    }
}

/// Detects top-tier exits for one sector/week.
///
/// Per fund/period the tier is a two-state machine: `NOT_TOP` and `TOP(k)`. An alert
/// fires only on `TOP(k) -> NOT_TOP`, carrying `k` as the streak broken. Entering,
/// staying in, or staying out of the top tier is silent.
#[derive(Debug, Clone, Copy)]
pub struct AlertDetector<'a> {
    sector_code: &'a str,
    week_date: NaiveDate,
    mode: TierMode,
}

impl<'a> AlertDetector<'a> {
    pub fn new(sector_code: &'a str, week_date: NaiveDate, mode: TierMode) -> Self {
        Self {
            sector_code,
            week_date,
            mode,
        }
    }

    pub fn detect(
        &self,
        fund_id: &str,
        period: Period,
        prior: PriorTier,
        current: &PeriodRanking,
        return_value: Option<Decimal>,
    ) -> Option<AlertEvent> {
        let curr_tier = self.mode.tier_value(current.decile, current.quartile);
        if !prior.was_top || curr_tier == Some(TOP_TIER) {
            return None;
        }

        Some(AlertEvent {
            fund_id: fund_id.to_string(),
            sector_code: self.sector_code.to_string(),
            week_date: self.week_date,
            alert_type: self.mode.alert_kind(),
            period,
            prev_decile: TOP_TIER,
            curr_decile: curr_tier,
            streak_broken: prior.streak,
            return_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::AlertKind;
    use rust_decimal_macros::dec;

    fn week() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 16).unwrap()
    }

    fn standing(decile: Option<u8>, quartile: Option<u8>) -> PeriodRanking {
        PeriodRanking {
            rank: decile.map(u32::from),
            decile,
            quartile,
            streak: 0,
        }
    }

    fn prior_row(six_month: PeriodRanking) -> RankingRow {
        RankingRow {
            fund_id: "GB0001".to_string(),
            sector_code: "IA Global".to_string(),
            week_date: Some(week() - chrono::Duration::days(7)),
            one_month: PeriodRanking::default(),
            three_month: PeriodRanking::default(),
            six_month,
            total_in_sector: 32,
        }
    }

    #[test]
    fn prior_tier_reads_the_active_mode() {
        let row = prior_row(PeriodRanking {
            rank: Some(4),
            decile: Some(2),
            quartile: Some(1),
            streak: 5,
        });

        let as_quartile = PriorTier::from_row(Some(&row), Period::SixMonth, TierMode::Quartile);
        assert_eq!(as_quartile, PriorTier { was_top: true, streak: 5 });

        let as_decile = PriorTier::from_row(Some(&row), Period::SixMonth, TierMode::Decile);
        assert_eq!(as_decile, PriorTier { was_top: false, streak: 5 });

        assert_eq!(
            PriorTier::from_row(None, Period::SixMonth, TierMode::Decile),
            PriorTier::default()
        );
    }

    #[test]
    fn exit_from_top_decile_fires() {
        let detector = AlertDetector::new("IA Global", week(), TierMode::Decile);
        let alert = detector
            .detect(
                "GB0001",
                Period::SixMonth,
                PriorTier { was_top: true, streak: 3 },
                &standing(Some(2), Some(1)),
                Some(dec!(14.2)),
            )
            .expect("alert");

        assert_eq!(alert.alert_type, AlertKind::DecileDrop);
        assert_eq!(alert.prev_decile, 1);
        assert_eq!(alert.curr_decile, Some(2));
        assert_eq!(alert.streak_broken, 3);
        assert_eq!(alert.return_value, Some(dec!(14.2)));
        assert_eq!(alert.week_date, week());
    }

    #[test]
    fn missing_return_counts_as_an_exit() {
        let detector = AlertDetector::new("IA Global", week(), TierMode::Quartile);
        let alert = detector
            .detect(
                "GB0001",
                Period::ThreeMonth,
                PriorTier { was_top: true, streak: 1 },
                &standing(None, None),
                None,
            )
            .expect("alert");

        assert_eq!(alert.alert_type, AlertKind::QuartileDrop);
        assert_eq!(alert.curr_decile, None);
        assert_eq!(alert.return_value, None);
    }

    #[test]
    fn no_alert_without_an_exit() {
        let detector = AlertDetector::new("IA Global", week(), TierMode::Decile);
        let cases = [
            (PriorTier { was_top: true, streak: 2 }, standing(Some(1), Some(1))),
            (PriorTier { was_top: false, streak: 0 }, standing(Some(1), Some(1))),
            (PriorTier { was_top: false, streak: 0 }, standing(Some(6), Some(3))),
            (PriorTier::default(), standing(None, None)),
        ];
        for (prior, current) in cases {
            assert!(
                detector
                    .detect("GB0001", Period::OneMonth, prior, &current, Some(dec!(1)))
                    .is_none(),
                "{prior:?} -> {current:?}"
            );
        }
    }
}
