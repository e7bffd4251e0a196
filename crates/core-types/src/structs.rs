use crate::enums::{AlertKind, Period};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One fund's performance in one sector for one week, as delivered by the
/// acquisition layer. Returns are percentages; any of them may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundPerformanceSnapshot {
    pub fund_id: String,
    pub fund_name: String,
    pub sector_code: String,
    #[serde(default)]
    pub return_1m: Option<Decimal>,
    #[serde(default)]
    pub return_3m: Option<Decimal>,
    #[serde(default)]
    pub return_6m: Option<Decimal>,
    /// Carried through for display; never ranked.
    #[serde(default)]
    pub return_1y: Option<Decimal>,
}

impl FundPerformanceSnapshot {
    pub fn return_for(&self, period: Period) -> Option<Decimal> {
        match period {
            Period::OneMonth => self.return_1m,
            Period::ThreeMonth => self.return_3m,
            Period::SixMonth => self.return_6m,
        }
    }
}

/// Relative standing of a fund for a single period, plus its top-tier streak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRanking {
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub decile: Option<u8>,
    #[serde(default)]
    pub quartile: Option<u8>,
    #[serde(default)]
    pub streak: u32,
}

/// A fund's ranking for one sector/week. This week's rows are next week's prior.
///
/// On the wire a row is flat (`rank_1m`, `decile_6m`, `streak_3m`, ...). Only `fund_id`
/// is required when a row is read back as prior input; unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RankingRecord", into = "RankingRecord")]
pub struct RankingRow {
    pub fund_id: String,
    /// Empty when a prior row was supplied without it.
    pub sector_code: String,
    pub week_date: Option<NaiveDate>,
    pub one_month: PeriodRanking,
    pub three_month: PeriodRanking,
    pub six_month: PeriodRanking,
    pub total_in_sector: usize,
}

/// Flat JSON shape of a [`RankingRow`].
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RankingRecord {
    fund_id: String,
    #[serde(default)]
    sector_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    week_date: Option<NaiveDate>,
    #[serde(default)]
    rank_1m: Option<u32>,
    #[serde(default)]
    rank_3m: Option<u32>,
    #[serde(default)]
    rank_6m: Option<u32>,
    #[serde(default)]
    decile_1m: Option<u8>,
    #[serde(default)]
    decile_3m: Option<u8>,
    #[serde(default)]
    decile_6m: Option<u8>,
    #[serde(default)]
    quartile_1m: Option<u8>,
    #[serde(default)]
    quartile_3m: Option<u8>,
    #[serde(default)]
    quartile_6m: Option<u8>,
    #[serde(default)]
    streak_1m: u32,
    #[serde(default)]
    streak_3m: u32,
    #[serde(default)]
    streak_6m: u32,
    #[serde(default)]
    total_in_sector: usize,
}

impl From<RankingRecord> for RankingRow {
    fn from(r: RankingRecord) -> Self {
        Self {
            fund_id: r.fund_id,
            sector_code: r.sector_code,
            week_date: r.week_date,
            one_month: PeriodRanking {
                rank: r.rank_1m,
                decile: r.decile_1m,
                quartile: r.quartile_1m,
                streak: r.streak_1m,
            },
            three_month: PeriodRanking {
                rank: r.rank_3m,
                decile: r.decile_3m,
                quartile: r.quartile_3m,
                streak: r.streak_3m,
            },
            six_month: PeriodRanking {
                rank: r.rank_6m,
                decile: r.decile_6m,
                quartile: r.quartile_6m,
                streak: r.streak_6m,
            },
            total_in_sector: r.total_in_sector,
        }
    }
}

impl From<RankingRow> for RankingRecord {
    fn from(row: RankingRow) -> Self {
        let (one, three, six) = (row.one_month, row.three_month, row.six_month);
        Self {
            fund_id: row.fund_id,
            sector_code: row.sector_code,
            week_date: row.week_date,
            rank_1m: one.rank,
            rank_3m: three.rank,
            rank_6m: six.rank,
            decile_1m: one.decile,
            decile_3m: three.decile,
            decile_6m: six.decile,
            quartile_1m: one.quartile,
            quartile_3m: three.quartile,
            quartile_6m: six.quartile,
            streak_1m: one.streak,
            streak_3m: three.streak,
            streak_6m: six.streak,
            total_in_sector: row.total_in_sector,
        }
    }
}

impl RankingRow {
    pub fn period(&self, period: Period) -> &PeriodRanking {
        match period {
            Period::OneMonth => &self.one_month,
            Period::ThreeMonth => &self.three_month,
            Period::SixMonth => &self.six_month,
        }
    }

    pub fn period_mut(&mut self, period: Period) -> &mut PeriodRanking {
        match period {
            Period::OneMonth => &mut self.one_month,
            Period::ThreeMonth => &mut self.three_month,
            Period::SixMonth => &mut self.six_month,
        }
    }
}

/// Emitted when a fund leaves the top tier it held in the prior week.
///
/// `prev_decile` and `curr_decile` hold the band value of whichever tier mode was
/// in force (decile or quartile), matching `alert_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub fund_id: String,
    pub sector_code: String,
    pub week_date: NaiveDate,
    pub alert_type: AlertKind,
    pub period: Period,
    pub prev_decile: u8,
    pub curr_decile: Option<u8>,
    pub streak_broken: u32,
    /// The fund's return for `period` this week. `None` when the fund has no return,
    /// which is itself a top-tier exit; it is never reported as zero.
    pub return_value: Option<Decimal>,
}

/// One line of a sector's 6-month leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopFund {
    pub rank: u8,
    pub fund_id: String,
    pub fund_name: String,
    pub sector_code: String,
    pub sector_name: String,
    pub return_6m: Decimal,
    pub return_3m: Option<Decimal>,
    pub return_1m: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn snapshot_deserializes_with_missing_returns() {
        let json = r#"{
            "fund_id": "GB0001",
            "fund_name": "Evenlode Income",
            "sector_code": "IA UK Equity Income",
            "return_1m": 1.25,
            "return_6m": null
        }"#;
        let snapshot: FundPerformanceSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.return_for(Period::OneMonth), Some(dec!(1.25)));
        assert_eq!(snapshot.return_for(Period::ThreeMonth), None);
        assert_eq!(snapshot.return_for(Period::SixMonth), None);
        assert_eq!(snapshot.return_1y, None);
    }

    #[test]
    fn flat_prior_row_needs_only_the_fund_id() {
        let json = r#"{
            "fund_id": "GB0001",
            "decile_6m": 1,
            "quartile_6m": 1,
            "streak_6m": 3
        }"#;
        let row: RankingRow = serde_json::from_str(json).unwrap();

        let six = row.period(Period::SixMonth);
        assert_eq!((six.decile, six.quartile, six.streak), (Some(1), Some(1), 3));
        assert_eq!(row.period(Period::OneMonth), &PeriodRanking::default());
        assert_eq!(row.week_date, None);
        assert_eq!(row.sector_code, "");
    }

    #[test]
    fn nested_or_misspelt_rows_are_rejected() {
        let nested = r#"{ "fund_id": "GB0001", "6m": { "decile": 1 } }"#;
        assert!(serde_json::from_str::<RankingRow>(nested).is_err());

        let misspelt = r#"{ "fund_id": "GB0001", "decile6m": 1 }"#;
        assert!(serde_json::from_str::<RankingRow>(misspelt).is_err());
    }

    #[test]
    fn rows_serialize_flat() {
        let row = RankingRow {
            fund_id: "GB0001".to_string(),
            sector_code: "IA Global".to_string(),
            week_date: NaiveDate::from_ymd_opt(2026, 2, 9),
            one_month: PeriodRanking::default(),
            three_month: PeriodRanking::default(),
            six_month: PeriodRanking {
                rank: Some(2),
                decile: Some(1),
                quartile: Some(1),
                streak: 4,
            },
            total_in_sector: 32,
        };
        let value = serde_json::to_value(&row).unwrap();

        assert_eq!(value["week_date"], "2026-02-09");
        assert_eq!(value["rank_6m"], 2);
        assert_eq!(value["streak_6m"], 4);
        assert!(value["decile_1m"].is_null());
        assert_eq!(value["total_in_sector"], 32);
        assert_eq!(serde_json::from_value::<RankingRow>(value).unwrap(), row);
    }
}
