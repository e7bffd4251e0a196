use crate::grouping::{FundAlertGroup, group_alerts};
use chrono::NaiveDate;
use configuration::DigestConfig;
use core_types::{AlertEvent, TopFund};
use serde::Serialize;
use std::collections::HashMap;

/// The 6-month leaders of one sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectorLeaders {
    pub sector_code: String,
    pub sector_name: String,
    pub funds: Vec<TopFund>,
}

/// Everything a week's run hands over to be summarised.
#[derive(Debug, Clone, Copy)]
pub struct DigestInput<'a> {
    pub week_date: NaiveDate,
    pub alerts: &'a [AlertEvent],
    pub leaders: &'a [SectorLeaders],
    pub fund_names: &'a HashMap<String, String>,
    pub sector_names: &'a HashMap<String, String>,
    pub failed_sectors: &'a [String],
    pub total_funds: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyDigest {
    pub week_date: NaiveDate,
    pub subject: String,
    pub alerts: Vec<FundAlertGroup>,
    pub leaders: Vec<SectorLeaders>,
    pub failed_sectors: Vec<String>,
    pub total_funds: usize,
}

impl WeeklyDigest {
    pub fn build(input: DigestInput<'_>, subject_template: &str) -> Self {
        let alerts = group_alerts(input.alerts, input.fund_names, input.sector_names);
        let subject = build_subject(alerts.len(), input.week_date, subject_template);

        Self {
            week_date: input.week_date,
            subject,
            alerts,
            leaders: input
                .leaders
                .iter()
                .filter(|l| !l.funds.is_empty())
                .cloned()
                .collect(),
            failed_sectors: input.failed_sectors.to_vec(),
            total_funds: input.total_funds,
        }
    }

    /// Number of funds (not periods) that left the top tier.
    pub fn drop_count(&self) -> usize {
        self.alerts.len()
    }

    pub fn top3_count(&self) -> usize {
        self.leaders.iter().map(|l| l.funds.len()).sum()
    }

    pub fn sector_count(&self) -> usize {
        self.leaders.len()
    }

    pub fn should_send(&self, config: &DigestConfig) -> bool {
        config.send_even_if_no_drops || self.drop_count() > 0
    }
}

/// Fills `{drop_count}`, `{plural}` and `{week_date}` in the subject template.
pub fn build_subject(drop_count: usize, week_date: NaiveDate, template: &str) -> String {
    let plural = if drop_count == 1 { "" } else { "s" };
    template
        .replace("{drop_count}", &drop_count.to_string())
        .replace("{plural}", plural)
        .replace("{week_date}", &week_date.format("%-d %b %Y").to_string())
}
