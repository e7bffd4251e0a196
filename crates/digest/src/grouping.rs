use core_types::{AlertEvent, AlertKind, Period};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// One period in which a fund left the top tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodDrop {
    pub period: Period,
    pub alert_type: AlertKind,
    pub prev_decile: u8,
    pub curr_decile: Option<u8>,
    pub return_value: Option<Decimal>,
}

/// All of a fund's drops in one sector this week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FundAlertGroup {
    pub fund_id: String,
    pub fund_name: String,
    pub sector_code: String,
    pub sector_name: String,
    /// The longest streak broken across the fund's periods.
    pub streak_broken: u32,
    pub drops: Vec<PeriodDrop>,
}

/// Collapses raw alerts into one entry per fund and sector, longest broken streak first.
///
/// Names fall back to the raw identifiers when missing from the lookups. Groups with
/// equal streaks keep the order in which their first alert appeared.
pub fn group_alerts(
    alerts: &[AlertEvent],
    fund_names: &HashMap<String, String>,
    sector_names: &HashMap<String, String>,
) -> Vec<FundAlertGroup> {
    let mut groups: Vec<FundAlertGroup> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for alert in alerts {
        let key = (alert.sector_code.as_str(), alert.fund_id.as_str());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(FundAlertGroup {
                fund_id: alert.fund_id.clone(),
                fund_name: lookup(fund_names, &alert.fund_id),
                sector_code: alert.sector_code.clone(),
                sector_name: lookup(sector_names, &alert.sector_code),
                streak_broken: 0,
                drops: Vec::new(),
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.streak_broken = group.streak_broken.max(alert.streak_broken);
        group.drops.push(PeriodDrop {
            period: alert.period,
            alert_type: alert.alert_type,
            prev_decile: alert.prev_decile,
            curr_decile: alert.curr_decile,
            return_value: alert.return_value,
        });
    }

    groups.sort_by(|a, b| b.streak_broken.cmp(&a.streak_broken));
    groups
}

fn lookup(names: &HashMap<String, String>, key: &str) -> String {
    names.get(key).cloned().unwrap_or_else(|| key.to_string())
}
