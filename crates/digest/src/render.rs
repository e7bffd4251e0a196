use crate::error::DigestError;
use crate::weekly::WeeklyDigest;
use rust_decimal::Decimal;
use std::fmt::Write;

impl WeeklyDigest {
    /// Renders the digest as Markdown, the same body an email would carry.
    pub fn render_markdown(&self) -> Result<String, DigestError> {
        let mut out = String::new();

        writeln!(out, "# {}", escape_markdown(&self.subject))?;
        writeln!(out)?;
        writeln!(
            out,
            "Week ending {}. {} funds ranked across {} sectors.",
            self.week_date.format("%-d %B %Y"),
            self.total_funds,
            self.sector_count()
        )?;
        writeln!(out)?;

        writeln!(out, "## Top-tier exits ({})", self.drop_count())?;
        writeln!(out)?;
        if self.alerts.is_empty() {
            writeln!(out, "No funds left the top tier this week.")?;
        } else {
            writeln!(out, "| Fund | Sector | Period | Tier | Return | Streak broken |")?;
            writeln!(out, "|---|---|---|---|---|---|")?;
            for group in &self.alerts {
                for drop in &group.drops {
                    writeln!(
                        out,
                        "| {} | {} | {} | {} → {} | {} | {} |",
                        escape_markdown(&group.fund_name),
                        escape_markdown(&group.sector_name),
                        drop.period,
                        drop.prev_decile,
                        drop.curr_decile.map_or_else(|| "n/a".to_string(), |d| d.to_string()),
                        format_return(drop.return_value),
                        group.streak_broken
                    )?;
                }
            }
        }
        writeln!(out)?;

        writeln!(out, "## 6-month leaders")?;
        for sector in &self.leaders {
            writeln!(out)?;
            writeln!(out, "### {}", escape_markdown(&sector.sector_name))?;
            writeln!(out)?;
            writeln!(out, "| # | Fund | 6m | 3m | 1m |")?;
            writeln!(out, "|---|---|---|---|---|")?;
            for fund in &sector.funds {
                writeln!(
                    out,
                    "| {} | {} | {} | {} | {} |",
                    fund.rank,
                    escape_markdown(&fund.fund_name),
                    format_return(Some(fund.return_6m)),
                    format_return(fund.return_3m),
                    format_return(fund.return_1m)
                )?;
            }
        }

        if !self.failed_sectors.is_empty() {
            writeln!(out)?;
            writeln!(out, "## Sectors not updated")?;
            writeln!(out)?;
            for code in &self.failed_sectors {
                writeln!(out, "- {}", escape_markdown(code))?;
            }
        }

        Ok(out)
    }
}

fn format_return(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v),
        None => "n/a".to_string(),
    }
}

/// Escapes characters that would break a Markdown table cell or add emphasis.
fn escape_markdown(text: &str) -> String {
    let special_chars = r"\_*[]`|";
    special_chars
        .chars()
        .fold(text.to_string(), |s, c| s.replace(c, &format!("\\{}", c)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weekly::{DigestInput, SectorLeaders};
    use chrono::NaiveDate;
    use configuration::DEFAULT_SUBJECT_TEMPLATE;
    use core_types::{AlertEvent, AlertKind, Period, TopFund};
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn digest(alerts: &[AlertEvent], leaders: &[SectorLeaders], failed: &[String]) -> WeeklyDigest {
        let fund_names = HashMap::from([("A".to_string(), "Alpha | Beta_Fund".to_string())]);
        let sector_names = HashMap::from([("IA Global".to_string(), "Global".to_string())]);
        WeeklyDigest::build(
            DigestInput {
                week_date: NaiveDate::from_ymd_opt(2026, 2, 6).unwrap(),
                alerts,
                leaders,
                fund_names: &fund_names,
                sector_names: &sector_names,
                failed_sectors: failed,
                total_funds: 42,
            },
            DEFAULT_SUBJECT_TEMPLATE,
        )
    }

    #[test]
    fn escapes_table_breaking_characters() {
        assert_eq!(escape_markdown("Alpha | Beta_Fund"), r"Alpha \| Beta\_Fund");
        assert_eq!(escape_markdown(r"a\b"), r"a\\b");
    }

    #[test]
    fn quiet_week_says_so() {
        let text = digest(&[], &[], &[]).render_markdown().unwrap();
        assert!(text.starts_with("# FundScope Weekly — 0 Decile Drops · w/e 6 Feb 2026\n"));
        assert!(text.contains("Week ending 6 February 2026. 42 funds ranked across 0 sectors."));
        assert!(text.contains("No funds left the top tier this week."));
        assert!(!text.contains("Sectors not updated"));
    }

    #[test]
    fn drops_leaders_and_failures_are_listed() {
        let alerts = vec![AlertEvent {
            fund_id: "A".to_string(),
            sector_code: "IA Global".to_string(),
            week_date: NaiveDate::from_ymd_opt(2026, 2, 6).unwrap(),
            alert_type: AlertKind::QuartileDrop,
            period: Period::SixMonth,
            prev_decile: 1,
            curr_decile: None,
            streak_broken: 4,
            return_value: None,
        }];
        let leaders = vec![SectorLeaders {
            sector_code: "IA Global".to_string(),
            sector_name: "Global".to_string(),
            funds: vec![TopFund {
                rank: 1,
                fund_id: "Z".to_string(),
                fund_name: "Zeta".to_string(),
                sector_code: "IA Global".to_string(),
                sector_name: "Global".to_string(),
                return_6m: dec!(12.3),
                return_3m: Some(dec!(-1.5)),
                return_1m: None,
            }],
        }];
        let failed = vec!["IA Japan".to_string()];

        let text = digest(&alerts, &leaders, &failed).render_markdown().unwrap();

        assert!(text.contains(r"| Alpha \| Beta\_Fund | Global | 6m | 1 → n/a | n/a | 4 |"));
        assert!(text.contains("### Global"));
        assert!(text.contains("| 1 | Zeta | 12.30% | -1.50% | n/a |"));
        assert!(text.contains("## Sectors not updated\n\n- IA Japan\n"));
    }
}
