use crate::binning::by_return_desc;
use core_types::{FundPerformanceSnapshot, TopFund};

/// How many funds make a sector's 6-month leaderboard.
pub const TOP_N: usize = 3;

/// Picks the best 6-month performers for the digest.
///
/// Funds without a 6-month return are ignored and ties keep input order. Fewer than
/// [`TOP_N`] qualifying funds yields a shorter list, never padding.
pub fn select_top(
    performances: &[FundPerformanceSnapshot],
    sector_code: &str,
    sector_name: &str,
) -> Vec<TopFund> {
    let mut candidates: Vec<_> = performances
        .iter()
        .enumerate()
        .filter_map(|(index, fund)| fund.return_6m.map(|r| (index, r)))
        .collect();
    candidates.sort_by(by_return_desc);

    candidates
        .into_iter()
        .take(TOP_N)
        .enumerate()
        .map(|(position, (index, return_6m))| {
            let fund = &performances[index];
            TopFund {
                rank: position as u8 + 1,
                fund_id: fund.fund_id.clone(),
                fund_name: fund.fund_name.clone(),
                sector_code: sector_code.to_string(),
                sector_name: sector_name.to_string(),
                return_6m,
                return_3m: fund.return_3m,
                return_1m: fund.return_1m,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn fund(id: &str, r6: Option<Decimal>, r3: Option<Decimal>) -> FundPerformanceSnapshot {
        FundPerformanceSnapshot {
            fund_id: id.to_string(),
            fund_name: format!("Fund {id}"),
            sector_code: "IA Global".to_string(),
            return_1m: None,
            return_3m: r3,
            return_6m: r6,
            return_1y: None,
        }
    }

    #[test]
    fn picks_highest_six_month_returns() {
        let funds = vec![
            fund("a", Some(dec!(3.0)), None),
            fund("b", Some(dec!(11.0)), Some(dec!(4.5))),
            fund("c", None, Some(dec!(20.0))),
            fund("d", Some(dec!(8.0)), None),
            fund("e", Some(dec!(9.5)), None),
        ];
        let top = select_top(&funds, "IA Global", "Global");

        let ids: Vec<_> = top.iter().map(|t| t.fund_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "e", "d"]);
        assert_eq!(top[0].rank, 1);
        assert_eq!(top[0].return_3m, Some(dec!(4.5)));
        assert_eq!(top[1].return_3m, None);
        assert_eq!(top[2].sector_name, "Global");
    }

    #[test]
    fn ties_keep_input_order() {
        let funds = vec![
            fund("a", Some(dec!(5)), None),
            fund("b", Some(dec!(7)), None),
            fund("c", Some(dec!(5)), None),
            fund("d", Some(dec!(5)), None),
        ];
        let ids: Vec<_> = select_top(&funds, "s", "s")
            .into_iter()
            .map(|t| t.fund_id)
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn never_pads_short_lists() {
        let funds = vec![fund("a", None, None), fund("b", Some(dec!(1)), None)];
        assert_eq!(select_top(&funds, "s", "s").len(), 1);
        assert!(select_top(&[], "s", "s").is_empty());
    }
}
