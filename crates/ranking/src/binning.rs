use rust_decimal::Decimal;
use std::cmp::Ordering;

const DECILES: u64 = 10;
const QUARTILES: u64 = 4;

/// Periods with fewer valid returns than this are not ranked at all.
pub const MIN_POOL_SIZE: usize = 2;

/// A fund's position within one period's pool of valid returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Standing {
    pub rank: u32,
    pub decile: u8,
    pub quartile: u8,
}

/// Ranks a sector's returns for a single period.
///
/// The output is index-aligned with `returns`. A missing return yields `None`, as
/// does every entry when fewer than [`MIN_POOL_SIZE`] returns are present.
/// Ranking is by return descending; equal returns keep their input order, so the
/// fund listed first gets the better rank.
pub fn assign_standings(returns: &[Option<Decimal>]) -> Vec<Option<Standing>> {
    let mut standings = vec![None; returns.len()];

    let mut pool: Vec<(usize, Decimal)> = returns
        .iter()
        .enumerate()
        .filter_map(|(index, value)| value.map(|v| (index, v)))
        .collect();
    if pool.len() < MIN_POOL_SIZE {
        return standings;
    }

    pool.sort_by(by_return_desc);

    let pool_size = pool.len() as u64;
    for (position, (index, _)) in pool.iter().enumerate() {
        let rank = position as u64 + 1;
        standings[*index] = Some(Standing {
            rank: rank as u32,
            decile: bucket(rank, pool_size, DECILES),
            quartile: bucket(rank, pool_size, QUARTILES),
        });
    }

    standings
}

/// Orders `(input index, return)` pairs best-first, earlier input winning ties.
pub(crate) fn by_return_desc(a: &(usize, Decimal), b: &(usize, Decimal)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

/// `ceil(rank / pool_size * buckets)` clamped to `1..=buckets`, in exact integer math.
fn bucket(rank: u64, pool_size: u64, buckets: u64) -> u8 {
    (rank * buckets).div_ceil(pool_size).clamp(1, buckets) as u8
}
