use core_types::{AlertEvent, RankingRow, TierMode, TopFund};
use serde::{Deserialize, Serialize};

/// Everything one sector/week invocation of the engine produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorRankingResult {
    pub rankings: Vec<RankingRow>,
    pub alerts: Vec<AlertEvent>,
    pub top3: Vec<TopFund>,
    /// Whether quartile 1 (rather than decile 1) was the top tier this week.
    pub use_quartiles: bool,
    /// Funds in the sector this week, reported even when the sector was skipped.
    pub n: usize,
}

impl SectorRankingResult {
    /// The result for a sector too small to rank.
    pub fn skipped(mode: TierMode, n: usize) -> Self {
        Self {
            rankings: Vec::new(),
            alerts: Vec::new(),
            top3: Vec::new(),
            use_quartiles: mode.uses_quartiles(),
            n,
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.rankings.is_empty()
    }

    pub fn tier_mode(&self) -> TierMode {
        if self.use_quartiles {
            TierMode::Quartile
        } else {
            TierMode::Decile
        }
    }
}
