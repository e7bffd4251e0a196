use crate::settings::RankingConfig;

/// Command-line overrides for the `[ranking]` section.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RankingOverrides {
    /// Sectors with fewer funds than this use quartile tiers.
    #[arg(long)]
    pub quartile_threshold: Option<usize>,

    /// Sectors with fewer funds than this are skipped.
    #[arg(long)]
    pub min_funds: Option<usize>,
}

impl RankingOverrides {
    pub fn apply(&self, config: &mut RankingConfig) {
        if let Some(threshold) = self.quartile_threshold {
            config.quartile_threshold = threshold;
        }
        if let Some(min_funds) = self.min_funds {
            config.min_funds = min_funds;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_supplied_values_are_overridden() {
        let mut config = RankingConfig::default();
        RankingOverrides {
            quartile_threshold: None,
            min_funds: Some(3),
        }
        .apply(&mut config);

        assert_eq!(config.quartile_threshold, 20);
        assert_eq!(config.min_funds, 3);
    }
}
