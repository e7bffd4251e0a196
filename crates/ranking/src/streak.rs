/// Advances a fund/period top-tier streak by one week.
///
/// A week in the top tier extends the run; any other week resets it to zero.
pub fn next_streak(prior: u32, in_top: bool) -> u32 {
    if in_top { prior.saturating_add(1) } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_tier_extends_the_run() {
        assert_eq!(next_streak(0, true), 1);
        assert_eq!(next_streak(3, true), 4);
    }

    #[test]
    fn leaving_the_top_tier_resets_fully() {
        assert_eq!(next_streak(7, false), 0);
        assert_eq!(next_streak(0, false), 0);
    }

    #[test]
    fn saturates() {
        assert_eq!(next_streak(u32::MAX, true), u32::MAX);
    }
}
