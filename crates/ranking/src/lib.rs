//! # FundScope Ranking Engine
//!
//! Turns one sector's weekly performance snapshot, plus the most recent prior ranking
//! snapshot, into per-fund standings, top-tier streaks, tier-exit alerts and a 6-month
//! leaderboard.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no I/O, no clocks, no persistence. Everything carried across weeks
//!   (streaks, prior tier membership) arrives as data in the `prior` rows.
//! - **Deterministic:** equal returns are ordered by input position, so the same input
//!   always produces the same output.
//! - **Independent per sector:** invocations share nothing and can run concurrently.

pub mod alerts;
pub mod binning;
pub mod engine;
pub mod error;
pub mod result;
pub mod streak;
pub mod top;

pub use alerts::{AlertDetector, PriorTier};
pub use binning::{Standing, assign_standings};
pub use engine::RankingEngine;
pub use error::RankingError;
pub use result::SectorRankingResult;
pub use streak::next_streak;
pub use top::{TOP_N, select_top};
