pub mod enums;
pub mod error;
pub mod ids;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{AlertKind, Period, TierMode};
pub use error::CoreError;
pub use ids::make_fund_id;
pub use structs::{AlertEvent, FundPerformanceSnapshot, PeriodRanking, RankingRow, TopFund};
