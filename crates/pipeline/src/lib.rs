//! Weekly orchestration: fetch every monitored sector, rank it against last week's
//! standings, remember the result and summarise the week.

pub mod error;
pub mod history;
pub mod report;
pub mod runner;

pub use error::PipelineError;
pub use history::RankingHistory;
pub use report::{SectorOutcome, WeeklyReport, WeeklySummary};
pub use runner::WeeklyPipeline;
