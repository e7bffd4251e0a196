//! The weekly digest: who left the top tier, who leads each sector, what failed.
//!
//! Composition only. Delivering the digest (email or otherwise) is left to the caller.

pub mod error;
pub mod grouping;
pub mod render;
pub mod weekly;

pub use error::DigestError;
pub use grouping::{FundAlertGroup, PeriodDrop, group_alerts};
pub use weekly::{DigestInput, SectorLeaders, WeeklyDigest, build_subject};
