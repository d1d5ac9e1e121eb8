//! Moderation controller.
//!
//! Surfaces flagged issues for admin review and applies approve / delete /
//! ban decisions, plus the unconditional status path and the dashboard
//! rollup. Reads the same store as the citizen view; the two never call
//! each other.

pub mod analytics;
pub mod desk;
pub mod error;
pub mod export;

pub use analytics::{summarize, AnalyticsSummary};
pub use desk::ModerationDesk;
pub use error::{ModerationError, Result};
pub use export::{report_rows, ReportRow};
