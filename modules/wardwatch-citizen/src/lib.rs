//! Citizen lifecycle controller.
//!
//! Creates issues, filters them relative to the viewer's position, advances
//! status inside the neighborhood zone, and applies flag-based
//! self-moderation. Talks only to the issue store; the moderation view is a
//! separate context it never calls.

pub mod desk;
pub mod draft;
pub mod error;

pub use desk::{CitizenDesk, FlagOutcome, IssueFilter};
pub use draft::NewIssue;
pub use error::{DeskError, Result};
