//! The citizen desk: submit, browse, advance, flag.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use wardwatch_common::{
    GeoPoint, Issue, IssueCategory, IssueStatus, ReporterKind, StatusEntry, FLAG_HIDE_THRESHOLD,
    NEIGHBORHOOD_RADIUS_KM,
};
use wardwatch_store::IssueStore;

use crate::draft::NewIssue;
use crate::error::{DeskError, Result};

/// Display filters for the citizen issue list. `None` fields do not filter;
/// a missing radius falls back to the neighborhood default.
#[derive(Debug, Clone, Copy, Default)]
pub struct IssueFilter {
    pub status: Option<IssueStatus>,
    pub category: Option<IssueCategory>,
    pub max_distance_km: Option<f64>,
}

/// Outcome of a citizen flag action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagOutcome {
    /// Flag recorded; more flags from other users will hide the report.
    Recorded { flags: u32 },
    /// The flag reached the threshold; the report is hidden pending review.
    HiddenPendingReview,
}

/// Citizen-side controller over the shared issue store.
pub struct CitizenDesk {
    store: IssueStore,
}

impl CitizenDesk {
    pub fn new(store: IssueStore) -> Self {
        Self { store }
    }

    /// Create an issue from a submitted draft and prepend it to the ledger,
    /// newest first. Stamps id, creation time, Open status with a seeded
    /// status log, zero flags, not hidden.
    pub fn submit(&self, draft: NewIssue) -> Result<Issue> {
        let description = draft.description.trim();
        if description.is_empty() {
            return Err(DeskError::Validation(
                "description must not be empty".to_string(),
            ));
        }

        // Attribution only exists for verified reports.
        let username = match draft.reporter {
            ReporterKind::Verified => draft.username.filter(|u| !u.trim().is_empty()),
            ReporterKind::Anonymous => None,
        };

        let now = Utc::now();
        let issue = Issue {
            id: Uuid::new_v4(),
            category: draft.category,
            location: draft.location,
            position: draft.position,
            description: description.to_string(),
            status: IssueStatus::Open,
            reported_at: now,
            reporter: draft.reporter,
            username,
            image_url: draft.image_url,
            video_url: draft.video_url,
            flags: 0,
            hidden: false,
            status_log: vec![StatusEntry {
                status: IssueStatus::Open,
                at: now,
            }],
        };

        let mut issues = self.store.load();
        issues.insert(0, issue.clone());
        self.store.save(&issues)?;

        info!(id = %issue.id, category = %issue.category, "Issue submitted");
        Ok(issue)
    }

    /// The ordered sequence of issues visible to this viewer: hidden issues
    /// are excluded, status/category filters apply when set, and issues with
    /// coordinates are geofenced against the viewer's position. Issues
    /// without coordinates are never geofenced out.
    pub fn visible_issues(&self, filter: &IssueFilter, viewer: Option<GeoPoint>) -> Vec<Issue> {
        let max_km = filter.max_distance_km.unwrap_or(NEIGHBORHOOD_RADIUS_KM);

        self.store
            .load()
            .into_iter()
            .filter(|issue| {
                if issue.hidden {
                    return false;
                }
                if filter.status.is_some_and(|s| issue.status != s) {
                    return false;
                }
                if filter.category.is_some_and(|c| issue.category != c) {
                    return false;
                }
                if let Some(dist) = viewer.and_then(|v| issue.distance_km_from(v)) {
                    if dist > max_km {
                        return false;
                    }
                }
                true
            })
            .collect()
    }

    /// Advance an issue's status. A citizen may only act on issues inside
    /// their own neighborhood zone, whatever the display filter radius is
    /// set to; outside it the request is rejected and nothing changes.
    pub fn advance_status(
        &self,
        id: Uuid,
        new_status: IssueStatus,
        viewer: Option<GeoPoint>,
    ) -> Result<Issue> {
        let mut issues = self.store.load();
        let issue = issues
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(DeskError::NotFound(id))?;

        if let Some(distance_km) = issue.outside_neighborhood(viewer) {
            return Err(DeskError::OutsideNeighborhood { distance_km });
        }

        issue.set_status(new_status, Utc::now());
        let updated = issue.clone();
        self.store.save(&issues)?;

        info!(id = %updated.id, status = %updated.status, "Status advanced");
        Ok(updated)
    }

    /// Record a community flag. At the hide threshold the report drops out
    /// of citizen views pending moderator review.
    pub fn flag(&self, id: Uuid) -> Result<FlagOutcome> {
        let mut issues = self.store.load();
        let issue = issues
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(DeskError::NotFound(id))?;

        issue.flags += 1;
        let flags = issue.flags;
        let outcome = if flags >= FLAG_HIDE_THRESHOLD {
            issue.hidden = true;
            FlagOutcome::HiddenPendingReview
        } else {
            FlagOutcome::Recorded { flags }
        };
        self.store.save(&issues)?;

        info!(id = %id, flags, "Issue flagged");
        Ok(outcome)
    }
}
