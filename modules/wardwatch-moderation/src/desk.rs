//! The moderation desk: review queue, decisions, ban list, audit table.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use wardwatch_common::{Issue, IssueStatus, FLAG_HIDE_THRESHOLD};
use wardwatch_store::IssueStore;

use crate::analytics::{summarize, AnalyticsSummary};
use crate::error::{ModerationError, Result};

/// Admin-side controller over the shared issue store.
pub struct ModerationDesk {
    store: IssueStore,
}

impl ModerationDesk {
    pub fn new(store: IssueStore) -> Self {
        Self { store }
    }

    /// The ordered subsequence of issues flagged at or above the threshold
    /// and not yet hidden. Once hidden, an issue leaves this queue until a
    /// moderator approves it.
    pub fn review_queue(&self) -> Vec<Issue> {
        self.store
            .load()
            .into_iter()
            .filter(|i| i.flags >= FLAG_HIDE_THRESHOLD && !i.hidden)
            .collect()
    }

    /// The full ledger, hidden issues included, for the audit table.
    pub fn all_issues(&self) -> Vec<Issue> {
        self.store.load()
    }

    /// Clear an issue's flags and restore it to citizen visibility.
    pub fn approve(&self, id: Uuid) -> Result<Issue> {
        let approved = self.update_issue(id, |issue| {
            issue.flags = 0;
            issue.hidden = false;
        })?;
        info!(id = %id, "Issue approved and restored");
        Ok(approved)
    }

    /// Suppress an issue from citizen and queue views. The record stays in
    /// the ledger; flags are left untouched.
    pub fn delete(&self, id: Uuid) -> Result<Issue> {
        let deleted = self.update_issue(id, |issue| {
            issue.hidden = true;
        })?;
        info!(id = %id, "Issue deleted");
        Ok(deleted)
    }

    /// Set an issue's status from the admin table. Unlike the citizen path
    /// this is unconditional: admins act globally, with no geofence.
    pub fn set_status(&self, id: Uuid, new_status: IssueStatus) -> Result<Issue> {
        let updated = self.update_issue(id, |issue| {
            issue.set_status(new_status, Utc::now());
        })?;
        info!(id = %id, status = %new_status, "Status set by moderator");
        Ok(updated)
    }

    /// Record a ban. Advisory only: nothing checks this list before
    /// accepting future reports, because reporter identity is self-declared.
    pub fn ban_user(&self, username: &str) -> Result<()> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ModerationError::EmptyUsername);
        }

        let mut banned = self.store.banned_users();
        if banned.iter().any(|u| u == username) {
            return Err(ModerationError::AlreadyBanned(username.to_string()));
        }

        banned.push(username.to_string());
        self.store.save_banned_users(&banned)?;
        info!(username, "User banned");
        Ok(())
    }

    /// Ban the reporter of a flagged issue. Rejects anonymous reports,
    /// which carry no bannable name.
    pub fn ban_reporter(&self, id: Uuid) -> Result<String> {
        let issues = self.store.load();
        let issue = issues
            .iter()
            .find(|i| i.id == id)
            .ok_or(ModerationError::NotFound(id))?;

        let username = issue
            .username
            .as_deref()
            .ok_or(ModerationError::AnonymousReporter)?;
        self.ban_user(username)?;
        Ok(username.to_string())
    }

    /// Current ban list, oldest first.
    pub fn banned_users(&self) -> Vec<String> {
        self.store.banned_users()
    }

    /// Dashboard rollup over the full ledger, hidden issues included.
    pub fn analytics(&self) -> AnalyticsSummary {
        summarize(&self.store.load())
    }

    fn update_issue(&self, id: Uuid, apply: impl FnOnce(&mut Issue)) -> Result<Issue> {
        let mut issues = self.store.load();
        let issue = issues
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(ModerationError::NotFound(id))?;

        apply(issue);
        let updated = issue.clone();
        self.store.save(&issues)?;
        Ok(updated)
    }
}
