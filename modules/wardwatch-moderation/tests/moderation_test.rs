//! Integration tests for the moderation desk, driving the citizen desk
//! against the same store where the scenario needs both views.

use uuid::Uuid;

use wardwatch_citizen::{CitizenDesk, FlagOutcome, IssueFilter, NewIssue};
use wardwatch_common::{GeoPoint, Issue, IssueCategory, IssueStatus};
use wardwatch_moderation::{ModerationDesk, ModerationError};
use wardwatch_store::IssueStore;

fn desks() -> (tempfile::TempDir, CitizenDesk, ModerationDesk) {
    let dir = tempfile::tempdir().unwrap();
    let store = IssueStore::open(dir.path()).unwrap();
    (
        dir,
        CitizenDesk::new(store.clone()),
        ModerationDesk::new(store),
    )
}

fn submit(citizen: &CitizenDesk, description: &str) -> Issue {
    citizen
        .submit(
            NewIssue::builder()
                .category(IssueCategory::Pothole)
                .description(description.to_string())
                .build(),
        )
        .unwrap()
}

// =========================================================================
// Review queue and decisions
// =========================================================================

#[test]
fn auto_hidden_issues_leave_the_queue_until_approved() {
    let (_dir, citizen, moderation) = desks();
    let issue = submit(&citizen, "Deep pothole near the bus stop");

    citizen.flag(issue.id).unwrap();
    citizen.flag(issue.id).unwrap();
    assert_eq!(
        citizen.flag(issue.id).unwrap(),
        FlagOutcome::HiddenPendingReview
    );

    // Hidden at threshold, so the pending-review queue no longer lists it.
    assert!(moderation.review_queue().is_empty());
    // It is still in the audit table.
    assert_eq!(moderation.all_issues().len(), 1);
}

#[test]
fn flagged_but_unhidden_issues_sit_in_the_queue() {
    let dir = tempfile::tempdir().unwrap();
    let store = IssueStore::open(dir.path()).unwrap();
    let citizen = CitizenDesk::new(store.clone());
    let moderation = ModerationDesk::new(store.clone());

    let issue = submit(&citizen, "Cracked slab");

    // Craft the flagged-but-visible state directly through the store, the
    // way another context could have left it.
    let mut issues = store.load();
    issues[0].flags = 4;
    store.save(&issues).unwrap();

    let queue = moderation.review_queue();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].id, issue.id);

    // Hiding it takes it back out of the queue.
    moderation.delete(issue.id).unwrap();
    assert!(moderation.review_queue().is_empty());
}

#[test]
fn approve_resets_flags_and_restores_visibility() {
    let (_dir, citizen, moderation) = desks();
    let issue = submit(&citizen, "Overflowing bin");
    for _ in 0..3 {
        citizen.flag(issue.id).unwrap();
    }
    assert!(citizen
        .visible_issues(&IssueFilter::default(), None)
        .is_empty());

    let approved = moderation.approve(issue.id).unwrap();
    assert_eq!(approved.flags, 0);
    assert!(!approved.hidden);

    let visible = citizen.visible_issues(&IssueFilter::default(), None);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, issue.id);
}

#[test]
fn delete_hides_but_keeps_the_record_and_flags() {
    let (_dir, citizen, moderation) = desks();
    let issue = submit(&citizen, "Lamp out for a week");
    citizen.flag(issue.id).unwrap();

    let deleted = moderation.delete(issue.id).unwrap();
    assert!(deleted.hidden);
    assert_eq!(deleted.flags, 1);

    assert!(citizen
        .visible_issues(&IssueFilter::default(), None)
        .is_empty());
    assert_eq!(moderation.all_issues().len(), 1);
}

#[test]
fn set_status_ignores_geofencing() {
    let (_dir, citizen, moderation) = desks();
    // ~14.5km from the admin's own city-centre position, far outside any
    // neighborhood zone; the admin path does not care.
    let issue = citizen
        .submit(
            NewIssue::builder()
                .category(IssueCategory::Streetlight)
                .description("Dark stretch along the ring road".to_string())
                .position(Some(GeoPoint {
                    lat: 28.7041,
                    lng: 77.1025,
                }))
                .build(),
        )
        .unwrap();

    let updated = moderation
        .set_status(issue.id, IssueStatus::Resolved)
        .unwrap();

    assert_eq!(updated.status, IssueStatus::Resolved);
    assert_eq!(updated.status_log.len(), 2);
    assert_eq!(updated.status_log.last().unwrap().status, updated.status);
}

#[test]
fn decisions_on_unknown_ids_are_rejected() {
    let (_dir, _citizen, moderation) = desks();
    let missing = Uuid::new_v4();

    assert!(matches!(
        moderation.approve(missing),
        Err(ModerationError::NotFound(_))
    ));
    assert!(matches!(
        moderation.delete(missing),
        Err(ModerationError::NotFound(_))
    ));
}

// =========================================================================
// Ban list
// =========================================================================

#[test]
fn ban_rejects_empty_and_duplicate_names() {
    let (_dir, _citizen, moderation) = desks();

    assert!(matches!(
        moderation.ban_user(""),
        Err(ModerationError::EmptyUsername)
    ));
    assert!(matches!(
        moderation.ban_user("   "),
        Err(ModerationError::EmptyUsername)
    ));

    moderation.ban_user("ravi92").unwrap();
    assert!(matches!(
        moderation.ban_user("ravi92"),
        Err(ModerationError::AlreadyBanned(_))
    ));

    assert_eq!(moderation.banned_users(), vec!["ravi92"]);
}

#[test]
fn ban_reporter_requires_a_verified_name() {
    let (_dir, citizen, moderation) = desks();

    let anonymous = submit(&citizen, "Reported without attribution");
    assert!(matches!(
        moderation.ban_reporter(anonymous.id),
        Err(ModerationError::AnonymousReporter)
    ));

    let verified = citizen
        .submit(
            NewIssue::builder()
                .category(IssueCategory::Garbage)
                .description("Dump by the park gate".to_string())
                .reporter(wardwatch_common::ReporterKind::Verified)
                .username(Some("anita_k".to_string()))
                .build(),
        )
        .unwrap();

    assert_eq!(moderation.ban_reporter(verified.id).unwrap(), "anita_k");
    assert_eq!(moderation.banned_users(), vec!["anita_k"]);
}

#[test]
fn banned_users_may_still_submit() {
    // Bans are advisory: identity is self-declared, so nothing enforces
    // them on the submission path.
    let (_dir, citizen, moderation) = desks();
    moderation.ban_user("ravi92").unwrap();

    let issue = citizen
        .submit(
            NewIssue::builder()
                .category(IssueCategory::Pothole)
                .description("Submitted after a ban".to_string())
                .reporter(wardwatch_common::ReporterKind::Verified)
                .username(Some("ravi92".to_string()))
                .build(),
        )
        .unwrap();

    assert_eq!(issue.username.as_deref(), Some("ravi92"));
    assert_eq!(moderation.all_issues().len(), 1);
}
