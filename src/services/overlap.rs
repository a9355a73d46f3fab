//! Common-free-time computation between two matched users.
//!
//! Given a calendar date in the viewer's timezone, each party's free
//! intervals are converted into the viewer's zone, scoped to that date,
//! and intersected pairwise. Results are sorted by start and deliberately
//! NOT coalesced: one entry per contributing pair of slots.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::db::repository::{FullRepository, RepositoryError};
use crate::db::services as db_services;
use crate::models::{TimeInterval, User};
use crate::services::timezone::convert_slots_for_date;

/// Result of an overlap query, all intervals in the viewer's timezone.
///
/// `user_a_slots` are the other party's converted free intervals,
/// `user_b_slots` the viewer's own; `overlaps` is their pairwise
/// intersection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapResult {
    pub date: NaiveDate,
    pub overlaps: Vec<TimeInterval>,
    pub user_a_slots: Vec<TimeInterval>,
    pub user_b_slots: Vec<TimeInterval>,
}

/// Errors from overlap computation.
#[derive(Debug, thiserror::Error)]
pub enum OverlapError {
    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("no active schedule match between {0} and {1}")]
    NoMatchRelation(String, String),

    #[error("invalid timezone {zone} for user {username}")]
    InvalidTimezone { username: String, zone: String },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

fn load_user(
    result: Result<User, RepositoryError>,
    username: &str,
) -> Result<User, OverlapError> {
    match result {
        Ok(user) => Ok(user),
        Err(e) if e.is_not_found() => Err(OverlapError::UserNotFound(username.to_string())),
        Err(e) => Err(e.into()),
    }
}

fn parse_zone(user: &User) -> Result<Tz, OverlapError> {
    user.timezone
        .parse()
        .map_err(|_| OverlapError::InvalidTimezone {
            username: user.username.clone(),
            zone: user.timezone.clone(),
        })
}

/// One party's free intervals for `date`, expressed in the viewer's zone.
///
/// The availability flag on the query-date schedule vetoes the party
/// outright. Schedules for the adjacent local dates are also consulted,
/// since their slots may shift onto the queried day in the viewer's
/// frame; each contributes only if its own day is marked available.
async fn party_free_slots<R: FullRepository + ?Sized>(
    repo: &R,
    username: &str,
    party_zone: Tz,
    viewer_zone: Tz,
    date: NaiveDate,
) -> Result<Vec<TimeInterval>, OverlapError> {
    let today = db_services::get_schedule_or_default(repo, username, date).await?;
    if !today.is_available {
        return Ok(Vec::new());
    }

    let mut days = vec![today];
    for adjacent in [date.pred_opt(), date.succ_opt()].into_iter().flatten() {
        days.push(db_services::get_schedule_or_default(repo, username, adjacent).await?);
    }

    let mut slots: Vec<TimeInterval> = days
        .iter()
        .flat_map(|schedule| {
            convert_slots_for_date(
                schedule.date,
                date,
                schedule.effective_free_times(),
                party_zone,
                viewer_zone,
            )
        })
        .collect();
    slots.sort_by_key(|s| s.start);
    Ok(slots)
}

/// Pairwise intersection of two converted free-interval sequences.
///
/// Emits `max(starts)..min(ends)` for every overlapping pair, sorted by
/// start. Adjacent or overlapping results are kept as separate entries.
pub fn intersect_slots(a: &[TimeInterval], b: &[TimeInterval]) -> Vec<TimeInterval> {
    let mut overlaps: Vec<TimeInterval> = a
        .iter()
        .flat_map(|slot_a| b.iter().filter_map(|slot_b| slot_a.intersection(slot_b)))
        .collect();
    overlaps.sort_by_key(|s| s.start);
    overlaps
}

/// Compute the mutually-free intervals of `viewer` and `other` for `date`,
/// in the viewer's timezone.
///
/// Requires an active match between the two users. Missing schedules are
/// treated as fully available with no intervals, so they simply
/// contribute nothing.
pub async fn compute_overlap<R: FullRepository + ?Sized>(
    repo: &R,
    viewer_username: &str,
    other_username: &str,
    date: NaiveDate,
) -> Result<OverlapResult, OverlapError> {
    let viewer = load_user(repo.get_user(viewer_username).await, viewer_username)?;
    let other = load_user(repo.get_user(other_username).await, other_username)?;

    let active = repo
        .find_match(viewer_username, other_username)
        .await?
        .map(|m| m.status == crate::models::MatchStatus::Active)
        .unwrap_or(false);
    if !active {
        return Err(OverlapError::NoMatchRelation(
            viewer_username.to_string(),
            other_username.to_string(),
        ));
    }

    let viewer_zone = parse_zone(&viewer)?;
    let other_zone = parse_zone(&other)?;

    let user_b_slots =
        party_free_slots(repo, viewer_username, viewer_zone, viewer_zone, date).await?;
    let user_a_slots =
        party_free_slots(repo, other_username, other_zone, viewer_zone, date).await?;

    let overlaps = intersect_slots(&user_a_slots, &user_b_slots);
    debug!(
        viewer = viewer_username,
        other = other_username,
        %date,
        overlap_count = overlaps.len(),
        "computed overlap"
    );

    Ok(OverlapResult {
        date,
        overlaps,
        user_a_slots,
        user_b_slots,
    })
}
