//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. All data is stored in
//! memory using HashMap structures behind a single `RwLock`, so every
//! mutation is applied atomically.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::db::repository::*;
use crate::models::{DaySchedule, MatchStatus, ScheduleMatch, User};

/// In-memory local repository.
///
/// Stores users, schedules, and matches in HashMaps, making it ideal for
/// tests and local development that need isolation and speed. Cloning is
/// cheap and clones share the same underlying data.
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Default)]
struct LocalData {
    users: HashMap<String, User>,
    /// Keyed by (username, date); at most one schedule per pair.
    schedules: HashMap<(String, NaiveDate), DaySchedule>,
    /// Keyed by the sorted username pair.
    matches: HashMap<[String; 2], ScheduleMatch>,

    // Connection health
    is_healthy: bool,
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData {
                is_healthy: true,
                ..Default::default()
            })),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        let mut data = self.data.write().unwrap();
        data.is_healthy = healthy;
    }

    /// Number of stored users.
    pub fn user_count(&self) -> usize {
        self.data.read().unwrap().users.len()
    }

    /// Number of stored day schedules.
    pub fn schedule_count(&self) -> usize {
        self.data.read().unwrap().schedules.len()
    }

    /// Clear all data, preserving the health flag.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    fn check_health(&self) -> RepositoryResult<()> {
        let data = self.data.read().unwrap();
        if !data.is_healthy {
            return Err(RepositoryError::ConnectionError(
                "Database is not healthy".to_string(),
            ));
        }
        Ok(())
    }

    /// Run a closure against a stored user's record under the write lock.
    fn with_user_mut<F>(&self, username: &str, mutate: F) -> RepositoryResult<User>
    where
        F: FnOnce(&mut User),
    {
        let mut data = self.data.write().unwrap();
        let user = data
            .users
            .get_mut(username)
            .ok_or_else(|| RepositoryError::NotFound(format!("User {} not found", username)))?;
        mutate(user);
        Ok(user.clone())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for LocalRepository {
    async fn create_user(&self, user: &User) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        if data.users.contains_key(&user.username) {
            return Err(RepositoryError::Conflict(format!(
                "Username {} already registered",
                user.username
            )));
        }
        data.users.insert(user.username.clone(), user.clone());
        Ok(())
    }

    async fn get_user(&self, username: &str) -> RepositoryResult<User> {
        let data = self.data.read().unwrap();
        data.users
            .get(username)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("User {} not found", username)))
    }

    async fn update_profile(
        &self,
        username: &str,
        display_name: Option<String>,
        timezone: Option<String>,
    ) -> RepositoryResult<User> {
        self.with_user_mut(username, |user| {
            if let Some(name) = display_name {
                user.display_name = name;
            }
            if let Some(zone) = timezone {
                user.timezone = zone;
            }
        })
    }

    async fn search_users(
        &self,
        query: &str,
        exclude: &str,
        limit: usize,
    ) -> RepositoryResult<Vec<User>> {
        let needle = query.to_lowercase();
        let data = self.data.read().unwrap();

        let mut results: Vec<User> = data
            .users
            .values()
            .filter(|u| u.username != exclude)
            .filter(|u| {
                u.username.to_lowercase().contains(&needle)
                    || u.display_name.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        results.sort_by(|a, b| a.username.cmp(&b.username));
        results.truncate(limit);
        Ok(results)
    }

    async fn push_friend_request(&self, to: &str, from: &str) -> RepositoryResult<()> {
        let from = from.to_string();
        self.with_user_mut(to, |user| {
            if !user.friend_requests.contains(&from) {
                user.friend_requests.push(from);
            }
        })?;
        Ok(())
    }

    async fn pull_friend_request(&self, username: &str, from: &str) -> RepositoryResult<()> {
        self.with_user_mut(username, |user| {
            user.friend_requests.retain(|r| r != from);
        })?;
        Ok(())
    }

    async fn add_friendship(&self, user_a: &str, user_b: &str) -> RepositoryResult<()> {
        let b = user_b.to_string();
        self.with_user_mut(user_a, |user| {
            if !user.friends.contains(&b) {
                user.friends.push(b);
            }
        })?;
        let a = user_a.to_string();
        self.with_user_mut(user_b, |user| {
            if !user.friends.contains(&a) {
                user.friends.push(a);
            }
        })?;
        Ok(())
    }

    async fn remove_friendship(&self, user_a: &str, user_b: &str) -> RepositoryResult<()> {
        self.with_user_mut(user_a, |user| user.friends.retain(|f| f != user_b))?;
        self.with_user_mut(user_b, |user| user.friends.retain(|f| f != user_a))?;
        Ok(())
    }

    async fn push_match_request(&self, to: &str, from: &str) -> RepositoryResult<()> {
        let from = from.to_string();
        self.with_user_mut(to, |user| {
            if !user.match_requests.contains(&from) {
                user.match_requests.push(from);
            }
        })?;
        Ok(())
    }

    async fn pull_match_request(&self, username: &str, from: &str) -> RepositoryResult<()> {
        self.with_user_mut(username, |user| {
            user.match_requests.retain(|r| r != from);
        })?;
        Ok(())
    }
}

#[async_trait]
impl ScheduleRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let data = self.data.read().unwrap();
        Ok(data.is_healthy)
    }

    async fn upsert_schedule(
        &self,
        username: &str,
        schedule: &DaySchedule,
    ) -> RepositoryResult<DaySchedule> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        data.schedules
            .insert((username.to_string(), schedule.date), schedule.clone());
        Ok(schedule.clone())
    }

    async fn find_schedule(
        &self,
        username: &str,
        date: NaiveDate,
    ) -> RepositoryResult<Option<DaySchedule>> {
        let data = self.data.read().unwrap();
        Ok(data.schedules.get(&(username.to_string(), date)).cloned())
    }

    async fn list_schedules_in_range(
        &self,
        username: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<Vec<DaySchedule>> {
        let data = self.data.read().unwrap();

        let mut schedules: Vec<DaySchedule> = data
            .schedules
            .iter()
            .filter(|((user, date), _)| user == username && *date >= start && *date <= end)
            .map(|(_, schedule)| schedule.clone())
            .collect();

        schedules.sort_by_key(|s| s.date);
        Ok(schedules)
    }

    async fn delete_schedule(&self, username: &str, date: NaiveDate) -> RepositoryResult<bool> {
        let mut data = self.data.write().unwrap();
        Ok(data
            .schedules
            .remove(&(username.to_string(), date))
            .is_some())
    }
}

#[async_trait]
impl MatchRepository for LocalRepository {
    async fn insert_match(&self, schedule_match: &ScheduleMatch) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        if data.matches.contains_key(&schedule_match.users) {
            return Err(RepositoryError::Conflict(format!(
                "A match or request already exists between {} and {}",
                schedule_match.users[0], schedule_match.users[1]
            )));
        }
        data.matches
            .insert(schedule_match.users.clone(), schedule_match.clone());
        Ok(())
    }

    async fn find_match(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> RepositoryResult<Option<ScheduleMatch>> {
        let data = self.data.read().unwrap();
        Ok(data.matches.get(&ScheduleMatch::pair(user_a, user_b)).cloned())
    }

    async fn activate_match(
        &self,
        user_a: &str,
        user_b: &str,
        requested_by: &str,
    ) -> RepositoryResult<ScheduleMatch> {
        let mut data = self.data.write().unwrap();
        let key = ScheduleMatch::pair(user_a, user_b);
        let record = data.matches.get_mut(&key).filter(|m| {
            m.status == MatchStatus::Pending && m.requested_by == requested_by
        });

        match record {
            Some(m) => {
                m.status = MatchStatus::Active;
                Ok(m.clone())
            }
            None => Err(RepositoryError::NotFound(format!(
                "No pending match from {} between {} and {}",
                requested_by, key[0], key[1]
            ))),
        }
    }

    async fn delete_match(&self, user_a: &str, user_b: &str) -> RepositoryResult<bool> {
        let mut data = self.data.write().unwrap();
        Ok(data
            .matches
            .remove(&ScheduleMatch::pair(user_a, user_b))
            .is_some())
    }

    async fn list_matches_for(
        &self,
        username: &str,
        status: Option<MatchStatus>,
    ) -> RepositoryResult<Vec<ScheduleMatch>> {
        let data = self.data.read().unwrap();

        let mut matches: Vec<ScheduleMatch> = data
            .matches
            .values()
            .filter(|m| m.involves(username))
            .filter(|m| status.map_or(true, |s| m.status == s))
            .cloned()
            .collect();

        matches.sort_by(|a, b| a.users.cmp(&b.users));
        Ok(matches)
    }
}
