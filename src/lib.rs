//! # Schedule-Match Backend
//!
//! Availability scheduling and match-overlap engine.
//!
//! This crate provides the backend for a scheduling-and-matching service:
//! users maintain per-day availability calendars (free/busy time-of-day
//! intervals), manage a friends list, and create mutual-consent "matches"
//! that allow computing overlapping free time across timezones. The
//! backend exposes a REST API via Axum.
//!
//! ## Features
//!
//! - **Interval model**: half-open `[start, end)` time-of-day ranges with
//!   overlap-rejecting slot sets
//! - **Timezone conversion**: IANA-zone conversion of date-anchored
//!   intervals with day-boundary splitting and DST handling
//! - **Overlap engine**: pairwise intersection of two users' free time in
//!   a common timezone
//! - **Friend/match lifecycle**: request/accept flows gating overlap
//!   queries
//! - **HTTP API**: RESTful endpoints for client integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Consolidated public type surface
//! - [`models`]: Core domain types (times, intervals, schedules, users)
//! - [`db`]: Repository pattern and storage service layer
//! - [`services`]: Timezone conversion and overlap computation
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;

pub mod db;
pub mod models;

pub mod services;

pub mod http;
