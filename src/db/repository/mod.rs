//! Repository trait definitions for storage operations.
//!
//! This module provides a collection of focused repository traits that
//! abstract the persistence layer. By splitting responsibilities across
//! multiple traits, implementations stay focused and testable.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`user`]: User accounts and friend/match relation lists
//! - [`schedule`]: Per-day availability records
//! - [`matching`]: Schedule-match records keyed by user pair
//!
//! # Trait Composition
//!
//! A complete repository implementation implements all traits; functions
//! that need the full surface take the [`FullRepository`] bound.

pub mod error;
pub mod matching;
pub mod schedule;
pub mod user;

pub use error::{RepositoryError, RepositoryResult};
pub use matching::MatchRepository;
pub use schedule::ScheduleRepository;
pub use user::UserRepository;

/// Convenience bound for code that needs every repository capability.
pub trait FullRepository: UserRepository + ScheduleRepository + MatchRepository {}

impl<T: UserRepository + ScheduleRepository + MatchRepository> FullRepository for T {}
