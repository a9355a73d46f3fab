//! Storage module for user, schedule, and match data.
//!
//! This module provides abstractions for persistence via the Repository
//! pattern, allowing storage backends to be swapped without touching the
//! business logic.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API)                            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - Business Logic            │
//! │  - Implicit default schedule rule                        │
//! │  - Slot-list validation on writes                        │
//! │  - Friend / match lifecycles                             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! Use the service layer functions, which work against any repository:
//!
//! ```
//! use schedmatch_rust::db::{services, repositories::LocalRepository};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = LocalRepository::new();
//! let user = services::register_user(&repo, "alice", "Alice", None).await?;
//! # Ok(())
//! # }
//! ```

pub mod repositories;
pub mod repository;
pub mod services;

pub use repositories::LocalRepository;
pub use repository::{
    FullRepository, MatchRepository, RepositoryError, RepositoryResult, ScheduleRepository,
    UserRepository,
};
