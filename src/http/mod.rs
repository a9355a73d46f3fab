//! HTTP server module for the schedule-match backend.
//!
//! This module provides an axum-based HTTP server that exposes the
//! backend as a REST API. It reuses the service layer and repository
//! pattern from the core library.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Request parsing and validation                         │
//! │  - JSON serialization/deserialization                     │
//! │  - CORS, tracing, error handling                          │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (db/services.rs, services/)                │
//! │  - Business logic                                         │
//! │  - Timezone conversion and overlap computation            │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                   │
//! │  - Data persistence                                       │
//! │  - LocalRepository                                        │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, AppError};
pub use router::create_router;
pub use state::AppState;
