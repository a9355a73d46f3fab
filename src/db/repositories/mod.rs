//! Repository implementations module.
//!
//! This module contains implementations of the repository traits:
//! - `local`: In-memory implementation for unit testing and local
//!   development (the only backend shipped; storage engines behind the
//!   traits are out of scope).
pub mod local;

pub use local::LocalRepository;
