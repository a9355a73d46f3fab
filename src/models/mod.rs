pub mod error;
pub mod interval;
pub mod schedule;
pub mod time;
pub mod user;

pub use error::*;
pub use interval::*;
pub use schedule::*;
pub use time::*;
pub use user::*;
