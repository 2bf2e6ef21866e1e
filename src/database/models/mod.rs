//! Database model exports.

mod community;
mod user;

pub use community::{Community, LocationRef, Metrics, SubmittedBy};
pub use user::{BotUser, SearchRecord};
