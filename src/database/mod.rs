//! Database module exports.

mod communities;
mod models;
mod mongo;
mod users;

pub use communities::CommunityRepo;
pub use models::*;
pub use mongo::Database;
pub use users::UserRepo;
