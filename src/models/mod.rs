//! Data models.

pub mod user;

pub use user::{days_left, is_valid_expiry_date, DirectoryDocument, UserRecord, DAYS_LEFT_INVALID};
