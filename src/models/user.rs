//! User record model and the storage document it lives in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel `days_left` value for records whose expiry date cannot be parsed.
pub const DAYS_LEFT_INVALID: i64 = -999;

/// Date format used for `expiresAt` throughout the directory.
pub const EXPIRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// One managed login account, as stored in the remote JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Device identifier, unique within the directory
    pub id: String,
    /// Display name
    pub username: String,
    /// Plaintext password (stored as-is by the upstream system)
    pub password: String,
    /// Expiry date, ISO `YYYY-MM-DD`
    #[serde(rename = "expiresAt")]
    pub expires_at: String,
    /// Whether the device may authenticate without connectivity
    #[serde(rename = "allowOffline")]
    pub allow_offline: bool,
}

impl UserRecord {
    /// Signed number of days until this record expires, relative to `today`.
    ///
    /// Returns [`DAYS_LEFT_INVALID`] when `expiresAt` does not parse as a
    /// strict `YYYY-MM-DD` date.
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        days_left(&self.expires_at, today)
    }
}

/// Compute `expires_at - today` in whole days, or the invalid sentinel.
pub fn days_left(expires_at: &str, today: NaiveDate) -> i64 {
    match NaiveDate::parse_from_str(expires_at, EXPIRY_DATE_FORMAT) {
        Ok(date) => (date - today).num_days(),
        Err(_) => DAYS_LEFT_INVALID,
    }
}

/// Validate that a string is a strict `YYYY-MM-DD` calendar date.
pub fn is_valid_expiry_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, EXPIRY_DATE_FORMAT).is_ok()
}

/// Root of the remote JSON document.
///
/// The document historically appears in two shapes: a bare array of records,
/// or an object wrapping the array under a `users` key. Both are accepted on
/// read; write-back always produces the bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DirectoryDocument {
    Bare(Vec<UserRecord>),
    Wrapped { users: Vec<UserRecord> },
}

impl DirectoryDocument {
    /// Unwrap into the ordered record list.
    pub fn into_users(self) -> Vec<UserRecord> {
        match self {
            DirectoryDocument::Bare(users) => users,
            DirectoryDocument::Wrapped { users } => users,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_days_left_today_is_zero() {
        assert_eq!(days_left("2025-06-01", today()), 0);
    }

    #[test]
    fn test_days_left_future_and_past() {
        assert_eq!(days_left("2025-06-11", today()), 10);
        assert_eq!(days_left("2025-05-31", today()), -1);
    }

    #[test]
    fn test_days_left_unparsable_is_sentinel() {
        assert_eq!(days_left("10/10/2025", today()), DAYS_LEFT_INVALID);
        assert_eq!(days_left("2025-13-40", today()), DAYS_LEFT_INVALID);
        assert_eq!(days_left("", today()), DAYS_LEFT_INVALID);
    }

    #[test]
    fn test_expiry_date_validation_is_strict() {
        assert!(is_valid_expiry_date("2025-10-10"));
        assert!(!is_valid_expiry_date("2025-10-10 "));
        assert!(!is_valid_expiry_date("2025-2-30"));
        assert!(!is_valid_expiry_date("10/10/2025"));
    }

    #[test]
    fn test_document_accepts_both_roots() {
        let bare: DirectoryDocument = serde_json::from_str(
            r#"[{"id":"a","username":"u","password":"p","expiresAt":"2025-10-10","allowOffline":true}]"#,
        )
        .unwrap();
        assert_eq!(bare.into_users().len(), 1);

        let wrapped: DirectoryDocument = serde_json::from_str(
            r#"{"users":[{"id":"a","username":"u","password":"p","expiresAt":"2025-10-10","allowOffline":false}]}"#,
        )
        .unwrap();
        assert_eq!(wrapped.into_users().len(), 1);
    }

    #[test]
    fn test_document_rejects_other_roots() {
        assert!(serde_json::from_str::<DirectoryDocument>(r#"{"accounts":[]}"#).is_err());
        assert!(serde_json::from_str::<DirectoryDocument>("42").is_err());
    }
}
