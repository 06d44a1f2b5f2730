//! Memo entity and title validation

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::ValidationError;

/// Maximum title length in characters (matches `VARCHAR(255)`)
pub const MAX_TITLE_LEN: usize = 255;

/// Validated memo title: 1 to 255 characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoTitle(String);

impl MemoTitle {
    /// Create a title, validating length.
    ///
    /// Length is counted in characters, not bytes, to match the column type.
    ///
    /// # Example
    /// ```
    /// use memo_server::models::MemoTitle;
    ///
    /// assert!(MemoTitle::new("Groceries").is_ok());
    /// assert!(MemoTitle::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }

        if s.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Validated input for a new row. `id` and timestamps are server-assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMemo {
    pub title: MemoTitle,
    pub content: Option<String>,
}

/// Memo record from the database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Memo {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
