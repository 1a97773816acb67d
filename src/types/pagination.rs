//! Cursor pagination types for the employee list endpoint.
//!
//! A page boundary is the `(created_at, id)` key of a row, encoded as an
//! opaque base64 token. Keyset boundaries stay stable under concurrent
//! inserts, unlike numeric offsets.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Employee;
use crate::errors::{AppError, AppResult};

/// Decoded page boundary.
///
/// `reverse` marks a cursor that pages back toward newer rows; the
/// repository flips its comparison and ordering accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub created_at: DateTime<Utc>,
    pub id: i32,
    pub reverse: bool,
}

impl Cursor {
    /// Boundary for the page after `row` (older rows)
    pub fn after(row: &Employee) -> Self {
        Self {
            created_at: row.created_at,
            id: row.id,
            reverse: false,
        }
    }

    /// Boundary for the page before `row` (newer rows)
    pub fn before(row: &Employee) -> Self {
        Self {
            created_at: row.created_at,
            id: row.id,
            reverse: true,
        }
    }

    /// Encode as an opaque URL-safe token.
    pub fn encode(&self) -> String {
        let direction = if self.reverse { "p" } else { "n" };
        let raw = format!(
            "{}:{}:{}",
            self.created_at.timestamp_micros(),
            self.id,
            direction
        );
        URL_SAFE_NO_PAD.encode(raw)
    }

    /// Decode a client-supplied token.
    ///
    /// Any malformed token maps to a 400, never a panic.
    pub fn decode(token: &str) -> AppResult<Self> {
        let invalid = || AppError::bad_request("Invalid cursor");

        let bytes = URL_SAFE_NO_PAD.decode(token).map_err(|_| invalid())?;
        let raw = String::from_utf8(bytes).map_err(|_| invalid())?;

        let mut parts = raw.split(':');
        let micros: i64 = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        let id: i32 = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        let reverse = match parts.next() {
            Some("n") => false,
            Some("p") => true,
            _ => return Err(invalid()),
        };
        if parts.next().is_some() {
            return Err(invalid());
        }

        let created_at = DateTime::from_timestamp_micros(micros).ok_or_else(invalid)?;

        Ok(Self {
            created_at,
            id,
            reverse,
        })
    }
}

/// Raw query parameters for the list endpoint
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub cursor: Option<String>,
}

impl ListParams {
    /// Decode the cursor and drop blank search strings.
    pub fn into_query(self) -> AppResult<ListQuery> {
        let search = self
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let cursor = self.cursor.as_deref().map(Cursor::decode).transpose()?;
        Ok(ListQuery { search, cursor })
    }
}

/// Decoded list query passed to the repository
#[derive(Debug, Default, Clone)]
pub struct ListQuery {
    pub search: Option<String>,
    pub cursor: Option<Cursor>,
}

/// One page of employees plus the cursors locating its neighbours
#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeePage {
    pub results: Vec<Employee>,
    /// Token for the next (older) page, if any
    pub next: Option<String>,
    /// Token for the previous (newer) page, if any
    pub previous: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_round_trips_through_encoding() {
        let cursor = Cursor {
            created_at: DateTime::from_timestamp_micros(1_700_000_000_123_456).unwrap(),
            id: 42,
            reverse: true,
        };

        let decoded = Cursor::decode(&cursor.encode()).unwrap();
        assert_eq!(decoded, cursor);
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        for token in ["", "not-base64!!", "bm90LWEtY3Vyc29y", "MTIzOjQ1"] {
            let err = Cursor::decode(token).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)));
        }
    }

    #[test]
    fn blank_search_is_dropped() {
        let params = ListParams {
            search: Some("   ".to_string()),
            cursor: None,
        };
        let query = params.into_query().unwrap();
        assert!(query.search.is_none());
    }
}
