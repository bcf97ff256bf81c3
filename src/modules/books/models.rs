use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier, assigned by the catalog
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub is_borrowed: bool,
    /// Set iff `is_borrowed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borrower_id: Option<String>,
    /// Set iff `is_borrowed`
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub due_date: Option<OffsetDateTime>,
}

impl Book {
    /// Whether the loan fields agree with `is_borrowed`.
    pub fn loan_state_is_consistent(&self) -> bool {
        self.is_borrowed == self.borrower_id.is_some()
            && self.is_borrowed == self.due_date.is_some()
    }
}

/// Request model for creating a new book.
///
/// Fields default to empty so that a missing field surfaces as a validation
/// error from the catalog rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewBook {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub genre: String,
}

/// Partial update. Fields not listed here (`id`, loan state) are dropped on
/// deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
}

/// Query-string filters for listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
}

impl BookFilter {
    pub fn is_empty(&self) -> bool {
        [&self.title, &self.author, &self.genre]
            .iter()
            .all(|value| value.as_deref().map_or(true, |v| v.trim().is_empty()))
    }
}

/// Body of a borrow request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    #[serde(default)]
    pub borrower_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn available_book_omits_loan_fields() {
        let book = Book {
            id: "1".into(),
            title: "1984".into(),
            author: "George Orwell".into(),
            genre: "Dystopian".into(),
            is_borrowed: false,
            borrower_id: None,
            due_date: None,
        };

        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "1",
                "title": "1984",
                "author": "George Orwell",
                "genre": "Dystopian",
                "isBorrowed": false
            })
        );
    }

    #[test]
    fn patch_ignores_protected_fields() {
        let patch: BookPatch = serde_json::from_value(json!({
            "title": "New",
            "id": "99",
            "isBorrowed": true,
            "borrowerId": "mallory"
        }))
        .unwrap();

        assert_eq!(patch.title.as_deref(), Some("New"));
        assert!(patch.author.is_none());
        assert!(patch.genre.is_none());
    }

    #[test]
    fn blank_filters_count_as_empty() {
        let filter = BookFilter {
            title: Some("  ".into()),
            ..BookFilter::default()
        };
        assert!(filter.is_empty());
        assert!(!BookFilter {
            genre: Some("fic".into()),
            ..BookFilter::default()
        }
        .is_empty());
    }
}
