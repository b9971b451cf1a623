use std::borrow::Cow;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::field::Field;

pub type BookId = u64;

/// Lending status. Anything other than `"Available"`/`"Borrowed"`, including
/// non-string JSON, is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum BookStatus {
    #[default]
    Available,
    Borrowed,
    Other(Value),
}

impl From<Value> for BookStatus {
    fn from(raw: Value) -> Self {
        match raw.as_str() {
            Some("Available") => BookStatus::Available,
            Some("Borrowed") => BookStatus::Borrowed,
            _ => BookStatus::Other(raw),
        }
    }
}

impl From<String> for BookStatus {
    fn from(raw: String) -> Self {
        BookStatus::from(Value::String(raw))
    }
}

impl From<&str> for BookStatus {
    fn from(raw: &str) -> Self {
        BookStatus::from(raw.to_string())
    }
}

impl From<BookStatus> for Value {
    fn from(status: BookStatus) -> Self {
        match status {
            BookStatus::Available => Value::from("Available"),
            BookStatus::Borrowed => Value::from("Borrowed"),
            BookStatus::Other(raw) => raw,
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookStatus::Available => f.write_str("Available"),
            BookStatus::Borrowed => f.write_str("Borrowed"),
            BookStatus::Other(Value::String(raw)) => f.write_str(raw),
            BookStatus::Other(other) => write!(f, "{other}"),
        }
    }
}

/// Copy count exactly as the client sent it. Only integral values take part
/// in aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Copies(Value);

impl Copies {
    pub fn new(count: i64) -> Self {
        Copies(Value::from(count))
    }

    /// Integral value of the count, 0 for anything non-integral.
    pub fn count(&self) -> i64 {
        self.0.as_i64().unwrap_or(0)
    }
}

impl Default for Copies {
    fn default() -> Self {
        Copies::new(1)
    }
}

impl From<Value> for Copies {
    fn from(raw: Value) -> Self {
        Copies(raw)
    }
}

impl fmt::Display for Copies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(raw) => f.write_str(raw),
            other => write!(f, "{}", other),
        }
    }
}

/// A stored book record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Assigned by the store, never by clients
    pub id: BookId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Field<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Field<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Field<String>>,
    #[serde(default)]
    pub status: BookStatus,
    #[serde(default)]
    pub copies: Copies,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<Field<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Field<u32>>,
    pub publication_date: Field<NaiveDate>,
    /// Fields the catalog does not model, kept as supplied.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn text(field: &Option<Field<String>>) -> Cow<'_, str> {
    field.as_ref().map_or(Cow::Borrowed(""), Field::text)
}

impl Book {
    /// Build a record from a creation payload, filling `status`, `copies`
    /// and `publicationDate` when the payload leaves them out.
    pub fn from_patch(id: BookId, patch: BookPatch, today: NaiveDate) -> Self {
        let BookPatch {
            title,
            author,
            category,
            status,
            copies,
            isbn,
            pages,
            publication_date,
            mut extra,
        } = patch;
        extra.remove("id");

        Self {
            id,
            title,
            author,
            category,
            status: status.unwrap_or_default(),
            copies: copies.unwrap_or_default(),
            isbn,
            pages,
            publication_date: publication_date.unwrap_or(Field::Typed(today)),
            extra,
        }
    }

    /// Shallow merge: every field present in `patch` replaces the stored one.
    /// The identifier never changes.
    pub fn apply(&mut self, patch: BookPatch) {
        let BookPatch {
            title,
            author,
            category,
            status,
            copies,
            isbn,
            pages,
            publication_date,
            extra,
        } = patch;

        if title.is_some() {
            self.title = title;
        }
        if author.is_some() {
            self.author = author;
        }
        if category.is_some() {
            self.category = category;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(copies) = copies {
            self.copies = copies;
        }
        if isbn.is_some() {
            self.isbn = isbn;
        }
        if pages.is_some() {
            self.pages = pages;
        }
        if let Some(date) = publication_date {
            self.publication_date = date;
        }
        for (key, value) in extra {
            if key != "id" {
                self.extra.insert(key, value);
            }
        }
    }

    pub fn title(&self) -> Cow<'_, str> {
        text(&self.title)
    }

    pub fn author(&self) -> Cow<'_, str> {
        text(&self.author)
    }

    pub fn category(&self) -> Cow<'_, str> {
        text(&self.category)
    }
}

/// Partial book payload used by create and update. Absent (or `null`) fields
/// are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Field<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Field<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Field<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BookStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copies: Option<Copies>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<Field<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Field<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<Field<NaiveDate>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Aggregates derived from the current collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_books: usize,
    pub available_books: usize,
    pub borrowed_books: usize,
    pub total_copies: i64,
}

/// Body of a successful delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedBook {
    pub message: String,
    pub book: Book,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn status_keeps_unknown_values() {
        let status: BookStatus = serde_json::from_value(json!("Lost")).unwrap();
        assert_eq!(status, BookStatus::Other(json!("Lost")));
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("Lost"));
        assert_eq!(
            serde_json::to_value(BookStatus::Borrowed).unwrap(),
            json!("Borrowed")
        );

        let numeric: BookStatus = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(numeric, BookStatus::Other(json!(3)));
        assert_eq!(numeric.to_string(), "3");
    }

    #[test]
    fn copies_count_ignores_non_integers() {
        assert_eq!(Copies::from(json!(4)).count(), 4);
        assert_eq!(Copies::from(json!(-2)).count(), -2);
        assert_eq!(Copies::from(json!("3")).count(), 0);
        assert_eq!(Copies::from(json!(2.5)).count(), 0);
        assert_eq!(Copies::from(json!([1])).count(), 0);
    }

    #[test]
    fn patch_collects_unknown_fields() {
        let patch: BookPatch = serde_json::from_value(json!({
            "title": "Dune",
            "publicationDate": "1965-08-01",
            "shelf": "B4",
            "copies": null
        }))
        .unwrap();

        assert_eq!(patch.title, Some(Field::from("Dune")));
        assert_eq!(
            patch.publication_date,
            NaiveDate::from_ymd_opt(1965, 8, 1).map(Field::Typed)
        );
        assert_eq!(patch.copies, None);
        assert_eq!(patch.extra.get("shelf"), Some(&json!("B4")));
    }

    #[test]
    fn patch_accepts_values_of_any_type() {
        let payload = json!({
            "title": 42,
            "isbn": 9782070612758u64,
            "pages": -1,
            "publicationDate": "1943",
            "status": false
        });
        let patch: BookPatch = serde_json::from_value(payload.clone()).unwrap();

        assert_eq!(patch.title, Some(Field::Raw(json!(42))));
        assert_eq!(patch.pages, Some(Field::Raw(json!(-1))));
        assert_eq!(serde_json::to_value(&patch).unwrap(), payload);
    }

    #[test]
    fn from_patch_applies_defaults_and_drops_client_id() {
        let patch: BookPatch = serde_json::from_value(json!({
            "id": 42,
            "title": "A",
            "author": "B",
            "category": "C"
        }))
        .unwrap();

        let book = Book::from_patch(7, patch, today());

        assert_eq!(book.id, 7);
        assert_eq!(book.status, BookStatus::Available);
        assert_eq!(book.copies.count(), 1);
        assert_eq!(book.publication_date, Field::Typed(today()));
        assert!(book.extra.is_empty());
    }

    #[test]
    fn apply_merges_only_supplied_fields() {
        let mut book = Book::from_patch(
            1,
            BookPatch {
                title: Some("Old".into()),
                author: Some("Someone".into()),
                isbn: Some("123".into()),
                ..BookPatch::default()
            },
            today(),
        );

        book.apply(BookPatch {
            title: Some("New".into()),
            status: Some(BookStatus::Borrowed),
            ..BookPatch::default()
        });

        assert_eq!(book.title(), "New");
        assert_eq!(book.author(), "Someone");
        assert_eq!(book.isbn, Some("123".into()));
        assert_eq!(book.status, BookStatus::Borrowed);
    }

    #[test]
    fn book_serializes_with_camel_case_and_extras() {
        let mut extra = Map::new();
        extra.insert("shelf".to_string(), json!("B4"));
        let book = Book {
            id: 3,
            title: Some("L'Étranger".into()),
            author: None,
            category: None,
            status: BookStatus::Available,
            copies: Copies::new(4),
            isbn: None,
            pages: Some(Field::Typed(123)),
            publication_date: Field::Typed(NaiveDate::from_ymd_opt(1942, 1, 1).unwrap()),
            extra,
        };

        assert_eq!(
            serde_json::to_value(&book).unwrap(),
            json!({
                "id": 3,
                "title": "L'Étranger",
                "status": "Available",
                "copies": 4,
                "pages": 123,
                "publicationDate": "1942-01-01",
                "shelf": "B4"
            })
        );
    }
}
