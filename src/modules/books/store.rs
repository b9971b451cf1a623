use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use catalog_model::{Book, BookId, BookPatch, BookStatus, CatalogStats};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Book not found")]
    NotFound(BookId),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// In-memory book collection, kept in insertion order.
#[derive(Debug, Default, Clone)]
pub struct CatalogStore {
    books: Vec<Book>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn list(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, id: BookId) -> CatalogResult<&Book> {
        self.books
            .iter()
            .find(|book| book.id == id)
            .ok_or(CatalogError::NotFound(id))
    }

    /// One past the highest identifier in use, 1 for an empty store.
    pub fn next_id(&self) -> BookId {
        self.books.iter().map(|book| book.id).max().map_or(1, |max| max + 1)
    }

    /// Store a new record dated today (UTC) unless the payload says otherwise.
    pub fn create(&mut self, patch: BookPatch) -> Book {
        self.create_on(patch, Utc::now().date_naive())
    }

    pub fn create_on(&mut self, patch: BookPatch, today: NaiveDate) -> Book {
        let book = Book::from_patch(self.next_id(), patch, today);
        self.books.push(book.clone());
        tracing::info!(book_id = book.id, total = self.books.len(), "book created");
        book
    }

    pub fn update(&mut self, id: BookId, patch: BookPatch) -> CatalogResult<Book> {
        let book = self
            .books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        book.apply(patch);
        tracing::info!(book_id = id, "book updated");
        Ok(book.clone())
    }

    pub fn delete(&mut self, id: BookId) -> CatalogResult<Book> {
        let index = self
            .books
            .iter()
            .position(|book| book.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        let book = self.books.remove(index);
        tracing::info!(book_id = id, remaining = self.books.len(), "book deleted");
        Ok(book)
    }

    pub fn stats(&self) -> CatalogStats {
        let count = |status: BookStatus| self.books.iter().filter(|b| b.status == status).count();

        CatalogStats {
            total_books: self.books.len(),
            available_books: count(BookStatus::Available),
            borrowed_books: count(BookStatus::Borrowed),
            total_copies: self
                .books
                .iter()
                .fold(0i64, |total, book| total.saturating_add(book.copies.count())),
        }
    }
}

/// Shared handle to the one store of a running service. Readers share the
/// lock; each mutation holds it exclusively until it completes.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    store: Arc<RwLock<CatalogStore>>,
}

impl CatalogState {
    pub fn new(store: CatalogStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, CatalogStore> {
        self.store.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, CatalogStore> {
        self.store.write().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_model::{Copies, Field};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn patch(title: &str) -> BookPatch {
        BookPatch {
            title: Some(title.into()),
            author: Some("B".into()),
            category: Some("C".into()),
            ..BookPatch::default()
        }
    }

    fn ids(store: &CatalogStore) -> Vec<BookId> {
        store.list().iter().map(|book| book.id).collect()
    }

    #[test]
    fn first_book_gets_id_one_and_defaults() {
        let mut store = CatalogStore::new();
        let book = store.create(patch("A"));

        assert_eq!(book.id, 1);
        assert_eq!(book.status, BookStatus::Available);
        assert_eq!(book.copies.count(), 1);
        assert_eq!(book.publication_date, Field::Typed(Utc::now().date_naive()));
        assert_eq!(store.get(1).unwrap(), &book);
    }

    #[test]
    fn ids_follow_the_current_maximum() {
        let mut store = CatalogStore::new();
        let mut previous = 0;
        for n in 0..5 {
            let expected = store.next_id();
            let book = store.create(patch(&format!("book {n}")));
            assert_eq!(book.id, expected);
            assert!(book.id > previous);
            previous = book.id;
        }

        store.delete(2).unwrap();
        assert_eq!(store.create(patch("after gap")).id, 6);

        store.delete(6).unwrap();
        store.delete(5).unwrap();
        assert_eq!(store.create(patch("after tail delete")).id, 5);
        assert_eq!(ids(&store), vec![1, 3, 4, 5]);

        for id in ids(&store) {
            store.delete(id).unwrap();
        }
        assert_eq!(store.next_id(), 1);
        assert_eq!(store.create(patch("fresh start")).id, 1);
    }

    #[test]
    fn client_supplied_id_is_ignored() {
        let mut store = CatalogStore::new();
        let mut payload = patch("A");
        payload.extra.insert("id".to_string(), json!(99));

        let created = store.create(payload.clone());
        assert_eq!(created.id, 1);
        assert!(created.extra.get("id").is_none());

        let updated = store.update(1, payload).unwrap();
        assert_eq!(updated.id, 1);
        assert!(store.get(99).is_err());
    }

    #[test]
    fn empty_update_is_a_no_op() {
        let mut store = CatalogStore::new();
        let before = store.create(patch("A"));

        let after = store.update(before.id, BookPatch::default()).unwrap();
        assert_eq!(after, before);
        assert_eq!(store.list(), &[before]);
    }

    #[test]
    fn update_preserves_absent_fields() {
        let mut store = CatalogStore::new();
        let mut payload = patch("A");
        payload.isbn = Some("9782070612758".into());
        payload.pages = Some(Field::Typed(96));
        store.create(payload);

        let updated = store
            .update(
                1,
                BookPatch {
                    status: Some(BookStatus::Borrowed),
                    copies: Some(Copies::new(0)),
                    ..BookPatch::default()
                },
            )
            .unwrap();

        assert_eq!(updated.title(), "A");
        assert_eq!(updated.isbn, Some("9782070612758".into()));
        assert_eq!(updated.pages, Some(Field::Typed(96)));
        assert_eq!(updated.status, BookStatus::Borrowed);
        assert_eq!(updated.copies.count(), 0);
    }

    #[test]
    fn null_on_update_keeps_stored_value() {
        let mut store = CatalogStore::new();
        let mut payload = patch("A");
        payload.isbn = Some("9782070612758".into());
        let before = store.create(payload);

        let nulls: BookPatch =
            serde_json::from_value(json!({ "isbn": null, "title": null, "copies": null })).unwrap();
        let after = store.update(before.id, nulls).unwrap();

        assert_eq!(after, before);
    }

    #[test]
    fn update_unknown_id_leaves_collection_untouched() {
        let mut store = CatalogStore::new();
        store.create(patch("A"));
        let snapshot = store.clone();

        assert_eq!(
            store.update(99, patch("changed")),
            Err(CatalogError::NotFound(99))
        );
        assert_eq!(store.list(), snapshot.list());
    }

    #[test]
    fn delete_keeps_relative_order() {
        let mut store = CatalogStore::new();
        for title in ["A", "B", "C"] {
            store.create(patch(title));
        }

        let removed = store.delete(2).unwrap();
        assert_eq!(removed.title(), "B");
        assert_eq!(ids(&store), vec![1, 3]);
        assert_eq!(store.get(2), Err(CatalogError::NotFound(2)));
        assert_eq!(store.delete(2), Err(CatalogError::NotFound(2)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn create_round_trips_payload_with_defaults() {
        let mut store = CatalogStore::new();
        let payload: BookPatch = serde_json::from_value(json!({
            "title": "Les Misérables",
            "author": "Victor Hugo",
            "category": "Classic",
            "isbn": "9782253010696",
            "pages": 1463,
            "language": "fr"
        }))
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        let created = store.create_on(payload, today);
        let stored = serde_json::to_value(store.get(created.id).unwrap()).unwrap();

        assert_eq!(
            stored,
            json!({
                "id": 1,
                "title": "Les Misérables",
                "author": "Victor Hugo",
                "category": "Classic",
                "status": "Available",
                "copies": 1,
                "isbn": "9782253010696",
                "pages": 1463,
                "publicationDate": "2024-05-01",
                "language": "fr"
            })
        );
    }

    #[test]
    fn stats_treat_malformed_copies_as_zero() {
        let mut store = CatalogStore::new();
        for (status, copies) in [
            ("Available", json!(5)),
            ("Borrowed", json!(3)),
            ("Available", json!("four")),
            ("Lost", json!(2)),
        ] {
            store.create(BookPatch {
                status: Some(BookStatus::from(status)),
                copies: Some(Copies::from(copies)),
                ..patch("x")
            });
        }

        assert_eq!(
            store.stats(),
            CatalogStats {
                total_books: 4,
                available_books: 2,
                borrowed_books: 1,
                total_copies: 10,
            }
        );
    }

    #[test]
    fn total_copies_saturates_instead_of_overflowing() {
        let mut store = CatalogStore::new();
        for copies in [i64::MAX, i64::MAX, 1] {
            store.create(BookPatch {
                copies: Some(Copies::new(copies)),
                ..patch("huge")
            });
        }
        assert_eq!(store.stats().total_copies, i64::MAX);

        let mut store = CatalogStore::new();
        for copies in [i64::MIN, -1] {
            store.create(BookPatch {
                copies: Some(Copies::new(copies)),
                ..patch("negative")
            });
        }
        assert_eq!(store.stats().total_copies, i64::MIN);
    }

    #[test]
    fn stats_of_empty_store_are_zero() {
        assert_eq!(CatalogStore::new().stats(), CatalogStats::default());
    }

    #[tokio::test]
    async fn shared_state_sees_writes() {
        let state = CatalogState::default();
        state.write().await.create(patch("A"));
        assert_eq!(state.read().await.len(), 1);
    }
}
