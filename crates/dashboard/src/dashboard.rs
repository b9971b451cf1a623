use catalog_model::{Book, BookId, BookPatch, CatalogStats};

use crate::client::CatalogApi;
use crate::error::Result;
use crate::view::{self, BookTable, DashboardView};

/// Read-through dashboard over a [`CatalogApi`].
///
/// Keeps the last fetched books and stats. Every mutation is followed by a
/// full reload of both; nothing is patched locally.
pub struct Dashboard<A> {
    api: A,
    books: Vec<Book>,
    stats: CatalogStats,
}

impl<A: CatalogApi> Dashboard<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            books: Vec::new(),
            stats: CatalogStats::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Cached books from the last load
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn stats(&self) -> &CatalogStats {
        &self.stats
    }

    pub fn cached(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Fetch books, then stats, and render the dashboard.
    pub async fn load_data(&mut self) -> Result<DashboardView> {
        self.books = self.api.list_books().await?;
        self.stats = self.api.stats().await?;
        tracing::debug!(books = self.books.len(), "dashboard data loaded");
        Ok(self.view())
    }

    pub fn view(&self) -> DashboardView {
        view::render_dashboard(&self.books, &self.stats)
    }

    /// Refetch the collection and render every book.
    pub async fn books_table(&mut self) -> Result<BookTable> {
        self.books = self.api.list_books().await?;
        Ok(view::render_table(&self.books, view::EMPTY_LIBRARY))
    }

    /// Filter the cached collection. A blank query refetches instead.
    pub async fn search(&mut self, query: &str) -> Result<BookTable> {
        if query.trim().is_empty() {
            return self.books_table().await;
        }
        Ok(view::render_table(
            view::filter_books(&self.books, query),
            view::NO_RESULTS,
        ))
    }

    /// Create (`id == None`) or update a book, then reload.
    pub async fn save_book(&mut self, id: Option<BookId>, patch: BookPatch) -> Result<Book> {
        let saved = match id {
            Some(id) => self.api.update_book(id, &patch).await?,
            None => self.api.create_book(&patch).await?,
        };
        self.load_data().await?;
        Ok(saved)
    }

    pub async fn delete_book(&mut self, id: BookId) -> Result<Book> {
        let deleted = self.api.delete_book(id).await?;
        self.load_data().await?;
        Ok(deleted)
    }
}
