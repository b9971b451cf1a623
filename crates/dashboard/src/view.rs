//! Pure rendering: catalog data in, view model out.

use catalog_model::{Book, BookId, CatalogStats};

/// Number of rows on the dashboard's recent-books table.
pub const RECENT_LIMIT: usize = 5;

pub const NO_BOOKS_FOUND: &str = "No books found";
pub const EMPTY_LIBRARY: &str = "No books in the library";
pub const NO_RESULTS: &str = "No results found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRow {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub category: String,
    pub status_label: String,
    pub copies: String,
}

impl From<&Book> for BookRow {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title().to_string(),
            author: book.author().to_string(),
            category: book.category().to_string(),
            status_label: book.status.to_string(),
            copies: book.copies.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookTable {
    pub rows: Vec<BookRow>,
    /// Set when there are no rows to show
    pub empty_message: Option<&'static str>,
}

impl BookTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub stats: Vec<StatCard>,
    pub recent: BookTable,
}

pub fn render_stats(stats: &CatalogStats) -> Vec<StatCard> {
    vec![
        StatCard {
            label: "Total books",
            value: stats.total_books.to_string(),
        },
        StatCard {
            label: "Available books",
            value: stats.available_books.to_string(),
        },
        StatCard {
            label: "Borrowed books",
            value: stats.borrowed_books.to_string(),
        },
        StatCard {
            label: "Total copies",
            value: stats.total_copies.to_string(),
        },
    ]
}

pub fn render_table<'a, I>(books: I, empty_message: &'static str) -> BookTable
where
    I: IntoIterator<Item = &'a Book>,
{
    let rows: Vec<BookRow> = books.into_iter().map(BookRow::from).collect();
    let empty_message = rows.is_empty().then_some(empty_message);
    BookTable {
        rows,
        empty_message,
    }
}

/// Stat cards plus the first [`RECENT_LIMIT`] books in collection order.
pub fn render_dashboard(books: &[Book], stats: &CatalogStats) -> DashboardView {
    DashboardView {
        stats: render_stats(stats),
        recent: render_table(books.iter().take(RECENT_LIMIT), NO_BOOKS_FOUND),
    }
}

/// Books whose title, author or category contains `query`, ignoring case.
/// The query is trimmed; an empty query matches everything.
pub fn filter_books<'a>(books: &'a [Book], query: &str) -> Vec<&'a Book> {
    let needle = query.trim().to_lowercase();
    books
        .iter()
        .filter(|book| {
            needle.is_empty()
                || [book.title(), book.author(), book.category()]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}
