//! Library catalog application
//!
//! The book store and the HTTP modules that expose it.

pub mod modules;

pub use catalog_model::{Book, BookId, BookPatch, BookStatus, CatalogStats, Copies, DeletedBook, Field};
pub use modules::books::store::{CatalogError, CatalogState, CatalogStore};
