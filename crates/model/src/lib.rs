//! Book records and request/response payloads of the catalog API.
//!
//! Shared by the server and its clients. Modelled fields accept any JSON:
//! values of the expected type are typed, everything else is kept as sent
//! (see [`Field`]).

mod book;
mod field;

pub use book::{Book, BookId, BookPatch, BookStatus, CatalogStats, Copies, DeletedBook};
pub use field::Field;
