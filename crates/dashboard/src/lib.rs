//! Dashboard client for the catalog API.
//!
//! [`Dashboard`] keeps the last fetched collection and statistics, reloads
//! both after every mutation and renders them through the pure functions in
//! [`view`]. [`Session`] is the placeholder login gate in front of it.

pub mod client;
pub mod dashboard;
pub mod error;
pub mod session;
pub mod view;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{CatalogApi, HttpCatalogClient};
pub use dashboard::Dashboard;
pub use error::{DashboardError, Result};
pub use session::{Credentials, Session, SessionState, SessionStore};
