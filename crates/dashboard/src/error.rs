use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("cannot reach the catalog API: {0}")]
    Connectivity(String),

    #[error("Book not found")]
    NotFound,

    #[error("catalog API answered {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("not logged in; run `catalog login` first")]
    NotLoggedIn,

    #[error("session flag {path}: {source}")]
    Session {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot determine a data directory for the session flag")]
    NoSessionDir,
}

pub type Result<T> = std::result::Result<T, DashboardError>;
