//! Placeholder login gate. The flag only decides whether the dashboard is
//! shown; the API itself is open to any caller.

use std::path::{Path, PathBuf};

use catalog_kernel::settings::DashboardSettings;
use directories::ProjectDirs;

use crate::client::CatalogApi;
use crate::error::{DashboardError, Result};

const FLAG_FILE: &str = "session.flag";
const LOGGED_IN: &str = "true";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Login flag persisted in a small file. It never expires.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Configured location, or `session.flag` in the platform data dir.
    pub fn from_settings(settings: &DashboardSettings) -> Result<Self> {
        match &settings.session_file {
            Some(path) => Ok(Self::new(path)),
            None => {
                let dirs =
                    ProjectDirs::from("", "", "catalog").ok_or(DashboardError::NoSessionDir)?;
                Ok(Self::new(dirs.data_dir().join(FLAG_FILE)))
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<SessionState> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim() == LOGGED_IN => Ok(SessionState::LoggedIn),
            Ok(_) => Ok(SessionState::LoggedOut),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SessionState::LoggedOut),
            Err(e) => Err(self.io_error(e)),
        }
    }

    pub fn persist(&self, state: SessionState) -> Result<()> {
        match state {
            SessionState::LoggedIn => {
                if let Some(parent) = self.path.parent() {
                    std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
                }
                std::fs::write(&self.path, LOGGED_IN).map_err(|e| self.io_error(e))
            }
            SessionState::LoggedOut => match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(self.io_error(e)),
            },
        }
    }

    fn io_error(&self, source: std::io::Error) -> DashboardError {
        DashboardError::Session {
            path: self.path.clone(),
            source,
        }
    }
}

/// `LoggedOut -> LoggedIn` needs matching credentials and a reachable API;
/// `LoggedIn -> LoggedOut` happens only on logout.
#[derive(Debug)]
pub struct Session {
    store: SessionStore,
    expected: Credentials,
    state: SessionState,
}

impl Session {
    /// Read the persisted flag once.
    pub fn open(store: SessionStore, expected: Credentials) -> Result<Self> {
        let state = store.load()?;
        tracing::debug!(path = %store.path().display(), ?state, "session opened");
        Ok(Self {
            store,
            expected,
            state,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_logged_in(&self) -> bool {
        self.state == SessionState::LoggedIn
    }

    pub fn require_logged_in(&self) -> Result<()> {
        match self.state {
            SessionState::LoggedIn => Ok(()),
            SessionState::LoggedOut => Err(DashboardError::NotLoggedIn),
        }
    }

    pub async fn login<A>(&mut self, credentials: &Credentials, api: &A) -> Result<()>
    where
        A: CatalogApi + ?Sized,
    {
        if *credentials != self.expected {
            tracing::warn!(username = %credentials.username, "login rejected");
            return Err(DashboardError::InvalidCredentials);
        }

        api.ping().await?;

        self.store.persist(SessionState::LoggedIn)?;
        self.state = SessionState::LoggedIn;
        tracing::info!(username = %credentials.username, "logged in");
        Ok(())
    }

    pub fn logout(&mut self) -> Result<()> {
        self.store.persist(SessionState::LoggedOut)?;
        self.state = SessionState::LoggedOut;
        tracing::info!("logged out");
        Ok(())
    }
}
