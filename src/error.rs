//! Error types for the portal driver and the scrape service

use thiserror::Error;

/// Errors raised while driving the registration portal
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Chrome could not be started or the first tab could not be opened
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// The throwaway profile directory could not be created
    #[error("Failed to prepare browser profile: {0}")]
    ProfileFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// A page script could not be evaluated or returned an unexpected value
    #[error("Script evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Timed out waiting for {0}")]
    Timeout(String),

    /// The portal kept reporting an active previous session after recovery
    #[error("Previous session still active after {0} recovery attempt(s)")]
    SessionConflict(usize),

    #[error("{0}")]
    EmptyResult(String),
}

impl BrowserError {
    /// Stable name of the error variant, used as the prefix of reported errors
    pub fn kind(&self) -> &'static str {
        match self {
            BrowserError::LaunchFailed(_) => "LaunchFailed",
            BrowserError::ProfileFailed(_) => "ProfileFailed",
            BrowserError::NavigationFailed(_) => "NavigationFailed",
            BrowserError::EvaluationFailed(_) => "EvaluationFailed",
            BrowserError::ElementNotFound(_) => "ElementNotFound",
            BrowserError::Timeout(_) => "Timeout",
            BrowserError::SessionConflict(_) => "SessionConflict",
            BrowserError::EmptyResult(_) => "EmptyResult",
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, BrowserError::Timeout(_))
    }

    /// Render as `<ErrorKind>: <message>`
    pub fn report(&self) -> String {
        format!("{}: {}", self.kind(), self)
    }
}

/// Result alias for portal operations
pub type Result<T> = std::result::Result<T, BrowserError>;

/// Errors raised while fetching a registration page for the scrape service
#[cfg(feature = "server")]
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid upstream URL: {0}")]
    InvalidUpstream(String),
}
