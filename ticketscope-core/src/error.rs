//! Error types for ticketscope-core

use thiserror::Error;

/// Main error type for the ticketscope-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level HTTP failure talking to the ticket tracker
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Ticket source answered, but not with something usable
    #[error("ticket source error: {0}")]
    Source(String),

    /// A caller passed a parameter outside the accepted domain
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// There are no tickets to report on
    #[error("no data available")]
    NoData,
}

/// Result type alias for ticketscope-core
pub type Result<T> = std::result::Result<T, Error>;
