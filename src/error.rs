//! Error types for the hand gesture control library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Camera or landmark model could not be acquired
    #[error("Acquisition failed: {0}")]
    Acquisition(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Malformed landmark data (wrong point count, non-finite coordinates)
    #[error("Landmark error: {0}")]
    LandmarkError(String),

    /// Render surface rejected a synthetic pointer event
    #[error("Surface error: {0}")]
    SurfaceError(String),

    /// Cursor control operation failed
    #[error("Cursor control error: {0}")]
    CursorControl(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic I/O error with description
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Application-specific error type (alias for main Error type)
pub type AppError = Error;

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
