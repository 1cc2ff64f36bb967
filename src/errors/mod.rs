//! Error handling utilities for the aijournal application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.

use thiserror::Error;

/// Represents specific error cases that can occur during database operations.
///
/// # Examples
///
/// ```
/// use aijournal::errors::DatabaseError;
///
/// let error = DatabaseError::Validation("title is required".to_string());
/// assert!(format!("{}", error).contains("title is required"));
/// ```
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLite database error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("Failed to get connection from pool: {0}\n\nThis may indicate database connection issues. Check that the database file is accessible.")]
    Pool(#[from] r2d2::Error),

    /// An entry violated a field constraint and was not written.
    #[error("Invalid entry: {0}")]
    Validation(String),
}

/// Represents specific error cases that can occur when calling the chat completion API.
///
/// These never reach the user directly: the insight client converts them into
/// fallback text. They exist so the failure can be logged with its cause.
///
/// # Examples
///
/// ```
/// use aijournal::errors::AIError;
///
/// let error = AIError::Status { status: 401, body: "bad key".to_string() };
/// assert!(format!("{}", error).contains("401"));
/// ```
#[derive(Debug, Error)]
pub enum AIError {
    /// The request could not be sent or the connection failed.
    #[error("Chat API request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The API answered with a non-success status code.
    #[error("Chat API returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        body: String,
    },

    /// The response body could not be understood.
    #[error("Invalid response from chat API: {0}")]
    InvalidResponse(String),

    /// The response contained no message text.
    #[error("Chat API returned no content")]
    EmptyResponse,
}

/// Represents all possible errors that can occur in the aijournal application.
///
/// # Examples
///
/// ```
/// use aijournal::errors::AppError;
///
/// let error = AppError::Config("API key is missing".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: API key is missing");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from the terminal or filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors related to database operations.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Errors related to the chat completion API.
    #[error("AI error: {0}")]
    AI(#[from] AIError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
pub type AppResult<T> = Result<T, AppError>;
