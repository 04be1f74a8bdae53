use thiserror::Error;

/// Main error type for the lottery engine
#[derive(Error, Debug)]
pub enum LotoError {
    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Ticket or draw with the wrong shape (count, range, duplicates)
    #[error("Invalid ticket: {0}")]
    InvalidTicket(String),

    /// Player name rejected by intake
    #[error("Invalid player name: {0}")]
    InvalidName(String),

    /// Another ticket already uses this name
    #[error("A player named '{0}' already exists")]
    DuplicatePlayer(String),

    /// Not enough room left in the ticket pool
    #[error("Pool full: {requested} requested, {remaining} slot(s) remaining")]
    PoolFull { requested: usize, remaining: usize },

    /// Prize amount rejected
    #[error("Invalid prize amount: {0}")]
    InvalidPrize(String),

    /// Store errors outside of SQLite itself
    #[error("Store error: {0}")]
    Store(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<String> for LotoError {
    fn from(s: String) -> Self {
        LotoError::Other(s)
    }
}

impl From<&str> for LotoError {
    fn from(s: &str) -> Self {
        LotoError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, LotoError>;
