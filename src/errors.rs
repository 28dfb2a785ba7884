use thiserror::Error;

/// Failures surfaced by [`crate::users::UserStore`].
///
/// Validation and query-shape errors are raised before any SQL runs; a
/// failure inside a mutating call leaves nothing committed.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Required input was missing or empty.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The lookup criteria were unusable.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A well-formed query matched no user.
    #[error("no user matched the given criteria")]
    NotFound,

    /// The criteria matched more than one user; a single record was expected.
    #[error("criteria matched more than one user")]
    MultipleMatches,

    /// The underlying database operation failed; passed through unchanged.
    #[error(transparent)]
    Persistence(#[from] sqlx::Error),
}

/// Failures from the credential service on top of the store.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email already registered: {0}")]
    EmailTaken(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}
