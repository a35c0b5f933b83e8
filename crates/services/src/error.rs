//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;

/// Errors emitted by `QuestionService`.
///
/// Each variant maps to a fixed client-facing status; the wrapped storage
/// errors are for logs only.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionServiceError {
    /// The requested question, page, or search result set is empty.
    #[error("resource not found")]
    NotFound,
    /// The referenced category does not exist.
    #[error("bad request")]
    BadRequest,
    /// A write (or the listing that follows it) failed in the store.
    #[error("unprocessable: {0}")]
    Unprocessable(#[source] StorageError),
    /// Quiz history names questions outside the quiz scope, so no unseen
    /// question is left although the scope is not used up.
    #[error("previous questions do not match the quiz category")]
    QuizHistoryMismatch,
    /// A read failed in the store.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
