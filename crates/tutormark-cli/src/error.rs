//! CLI error types.

use tutormark::TutormarkError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Color(#[from] TutormarkError),
}
