//! Proposals service errors.

use grantboard::validation::ValidationError;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::local::LocalStorageError;

#[derive(Debug, Error)]
pub enum ProposalsServiceError {
    #[error("proposal not found")]
    NotFound,

    #[error("proposal already exists")]
    AlreadyExists,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("local storage error")]
    Local(#[from] LocalStorageError),
}

impl From<Error> for ProposalsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_is_not_found() {
        assert!(matches!(
            ProposalsServiceError::from(Error::RowNotFound),
            ProposalsServiceError::NotFound
        ));
    }

    #[test]
    fn pool_errors_are_storage_errors() {
        assert!(matches!(
            ProposalsServiceError::from(Error::PoolTimedOut),
            ProposalsServiceError::Sql(_)
        ));
    }
}
