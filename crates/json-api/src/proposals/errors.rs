//! Proposal Errors

use salvo::http::StatusError;
use tracing::error;

use grantboard_app::domain::proposals::ProposalsServiceError;

/// Map a service failure to an HTTP error.
///
/// `failure` is the brief returned for storage errors; the cause is only
/// logged.
pub(crate) fn into_status_error(error: ProposalsServiceError, failure: &str) -> StatusError {
    match error {
        ProposalsServiceError::NotFound => StatusError::not_found().brief("Proposal not found"),
        ProposalsServiceError::Validation(invalid) if invalid.is_missing_field() => {
            StatusError::bad_request().brief("Missing required fields")
        }
        ProposalsServiceError::Validation(invalid) => {
            StatusError::bad_request().brief(invalid.to_string())
        }
        ProposalsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid proposal data")
        }
        ProposalsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Proposal already exists")
        }
        ProposalsServiceError::Sql(source) => {
            error!(error = %source, "{failure}");

            StatusError::internal_server_error().brief(failure)
        }
        ProposalsServiceError::Local(source) => {
            error!(error = %source, "{failure}");

            StatusError::internal_server_error().brief(failure)
        }
    }
}
