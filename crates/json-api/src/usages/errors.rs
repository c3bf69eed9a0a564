//! Usage Errors

use salvo::http::StatusError;
use tracing::error;

use grantboard_app::domain::usages::UsagesServiceError;

pub(crate) fn into_status_error(error: UsagesServiceError, failure: &str) -> StatusError {
    match error {
        UsagesServiceError::Validation(invalid) if invalid.is_missing_field() => {
            StatusError::bad_request().brief("Missing required fields")
        }
        UsagesServiceError::Validation(invalid) => {
            StatusError::bad_request().brief(invalid.to_string())
        }
        UsagesServiceError::InvalidData => StatusError::bad_request().brief("Invalid usage data"),
        UsagesServiceError::AlreadyExists => StatusError::conflict().brief("Usage already exists"),
        UsagesServiceError::Sql(source) => {
            error!(error = %source, "{failure}");

            StatusError::internal_server_error().brief(failure)
        }
    }
}
