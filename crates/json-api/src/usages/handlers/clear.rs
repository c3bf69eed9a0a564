//! Clear Usages Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{extensions::*, state::State, usages::errors::into_status_error};

/// Clear Usages
#[endpoint(
    tags("usages"),
    summary = "Clear Usages",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "All usages deleted"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Failed to clear usages"),
    ),
)]
#[tracing::instrument(name = "usages.clear", skip(depot), err)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let removed = state
        .app
        .usages
        .clear_usages()
        .await
        .map_err(|error| into_status_error(error, "Failed to clear usages"))?;

    tracing::info!(removed, "cleared usages");

    Ok(StatusCode::NO_CONTENT)
}
