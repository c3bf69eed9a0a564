//! Clear Proposals Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{extensions::*, proposals::errors::into_status_error, state::State};

/// Clear Proposals
///
/// Deletes every proposal.
#[endpoint(
    tags("proposals"),
    summary = "Clear Proposals",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "All proposals deleted"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Failed to clear proposals"),
    ),
)]
#[tracing::instrument(name = "proposals.clear", skip(depot), err)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let removed = state
        .app
        .proposals
        .clear_proposals()
        .await
        .map_err(|error| into_status_error(error, "Failed to clear proposals"))?;

    tracing::info!(removed, "cleared proposals");

    Ok(StatusCode::NO_CONTENT)
}
