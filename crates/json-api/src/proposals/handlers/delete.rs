//! Delete Proposal Handler

use std::sync::Arc;

use grantboard::proposals::ProposalUuid;
use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{extensions::*, proposals::errors::into_status_error, state::State};

/// Delete Proposal
///
/// Deleting an id that does not exist succeeds.
#[endpoint(
    tags("proposals"),
    summary = "Delete Proposal",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Proposal deleted"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Failed to delete proposal"),
    ),
)]
#[tracing::instrument(name = "proposals.delete", skip(id, depot), err)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Some(proposal): Option<ProposalUuid> = id.into_record_id() else {
        return Ok(StatusCode::NO_CONTENT);
    };

    state
        .app
        .proposals
        .delete_proposal(proposal)
        .await
        .map_err(|error| into_status_error(error, "Failed to delete proposal"))?;

    Ok(StatusCode::NO_CONTENT)
}
