//! Update Proposal Handler

use std::sync::Arc;

use grantboard::proposals::ProposalUuid;
use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use crate::{
    extensions::*,
    proposals::{
        errors::into_status_error,
        models::{ProposalRequest, ProposalResponse},
    },
    state::State,
};

/// Update Proposal
///
/// Replaces every field of a proposal. Missing text fields are stored blank
/// and a missing status resets to `draft`; the result must still be valid.
#[endpoint(
    tags("proposals"),
    summary = "Update Proposal",
    responses(
        (status_code = StatusCode::OK, description = "Proposal updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid fields"),
        (status_code = StatusCode::NOT_FOUND, description = "Proposal not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Failed to update proposal"),
    ),
)]
#[tracing::instrument(
    name = "proposals.update",
    skip(id, json, depot),
    fields(proposal_uuid = tracing::field::Empty, status = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    json: JsonBody<ProposalRequest>,
    depot: &mut Depot,
) -> Result<Json<ProposalResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Some(proposal): Option<ProposalUuid> = id.into_record_id() else {
        return Err(StatusError::not_found().brief("Proposal not found"));
    };

    let request = json.into_inner();
    let span = tracing::Span::current();

    span.record("proposal_uuid", tracing::field::display(proposal));

    if let Some(status) = request.status.as_deref() {
        span.record("status", status);
    }

    let updated = state
        .app
        .proposals
        .update_proposal(proposal, request.into())
        .await
        .map_err(|error| into_status_error(error, "Failed to update proposal"))?;

    Ok(Json(updated.into()))
}
