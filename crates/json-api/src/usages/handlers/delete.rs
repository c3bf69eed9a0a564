//! Delete Usage Handler

use std::sync::Arc;

use grantboard::usages::UsageUuid;
use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{extensions::*, state::State, usages::errors::into_status_error};

/// Delete Usage
#[endpoint(
    tags("usages"),
    summary = "Delete Usage",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Usage deleted"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Failed to delete usage"),
    ),
)]
#[tracing::instrument(name = "usages.delete", skip(id, depot), err)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Some(usage): Option<UsageUuid> = id.into_record_id() else {
        return Ok(StatusCode::NO_CONTENT);
    };

    state
        .app
        .usages
        .delete_usage(usage)
        .await
        .map_err(|error| into_status_error(error, "Failed to delete usage"))?;

    Ok(StatusCode::NO_CONTENT)
}
