//! Usage Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    usages::{errors::into_status_error, models::UsageResponse},
};

/// List Usages
#[endpoint(
    tags("usages"),
    summary = "List Usages",
    responses(
        (status_code = StatusCode::OK, description = "All usages"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Failed to load usages"),
    ),
)]
#[tracing::instrument(name = "usages.index", skip(depot), err)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<UsageResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let usages = state
        .app
        .usages
        .list_usages()
        .await
        .map_err(|error| into_status_error(error, "Failed to load usages"))?;

    Ok(Json(usages.into_iter().map(Into::into).collect()))
}
