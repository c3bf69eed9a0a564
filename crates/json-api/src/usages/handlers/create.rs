//! Create Usage Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    state::State,
    usages::{
        errors::into_status_error,
        models::{UsageRequest, UsageResponse},
    },
};

/// Record Usage
#[endpoint(
    tags("usages"),
    summary = "Record Usage",
    responses(
        (status_code = StatusCode::CREATED, description = "Usage recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or invalid fields"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Failed to create usage"),
    ),
)]
#[tracing::instrument(name = "usages.create", skip(json, depot, res), err)]
pub(crate) async fn handler(
    json: JsonBody<UsageRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UsageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let created = state
        .app
        .usages
        .create_usage(json.into_inner().into())
        .await
        .map_err(|error| into_status_error(error, "Failed to create usage"))?;

    res.add_header(LOCATION, format!("/api/usages/{}", created.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
}
