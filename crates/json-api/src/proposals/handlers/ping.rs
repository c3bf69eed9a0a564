//! Proposals Ping Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Feature probe response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PingResponse {
    pub ok: bool,

    /// Name of the feature answering
    pub feature: String,
}

/// Ping Proposals
///
/// Confirms the proposals feature is mounted.
#[endpoint(tags("proposals"), summary = "Ping Proposals")]
pub(crate) async fn handler() -> Json<PingResponse> {
    Json(PingResponse {
        ok: true,
        feature: "proposals".to_owned(),
    })
}
