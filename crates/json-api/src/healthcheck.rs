//! Health Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Health response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HealthResponse {
    /// Always `true` while the server is answering
    pub ok: bool,
}

/// Health check
///
/// Answers without touching the proposal store.
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn test_health_reports_ok() -> TestResult {
        let router = Router::with_path("api/health").get(handler);

        let body = TestClient::get("http://example.com/api/health")
            .send(&Service::new(router))
            .await
            .take_string()
            .await?;

        assert_eq!(body, r#"{"ok":true}"#);

        Ok(())
    }
}
