//! HTTP gateway for the Grantboard JSON API.
//!
//! Every operation sends exactly one request and never retries. Failures are
//! reported as a [`FetchError`] whose message is fixed per operation, so it
//! can be shown to a user as is; the transport or status detail stays
//! available through [`std::error::Error::source`].

use std::fmt::{Display, Formatter, Result as FmtResult};

use grantboard::prelude::*;
use reqwest::{Client, IntoUrl, RequestBuilder, Response, StatusCode, Url};
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;

/// Where a locally running API listens by default.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000/api";

/// The API operation a [`FetchError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(missing_docs, reason = "variants mirror the client methods")]
pub enum Operation {
    LoadProposals,
    CreateProposal,
    UpdateProposal,
    DeleteProposal,
    ClearProposals,
    LoadUsages,
    CreateUsage,
    DeleteUsage,
    ClearUsages,
    Health,
}

impl Operation {
    /// The message shown to users when this operation fails.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::LoadProposals => "Failed to load proposals",
            Self::CreateProposal => "Failed to create proposal",
            Self::UpdateProposal => "Failed to update proposal",
            Self::DeleteProposal => "Failed to delete proposal",
            Self::ClearProposals => "Failed to clear proposals",
            Self::LoadUsages => "Failed to load usages",
            Self::CreateUsage => "Failed to create usage",
            Self::DeleteUsage => "Failed to delete usage",
            Self::ClearUsages => "Failed to clear usages",
            Self::Health => "Failed to reach the API",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.failure_message())
    }
}

/// Why a request failed.
#[derive(Debug, Error)]
pub enum FetchCause {
    /// The request never reached the server or the connection broke.
    #[error("request could not be sent: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("request failed with status {0}")]
    Status(StatusCode),

    /// The server answered 2xx with a body of the wrong shape.
    #[error("response body could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

/// A failed API call.
#[derive(Debug, Error)]
#[error("{operation}")]
pub struct FetchError {
    operation: Operation,
    #[source]
    cause: FetchCause,
}

impl FetchError {
    /// Wrap `cause` as a failure of `operation`.
    pub const fn new(operation: Operation, cause: FetchCause) -> Self {
        Self { operation, cause }
    }

    /// Which call failed.
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    /// Why it failed.
    pub const fn cause(&self) -> &FetchCause {
        &self.cause
    }

    /// The response status, when the server answered with a non-2xx code.
    pub const fn status(&self) -> Option<StatusCode> {
        match self.cause {
            FetchCause::Status(status) => Some(status),
            FetchCause::Transport(_) | FetchCause::Decode(_) => None,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Health {
    /// Whether the API considers itself healthy.
    pub ok: bool,
}

/// Client for the Grantboard JSON API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: Client,
}

impl ApiClient {
    /// Create a client for the API rooted at `base`, e.g.
    /// `http://localhost:4000/api`.
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self {
            base,
            http: Client::new(),
        }
    }

    /// Create a client from a textual base URL.
    ///
    /// # Errors
    ///
    /// Returns an error when `base` is not a valid URL.
    pub fn parse(base: impl IntoUrl) -> Result<Self, reqwest::Error> {
        Ok(Self::new(base.into_url()?))
    }

    /// Create a client for [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns an error when the default URL cannot be parsed.
    pub fn localhost() -> Result<Self, reqwest::Error> {
        Self::parse(DEFAULT_BASE_URL)
    }

    /// The API root every endpoint is resolved against.
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// Fetch every stored proposal, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] with [`Operation::LoadProposals`].
    pub async fn list_proposals(&self) -> Result<Vec<Proposal>, FetchError> {
        let operation = Operation::LoadProposals;
        let response = self
            .send(operation, self.http.get(self.endpoint("proposals")))
            .await?;

        decode(operation, response).await
    }

    /// Create a proposal and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] with [`Operation::CreateProposal`], including
    /// when the server rejects the fields.
    pub async fn create_proposal(&self, input: &ProposalInput) -> Result<Proposal, FetchError> {
        let operation = Operation::CreateProposal;
        let response = self
            .send(
                operation,
                self.http.post(self.endpoint("proposals")).json(input),
            )
            .await?;

        decode(operation, response).await
    }

    /// Replace the fields of proposal `id` and return the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] with [`Operation::UpdateProposal`]; an unknown
    /// id surfaces as a `404` status.
    pub async fn update_proposal(
        &self,
        id: ProposalUuid,
        input: &ProposalInput,
    ) -> Result<Proposal, FetchError> {
        let operation = Operation::UpdateProposal;
        let url = self.endpoint(&format!("proposals/{id}"));
        let response = self.send(operation, self.http.put(url).json(input)).await?;

        decode(operation, response).await
    }

    /// Delete proposal `id`. Deleting an unknown id succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] with [`Operation::DeleteProposal`].
    pub async fn delete_proposal(&self, id: ProposalUuid) -> Result<(), FetchError> {
        let url = self.endpoint(&format!("proposals/{id}"));

        self.send(Operation::DeleteProposal, self.http.delete(url))
            .await
            .map(drop)
    }

    /// Delete every proposal.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] with [`Operation::ClearProposals`].
    pub async fn clear_proposals(&self) -> Result<(), FetchError> {
        self.send(
            Operation::ClearProposals,
            self.http.delete(self.endpoint("proposals")),
        )
        .await
        .map(drop)
    }

    /// Fetch every recorded usage.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] with [`Operation::LoadUsages`].
    pub async fn list_usages(&self) -> Result<Vec<Usage>, FetchError> {
        let operation = Operation::LoadUsages;
        let response = self
            .send(operation, self.http.get(self.endpoint("usages")))
            .await?;

        decode(operation, response).await
    }

    /// Record a usage and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] with [`Operation::CreateUsage`].
    pub async fn create_usage(&self, input: &UsageInput) -> Result<Usage, FetchError> {
        let operation = Operation::CreateUsage;
        let response = self
            .send(operation, self.http.post(self.endpoint("usages")).json(input))
            .await?;

        decode(operation, response).await
    }

    /// Delete usage `id`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] with [`Operation::DeleteUsage`].
    pub async fn delete_usage(&self, id: UsageUuid) -> Result<(), FetchError> {
        let url = self.endpoint(&format!("usages/{id}"));

        self.send(Operation::DeleteUsage, self.http.delete(url))
            .await
            .map(drop)
    }

    /// Delete every usage.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] with [`Operation::ClearUsages`].
    pub async fn clear_usages(&self) -> Result<(), FetchError> {
        self.send(
            Operation::ClearUsages,
            self.http.delete(self.endpoint("usages")),
        )
        .await
        .map(drop)
    }

    /// Probe the API health endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] with [`Operation::Health`].
    pub async fn health(&self) -> Result<Health, FetchError> {
        let operation = Operation::Health;
        let response = self
            .send(operation, self.http.get(self.endpoint("health")))
            .await?;

        decode(operation, response).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base.as_str().trim_end_matches('/'))
    }

    async fn send(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<Response, FetchError> {
        let response = request.send().await.map_err(|error| {
            tracing::warn!(%operation, %error, "request could not be sent");

            FetchError::new(operation, FetchCause::Transport(error))
        })?;

        let status = response.status();

        if !status.is_success() {
            tracing::warn!(%operation, %status, "request failed");

            return Err(FetchError::new(operation, FetchCause::Status(status)));
        }

        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(
    operation: Operation,
    response: Response,
) -> Result<T, FetchError> {
    response.json().await.map_err(|error| {
        tracing::warn!(%operation, %error, "response body could not be decoded");

        FetchError::new(operation, FetchCause::Decode(error))
    })
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, method, path},
    };

    use super::*;

    fn stored_proposal_json(id: ProposalUuid) -> serde_json::Value {
        json!({
            "id": id,
            "title": "Quantum-Resistant Cryptography Research",
            "principalInvestigator": "Dr. Lisa Park",
            "fundingAgency": "National Security Agency (NSA)",
            "requestedAmount": 750000,
            "submissionDeadline": "2025-01-15",
            "status": "approved",
            "description": "",
            "createdAt": "2024-10-01T12:00:00Z",
            "updatedAt": "2024-10-01T12:00:00Z"
        })
    }

    fn client_for(server: &MockServer) -> TestResult<ApiClient> {
        Ok(ApiClient::parse(format!("{}/api", server.uri()))?)
    }

    #[tokio::test]
    async fn list_proposals_decodes_the_array() -> TestResult {
        let server = MockServer::start().await;
        let id = ProposalUuid::new();

        Mock::given(method("GET"))
            .and(path("/api/proposals"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([stored_proposal_json(id)])))
            .expect(1)
            .mount(&server)
            .await;

        let proposals = client_for(&server)?.list_proposals().await?;

        let ids: Vec<_> = proposals.iter().map(|proposal| proposal.id).collect();

        assert_eq!(ids, [id]);
        assert_eq!(
            proposals.first().map(|proposal| proposal.requested_amount),
            Some(Decimal::from(750_000))
        );
        assert_eq!(
            proposals.first().map(|proposal| proposal.created_at),
            Some("2024-10-01T12:00:00Z".parse::<Timestamp>()?)
        );

        Ok(())
    }

    #[tokio::test]
    async fn server_errors_use_the_fixed_message() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/proposals"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "connection refused"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let error = client_for(&server)?
            .list_proposals()
            .await
            .err()
            .ok_or("expected a fetch error")?;

        assert_eq!(error.to_string(), "Failed to load proposals");
        assert_eq!(error.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(error.source().is_some(), "cause should be kept as source");

        Ok(())
    }

    #[tokio::test]
    async fn create_posts_the_input_fields() -> TestResult {
        let server = MockServer::start().await;
        let id = ProposalUuid::new();

        Mock::given(method("POST"))
            .and(path("/api/proposals"))
            .and(body_partial_json(json!({
                "title": "Quantum-Resistant Cryptography Research",
                "requestedAmount": 750000,
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(stored_proposal_json(id)))
            .expect(1)
            .mount(&server)
            .await;

        let input = ProposalInput {
            title: Some("Quantum-Resistant Cryptography Research".to_owned()),
            principal_investigator: Some("Dr. Lisa Park".to_owned()),
            funding_agency: Some("National Security Agency (NSA)".to_owned()),
            requested_amount: Some(Decimal::from(750_000)),
            submission_deadline: Some("2025-01-15".to_owned()),
            status: Some("approved".to_owned()),
            description: None,
        };

        let created = client_for(&server)?.create_proposal(&input).await?;

        assert_eq!(created.id, id);
        assert_eq!(created.status, ProposalStatus::Approved);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_update_reports_not_found() -> TestResult {
        let server = MockServer::start().await;
        let id = ProposalUuid::new();

        Mock::given(method("PUT"))
            .and(path(format!("/api/proposals/{id}")))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"error": "Proposal not found"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let error = client_for(&server)?
            .update_proposal(id, &ProposalInput::default())
            .await
            .err()
            .ok_or("expected a fetch error")?;

        assert_eq!(error.to_string(), "Failed to update proposal");
        assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn deletes_accept_no_content() -> TestResult {
        let server = MockServer::start().await;
        let id = ProposalUuid::new();

        Mock::given(method("DELETE"))
            .and(path(format!("/api/proposals/{id}")))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/api/proposals"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server)?;

        client.delete_proposal(id).await?;
        client.clear_proposals().await?;

        Ok(())
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() -> TestResult {
        let client = ApiClient::parse("http://127.0.0.1:9/api")?;

        let error = client
            .clear_usages()
            .await
            .err()
            .ok_or("expected a fetch error")?;

        assert_eq!(error.to_string(), "Failed to clear usages");
        assert!(
            matches!(error.cause(), FetchCause::Transport(_)),
            "expected a transport failure, got {:?}",
            error.cause()
        );

        Ok(())
    }

    #[tokio::test]
    async fn health_reads_the_ok_flag() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let health = client_for(&server)?.health().await?;

        assert!(health.ok, "health endpoint should report ok");

        Ok(())
    }

    #[test]
    fn endpoints_ignore_trailing_slashes() -> TestResult {
        let client = ApiClient::parse("http://localhost:4000/api/")?;

        assert_eq!(
            client.endpoint("proposals"),
            "http://localhost:4000/api/proposals"
        );

        Ok(())
    }

    #[test]
    fn default_base_points_at_local_api() -> TestResult {
        assert_eq!(
            ApiClient::localhost()?.base().as_str(),
            "http://localhost:4000/api"
        );

        Ok(())
    }
}
