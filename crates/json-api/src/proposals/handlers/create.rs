//! Create Proposal Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    proposals::{
        errors::into_status_error,
        models::{ProposalRequest, ProposalResponse},
    },
    state::State,
};

/// Create Proposal
///
/// Validates the submitted fields and stores a new proposal.
#[endpoint(
    tags("proposals"),
    summary = "Create Proposal",
    responses(
        (status_code = StatusCode::CREATED, description = "Proposal created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or invalid fields"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Failed to create proposal"),
    ),
)]
#[tracing::instrument(name = "proposals.create", skip(json, depot, res), err)]
pub(crate) async fn handler(
    json: JsonBody<ProposalRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProposalResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let created = state
        .app
        .proposals
        .create_proposal(json.into_inner().into())
        .await
        .map_err(|error| into_status_error(error, "Failed to create proposal"))?;

    res.add_header(LOCATION, format!("/api/proposals/{}", created.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
}

#[cfg(test)]
mod tests {
    use grantboard::{
        proposals::{Proposal, ProposalInput, ProposalStatus},
        validation::ValidationError,
    };
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use grantboard_app::domain::proposals::{MockProposalsService, ProposalsServiceError};

    use crate::test_helpers::{make_proposal, proposals_service, proposals_storage_failure};

    use super::*;

    fn make_service(proposals: MockProposalsService) -> Service {
        proposals_service(proposals, Router::with_path("api/proposals").post(handler))
    }

    fn body() -> serde_json::Value {
        json!({
            "title": "AI-Powered Climate Modeling",
            "principalInvestigator": "Dr. Sarah Chen",
            "fundingAgency": "National Science Foundation (NSF)",
            "requestedAmount": 450000,
            "submissionDeadline": "2024-12-15",
            "status": "draft",
        })
    }

    #[tokio::test]
    async fn test_create_proposal_success() -> TestResult {
        let proposal = make_proposal(ProposalStatus::Draft);
        let id = proposal.id;

        let mut proposals = MockProposalsService::new();

        proposals
            .expect_create_proposal()
            .once()
            .withf(|input: &ProposalInput| {
                input.title.as_deref() == Some("AI-Powered Climate Modeling")
                    && input.requested_amount == Some(Decimal::from(450_000))
                    && input.description.is_none()
            })
            .return_once(move |_| Ok(proposal));

        proposals.expect_list_proposals().never();
        proposals.expect_update_proposal().never();
        proposals.expect_delete_proposal().never();
        proposals.expect_clear_proposals().never();

        let mut res = TestClient::post("http://example.com/api/proposals")
            .json(&body())
            .send(&make_service(proposals))
            .await;

        let created: Proposal = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/api/proposals/{id}").as_str()));
        assert_eq!(created.id, id);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_proposal_missing_fields_returns_400() -> TestResult {
        let mut proposals = MockProposalsService::new();

        proposals
            .expect_create_proposal()
            .once()
            .withf(|input: &ProposalInput| input.funding_agency.is_none())
            .return_once(|_| Err(ValidationError::MissingField("fundingAgency").into()));

        proposals.expect_list_proposals().never();
        proposals.expect_update_proposal().never();
        proposals.expect_delete_proposal().never();
        proposals.expect_clear_proposals().never();

        let res = TestClient::post("http://example.com/api/proposals")
            .json(&json!({ "title": "Half a form" }))
            .send(&make_service(proposals))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_proposal_zero_amount_returns_400() -> TestResult {
        let mut proposals = MockProposalsService::new();

        proposals
            .expect_create_proposal()
            .once()
            .withf(|input: &ProposalInput| input.requested_amount == Some(Decimal::ZERO))
            .return_once(|_| Err(ProposalsServiceError::Validation(ValidationError::NonPositiveAmount)));

        proposals.expect_list_proposals().never();
        proposals.expect_update_proposal().never();
        proposals.expect_delete_proposal().never();
        proposals.expect_clear_proposals().never();

        let mut body = body();
        body["requestedAmount"] = json!(0);

        let res = TestClient::post("http://example.com/api/proposals")
            .json(&body)
            .send(&make_service(proposals))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_proposal_storage_error_returns_500() -> TestResult {
        let mut proposals = MockProposalsService::new();

        proposals
            .expect_create_proposal()
            .once()
            .return_once(|_| Err(proposals_storage_failure()));

        proposals.expect_list_proposals().never();
        proposals.expect_update_proposal().never();
        proposals.expect_delete_proposal().never();
        proposals.expect_clear_proposals().never();

        let res = TestClient::post("http://example.com/api/proposals")
            .json(&body())
            .send(&make_service(proposals))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
