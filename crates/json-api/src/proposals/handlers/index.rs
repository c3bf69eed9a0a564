//! Proposal Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    proposals::{errors::into_status_error, models::ProposalResponse},
    state::State,
};

/// List Proposals
///
/// Returns every proposal, newest first.
#[endpoint(
    tags("proposals"),
    summary = "List Proposals",
    responses(
        (status_code = StatusCode::OK, description = "All proposals"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Failed to load proposals"),
    ),
)]
#[tracing::instrument(name = "proposals.index", skip(depot), err)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<ProposalResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let proposals = state
        .app
        .proposals
        .list_proposals()
        .await
        .map_err(|error| into_status_error(error, "Failed to load proposals"))?;

    Ok(Json(proposals.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use grantboard::proposals::{Proposal, ProposalStatus};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use grantboard_app::domain::proposals::MockProposalsService;

    use crate::test_helpers::{make_proposal, proposals_service, proposals_storage_failure};

    use super::*;

    fn make_service(proposals: MockProposalsService) -> Service {
        proposals_service(proposals, Router::with_path("api/proposals").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_proposals_in_service_order() -> TestResult {
        let newest = make_proposal(ProposalStatus::Approved);
        let oldest = make_proposal(ProposalStatus::Draft);
        let expected = vec![newest.clone(), oldest.clone()];

        let mut proposals = MockProposalsService::new();

        proposals
            .expect_list_proposals()
            .once()
            .return_once(move || Ok(vec![newest, oldest]));

        proposals.expect_create_proposal().never();
        proposals.expect_update_proposal().never();
        proposals.expect_delete_proposal().never();
        proposals.expect_clear_proposals().never();

        let mut res = TestClient::get("http://example.com/api/proposals")
            .send(&make_service(proposals))
            .await;

        let body: Vec<Proposal> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body, expected);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_returns_empty_array() -> TestResult {
        let mut proposals = MockProposalsService::new();

        proposals
            .expect_list_proposals()
            .once()
            .return_once(|| Ok(Vec::new()));

        proposals.expect_create_proposal().never();
        proposals.expect_update_proposal().never();
        proposals.expect_delete_proposal().never();
        proposals.expect_clear_proposals().never();

        let body = TestClient::get("http://example.com/api/proposals")
            .send(&make_service(proposals))
            .await
            .take_string()
            .await?;

        assert_eq!(body, "[]");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut proposals = MockProposalsService::new();

        proposals
            .expect_list_proposals()
            .once()
            .return_once(|| Err(proposals_storage_failure()));

        proposals.expect_create_proposal().never();
        proposals.expect_update_proposal().never();
        proposals.expect_delete_proposal().never();
        proposals.expect_clear_proposals().never();

        let res = TestClient::get("http://example.com/api/proposals")
            .send(&make_service(proposals))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
