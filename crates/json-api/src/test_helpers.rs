//! Test helpers.

use std::sync::Arc;

use grantboard::{
    proposals::{Proposal, ProposalStatus, ProposalUuid},
    usages::{Usage, UsageUuid},
};
use grantboard_app::{
    context::AppContext,
    domain::{
        proposals::{MockProposalsService, ProposalsServiceError},
        usages::{MockUsagesService, UsagesServiceError},
    },
};
use jiff::{Timestamp, civil::date};
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use crate::state::State;

pub(crate) fn make_proposal(status: ProposalStatus) -> Proposal {
    Proposal {
        id: ProposalUuid::new(),
        title: "AI-Powered Climate Modeling".to_owned(),
        principal_investigator: "Dr. Sarah Chen".to_owned(),
        funding_agency: "National Science Foundation (NSF)".to_owned(),
        requested_amount: Decimal::from(450_000),
        submission_deadline: date(2024, 12, 15),
        status,
        description: "Machine learning for regional climate projections".to_owned(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_usage() -> Usage {
    Usage {
        id: UsageUuid::new(),
        tool_name: "Grant Tracker".to_owned(),
        user_name: "Dr. Sarah Chen".to_owned(),
        purpose: "Quarterly review".to_owned(),
        start_at_iso: "2024-10-01T09:00:00.000Z".to_owned(),
        duration_minutes: 45,
        status: "Active".to_owned(),
    }
}

/// A storage failure as the Postgres-backed services report it.
pub(crate) fn proposals_storage_failure() -> ProposalsServiceError {
    sqlx::Error::PoolTimedOut.into()
}

pub(crate) fn usages_storage_failure() -> UsagesServiceError {
    sqlx::Error::PoolTimedOut.into()
}

pub(crate) fn strict_proposals_mock() -> MockProposalsService {
    let mut proposals = MockProposalsService::new();

    proposals.expect_list_proposals().never();
    proposals.expect_create_proposal().never();
    proposals.expect_update_proposal().never();
    proposals.expect_delete_proposal().never();
    proposals.expect_clear_proposals().never();

    proposals
}

pub(crate) fn strict_usages_mock() -> MockUsagesService {
    let mut usages = MockUsagesService::new();

    usages.expect_list_usages().never();
    usages.expect_create_usage().never();
    usages.expect_delete_usage().never();
    usages.expect_clear_usages().never();

    usages
}

pub(crate) fn state_with(proposals: MockProposalsService, usages: MockUsagesService) -> Arc<State> {
    State::from_app_context(AppContext {
        proposals: Arc::new(proposals),
        usages: Arc::new(usages),
    })
}

pub(crate) fn proposals_service(proposals: MockProposalsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(proposals, strict_usages_mock())))
            .push(route),
    )
}

pub(crate) fn usages_service(usages: MockUsagesService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(strict_proposals_mock(), usages)))
            .push(route),
    )
}
