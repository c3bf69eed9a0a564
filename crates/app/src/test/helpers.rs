//! Test Helpers

use grantboard::{proposals::ProposalInput, usages::UsageInput};
use rust_decimal::Decimal;

pub(crate) fn proposal_input() -> ProposalInput {
    ProposalInput {
        title: Some("Sustainable Energy Storage Solutions".to_string()),
        principal_investigator: Some("Dr. Michael Chen".to_string()),
        funding_agency: Some("Department of Energy".to_string()),
        requested_amount: Some(Decimal::from(500_000)),
        submission_deadline: Some("2024-11-30".to_string()),
        status: Some("draft".to_string()),
        description: Some("Next-generation battery technologies.".to_string()),
    }
}

pub(crate) fn usage_input() -> UsageInput {
    UsageInput {
        tool_name: Some("Mass Spectrometer".to_string()),
        user_name: Some("Dr. Emily Rodriguez".to_string()),
        purpose: Some("Sample calibration".to_string()),
        start_at_iso: Some("2024-11-02T14:00:00.000Z".to_string()),
        duration_minutes: Some(Decimal::from(90)),
        status: None,
    }
}
