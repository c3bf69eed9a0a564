//! Sample proposals for demonstrations and fresh installs.

use grantboard::proposals::{Proposal, ProposalInput};
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::proposals::{ProposalsService, ProposalsServiceError};

struct Sample {
    title: &'static str,
    principal_investigator: &'static str,
    funding_agency: &'static str,
    requested_amount: i64,
    submission_deadline: &'static str,
    status: &'static str,
    description: &'static str,
}

const SAMPLES: [Sample; 5] = [
    Sample {
        title: "Machine Learning Applications in Climate Research",
        principal_investigator: "Dr. Sarah Johnson",
        funding_agency: "National Science Foundation",
        requested_amount: 250_000,
        submission_deadline: "2024-12-15",
        status: "submitted",
        description: "This project aims to develop novel machine learning algorithms for \
                      analyzing climate data patterns and predicting future climate scenarios.",
    },
    Sample {
        title: "Sustainable Energy Storage Solutions",
        principal_investigator: "Dr. Michael Chen",
        funding_agency: "Department of Energy",
        requested_amount: 500_000,
        submission_deadline: "2024-11-30",
        status: "under-review",
        description: "Research into next-generation battery technologies for renewable energy \
                      storage systems.",
    },
    Sample {
        title: "Biomedical Imaging Enhancement",
        principal_investigator: "Dr. Emily Rodriguez",
        funding_agency: "National Institutes of Health",
        requested_amount: 350_000,
        submission_deadline: "2024-10-20",
        status: "approved",
        description: "Development of advanced imaging techniques for early disease detection \
                      and diagnosis.",
    },
    Sample {
        title: "Quantum Computing Applications in Cryptography",
        principal_investigator: "Dr. David Kumar",
        funding_agency: "National Security Agency",
        requested_amount: 750_000,
        submission_deadline: "2025-01-15",
        status: "draft",
        description: "Exploring quantum computing applications for next-generation \
                      cryptographic systems.",
    },
    Sample {
        title: "Urban Air Quality Monitoring Network",
        principal_investigator: "Dr. Lisa Park",
        funding_agency: "Environmental Protection Agency",
        requested_amount: 180_000,
        submission_deadline: "2024-09-30",
        status: "rejected",
        description: "Implementation of IoT-based air quality monitoring systems across urban \
                      environments.",
    },
];

/// The sample proposals as form input.
pub fn sample_proposals() -> Vec<ProposalInput> {
    SAMPLES
        .iter()
        .map(|sample| ProposalInput {
            title: Some(sample.title.to_owned()),
            principal_investigator: Some(sample.principal_investigator.to_owned()),
            funding_agency: Some(sample.funding_agency.to_owned()),
            requested_amount: Some(Decimal::from(sample.requested_amount)),
            submission_deadline: Some(sample.submission_deadline.to_owned()),
            status: Some(sample.status.to_owned()),
            description: Some(sample.description.to_owned()),
        })
        .collect()
}

/// Replace every proposal held by `service` with the samples.
pub async fn seed(service: &dyn ProposalsService) -> Result<Vec<Proposal>, ProposalsServiceError> {
    let cleared = service.clear_proposals().await?;

    info!(cleared, "cleared existing proposals");

    let mut created = Vec::with_capacity(SAMPLES.len());

    for input in sample_proposals() {
        created.push(service.create_proposal(input).await?);
    }

    info!(created = created.len(), "created sample proposals");

    Ok(created)
}
