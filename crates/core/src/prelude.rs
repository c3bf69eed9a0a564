//! Grantboard prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    book::ProposalBook,
    format::{format_currency, format_date, format_whole_currency},
    proposals::{Proposal, ProposalFields, ProposalInput, ProposalStatus, ProposalUuid},
    themes::Theme,
    usages::{NewUsage, Usage, UsageInput, UsageUuid},
    validation::ValidationError,
    view::{Kpis, ProposalFilter, ProposalRow, filter_proposals},
};
