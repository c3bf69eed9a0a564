//! Derived views over the proposal list
//!
//! Everything here is recomputed from a snapshot on read; nothing is stored.

mod filter;
mod kpis;
mod rows;

pub use filter::{ProposalFilter, filter_proposals};
pub use kpis::Kpis;
pub use rows::ProposalRow;
