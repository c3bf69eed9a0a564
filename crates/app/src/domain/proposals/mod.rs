//! Proposals

pub mod errors;
mod repository;
pub mod service;

pub use errors::ProposalsServiceError;
pub use service::*;
