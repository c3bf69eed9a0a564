//! Usages

pub mod errors;
mod repository;
pub mod service;

pub use errors::UsagesServiceError;
pub use service::*;
