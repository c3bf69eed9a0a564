//! Grantboard Domain Concerns

pub mod proposals;
pub mod usages;
