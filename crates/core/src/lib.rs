//! Grantboard
//!
//! Grantboard tracks research grant proposals: the entity model, field validation,
//! immutable state transitions and the derived views (filters, KPIs, overdue flags)
//! shared by the HTTP service, the client and the local standalone tracker.

pub mod book;
pub mod format;
pub mod prelude;
pub mod proposals;
pub mod themes;
pub mod usages;
pub mod uuids;
pub mod validation;
pub mod view;
