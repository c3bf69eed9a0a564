//! Grantboard Client
//!
//! HTTP gateway for the Grantboard JSON API and the client-side tracker
//! session built on it.

pub mod gateway;
pub mod session;

pub use gateway::{ApiClient, FetchError, Operation};
pub use session::{LoadTicket, TrackerSession};
