//! Local standalone persistence
//!
//! Keeps the tracker state in a directory of JSON documents, one per key, so
//! the tracker can run without a database.

mod preferences;
mod service;
mod storage;

pub use preferences::LocalPreferences;
pub use service::LocalProposalsService;
pub use storage::{LocalStorage, LocalStorageError, PROPOSALS_KEY, THEME_KEY};
