//! Extension traits

mod depot;
mod record_id;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use record_id::RecordIdExt as _;
pub(crate) use result::ResultExt as _;
