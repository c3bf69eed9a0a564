//! Record ids taken from the request path.

use grantboard::uuids::TypedUuid;
use salvo::oapi::extract::PathParam;

/// Parse a path segment as a record id.
///
/// A segment that is not a UUID cannot name a stored record, so it yields
/// `None` and handlers treat it as an unknown id rather than a bad request.
pub(crate) trait RecordIdExt {
    fn into_record_id<T>(self) -> Option<TypedUuid<T>>;
}

impl RecordIdExt for PathParam<String> {
    fn into_record_id<T>(self) -> Option<TypedUuid<T>> {
        TypedUuid::parse_str(&self.into_inner())
    }
}
