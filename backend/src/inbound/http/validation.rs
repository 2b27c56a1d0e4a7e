//! Path identifier parsing for inbound HTTP adapters.
//!
//! Identifiers are checked before any domain call so storage never sees a
//! malformed value. Each call site supplies the client-facing message, since
//! the same malformed card id reads differently for deletion and for likes.

use std::str::FromStr;

use tracing::debug;

use crate::domain::{DomainError, ObjectIdError};

/// Parse a document identifier from a path segment.
///
/// # Examples
/// ```
/// use mesto::domain::{ErrorCode, UserId, messages};
/// use mesto::inbound::http::validation::parse_id;
///
/// let id: UserId = parse_id("683c2711f588f756a662f7e9", messages::INVALID_USER_ID)
///     .expect("valid id");
/// assert_eq!(id.to_string(), "683c2711f588f756a662f7e9");
///
/// let err = parse_id::<UserId>("nope", messages::INVALID_USER_ID).expect_err("invalid");
/// assert_eq!(err.code(), ErrorCode::BadRequest);
/// ```
pub fn parse_id<T>(raw: &str, message: &'static str) -> Result<T, DomainError>
where
    T: FromStr<Err = ObjectIdError>,
{
    T::from_str(raw).map_err(|err| {
        debug!(value = raw, error = %err, "rejected path identifier");
        DomainError::bad_request(message)
    })
}
