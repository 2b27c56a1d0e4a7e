//! Domain primitives, aggregates, and use-case services.
//!
//! Purpose: define the user and card documents, the identifiers that address
//! them, and the services that enforce schema and lookup rules before any
//! adapter touches storage.
//!
//! Public surface:
//! - DomainError / ErrorCode: failure taxonomy rendered by inbound adapters.
//! - ObjectId: 12-byte document identifier and its syntax check.
//! - User, Card and their payload types.
//! - UserService, CardService: implementations of the driving ports.

mod card;
mod card_service;
mod error;
mod fields;
pub mod messages;
mod object_id;
pub mod ports;
mod user;
mod user_service;

pub use self::card::{Card, CardId, CardLink, CardName, CardWithOwner, NewCard};
pub use self::card_service::CardService;
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::fields::{FieldValidationError, required};
pub use self::object_id::{OBJECT_ID_BYTES, OBJECT_ID_HEX_LEN, ObjectId, ObjectIdError};
pub use self::user::{AvatarUrl, NewUser, ProfilePatch, User, UserAbout, UserId, UserName};
pub use self::user_service::UserService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use mesto::domain::{ApiResult, DomainError, messages};
///
/// fn handler() -> ApiResult<()> {
///     Err(DomainError::not_found(messages::RESOURCE_NOT_FOUND))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, DomainError>;
