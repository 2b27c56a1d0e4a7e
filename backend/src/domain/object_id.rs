//! Document identifiers.
//!
//! The document store addresses records by a 12-byte identifier written as
//! 24 hexadecimal characters. [`ObjectId::is_valid`] is the single syntax
//! check used before any identifier from a request reaches storage.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Number of raw bytes in an identifier.
pub const OBJECT_ID_BYTES: usize = 12;
/// Number of hexadecimal characters in the textual form.
pub const OBJECT_ID_HEX_LEN: usize = OBJECT_ID_BYTES * 2;

/// Reasons a string is not an identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObjectIdError {
    /// The input does not have exactly 24 characters.
    #[error("identifier must be {expected} hexadecimal characters, got {actual}")]
    WrongLength {
        /// Required length.
        expected: usize,
        /// Observed length in bytes.
        actual: usize,
    },
    /// The input contains a non-hexadecimal character.
    #[error("identifier must contain only hexadecimal characters")]
    InvalidHex,
}

/// Raw 12-byte document identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; OBJECT_ID_BYTES]);

static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

const COUNTER_MASK: u32 = 0x00FF_FFFF;

impl ObjectId {
    /// Return whether `value` is syntactically a document identifier.
    ///
    /// # Examples
    /// ```
    /// use mesto::domain::ObjectId;
    ///
    /// assert!(ObjectId::is_valid("683c2711f588f756a662f7e9"));
    /// assert!(!ObjectId::is_valid("not-a-valid-id"));
    /// ```
    pub fn is_valid(value: &str) -> bool {
        value.len() == OBJECT_ID_HEX_LEN && value.bytes().all(|byte| byte.is_ascii_hexdigit())
    }

    /// Parse the 24-character hexadecimal form.
    pub fn parse_str(value: &str) -> Result<Self, ObjectIdError> {
        if value.len() != OBJECT_ID_HEX_LEN {
            return Err(ObjectIdError::WrongLength {
                expected: OBJECT_ID_HEX_LEN,
                actual: value.len(),
            });
        }
        let mut bytes = [0_u8; OBJECT_ID_BYTES];
        hex::decode_to_slice(value, &mut bytes).map_err(|_| ObjectIdError::InvalidHex)?;
        Ok(Self(bytes))
    }

    /// Generate a fresh identifier.
    ///
    /// Layout: 4-byte big-endian seconds since the Unix epoch, 5 random bytes
    /// fixed for the process, then a 3-byte counter that wraps.
    pub fn generate() -> Self {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        // Seconds overflow u32 in 2106; the store truncates the same way.
        let timestamp = u32::try_from(seconds & u64::from(u32::MAX)).unwrap_or_default();
        let process = PROCESS_UNIQUE.get_or_init(rand::random::<[u8; 5]>);
        let counter = COUNTER
            .get_or_init(|| AtomicU32::new(rand::random::<u32>() & COUNTER_MASK))
            .fetch_add(1, Ordering::Relaxed)
            & COUNTER_MASK;

        let mut bytes = [0_u8; OBJECT_ID_BYTES];
        let (time_part, rest) = bytes.split_at_mut(4);
        let (process_part, counter_part) = rest.split_at_mut(5);
        time_part.copy_from_slice(&timestamp.to_be_bytes());
        process_part.copy_from_slice(process);
        if let Some(low) = counter.to_be_bytes().get(1..) {
            counter_part.copy_from_slice(low);
        }
        Self(bytes)
    }

    /// Build an identifier from raw bytes.
    pub const fn from_bytes(bytes: [u8; OBJECT_ID_BYTES]) -> Self {
        Self(bytes)
    }

    /// Raw bytes of the identifier.
    pub const fn bytes(&self) -> [u8; OBJECT_ID_BYTES] {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Declare a typed identifier wrapping [`ObjectId`].
macro_rules! define_object_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name($crate::domain::ObjectId);

        impl $name {
            /// Validate and construct the identifier from its textual form.
            pub fn new(
                id: impl AsRef<str>,
            ) -> Result<Self, $crate::domain::ObjectIdError> {
                $crate::domain::ObjectId::parse_str(id.as_ref()).map(Self)
            }

            /// Generate a new identifier.
            pub fn generate() -> Self {
                Self($crate::domain::ObjectId::generate())
            }

            /// Access the underlying document identifier.
            pub const fn as_object_id(&self) -> &$crate::domain::ObjectId {
                &self.0
            }
        }

        impl From<$crate::domain::ObjectId> for $name {
            fn from(value: $crate::domain::ObjectId) -> Self {
                Self(value)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::domain::ObjectIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

pub(crate) use define_object_id;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    #[case("683c2711f588f756a662f7e9")]
    #[case("683C2711F588F756A662F7E9")]
    #[case("000000000000000000000000")]
    fn accepts_24_hex_characters(#[case] value: &str) {
        assert!(ObjectId::is_valid(value));
        assert!(ObjectId::parse_str(value).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("not-a-valid-id")]
    #[case("683c2711f588f756a662f7e")]
    #[case("683c2711f588f756a662f7e90")]
    #[case("683c2711f588f756a662f7eg")]
    #[case(" 683c2711f588f756a662f7e")]
    #[case("683c2711f588f756a662f7é")]
    fn rejects_malformed_values(#[case] value: &str) {
        assert!(!ObjectId::is_valid(value));
        assert!(ObjectId::parse_str(value).is_err());
    }

    #[rstest]
    fn reports_wrong_length() {
        let err = ObjectId::parse_str("abc").expect_err("too short");
        assert_eq!(
            err,
            ObjectIdError::WrongLength {
                expected: 24,
                actual: 3
            }
        );
    }

    #[rstest]
    fn displays_lowercase_hex() {
        let id = ObjectId::parse_str("683C2711F588F756A662F7E9").expect("valid id");
        assert_eq!(id.to_string(), "683c2711f588f756a662f7e9");
    }

    #[rstest]
    fn generated_ids_are_valid_and_distinct() {
        let ids: HashSet<ObjectId> = (0..1_000).map(|_| ObjectId::generate()).collect();
        assert_eq!(ids.len(), 1_000);
        for id in &ids {
            assert!(ObjectId::is_valid(&id.to_string()));
        }
    }

    #[rstest]
    fn generated_ids_share_process_bytes() {
        let first = ObjectId::generate().bytes();
        let second = ObjectId::generate().bytes();
        assert_eq!(first.get(4..9), second.get(4..9));
    }
}
