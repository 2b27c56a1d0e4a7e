//! Validated document field values.
//!
//! User and card documents share two field shapes: bounded text and web
//! links. The macros below declare one newtype per field so a card name can
//! never be stored where a user name is expected.

use url::Url;

/// Schema violations raised while building document fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldValidationError {
    /// A required field was not supplied.
    #[error("{field} is required")]
    Missing {
        /// Field name as it appears on the wire.
        field: &'static str,
    },
    /// Text length falls outside the allowed range.
    #[error("{field} must be between {min} and {max} characters, got {actual}")]
    Length {
        /// Field name as it appears on the wire.
        field: &'static str,
        /// Inclusive lower bound.
        min: usize,
        /// Inclusive upper bound.
        max: usize,
        /// Observed length in characters.
        actual: usize,
    },
    /// Value is not an absolute `http` or `https` URL.
    #[error("{field} must be an absolute http or https URL")]
    InvalidUrl {
        /// Field name as it appears on the wire.
        field: &'static str,
    },
}

impl FieldValidationError {
    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field } | Self::Length { field, .. } | Self::InvalidUrl { field } => {
                field
            }
        }
    }
}

/// Unwrap an optional payload field or report it as missing.
pub fn required<T>(value: Option<T>, field: &'static str) -> Result<T, FieldValidationError> {
    value.ok_or(FieldValidationError::Missing { field })
}

pub(crate) fn check_length(
    value: &str,
    field: &'static str,
    min: usize,
    max: usize,
) -> Result<(), FieldValidationError> {
    let actual = value.chars().count();
    if (min..=max).contains(&actual) {
        Ok(())
    } else {
        Err(FieldValidationError::Length {
            field,
            min,
            max,
            actual,
        })
    }
}

pub(crate) fn check_link(value: &str, field: &'static str) -> Result<(), FieldValidationError> {
    let parsed = Url::parse(value).map_err(|_| FieldValidationError::InvalidUrl { field })?;
    let web_scheme = matches!(parsed.scheme(), "http" | "https");
    if web_scheme && parsed.host_str().is_some_and(|host| !host.is_empty()) {
        Ok(())
    } else {
        Err(FieldValidationError::InvalidUrl { field })
    }
}

/// Declare a text field whose length in characters is bounded.
macro_rules! define_bounded_text {
    ($(#[$meta:meta])* $name:ident, $field:literal, $min:expr, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            /// Minimum length in characters.
            pub const MIN: usize = $min;
            /// Maximum length in characters.
            pub const MAX: usize = $max;

            /// Validate and construct the field value.
            pub fn new(
                value: impl Into<String>,
            ) -> Result<Self, $crate::domain::FieldValidationError> {
                let value = value.into();
                $crate::domain::fields::check_length(&value, $field, Self::MIN, Self::MAX)?;
                Ok(Self(value))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

/// Declare a field holding an absolute web link, kept exactly as supplied.
macro_rules! define_link {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the link.
            pub fn new(
                value: impl Into<String>,
            ) -> Result<Self, $crate::domain::FieldValidationError> {
                let value = value.into();
                $crate::domain::fields::check_link(&value, $field)?;
                Ok(Self(value))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

pub(crate) use define_bounded_text;
pub(crate) use define_link;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ab", true)]
    #[case("a", false)]
    #[case("Жак-Ив", true)]
    #[case("абвгдеёжзийклмнопрстуфхцчшщъыь", true)]
    #[case("абвгдеёжзийклмнопрстуфхцчшщъыьэ", false)]
    fn length_counts_characters_not_bytes(#[case] value: &str, #[case] accepted: bool) {
        assert_eq!(check_length(value, "name", 2, 30).is_ok(), accepted);
    }

    #[rstest]
    #[case("http://x/a.png")]
    #[case("https://pictures.s3.yandex.net/frontend-developer/ava.jpg")]
    #[case("https://www.example.com:8080/path?q=1#frag")]
    fn accepts_web_links(#[case] value: &str) {
        assert!(check_link(value, "link").is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("not a url")]
    #[case("/relative/path.png")]
    #[case("ftp://example.com/file.png")]
    #[case("mailto:someone@example.com")]
    #[case("data:image/png;base64,AAAA")]
    fn rejects_non_web_links(#[case] value: &str) {
        let err = check_link(value, "link").expect_err("link should be rejected");
        assert_eq!(err, FieldValidationError::InvalidUrl { field: "link" });
    }

    #[rstest]
    fn required_reports_field_name() {
        let err = required::<String>(None, "about").expect_err("missing");
        assert_eq!(err.field(), "about");
        assert_eq!(err.to_string(), "about is required");
    }
}
