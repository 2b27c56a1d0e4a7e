//! Helper macro for persistence error enums shared by repository ports.

/// Declare a persistence error with `Connection` and `Query` variants.
///
/// The generated constructors accept anything convertible into `String`.
macro_rules! define_persistence_error {
    ($(#[$outer:meta])* $name:ident, $subject:literal) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            /// Repository connection could not be established.
            #[error("{} connection failed: {message}", $subject)]
            Connection {
                /// Adapter-supplied detail.
                message: String,
            },
            /// Query or mutation failed during execution.
            #[error("{} query failed: {message}", $subject)]
            Query {
                /// Adapter-supplied detail.
                message: String,
            },
        }

        impl $name {
            /// Build a connection failure.
            pub fn connection(message: impl Into<String>) -> Self {
                Self::Connection {
                    message: message.into(),
                }
            }

            /// Build a query failure.
            pub fn query(message: impl Into<String>) -> Self {
                Self::Query {
                    message: message.into(),
                }
            }
        }
    };
}

pub(crate) use define_persistence_error;
