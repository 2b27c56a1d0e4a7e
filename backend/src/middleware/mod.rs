//! Request middleware.
//!
//! Purpose: define middleware components for request lifecycle concerns such
//! as caller identity and request spans.

pub mod caller;

pub use caller::{CallerIdentity, InjectedCaller};
