//! HTTP inbound adapter exposing REST endpoints.

pub mod app;
pub mod caller;
pub mod cards;
pub mod error;
pub mod payload;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
