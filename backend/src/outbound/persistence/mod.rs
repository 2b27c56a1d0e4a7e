//! Document store adapters implementing the repository ports.
//!
//! - `InMemoryDocumentStore`: process-local store, the default.
//! - `MongoDocumentStore`: MongoDB collections, behind the `mongo` feature.
//!
//! Adapters only translate between stored documents and domain types; schema
//! and lookup rules live in the domain services.

mod memory;
#[cfg(feature = "mongo")]
mod mongo;

pub use memory::InMemoryDocumentStore;
#[cfg(feature = "mongo")]
pub use mongo::MongoDocumentStore;
