//! HTTP server configuration object and helpers.

use std::sync::Arc;

use mesto::outbound::persistence::InMemoryDocumentStore;
#[cfg(feature = "mongo")]
use mesto::outbound::persistence::MongoDocumentStore;

/// Document store selected at startup.
#[derive(Clone)]
pub enum StoreBackend {
    /// Process-local store; data is lost on restart.
    InMemory(Arc<InMemoryDocumentStore>),
    /// MongoDB collections.
    #[cfg(feature = "mongo")]
    Mongo(Arc<MongoDocumentStore>),
}

impl StoreBackend {
    /// Short name used in startup logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InMemory(_) => "in-memory",
            #[cfg(feature = "mongo")]
            Self::Mongo(_) => "mongodb",
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) caller_id: String,
    pub(crate) store: StoreBackend,
}

impl ServerConfig {
    /// Construct a server configuration backed by a fresh in-memory store.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, caller_id: impl Into<String>) -> Self {
        Self {
            bind_addr: (host.into(), port),
            caller_id: caller_id.into(),
            store: StoreBackend::InMemory(Arc::new(InMemoryDocumentStore::new())),
        }
    }

    /// Replace the document store.
    #[must_use]
    pub fn with_store(mut self, store: StoreBackend) -> Self {
        self.store = store;
        self
    }

    /// Address the listener binds.
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.bind_addr.0.as_str(), self.bind_addr.1)
    }
}
