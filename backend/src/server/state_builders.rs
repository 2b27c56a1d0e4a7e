//! Builders for the document store and the HTTP state ports.

use std::io;
use std::sync::Arc;

use tracing::info;
#[cfg(not(feature = "mongo"))]
use tracing::warn;

use mesto::domain::ports::{CardRepository, UserRepository};
use mesto::domain::{CardService, UserService};
use mesto::inbound::http::state::HttpState;
use mesto::outbound::persistence::InMemoryDocumentStore;
#[cfg(feature = "mongo")]
use mesto::outbound::persistence::MongoDocumentStore;
use mesto::settings::AppSettings;

use super::config::StoreBackend;

/// Select the document store from settings.
///
/// With the `mongo` feature and a `mongo_uri`, connects to MongoDB and fails
/// startup when the server cannot be reached. Otherwise uses the in-memory
/// store.
///
/// # Errors
/// Returns [`io::Error`] when the MongoDB connection cannot be established.
pub(crate) async fn build_store(settings: &AppSettings) -> io::Result<StoreBackend> {
    #[cfg(feature = "mongo")]
    {
        if let Some(uri) = settings.mongo_uri() {
            let store = MongoDocumentStore::connect(uri, settings.database())
                .await
                .map_err(|error| io::Error::other(format!("connect to MongoDB: {error}")))?;
            return Ok(StoreBackend::Mongo(Arc::new(store)));
        }
    }
    #[cfg(not(feature = "mongo"))]
    {
        if settings.mongo_uri().is_some() {
            warn!("mongo_uri is set but MongoDB support is not compiled in");
        }
    }
    info!("using the in-memory document store");
    Ok(StoreBackend::InMemory(Arc::new(InMemoryDocumentStore::new())))
}

fn state_for<S>(store: Arc<S>) -> HttpState
where
    S: UserRepository + CardRepository + 'static,
{
    let users = Arc::new(UserService::new(Arc::clone(&store)));
    let cards = Arc::new(CardService::new(Arc::clone(&store), store));
    HttpState::new(users.clone(), users, cards.clone(), cards)
}

/// Wire the domain services over the selected store.
pub(crate) fn build_http_state(store: &StoreBackend) -> HttpState {
    match store {
        StoreBackend::InMemory(store) => state_for(Arc::clone(store)),
        #[cfg(feature = "mongo")]
        StoreBackend::Mongo(store) => state_for(Arc::clone(store)),
    }
}
