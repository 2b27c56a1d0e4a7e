//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CardsCommand, CardsQuery, UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User reads.
    pub users_query: Arc<dyn UsersQuery>,
    /// User writes.
    pub users: Arc<dyn UsersCommand>,
    /// Card listing with embedded owners.
    pub cards_query: Arc<dyn CardsQuery>,
    /// Card writes and likes.
    pub cards: Arc<dyn CardsCommand>,
}

impl HttpState {
    /// Bundle the port implementations used by the handlers.
    pub fn new(
        users_query: Arc<dyn UsersQuery>,
        users: Arc<dyn UsersCommand>,
        cards_query: Arc<dyn CardsQuery>,
        cards: Arc<dyn CardsCommand>,
    ) -> Self {
        Self {
            users_query,
            users,
            cards_query,
            cards,
        }
    }
}
