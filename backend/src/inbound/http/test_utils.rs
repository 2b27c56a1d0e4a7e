//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{MockCardsCommand, MockCardsQuery, MockUsersCommand, MockUsersQuery};
use crate::domain::{NewUser, User, UserId};
use crate::inbound::http::state::HttpState;

/// Caller identity injected by handler tests.
pub const CALLER: &str = "683c2711f588f756a662f7e9";

/// Port mocks used to assemble [`HttpState`]. Unset mocks fail on any call.
#[derive(Default)]
pub struct MockPorts {
    /// User reads.
    pub users_query: MockUsersQuery,
    /// User writes.
    pub users: MockUsersCommand,
    /// Card listing.
    pub cards_query: MockCardsQuery,
    /// Card writes and likes.
    pub cards: MockCardsCommand,
}

impl MockPorts {
    /// Wrap the mocks in shared handler state.
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(self.users_query),
            Arc::new(self.users),
            Arc::new(self.cards_query),
            Arc::new(self.cards),
        ))
    }
}

/// Build a valid user with the given name and identifier.
pub fn sample_user(id: &str, name: &str) -> User {
    let profile = NewUser::try_from_parts(
        Some(name.to_owned()),
        Some("Исследователь".to_owned()),
        Some("https://x/ava.png".to_owned()),
    )
    .expect("sample profile is valid");
    User::new(UserId::new(id).expect("sample id is valid"), profile)
}
