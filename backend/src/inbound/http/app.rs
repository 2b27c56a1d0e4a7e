//! Application assembly for the REST API.
//!
//! Routes, caller middleware, and the 404 fallback are wired here so the
//! server binary and integration tests build the same application.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::inbound::http::cards::{create_card, delete_card, dislike_card, like_card, list_cards};
use crate::inbound::http::error::not_found;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{
    create_user, get_user, list_users, update_avatar, update_profile,
};
use crate::middleware::CallerIdentity;

/// Build the application serving every user and card endpoint.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::web;
/// use mesto::domain::{CardService, UserService};
/// use mesto::inbound::http::app::build_app;
/// use mesto::inbound::http::state::HttpState;
/// use mesto::middleware::CallerIdentity;
/// use mesto::outbound::persistence::InMemoryDocumentStore;
///
/// let store = Arc::new(InMemoryDocumentStore::new());
/// let users = Arc::new(UserService::new(Arc::clone(&store)));
/// let cards = Arc::new(CardService::new(Arc::clone(&store), Arc::clone(&store)));
/// let state = HttpState::new(users.clone(), users, cards.clone(), cards);
/// let _app = build_app(
///     web::Data::new(state),
///     CallerIdentity::new("683c2711f588f756a662f7e9"),
/// );
/// ```
pub fn build_app(
    state: web::Data<HttpState>,
    caller: CallerIdentity,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(caller)
        .service(list_users)
        .service(create_user)
        .service(update_profile)
        .service(update_avatar)
        .service(get_user)
        .service(list_cards)
        .service(create_card)
        .service(delete_card)
        .service(like_card)
        .service(dislike_card)
        .default_service(web::to(not_found))
}
