//! Cards API handlers.
//!
//! ```text
//! GET    /cards
//! POST   /cards                   {"name":"Архыз","link":"https://..."}
//! DELETE /cards/{card_id}
//! PUT    /cards/{card_id}/likes
//! DELETE /cards/{card_id}/likes
//! ```
//!
//! Operations acting for the caller check the caller identity before the
//! card identifier.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CreateCardRequest;
use crate::domain::{Card, CardId, CardWithOwner, messages};
use crate::inbound::http::ApiResult;
use crate::inbound::http::caller::Caller;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::payload::JsonBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::UserResponse;
use crate::inbound::http::validation::parse_id;

/// Card document as returned by mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    /// Document identifier.
    #[serde(rename = "_id")]
    #[schema(example = "683c2b3ef588f756a662f7f1")]
    pub id: String,
    /// Caption.
    #[schema(example = "Архыз")]
    pub name: String,
    /// Picture link.
    #[schema(example = "https://pictures.s3.yandex.net/frontend-developer/cards-compressed/arkhyz.jpg")]
    pub link: String,
    /// Identifier of the creating user.
    #[schema(example = "683c2711f588f756a662f7e9")]
    pub owner: String,
    /// Identifiers of the users who liked the card.
    pub likes: Vec<String>,
    /// Creation time, RFC 3339 in UTC.
    #[schema(example = "2025-06-01T12:00:00.000Z")]
    pub created_at: String,
}

/// Card document with its owner embedded, as returned by `GET /cards`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardWithOwnerResponse {
    /// Document identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Caption.
    pub name: String,
    /// Picture link.
    pub link: String,
    /// Owner document; `null` when the owner no longer exists.
    pub owner: Option<UserResponse>,
    /// Identifiers of the users who liked the card.
    pub likes: Vec<String>,
    /// Creation time, RFC 3339 in UTC.
    pub created_at: String,
}

fn likes_of(card: &Card) -> Vec<String> {
    card.likes().iter().map(ToString::to_string).collect()
}

fn timestamp_of(card: &Card) -> String {
    card.created_at().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<Card> for CardResponse {
    fn from(card: Card) -> Self {
        Self {
            id: card.id().to_string(),
            name: card.name().to_string(),
            link: card.link().to_string(),
            owner: card.owner().to_string(),
            likes: likes_of(&card),
            created_at: timestamp_of(&card),
        }
    }
}

impl From<CardWithOwner> for CardWithOwnerResponse {
    fn from(value: CardWithOwner) -> Self {
        let CardWithOwner { card, owner } = value;
        Self {
            id: card.id().to_string(),
            name: card.name().to_string(),
            link: card.link().to_string(),
            owner: owner.map(UserResponse::from),
            likes: likes_of(&card),
            created_at: timestamp_of(&card),
        }
    }
}

/// Request body for `POST /cards`. Both fields are required.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateCardBody {
    /// Caption, 2 to 30 characters.
    pub name: Option<String>,
    /// Absolute `http` or `https` picture link.
    pub link: Option<String>,
}

/// List every card with its owner.
#[utoipa::path(
    get,
    path = "/cards",
    responses(
        (status = 200, description = "Cards", body = [CardWithOwnerResponse]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["cards"],
    operation_id = "listCards"
)]
#[get("/cards")]
pub async fn list_cards(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CardWithOwnerResponse>>> {
    let cards = state.cards_query.list_cards().await?;
    Ok(web::Json(
        cards.into_iter().map(CardWithOwnerResponse::from).collect(),
    ))
}

/// Publish a card owned by the caller.
#[utoipa::path(
    post,
    path = "/cards",
    request_body = CreateCardBody,
    responses(
        (status = 201, description = "Created card", body = CardResponse),
        (status = 400, description = "Missing caller or invalid payload", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["cards"],
    operation_id = "createCard"
)]
#[post("/cards")]
pub async fn create_card(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: JsonBody<CreateCardBody>,
) -> ApiResult<HttpResponse> {
    let owner = caller.require(messages::MISSING_CALLER)?;
    let CreateCardBody { name, link } = payload.into_inner();
    let card = state
        .cards
        .create_card(CreateCardRequest { owner, name, link })
        .await?;
    Ok(HttpResponse::Created().json(CardResponse::from(card)))
}

/// Delete a card.
#[utoipa::path(
    delete,
    path = "/cards/{card_id}",
    params(("card_id" = String, Path, description = "24-character hexadecimal card id")),
    responses(
        (status = 200, description = "Deleted card", body = CardResponse),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 404, description = "Unknown card", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["cards"],
    operation_id = "deleteCard"
)]
#[delete("/cards/{card_id}")]
pub async fn delete_card(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CardResponse>> {
    let card_id: CardId = parse_id(&path, messages::INVALID_CARD_ID)?;
    let card = state.cards.delete_card(&card_id).await?;
    Ok(web::Json(card.into()))
}

/// Like a card as the caller.
#[utoipa::path(
    put,
    path = "/cards/{card_id}/likes",
    params(("card_id" = String, Path, description = "24-character hexadecimal card id")),
    responses(
        (status = 200, description = "Liked card", body = CardResponse),
        (status = 400, description = "Missing caller or malformed identifier", body = ErrorBody),
        (status = 404, description = "Unknown card", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["cards"],
    operation_id = "likeCard"
)]
#[put("/cards/{card_id}/likes")]
pub async fn like_card(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<web::Json<CardResponse>> {
    let user_id = caller.require(messages::MISSING_CALLER)?;
    let card_id: CardId = parse_id(&path, messages::INVALID_LIKE)?;
    let card = state.cards.like_card(&card_id, &user_id).await?;
    Ok(web::Json(card.into()))
}

/// Remove the caller's like from a card.
#[utoipa::path(
    delete,
    path = "/cards/{card_id}/likes",
    params(("card_id" = String, Path, description = "24-character hexadecimal card id")),
    responses(
        (status = 200, description = "Card without the caller's like", body = CardResponse),
        (status = 400, description = "Missing caller or malformed identifier", body = ErrorBody),
        (status = 404, description = "Unknown card", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["cards"],
    operation_id = "dislikeCard"
)]
#[delete("/cards/{card_id}/likes")]
pub async fn dislike_card(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<web::Json<CardResponse>> {
    let user_id = caller.require(messages::MISSING_CALLER)?;
    let card_id: CardId = parse_id(&path, messages::INVALID_DISLIKE)?;
    let card = state.cards.dislike_card(&card_id, &user_id).await?;
    Ok(web::Json(card.into()))
}
