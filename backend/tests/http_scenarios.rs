//! End-to-end scenarios over the real services and the in-memory store.
//!
//! Each scenario builds one store and serves it through separate apps, one
//! per acting user, so requests from different callers observe shared state.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use actix_web::web;
use mesto::domain::messages;
use mesto::domain::{CardService, UserService};
use mesto::inbound::http::app::build_app;
use mesto::inbound::http::state::HttpState;
use mesto::middleware::CallerIdentity;
use mesto::outbound::persistence::InMemoryDocumentStore;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn state() -> web::Data<HttpState> {
    let store = Arc::new(InMemoryDocumentStore::new());
    let users = Arc::new(UserService::new(Arc::clone(&store)));
    let cards = Arc::new(CardService::new(Arc::clone(&store), store));
    web::Data::new(HttpState::new(users.clone(), users, cards.clone(), cards))
}

async fn send(
    state: &web::Data<HttpState>,
    caller: CallerIdentity,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let app = actix_test::init_service(build_app(state.clone(), caller)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).expect("JSON body");
    (status, value)
}

async fn create_user(state: &web::Data<HttpState>, name: &str) -> String {
    let (status, body) = send(
        state,
        CallerIdentity::anonymous(),
        actix_test::TestRequest::post().uri("/users").set_json(json!({
            "name": name,
            "about": "Explorer",
            "avatar": "https://x/avatar.png",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body.get("_id")
        .and_then(Value::as_str)
        .expect("user id")
        .to_owned()
}

fn likes(value: &Value) -> Vec<&str> {
    value
        .get("likes")
        .and_then(Value::as_array)
        .expect("likes array")
        .iter()
        .filter_map(Value::as_str)
        .collect()
}

#[rstest]
#[actix_web::test]
async fn created_user_is_readable_by_id(state: web::Data<HttpState>) {
    let (status, created) = send(
        &state,
        CallerIdentity::anonymous(),
        actix_test::TestRequest::post().uri("/users").set_json(json!({
            "name": "Alice",
            "about": "Engineer",
            "avatar": "http://x/a.png",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created.get("_id").and_then(Value::as_str).expect("id");

    let (status, fetched) = send(
        &state,
        CallerIdentity::anonymous(),
        actix_test::TestRequest::get().uri(&format!("/users/{id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (_, listed) = send(
        &state,
        CallerIdentity::anonymous(),
        actix_test::TestRequest::get().uri("/users"),
    )
    .await;
    assert_eq!(listed, json!([created]));
}

#[rstest]
#[actix_web::test]
async fn partial_profile_update_keeps_other_fields(state: web::Data<HttpState>) {
    let alice = create_user(&state, "Alice").await;

    let (status, body) = send(
        &state,
        CallerIdentity::new(alice.as_str()),
        actix_test::TestRequest::patch()
            .uri("/users/me")
            .set_json(json!({ "name": "Alicia" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("_id").and_then(Value::as_str), Some(alice.as_str()));
    assert_eq!(body.get("name").and_then(Value::as_str), Some("Alicia"));
    assert_eq!(body.get("about").and_then(Value::as_str), Some("Explorer"));
}

#[rstest]
#[actix_web::test]
async fn likes_are_idempotent_per_user(state: web::Data<HttpState>) {
    let owner = create_user(&state, "Owner").await;
    let fan = create_user(&state, "Fan").await;

    let (status, card) = send(
        &state,
        CallerIdentity::new(owner.as_str()),
        actix_test::TestRequest::post().uri("/cards").set_json(json!({
            "name": "Архыз",
            "link": "https://x/arkhyz.jpg",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(card.get("owner").and_then(Value::as_str), Some(owner.as_str()));
    let card_id = card.get("_id").and_then(Value::as_str).expect("card id");
    let likes_uri = format!("/cards/{card_id}/likes");

    for _ in 0..2 {
        let (status, liked) = send(
            &state,
            CallerIdentity::new(fan.as_str()),
            actix_test::TestRequest::put().uri(&likes_uri),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(likes(&liked), vec![fan.as_str()]);
    }

    let (status, disliked) = send(
        &state,
        CallerIdentity::new(fan.as_str()),
        actix_test::TestRequest::delete().uri(&likes_uri),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(likes(&disliked).is_empty());
}

#[rstest]
#[actix_web::test]
async fn card_list_embeds_owner_profile(state: web::Data<HttpState>) {
    let owner = create_user(&state, "Owner").await;
    let (status, _) = send(
        &state,
        CallerIdentity::new(owner.as_str()),
        actix_test::TestRequest::post().uri("/cards").set_json(json!({
            "name": "Байкал",
            "link": "https://x/baikal.jpg",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, cards) = send(
        &state,
        CallerIdentity::anonymous(),
        actix_test::TestRequest::get().uri("/cards"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let embedded = cards
        .get(0)
        .and_then(|card| card.get("owner"))
        .expect("embedded owner");
    assert_eq!(embedded.get("_id").and_then(Value::as_str), Some(owner.as_str()));
    assert_eq!(embedded.get("name").and_then(Value::as_str), Some("Owner"));
}

#[rstest]
#[case("not-a-valid-id", StatusCode::BAD_REQUEST, messages::INVALID_CARD_ID)]
#[case("683c2b3ef588f756a662f7f1", StatusCode::NOT_FOUND, messages::CARD_NOT_FOUND)]
#[actix_web::test]
async fn deleting_missing_cards(
    state: web::Data<HttpState>,
    #[case] card_id: &str,
    #[case] expected_status: StatusCode,
    #[case] expected_message: &str,
) {
    let owner = create_user(&state, "Owner").await;
    let (status, body) = send(
        &state,
        CallerIdentity::new(owner.as_str()),
        actix_test::TestRequest::delete().uri(&format!("/cards/{card_id}")),
    )
    .await;

    assert_eq!(status, expected_status);
    assert_eq!(body, json!({ "message": expected_message }));
}

#[rstest]
#[actix_web::test]
async fn deleted_card_disappears_from_listing(state: web::Data<HttpState>) {
    let owner = create_user(&state, "Owner").await;
    let caller = CallerIdentity::new(owner.as_str());
    let (_, card) = send(
        &state,
        caller.clone(),
        actix_test::TestRequest::post().uri("/cards").set_json(json!({
            "name": "Эльбрус",
            "link": "https://x/elbrus.jpg",
        })),
    )
    .await;
    let card_id = card.get("_id").and_then(Value::as_str).expect("card id");

    let (status, deleted) = send(
        &state,
        caller.clone(),
        actix_test::TestRequest::delete().uri(&format!("/cards/{card_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted.get("_id"), card.get("_id"));

    let (_, listed) = send(
        &state,
        caller.clone(),
        actix_test::TestRequest::get().uri("/cards"),
    )
    .await;
    assert_eq!(listed, json!([]));

    let (status, body) = send(
        &state,
        caller,
        actix_test::TestRequest::delete().uri(&format!("/cards/{card_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": messages::CARD_NOT_FOUND }));
}

#[rstest]
#[actix_web::test]
async fn invalid_user_payload_uses_profile_wording(state: web::Data<HttpState>) {
    let (status, body) = send(
        &state,
        CallerIdentity::anonymous(),
        actix_test::TestRequest::post().uri("/users").set_json(json!({
            "name": "A",
            "about": "Explorer",
            "avatar": "https://x/avatar.png",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "message": "Переданы некорректные данные при обновлении профиля" })
    );
}

#[rstest]
#[actix_web::test]
async fn bodyless_profile_update_returns_user_unchanged(state: web::Data<HttpState>) {
    let alice = create_user(&state, "Alice").await;

    let (status, body) = send(
        &state,
        CallerIdentity::new(alice.as_str()),
        actix_test::TestRequest::patch().uri("/users/me"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("name").and_then(Value::as_str), Some("Alice"));
    assert_eq!(body.get("about").and_then(Value::as_str), Some("Explorer"));
}

#[rstest]
#[actix_web::test]
async fn non_json_card_payload_fails_card_validation(state: web::Data<HttpState>) {
    let owner = create_user(&state, "Owner").await;

    let (status, body) = send(
        &state,
        CallerIdentity::new(owner.as_str()),
        actix_test::TestRequest::post()
            .uri("/cards")
            .insert_header(("content-type", "text/plain"))
            .set_payload(r#"{"name":"Архыз","link":"https://x/arkhyz.jpg"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": messages::INVALID_CARD_CREATE }));
}
