//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers every user and card endpoint
//! together with the response DTOs and the `{ "message" }` error body.
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::cards::{
    CardResponse, CardWithOwnerResponse, CreateCardBody,
};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::users::{
    CreateUserBody, UpdateAvatarBody, UpdateProfileBody, UserResponse,
};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mesto backend API",
        description = "Users and photo cards with likes.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::users::update_avatar,
        crate::inbound::http::cards::list_cards,
        crate::inbound::http::cards::create_card,
        crate::inbound::http::cards::delete_card,
        crate::inbound::http::cards::like_card,
        crate::inbound::http::cards::dislike_card,
    ),
    components(schemas(
        UserResponse,
        CreateUserBody,
        UpdateProfileBody,
        UpdateAvatarBody,
        CardResponse,
        CardWithOwnerResponse,
        CreateCardBody,
        ErrorBody,
    )),
    tags(
        (name = "users", description = "User profiles"),
        (name = "cards", description = "Photo cards and likes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("UserResponse", &["_id", "name", "about", "avatar"])]
    #[case("CardResponse", &["_id", "name", "link", "owner", "likes", "createdAt"])]
    #[case("CardWithOwnerResponse", &["_id", "owner", "createdAt"])]
    #[case("ErrorBody", &["message"])]
    fn schemas_use_wire_field_names(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");
        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }

    #[rstest]
    #[case("/users")]
    #[case("/users/{user_id}")]
    #[case("/users/me")]
    #[case("/users/me/avatar")]
    #[case("/cards")]
    #[case("/cards/{card_id}")]
    #[case("/cards/{card_id}/likes")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }
}
