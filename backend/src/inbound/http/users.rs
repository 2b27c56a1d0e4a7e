//! Users API handlers.
//!
//! ```text
//! GET   /users
//! GET   /users/{user_id}
//! POST  /users             {"name":"Alice","about":"Engineer","avatar":"https://..."}
//! PATCH /users/me          {"name":"Alicia"}
//! PATCH /users/me/avatar   {"avatar":"https://..."}
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateUserRequest, UpdateAvatarRequest, UpdateProfileRequest};
use crate::domain::{User, UserId, messages};
use crate::inbound::http::ApiResult;
use crate::inbound::http::caller::Caller;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::payload::JsonBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_id;

/// User document as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Document identifier.
    #[serde(rename = "_id")]
    #[schema(example = "683c2711f588f756a662f7e9")]
    pub id: String,
    /// Display name.
    #[schema(example = "Жак-Ив Кусто")]
    pub name: String,
    /// Short description.
    #[schema(example = "Исследователь океана")]
    pub about: String,
    /// Avatar link.
    #[schema(example = "https://pictures.s3.yandex.net/frontend-developer/common/ava.jpg")]
    pub avatar: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            about: user.about().to_string(),
            avatar: user.avatar().to_string(),
        }
    }
}

/// Request body for `POST /users`. Every field is required.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateUserBody {
    /// Display name, 2 to 30 characters.
    pub name: Option<String>,
    /// Short description, 2 to 200 characters.
    pub about: Option<String>,
    /// Absolute `http` or `https` avatar link.
    pub avatar: Option<String>,
}

/// Request body for `PATCH /users/me`. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateProfileBody {
    /// Replacement display name.
    pub name: Option<String>,
    /// Replacement description.
    pub about: Option<String>,
}

/// Request body for `PATCH /users/me/avatar`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateAvatarBody {
    /// Replacement avatar link.
    pub avatar: Option<String>,
}

/// List every user.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Fetch one user by identifier.
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(("user_id" = String, Path, description = "24-character hexadecimal user id")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 404, description = "Unknown user", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{user_id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id: UserId = parse_id(&path, messages::INVALID_USER_ID)?;
    let user = state.users_query.get_user(&user_id).await?;
    Ok(web::Json(user.into()))
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserBody,
    responses(
        (status = 201, description = "Created user", body = UserResponse),
        (status = 400, description = "Invalid payload", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: JsonBody<CreateUserBody>,
) -> ApiResult<HttpResponse> {
    let CreateUserBody {
        name,
        about,
        avatar,
    } = payload.into_inner();
    let user = state
        .users
        .create_user(CreateUserRequest {
            name,
            about,
            avatar,
        })
        .await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Update the caller's name and description.
#[utoipa::path(
    patch,
    path = "/users/me",
    request_body = UpdateProfileBody,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid caller or payload", body = ErrorBody),
        (status = 404, description = "Caller does not exist", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "updateProfile"
)]
#[patch("/users/me")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: JsonBody<UpdateProfileBody>,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = caller.require(messages::INVALID_USER_ID)?;
    let UpdateProfileBody { name, about } = payload.into_inner();
    let user = state
        .users
        .update_profile(UpdateProfileRequest {
            user_id,
            name,
            about,
        })
        .await?;
    Ok(web::Json(user.into()))
}

/// Replace the caller's avatar.
#[utoipa::path(
    patch,
    path = "/users/me/avatar",
    request_body = UpdateAvatarBody,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid caller or payload", body = ErrorBody),
        (status = 404, description = "Caller does not exist", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "updateAvatar"
)]
#[patch("/users/me/avatar")]
pub async fn update_avatar(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: JsonBody<UpdateAvatarBody>,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = caller.require(messages::INVALID_USER_ID)?;
    let user = state
        .users
        .update_avatar(UpdateAvatarRequest {
            user_id,
            avatar: payload.into_inner().avatar,
        })
        .await?;
    Ok(web::Json(user.into()))
}
