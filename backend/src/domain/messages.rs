//! Localised client-facing messages.
//!
//! Every text a client can observe lives here so adapters and services agree
//! on wording. Texts are Russian, matching the product's audience.

/// Unmatched route.
pub const RESOURCE_NOT_FOUND: &str = "Ресурс не найден";
/// Redacted text for every internal failure.
pub const SERVER_ERROR: &str = "На сервере произошла ошибка";
/// Request body is not valid JSON for the endpoint.
pub const MALFORMED_BODY: &str = "Переданы некорректные данные";

/// User identifier in the path or caller identity is missing or malformed.
pub const INVALID_USER_ID: &str = "Передан некорректный _id пользователя";
/// No user matches a well-formed identifier.
pub const USER_NOT_FOUND: &str = "Пользователь с указанным _id не найден";
/// User creation payload violates the schema. Shares its wording with the
/// profile update message.
pub const INVALID_USER_CREATE: &str = "Переданы некорректные данные при обновлении профиля";
/// Profile update payload violates the schema.
pub const INVALID_PROFILE_UPDATE: &str = "Переданы некорректные данные при обновлении профиля";
/// Avatar update payload violates the schema.
pub const INVALID_AVATAR_UPDATE: &str = "Переданы некорректные данные при обновлении аватара";

/// Card operations that need a caller ran without one.
pub const MISSING_CALLER: &str = "Отсутствует идентификатор пользователя";
/// Card creation payload violates the schema.
pub const INVALID_CARD_CREATE: &str = "Переданы некорректные данные при создании карточки";
/// Card identifier for deletion is malformed.
pub const INVALID_CARD_ID: &str = "Передан некорректный _id карточки";
/// No card matches the identifier given for deletion.
pub const CARD_NOT_FOUND: &str = "Карточка с указанным _id не найдена";
/// Card identifier for a like is malformed.
pub const INVALID_LIKE: &str = "Переданы некорректные данные для постановки лайка";
/// Card identifier for removing a like is malformed.
pub const INVALID_DISLIKE: &str = "Переданы некорректные данные для снятия лайка";
/// No card matches the identifier given for a like change.
pub const UNKNOWN_CARD: &str = "Передан несуществующий _id карточки";
