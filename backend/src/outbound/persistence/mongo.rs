//! MongoDB document store.
//!
//! Stores users and cards in the `users` and `cards` collections using the
//! same `_id`/`createdAt` layout as the document schema exposed over HTTP.
//! Like changes use `$addToSet`/`$pull` so concurrent updates to one card are
//! applied atomically by the server.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId as BsonObjectId;
use mongodb::bson::{self, Document, doc};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::ports::{
    CardPersistenceError, CardRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AvatarUrl, Card, CardId, NewCard, NewUser, ObjectId, ProfilePatch, User, UserId,
};

const USERS: &str = "users";
const CARDS: &str = "cards";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id")]
    id: BsonObjectId,
    name: String,
    about: String,
    avatar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CardDocument {
    #[serde(rename = "_id")]
    id: BsonObjectId,
    name: String,
    link: String,
    owner: BsonObjectId,
    #[serde(default)]
    likes: Vec<BsonObjectId>,
    #[serde(rename = "createdAt")]
    created_at: bson::DateTime,
}

fn to_bson_id(id: &ObjectId) -> BsonObjectId {
    BsonObjectId::from_bytes(id.bytes())
}

fn from_bson_id(id: &BsonObjectId) -> ObjectId {
    ObjectId::from_bytes(id.bytes())
}

/// Stored documents are re-validated; a document written by another client
/// that breaks the schema surfaces as a query failure.
#[derive(Debug, thiserror::Error)]
#[error("stored {collection} document {id} is invalid: {reason}")]
struct CorruptDocument {
    collection: &'static str,
    id: BsonObjectId,
    reason: String,
}

impl UserDocument {
    fn from_domain(id: &UserId, user: &NewUser) -> Self {
        Self {
            id: to_bson_id(id.as_object_id()),
            name: user.name.to_string(),
            about: user.about.to_string(),
            avatar: user.avatar.to_string(),
        }
    }

    fn into_domain(self) -> Result<User, CorruptDocument> {
        let id = self.id;
        let profile =
            NewUser::try_from_parts(Some(self.name), Some(self.about), Some(self.avatar))
                .map_err(|err| CorruptDocument {
                    collection: USERS,
                    id,
                    reason: err.to_string(),
                })?;
        Ok(User::new(UserId::from(from_bson_id(&id)), profile))
    }
}

impl CardDocument {
    fn from_domain(id: &CardId, card: &NewCard, created_at: DateTime<Utc>) -> Self {
        Self {
            id: to_bson_id(id.as_object_id()),
            name: card.name.to_string(),
            link: card.link.to_string(),
            owner: to_bson_id(card.owner.as_object_id()),
            likes: Vec::new(),
            created_at: bson::DateTime::from_millis(created_at.timestamp_millis()),
        }
    }

    fn into_domain(self) -> Result<Card, CorruptDocument> {
        let id = self.id;
        let corrupt = |reason: String| CorruptDocument {
            collection: CARDS,
            id,
            reason,
        };
        let owner = UserId::from(from_bson_id(&self.owner));
        let draft = NewCard::try_from_parts(owner, Some(self.name), Some(self.link))
            .map_err(|err| corrupt(err.to_string()))?;
        let created_at = DateTime::<Utc>::from_timestamp_millis(self.created_at.timestamp_millis())
            .ok_or_else(|| corrupt("createdAt is out of range".to_owned()))?;
        let likes = self
            .likes
            .iter()
            .map(|fan| UserId::from(from_bson_id(fan)));
        Ok(Card::restore(
            CardId::from(from_bson_id(&id)),
            draft,
            likes,
            created_at,
        ))
    }
}

fn is_connection_failure(error: &MongoError) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_)
    )
}

fn user_error(error: MongoError) -> UserPersistenceError {
    if is_connection_failure(&error) {
        UserPersistenceError::connection(error.to_string())
    } else {
        UserPersistenceError::query(error.to_string())
    }
}

fn card_error(error: MongoError) -> CardPersistenceError {
    if is_connection_failure(&error) {
        CardPersistenceError::connection(error.to_string())
    } else {
        CardPersistenceError::query(error.to_string())
    }
}

fn by_id(id: &ObjectId) -> Document {
    doc! { "_id": to_bson_id(id) }
}

fn return_updated() -> FindOneAndUpdateOptions {
    FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build()
}

/// MongoDB-backed store for user and card documents.
#[derive(Debug, Clone)]
pub struct MongoDocumentStore {
    users: Collection<UserDocument>,
    cards: Collection<CardDocument>,
}

impl MongoDocumentStore {
    /// Connect to `uri`, verify the server answers, and bind `database`.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, MongoError> {
        let client = Client::with_uri_str(uri).await?;
        let database = client.database(database);
        database.run_command(doc! { "ping": 1 }, None).await?;
        info!(database = database.name(), "connected to MongoDB");
        Ok(Self::from_database(&database))
    }

    /// Bind the collections of an existing database handle.
    pub fn from_database(database: &Database) -> Self {
        Self {
            users: database.collection(USERS),
            cards: database.collection(CARDS),
        }
    }

    async fn update_user(
        &self,
        id: &UserId,
        set: Document,
    ) -> Result<Option<User>, UserPersistenceError> {
        let filter = by_id(id.as_object_id());
        let found = if set.is_empty() {
            self.users.find_one(filter, None).await
        } else {
            self.users
                .find_one_and_update(filter, doc! { "$set": set }, return_updated())
                .await
        }
        .map_err(user_error)?;
        found
            .map(|document| document.into_domain())
            .transpose()
            .map_err(|err| UserPersistenceError::query(err.to_string()))
    }

    async fn update_card(
        &self,
        id: &CardId,
        update: Document,
    ) -> Result<Option<Card>, CardPersistenceError> {
        self.cards
            .find_one_and_update(by_id(id.as_object_id()), update, return_updated())
            .await
            .map_err(card_error)?
            .map(CardDocument::into_domain)
            .transpose()
            .map_err(|err| CardPersistenceError::query(err.to_string()))
    }
}

#[async_trait]
impl UserRepository for MongoDocumentStore {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let documents: Vec<UserDocument> = self
            .users
            .find(None, None)
            .await
            .map_err(user_error)?
            .try_collect()
            .await
            .map_err(user_error)?;
        documents
            .into_iter()
            .map(UserDocument::into_domain)
            .collect::<Result<_, _>>()
            .map_err(|err| UserPersistenceError::query(err.to_string()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        self.users
            .find_one(by_id(id.as_object_id()), None)
            .await
            .map_err(user_error)?
            .map(UserDocument::into_domain)
            .transpose()
            .map_err(|err| UserPersistenceError::query(err.to_string()))
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        let wanted: Vec<BsonObjectId> = ids
            .iter()
            .map(|id| to_bson_id(id.as_object_id()))
            .collect();
        let documents: Vec<UserDocument> = self
            .users
            .find(doc! { "_id": { "$in": wanted } }, None)
            .await
            .map_err(user_error)?
            .try_collect()
            .await
            .map_err(user_error)?;
        documents
            .into_iter()
            .map(UserDocument::into_domain)
            .collect::<Result<_, _>>()
            .map_err(|err| UserPersistenceError::query(err.to_string()))
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let id = UserId::generate();
        self.users
            .insert_one(UserDocument::from_domain(&id, user), None)
            .await
            .map_err(user_error)?;
        Ok(User::new(id, user.clone()))
    }

    async fn update_profile(
        &self,
        id: &UserId,
        patch: &ProfilePatch,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut set = Document::new();
        if let Some(name) = &patch.name {
            set.insert("name", name.as_ref());
        }
        if let Some(about) = &patch.about {
            set.insert("about", about.as_ref());
        }
        self.update_user(id, set).await
    }

    async fn update_avatar(
        &self,
        id: &UserId,
        avatar: &AvatarUrl,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.update_user(id, doc! { "avatar": avatar.as_ref() })
            .await
    }
}

#[async_trait]
impl CardRepository for MongoDocumentStore {
    async fn list(&self) -> Result<Vec<Card>, CardPersistenceError> {
        let documents: Vec<CardDocument> = self
            .cards
            .find(None, None)
            .await
            .map_err(card_error)?
            .try_collect()
            .await
            .map_err(card_error)?;
        documents
            .into_iter()
            .map(CardDocument::into_domain)
            .collect::<Result<_, _>>()
            .map_err(|err| CardPersistenceError::query(err.to_string()))
    }

    async fn insert(&self, card: &NewCard) -> Result<Card, CardPersistenceError> {
        let id = CardId::generate();
        let created_at = Utc::now();
        let document = CardDocument::from_domain(&id, card, created_at);
        // Round-trip through the stored precision so the response matches
        // what later reads return.
        let stored = document.clone().into_domain();
        self.cards
            .insert_one(document, None)
            .await
            .map_err(card_error)?;
        stored.map_err(|err| CardPersistenceError::query(err.to_string()))
    }

    async fn delete(&self, id: &CardId) -> Result<Option<Card>, CardPersistenceError> {
        self.cards
            .find_one_and_delete(by_id(id.as_object_id()), None)
            .await
            .map_err(card_error)?
            .map(CardDocument::into_domain)
            .transpose()
            .map_err(|err| CardPersistenceError::query(err.to_string()))
    }

    async fn add_like(
        &self,
        id: &CardId,
        user: &UserId,
    ) -> Result<Option<Card>, CardPersistenceError> {
        let fan = to_bson_id(user.as_object_id());
        self.update_card(id, doc! { "$addToSet": { "likes": fan } })
            .await
    }

    async fn remove_like(
        &self,
        id: &CardId,
        user: &UserId,
    ) -> Result<Option<Card>, CardPersistenceError> {
        let fan = to_bson_id(user.as_object_id());
        self.update_card(id, doc! { "$pull": { "likes": fan } })
            .await
    }
}

#[cfg(test)]
mod tests {
    //! Document mapping coverage; queries need a live server and are not
    //! exercised here.

    use rstest::rstest;

    use super::*;

    fn draft_card(owner: UserId) -> NewCard {
        NewCard::try_from_parts(
            owner,
            Some("Sunset".to_owned()),
            Some("http://x/s.png".to_owned()),
        )
        .expect("fixture card is valid")
    }

    #[rstest]
    fn identifiers_keep_their_bytes() {
        let id = ObjectId::generate();
        assert_eq!(from_bson_id(&to_bson_id(&id)), id);
        assert_eq!(to_bson_id(&id).to_hex(), id.to_string());
    }

    #[rstest]
    fn user_documents_map_back_to_users() {
        let id = UserId::generate();
        let profile = NewUser::try_from_parts(
            Some("Alice".to_owned()),
            Some("Engineer".to_owned()),
            Some("http://x/a.png".to_owned()),
        )
        .expect("fixture profile is valid");

        let user = UserDocument::from_domain(&id, &profile)
            .into_domain()
            .expect("valid document");
        assert_eq!(user, User::new(id, profile));
    }

    #[rstest]
    fn card_documents_use_wire_field_names() {
        let card = CardDocument::from_domain(
            &CardId::generate(),
            &draft_card(UserId::generate()),
            Utc::now(),
        );
        let document = bson::to_document(&card).expect("serialises");

        assert!(document.contains_key("_id"));
        assert!(document.contains_key("createdAt"));
        assert!(document.get_array("likes").expect("likes array").is_empty());
    }

    #[rstest]
    fn card_documents_restore_likes() {
        let owner = UserId::generate();
        let fan = UserId::generate();
        let mut document =
            CardDocument::from_domain(&CardId::generate(), &draft_card(owner), Utc::now());
        document.likes = vec![
            to_bson_id(fan.as_object_id()),
            to_bson_id(fan.as_object_id()),
        ];

        let card = document.into_domain().expect("valid document");
        assert_eq!(*card.owner(), owner);
        assert_eq!(card.likes().len(), 1);
        assert!(card.likes().contains(&fan));
    }

    #[rstest]
    fn corrupt_documents_are_reported() {
        let document = UserDocument {
            id: BsonObjectId::new(),
            name: "A".to_owned(),
            about: "Engineer".to_owned(),
            avatar: "http://x/a.png".to_owned(),
        };

        let err = document.into_domain().expect_err("name too short");
        assert!(err.to_string().contains("users document"));
    }
}
