//! User documents and the payloads that create or change them.

use super::fields::{define_bounded_text, define_link};
use super::object_id::define_object_id;
use super::{FieldValidationError, required};

define_object_id! {
    /// Identifier of a user document.
    UserId
}

define_bounded_text! {
    /// Display name of a user.
    UserName, "name", 2, 30
}

define_bounded_text! {
    /// Free-form description shown under the user's name.
    UserAbout, "about", 2, 200
}

define_link! {
    /// Link to the user's avatar image.
    AvatarUrl, "avatar"
}

/// Stored user.
///
/// ## Invariants
/// - `id` is assigned by storage and never changes.
/// - every field satisfies its schema constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: UserName,
    about: UserAbout,
    avatar: AvatarUrl,
}

impl User {
    /// Assemble a stored user from validated parts.
    pub fn new(id: UserId, profile: NewUser) -> Self {
        let NewUser {
            name,
            about,
            avatar,
        } = profile;
        Self {
            id,
            name,
            about,
            avatar,
        }
    }

    /// Storage-assigned identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Short description.
    pub fn about(&self) -> &UserAbout {
        &self.about
    }

    /// Avatar link.
    pub fn avatar(&self) -> &AvatarUrl {
        &self.avatar
    }

    /// Apply a profile patch, keeping fields it does not mention.
    pub fn apply_profile(&mut self, patch: &ProfilePatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(about) = &patch.about {
            self.about = about.clone();
        }
    }

    /// Replace the avatar.
    pub fn set_avatar(&mut self, avatar: AvatarUrl) {
        self.avatar = avatar;
    }
}

/// Validated fields of a user that storage has not yet assigned an id to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name.
    pub name: UserName,
    /// Short description.
    pub about: UserAbout,
    /// Avatar link.
    pub avatar: AvatarUrl,
}

impl NewUser {
    /// Validate raw payload fields; all three are required.
    ///
    /// # Examples
    /// ```
    /// use mesto::domain::NewUser;
    ///
    /// let user = NewUser::try_from_parts(
    ///     Some("Alice".to_owned()),
    ///     Some("Engineer".to_owned()),
    ///     Some("http://x/a.png".to_owned()),
    /// )
    /// .expect("valid user");
    /// assert_eq!(user.name.as_ref(), "Alice");
    /// ```
    pub fn try_from_parts(
        name: Option<String>,
        about: Option<String>,
        avatar: Option<String>,
    ) -> Result<Self, FieldValidationError> {
        Ok(Self {
            name: UserName::new(required(name, "name")?)?,
            about: UserAbout::new(required(about, "about")?)?,
            avatar: AvatarUrl::new(required(avatar, "avatar")?)?,
        })
    }
}

/// Partial update of a user's profile. Absent fields stay untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    /// Replacement display name.
    pub name: Option<UserName>,
    /// Replacement description.
    pub about: Option<UserAbout>,
}

impl ProfilePatch {
    /// Validate whichever raw fields were supplied.
    pub fn try_from_parts(
        name: Option<String>,
        about: Option<String>,
    ) -> Result<Self, FieldValidationError> {
        Ok(Self {
            name: name.map(UserName::new).transpose()?,
            about: about.map(UserAbout::new).transpose()?,
        })
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.about.is_none()
    }
}
