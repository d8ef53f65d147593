//! Platform user records as reported by the chat platform.
//!
//! The panel never creates or mutates these records itself. It reads them
//! through [`crate::domain::ports::PlatformUserRepository`] and hands them
//! back to platform procedures. Fields the panel does not interpret are kept
//! in an opaque map so the JSON round-trips without loss.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Validation errors returned by [`PlatformUserId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformUserValidationError {
    #[error("platform user id must not be empty")]
    EmptyId,
    #[error("platform user id must not contain whitespace")]
    WhitespaceInId,
}

/// Opaque platform identifier (a ULID on current deployments).
///
/// ## Invariants
/// - Non-empty.
/// - Contains no whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlatformUserId(String);

impl PlatformUserId {
    /// Validate and construct a [`PlatformUserId`].
    ///
    /// # Examples
    /// ```
    /// use admin_panel::domain::PlatformUserId;
    ///
    /// let id = PlatformUserId::new("01FD58YK5W7QRV5H3D64KTQYX3").unwrap();
    /// assert_eq!(id.as_ref(), "01FD58YK5W7QRV5H3D64KTQYX3");
    /// assert!(PlatformUserId::new(" ").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, PlatformUserValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(PlatformUserValidationError::EmptyId);
        }
        if id.chars().any(char::is_whitespace) {
            return Err(PlatformUserValidationError::WhitespaceInId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for PlatformUserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PlatformUserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PlatformUserId> for String {
    fn from(value: PlatformUserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for PlatformUserId {
    type Error = PlatformUserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Relationship state between two platform users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipStatus {
    None,
    User,
    Friend,
    Outgoing,
    Incoming,
    Blocked,
    BlockedOther,
    /// Any status this panel does not know about yet.
    #[serde(other)]
    Unknown,
}

/// One entry of a user's relationship list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(rename = "_id")]
    pub user_id: String,
    pub status: RelationshipStatus,
}

/// Platform user record.
///
/// `relations` is only present when the platform includes it; it can be
/// long, which is why [`PlatformUserInfo`] exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformUser {
    #[serde(rename = "_id")]
    id: PlatformUserId,
    username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    discriminator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    relations: Option<Vec<Relationship>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    flags: Option<u32>,
    #[serde(default)]
    privileged: bool,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl PlatformUser {
    /// Build a minimal record; mostly useful for fixtures.
    pub fn new(id: PlatformUserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            discriminator: None,
            display_name: None,
            relations: None,
            flags: None,
            privileged: false,
            extra: Map::new(),
        }
    }

    /// Attach a discriminator such as `"0001"`.
    #[must_use]
    pub fn with_discriminator(mut self, discriminator: impl Into<String>) -> Self {
        self.discriminator = Some(discriminator.into());
        self
    }

    /// Attach a display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Attach the relationship list.
    #[must_use]
    pub fn with_relations(mut self, relations: Vec<Relationship>) -> Self {
        self.relations = Some(relations);
        self
    }

    pub fn id(&self) -> &PlatformUserId {
        &self.id
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn discriminator(&self) -> Option<&str> {
        self.discriminator.as_deref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn relations(&self) -> Option<&[Relationship]> {
        self.relations.as_deref()
    }

    pub fn flags(&self) -> Option<u32> {
        self.flags
    }

    pub fn privileged(&self) -> bool {
        self.privileged
    }

    /// Number of relationships in the `Friend` state; zero when the platform
    /// omitted the list.
    pub fn friend_count(&self) -> usize {
        self.relations.as_ref().map_or(0, |relations| {
            relations
                .iter()
                .filter(|relation| relation.status == RelationshipStatus::Friend)
                .count()
        })
    }

    /// Produce the smaller payload used by the panel.
    ///
    /// # Examples
    /// ```
    /// use admin_panel::domain::{PlatformUser, PlatformUserId};
    ///
    /// let user = PlatformUser::new(PlatformUserId::new("01A").unwrap(), "alice");
    /// assert_eq!(user.into_info().relations.friends, 0);
    /// ```
    pub fn into_info(self) -> PlatformUserInfo {
        let friends = self.friend_count();
        let Self {
            id,
            username,
            discriminator,
            display_name,
            relations: _,
            flags,
            privileged,
            extra,
        } = self;
        PlatformUserInfo {
            id,
            username,
            discriminator,
            display_name,
            relations: FriendSummary { friends },
            flags,
            privileged,
            extra,
        }
    }
}

/// Relationship counts reported in place of the full relationship list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendSummary {
    pub friends: usize,
}

/// [`PlatformUser`] with `relations` collapsed to counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformUserInfo {
    #[serde(rename = "_id")]
    pub id: PlatformUserId,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub relations: FriendSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u32>,
    #[serde(default)]
    pub privileged: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The platform's own account, which the panel must never act upon.
///
/// Configured once at startup; without a configured id nothing is
/// restricted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestrictedAccount(Option<PlatformUserId>);

impl RestrictedAccount {
    pub fn new(account: Option<PlatformUserId>) -> Self {
        Self(account)
    }

    /// Whether `user_id` is the restricted platform account.
    pub fn is_restricted(&self, user_id: &PlatformUserId) -> bool {
        self.0.as_ref() == Some(user_id)
    }

    /// Convenience wrapper over [`RestrictedAccount::is_restricted`].
    pub fn is_restricted_user(&self, user: &PlatformUser) -> bool {
        self.is_restricted(user.id())
    }
}
