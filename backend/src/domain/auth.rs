//! Operator authentication primitives and the authorised-user view model.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port. The
//! authorised user is recomputed on every request from the configured
//! [`AuthMode`] and whatever profile the session currently holds.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Display name used when authentication is disabled.
pub const INSTANCE_OWNER_NAME: &str = "Instance Owner";
/// Email used when authentication is disabled.
pub const INSTANCE_OWNER_EMAIL: &str = "owner@example.com";
/// Placeholder name while a session has no resolved operator.
pub const PENDING_USER_NAME: &str = "Fetching user...";
/// Placeholder email while a session has no resolved operator.
pub const PENDING_USER_EMAIL: &str = "first.last@example.com";

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated operator credentials.
///
/// ## Invariants
/// - `email` is trimmed, lower-cased and must not be empty.
/// - `password` must be non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use admin_panel::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Mod@Stoat.chat ", "hunter2").unwrap();
/// assert_eq!(creds.email(), "mod@stoat.chat");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_lowercase(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validation errors for [`OperatorProfile::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperatorProfileValidationError {
    #[error("operator email must not be empty")]
    EmptyEmail,
}

/// Operator details persisted in the session after login.
///
/// Every field is optional because the profile is read back from a cookie
/// that older deployments may have written with fewer fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl OperatorProfile {
    /// Profile for a known operator email.
    pub fn new(email: impl Into<String>) -> Result<Self, OperatorProfileValidationError> {
        let email = email.into();
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(OperatorProfileValidationError::EmptyEmail);
        }
        Ok(Self {
            name: None,
            email: Some(trimmed.to_lowercase()),
            image: None,
        })
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.trim().is_empty())
    }
}

/// How operators are authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// No login; every request acts as the instance owner.
    NoAuth,
    /// Operators log in and are tracked through the session cookie.
    Session,
}

impl AuthMode {
    /// Interpret the configured auth type.
    ///
    /// Only the exact value `none` disables authentication; anything else,
    /// including an unset value, keeps sessions on.
    pub fn from_setting(auth_type: Option<&str>) -> Self {
        match auth_type {
            Some("none") => Self::NoAuth,
            _ => Self::Session,
        }
    }
}

/// Operator identity shown in the panel chrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorisedUser {
    pub name: String,
    pub email: String,
    pub image: String,
    pub using_session_auth: bool,
}

impl AuthorisedUser {
    /// Whether this value stands for a real operator rather than the
    /// pending-session placeholder.
    pub fn is_resolved(&self) -> bool {
        !(self.using_session_auth && self.name == PENDING_USER_NAME && self.email == PENDING_USER_EMAIL)
    }
}

/// Default avatar URL served by the platform API.
///
/// The email is accepted for parity with per-user avatars but currently
/// ignored: the platform serves one generic default.
pub fn default_avatar_url(api_url: Option<&str>, _email: &str) -> String {
    let api_url = api_url.unwrap_or_default();
    format!("{api_url}/users/0/default_avatar")
}

/// Resolve the authorised user for the current request.
///
/// Returns `None` only when `allow_null` is set, sessions are enabled and the
/// session holds no operator email. Without `allow_null` a placeholder is
/// returned instead so page chrome can still render.
///
/// # Examples
/// ```
/// use admin_panel::domain::{AuthMode, authorised_user};
///
/// let owner = authorised_user(AuthMode::NoAuth, None, Some("https://api.stoat.chat"), false)
///     .unwrap();
/// assert_eq!(owner.name, "Instance Owner");
/// assert_eq!(owner.image, "https://api.stoat.chat/users/0/default_avatar");
/// ```
pub fn authorised_user(
    mode: AuthMode,
    session: Option<&OperatorProfile>,
    api_url: Option<&str>,
    allow_null: bool,
) -> Option<AuthorisedUser> {
    match mode {
        AuthMode::NoAuth => Some(AuthorisedUser {
            name: INSTANCE_OWNER_NAME.to_owned(),
            email: INSTANCE_OWNER_EMAIL.to_owned(),
            image: default_avatar_url(api_url, ""),
            using_session_auth: false,
        }),
        AuthMode::Session => {
            let Some((profile, email)) =
                session.and_then(|profile| profile.email().map(|email| (profile, email)))
            else {
                if allow_null {
                    return None;
                }
                return Some(AuthorisedUser {
                    name: PENDING_USER_NAME.to_owned(),
                    email: PENDING_USER_EMAIL.to_owned(),
                    image: default_avatar_url(api_url, ""),
                    using_session_auth: true,
                });
            };

            Some(AuthorisedUser {
                name: profile.name.clone().unwrap_or_else(|| email.to_owned()),
                email: email.to_owned(),
                image: profile
                    .image
                    .clone()
                    .unwrap_or_else(|| default_avatar_url(api_url, email)),
                using_session_auth: true,
            })
        }
    }
}
