//! Driving port for user lookups.
//!
//! HTTP handlers use this port to read platform users without importing
//! outbound adapters. [`crate::domain::UserModerationService`] is the
//! production implementation.

use async_trait::async_trait;

use crate::domain::{Error, PlatformUser, PlatformUserId};

/// Domain use-case port for fetching one platform user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserLookupQuery: Send + Sync {
    /// Fetch a user by id; `Ok(None)` when the platform has no such user.
    async fn fetch_user_by_id(&self, id: &PlatformUserId) -> Result<Option<PlatformUser>, Error>;
}
