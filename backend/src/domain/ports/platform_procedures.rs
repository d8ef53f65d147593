//! Driven port for platform procedures.
//!
//! Procedures are the platform's own moderation operations. The panel
//! fetches a user handle and passes it back unchanged; it never interprets
//! the suspension itself.

use async_trait::async_trait;
use tracing::info;

use crate::domain::{PlatformUser, PlatformUserId, SuspensionDuration};

use super::{PlatformApiError, fixture_platform_user};

/// Moderation procedures exposed by the platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlatformProcedures: Send + Sync {
    /// Fetch the user handle that other procedures expect.
    async fn fetch_user(&self, id: &PlatformUserId)
    -> Result<Option<PlatformUser>, PlatformApiError>;

    /// Suspend `user` for `duration`. `reason` is the `|`-joined reason list.
    async fn suspend_user(
        &self,
        user: &PlatformUser,
        duration: SuspensionDuration,
        reason: &str,
    ) -> Result<(), PlatformApiError>;
}

/// Fixture procedures backed by [`fixture_platform_user`].
///
/// Suspensions are accepted and logged but not stored anywhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePlatformProcedures;

#[async_trait]
impl PlatformProcedures for FixturePlatformProcedures {
    async fn fetch_user(
        &self,
        id: &PlatformUserId,
    ) -> Result<Option<PlatformUser>, PlatformApiError> {
        Ok(fixture_platform_user(id))
    }

    async fn suspend_user(
        &self,
        user: &PlatformUser,
        duration: SuspensionDuration,
        reason: &str,
    ) -> Result<(), PlatformApiError> {
        info!(user_id = %user.id(), %duration, reason, "fixture suspension accepted");
        Ok(())
    }
}
