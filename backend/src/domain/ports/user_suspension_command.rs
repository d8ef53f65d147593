//! Driving port for suspensions.

use async_trait::async_trait;

use crate::domain::{Error, SuspensionRequest};

/// Domain use-case port for suspending a platform user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserSuspensionCommand: Send + Sync {
    /// Forward the suspension to the platform.
    ///
    /// Fails with `not_found` when the user does not exist.
    async fn suspend_user(&self, request: SuspensionRequest) -> Result<(), Error>;
}
