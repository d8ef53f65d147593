//! User moderation domain service.
//!
//! Implements the driving ports for user lookup and suspension on top of the
//! platform's driven ports. Both operations are single pass-through calls:
//! no retries, no compensation and no idempotency tracking.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    PlatformApiError, PlatformProcedures, PlatformUserRepository, UserLookupQuery,
    UserSuspensionCommand,
};
use crate::domain::{Error, PlatformUser, PlatformUserId, SuspensionRequest};

/// Moderation service bridging inbound handlers and the platform.
#[derive(Clone)]
pub struct UserModerationService<R, P> {
    users: Arc<R>,
    procedures: Arc<P>,
}

impl<R, P> UserModerationService<R, P> {
    /// Create a new service over the given platform adapters.
    pub fn new(users: Arc<R>, procedures: Arc<P>) -> Self {
        Self { users, procedures }
    }
}

fn map_platform_error(error: PlatformApiError) -> Error {
    match error {
        PlatformApiError::Connection { message } => {
            Error::service_unavailable(format!("platform unavailable: {message}"))
        }
        PlatformApiError::Rejected { status, message } => {
            Error::internal(format!("platform rejected request ({status}): {message}"))
        }
        PlatformApiError::Decode { message } => {
            Error::internal(format!("platform response unreadable: {message}"))
        }
    }
}

#[async_trait]
impl<R, P> UserLookupQuery for UserModerationService<R, P>
where
    R: PlatformUserRepository,
    P: PlatformProcedures,
{
    async fn fetch_user_by_id(&self, id: &PlatformUserId) -> Result<Option<PlatformUser>, Error> {
        self.users.find_by_id(id).await.map_err(|error| {
            warn!(user_id = %id, transport = error.is_transport(), %error, "user lookup failed");
            map_platform_error(error)
        })
    }
}

#[async_trait]
impl<R, P> UserSuspensionCommand for UserModerationService<R, P>
where
    R: PlatformUserRepository,
    P: PlatformProcedures,
{
    async fn suspend_user(&self, request: SuspensionRequest) -> Result<(), Error> {
        let SuspensionRequest {
            user_id,
            duration,
            reasons,
        } = request;

        let user = self
            .procedures
            .fetch_user(&user_id)
            .await
            .map_err(map_platform_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))?;

        let reason = reasons.joined();
        self.procedures
            .suspend_user(&user, duration, &reason)
            .await
            .map_err(|error| {
                warn!(
                    user_id = %user_id,
                    transport = error.is_transport(),
                    %error,
                    "suspension procedure failed"
                );
                map_platform_error(error)
            })?;

        info!(user_id = %user_id, %duration, reasons = reasons.as_slice().len(), "user suspended");
        Ok(())
    }
}

#[cfg(test)]
#[path = "moderation_service_tests.rs"]
mod tests;
