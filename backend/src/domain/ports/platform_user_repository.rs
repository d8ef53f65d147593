//! Driven port for reading platform user records.
//!
//! This is the read-only projection of the platform's user collection. It
//! answers "does this user exist and what does it look like"; mutations go
//! through [`super::PlatformProcedures`].

use async_trait::async_trait;

use crate::domain::{PlatformUser, PlatformUserId, Relationship, RelationshipStatus};

use super::PlatformApiError;

/// Read access to platform users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlatformUserRepository: Send + Sync {
    /// Fetch a user by identifier. `Ok(None)` means the user does not exist.
    async fn find_by_id(&self, id: &PlatformUserId)
    -> Result<Option<PlatformUser>, PlatformApiError>;
}

/// Identifier of the single user known to the fixture adapters.
pub const FIXTURE_PLATFORM_USER_ID: &str = "01FD58YK5W7QRV5H3D64KTQYX3";

/// The fixture user record, if `id` is [`FIXTURE_PLATFORM_USER_ID`].
pub fn fixture_platform_user(id: &PlatformUserId) -> Option<PlatformUser> {
    (id.as_ref() == FIXTURE_PLATFORM_USER_ID).then(|| fixture_record(id.clone()))
}

fn fixture_record(id: PlatformUserId) -> PlatformUser {
    PlatformUser::new(id, "fixture")
        .with_discriminator("0001")
        .with_display_name("Fixture User")
        .with_relations(vec![
            Relationship {
                user_id: "01FD58YK5W7QRV5H3D64KTQYX4".to_owned(),
                status: RelationshipStatus::Friend,
            },
            Relationship {
                user_id: "01FD58YK5W7QRV5H3D64KTQYX5".to_owned(),
                status: RelationshipStatus::Blocked,
            },
        ])
}

/// Fixture repository used when no platform admin API is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePlatformUserRepository;

#[async_trait]
impl PlatformUserRepository for FixturePlatformUserRepository {
    async fn find_by_id(
        &self,
        id: &PlatformUserId,
    ) -> Result<Option<PlatformUser>, PlatformApiError> {
        Ok(fixture_platform_user(id))
    }
}
