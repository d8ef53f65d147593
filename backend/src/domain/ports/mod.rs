//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`LoginService`, `UserLookupQuery`,
//! `UserSuspensionCommand`) are called by inbound adapters. Driven ports
//! (`PlatformUserRepository`, `PlatformProcedures`) are implemented by
//! outbound adapters that talk to the chat platform.

mod login_service;
mod platform_api_error;
mod platform_procedures;
mod platform_user_repository;
mod user_lookup_query;
mod user_suspension_command;

#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use platform_procedures::MockPlatformProcedures;
pub use platform_procedures::{FixturePlatformProcedures, PlatformProcedures};
#[cfg(test)]
pub use platform_user_repository::MockPlatformUserRepository;
pub use platform_api_error::PlatformApiError;
pub use platform_user_repository::{
    FIXTURE_PLATFORM_USER_ID, FixturePlatformUserRepository, PlatformUserRepository,
    fixture_platform_user,
};
#[cfg(test)]
pub use user_lookup_query::MockUserLookupQuery;
pub use user_lookup_query::UserLookupQuery;
#[cfg(test)]
pub use user_suspension_command::MockUserSuspensionCommand;
pub use user_suspension_command::UserSuspensionCommand;
