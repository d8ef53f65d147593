//! Driving port for operator login.
//!
//! Inbound adapters call this port to check credentials without knowing
//! where operators are configured, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, OperatorProfile};

/// Domain use-case port for operator authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the profile to keep in the session.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<OperatorProfile, Error>;
}

/// Development authenticator.
///
/// `admin@example.com` / `password` logs in as "Panel Admin". Only wired
/// when no operator list is configured in a debug build.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

pub(crate) const FIXTURE_OPERATOR_EMAIL: &str = "admin@example.com";
const FIXTURE_OPERATOR_PASSWORD: &str = "password";

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<OperatorProfile, Error> {
        if credentials.email() == FIXTURE_OPERATOR_EMAIL
            && credentials.password() == FIXTURE_OPERATOR_PASSWORD
        {
            OperatorProfile::new(FIXTURE_OPERATOR_EMAIL)
                .map(|profile| profile.with_name("Panel Admin"))
                .map_err(|err| Error::internal(format!("invalid fixture operator: {err}")))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
