//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers only persist, read or clear
//! the logged-in operator's profile.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, OperatorProfile};

pub(crate) const OPERATOR_KEY: &str = "operator";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the operator profile and rotate the session id.
    pub fn persist_operator(&self, profile: &OperatorProfile) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(OPERATOR_KEY, profile)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The operator profile held by the session, if any.
    ///
    /// A cookie that no longer decodes is treated as logged out.
    pub fn operator(&self) -> Option<OperatorProfile> {
        match self.0.get::<OperatorProfile>(OPERATOR_KEY) {
            Ok(profile) => profile,
            Err(error) => {
                warn!(%error, "discarding unreadable operator session");
                None
            }
        }
    }

    /// Drop every session value.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
