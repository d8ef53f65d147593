//! Suspension command values.
//!
//! The platform owns suspension semantics; the panel only packages the
//! operator's intent in the shape the platform procedure expects.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::PlatformUserId;

/// Separator used when handing reasons to the platform procedure.
pub const REASON_SEPARATOR: &str = "|";

/// Suspension length in days. Zero means the suspension never lapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuspensionDuration(u32);

impl SuspensionDuration {
    /// Suspension that never lapses.
    pub const INDEFINITE: Self = Self(0);

    pub fn days(days: u32) -> Self {
        Self(days)
    }

    /// Raw day count as sent to the platform.
    pub fn as_days(self) -> u32 {
        self.0
    }

    pub fn is_indefinite(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for SuspensionDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_indefinite() {
            f.write_str("indefinite")
        } else {
            write!(f, "{} days", self.0)
        }
    }
}

/// Ordered reasons attached to a suspension.
///
/// Reasons are forwarded verbatim; the panel does not validate their
/// content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuspensionReasons(Vec<String>);

impl SuspensionReasons {
    pub fn new(reasons: Vec<String>) -> Self {
        Self(reasons)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Single string form accepted by the platform procedure.
    ///
    /// # Examples
    /// ```
    /// use admin_panel::domain::SuspensionReasons;
    ///
    /// let reasons = SuspensionReasons::new(vec!["spam".into(), "harassment".into()]);
    /// assert_eq!(reasons.joined(), "spam|harassment");
    /// ```
    pub fn joined(&self) -> String {
        self.0.join(REASON_SEPARATOR)
    }
}

impl From<Vec<String>> for SuspensionReasons {
    fn from(value: Vec<String>) -> Self {
        Self::new(value)
    }
}

/// Request to suspend one platform user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuspensionRequest {
    pub user_id: PlatformUserId,
    pub duration: SuspensionDuration,
    pub reasons: SuspensionReasons,
}
