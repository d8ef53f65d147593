//! Wire payloads exchanged with the platform admin API.

use serde::{Deserialize, Serialize};

use crate::domain::PlatformUser;

/// Body of `POST /users/{id}/suspend`.
#[derive(Debug, Serialize)]
pub(super) struct SuspendUserRequestDto<'a> {
    pub user: &'a PlatformUser,
    /// Days; zero is indefinite.
    pub duration: u32,
    /// `|`-joined reasons.
    pub reason: &'a str,
}

/// Error envelope the platform returns alongside failure statuses,
/// e.g. `{"type":"NotFound","location":"..."}`.
#[derive(Debug, Deserialize)]
pub(super) struct PlatformErrorDto {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Extract a short description from a failure body.
pub(super) fn describe_failure(body: &[u8]) -> String {
    const MAX_BODY_CHARS: usize = 200;

    if let Ok(envelope) = serde_json::from_slice::<PlatformErrorDto>(body) {
        return envelope.kind;
    }
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "empty response body".to_owned();
    }
    trimmed.chars().take(MAX_BODY_CHARS).collect()
}
