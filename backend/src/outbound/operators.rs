//! Operator accounts loaded from a JSON file.
//!
//! The file lists who may log into the panel:
//!
//! ```json
//! [
//!   {
//!     "email": "mod@stoat.chat",
//!     "name": "Moderator",
//!     "image": "https://cdn.stoat.chat/avatars/mod.png",
//!     "passwordHash": "$2b$12$..."
//!   }
//! ]
//! ```
//!
//! `passwordHash` is a salted bcrypt hash, for example the output of
//! `htpasswd -nbBC 12 "" <password>` without the leading colon.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::ports::LoginService;
use crate::domain::{Error, LoginCredentials, OperatorProfile};

/// Errors returned while loading the operator file.
#[derive(Debug, Error)]
pub enum OperatorFileError {
    /// The file could not be read.
    #[error("failed to read operators file at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON of the expected shape.
    #[error("invalid operators file at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// An entry has an unusable email or password hash.
    #[error("invalid operator entry {index} in {path}: {reason}")]
    InvalidEntry {
        path: PathBuf,
        index: usize,
        reason: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct OperatorEntryDto {
    email: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    image: Option<String>,
    password_hash: String,
}

#[derive(Debug, Clone)]
struct OperatorAccount {
    profile: OperatorProfile,
    email: String,
    password_hash: String,
}

/// Login service backed by a static operator list.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLoginService {
    operators: Vec<OperatorAccount>,
}

impl ConfiguredLoginService {
    /// Parse operators from JSON text. `origin` is only used in errors.
    pub fn from_json(contents: &str, origin: &Path) -> Result<Self, OperatorFileError> {
        let entries: Vec<OperatorEntryDto> =
            serde_json::from_str(contents).map_err(|source| OperatorFileError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;

        let operators = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                to_account(entry).map_err(|reason| OperatorFileError::InvalidEntry {
                    path: origin.to_path_buf(),
                    index,
                    reason,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if operators.is_empty() {
            warn!(path = %origin.display(), "operators file lists no operators; every login will fail");
        }
        Ok(Self { operators })
    }

    /// Load operators from `path`.
    pub fn load(path: &Path) -> Result<Self, OperatorFileError> {
        let read_error = |source| OperatorFileError::Read {
            path: path.to_path_buf(),
            source,
        };
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file_name = path.file_name().ok_or_else(|| {
            read_error(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "operators path must be a file",
            ))
        })?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
        let contents = dir.read_to_string(Path::new(file_name)).map_err(read_error)?;
        Self::from_json(&contents, path)
    }

    /// Number of configured operators.
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

fn to_account(entry: OperatorEntryDto) -> Result<OperatorAccount, String> {
    let OperatorEntryDto {
        email,
        name,
        image,
        password_hash,
    } = entry;

    let mut profile = OperatorProfile::new(email).map_err(|err| err.to_string())?;
    if let Some(name) = name {
        profile = profile.with_name(name);
    }
    if let Some(image) = image {
        profile = profile.with_image(image);
    }

    let password_hash = password_hash.trim().to_owned();
    password_hash
        .parse::<bcrypt::HashParts>()
        .map_err(|err| format!("passwordHash is not a bcrypt hash: {err}"))?;

    let email = profile.email.clone().unwrap_or_default();
    Ok(OperatorAccount {
        profile,
        email,
        password_hash,
    })
}

/// Check `password` against a bcrypt hash off the async executor.
async fn verify_password(password: String, hash: String) -> Result<bool, Error> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|err| Error::internal(format!("password check did not complete: {err}")))?
        .or_else(|err| {
            warn!(error = %err, "stored operator hash could not be checked");
            Ok(false)
        })
}

#[async_trait]
impl LoginService for ConfiguredLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<OperatorProfile, Error> {
        let Some(operator) = self
            .operators
            .iter()
            .find(|operator| operator.email == credentials.email())
        else {
            return Err(Error::unauthorized("invalid credentials"));
        };

        let password = credentials.password().to_owned();
        if verify_password(password, operator.password_hash.clone()).await? {
            debug!(email = %operator.email, "operator authenticated");
            Ok(operator.profile.clone())
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
