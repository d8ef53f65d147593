//! Platform admin API adapter.

mod dto;
mod http_client;

pub use http_client::{PlatformClientError, PlatformHttpClient, PlatformHttpIdentity};
