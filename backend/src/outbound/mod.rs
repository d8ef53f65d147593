//! Outbound adapters implementing domain ports for external systems.
//!
//! - **platform**: `reqwest` client for the platform admin API, implementing
//!   the user repository and procedure ports.
//! - **operators**: operator accounts loaded from a JSON file, implementing
//!   the login port.
//!
//! Adapters are thin translators between domain types and wire formats. They
//! contain no moderation logic.

pub mod operators;
pub mod platform;
