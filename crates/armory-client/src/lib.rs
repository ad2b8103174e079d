//! Authenticated HTTP access to the Blizzard API
//!
//! This crate covers the generic half of the external-data access layer:
//! OAuth2 client-credentials token management, and a GET gateway that
//! consults a response cache, applies the bearer token and default locale,
//! and retries transient upstream failures with a bounded backoff policy.
//! Endpoint knowledge lives one level up, in `armory-profile`.

pub mod config;
pub mod error;
pub mod gateway;
pub mod region;
pub mod retry;
pub mod token;

pub use config::ApiConfig;
pub use error::{Error, Result};
pub use gateway::{HttpGateway, Payload};
pub use region::Region;
pub use retry::{Backoff, RetryPolicy};
pub use token::{BearerToken, TokenManager};
