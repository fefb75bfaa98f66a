//! Authentication module
//!
//! Supplies the bearer token sent with every API request.
//!
//! The `AccessTokenProvider` trait is the seam: a literal token and an
//! environment variable lookup are provided here.

mod provider;

pub use provider::{apply_bearer, provider_from_config, AccessTokenProvider, EnvToken, StaticToken};
