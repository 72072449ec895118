//! Server-side HTTP Digest Access Authentication (RFC 2617/7616 flavor).
//!
//! This crate challenges unauthenticated requests with a cryptographically
//! bound nonce and validates the credentials a client supplies on retry. The
//! server never stores plaintext passwords at rest: the identity lookup may
//! return either a password or a pre-hashed HA1, and the expected response
//! digest is recomputed per request. Stale nonces are re-challenged with
//! `stale="TRUE"`, nonce-count replays are rejected, and a background task
//! sweeps the nonce table.
//!
//! # Examples
//!
//! ```
//! use digest_gate::{
//!     AuthUser, AuthenticationGateway, DigestAuthenticator, DigestOptions, GatewayOutcome,
//! };
//!
//! let options = DigestOptions {
//!     realm: "api@example.org".to_string(),
//!     algorithm: "SHA-256".to_string(),
//!     ..DigestOptions::default()
//! };
//!
//! let authenticator = DigestAuthenticator::builder(options)
//!     .secret(b"change-me".to_vec())
//!     .identity_lookup(|username: &str| {
//!         // look the user up in your store; return HA1 rather than a
//!         // plaintext password where possible
//!         (username == "Mufasa").then(|| AuthUser::with_password("Mufasa", "Circle of Life"))
//!     })
//!     .build()
//!     .unwrap();
//!
//! let gateway = AuthenticationGateway::new(authenticator);
//!
//! // a request without credentials gets a 401 + WWW-Authenticate challenge
//! let request = http::Request::builder()
//!     .method("GET")
//!     .uri("/dir/index.html")
//!     .body(Vec::new())
//!     .unwrap();
//!
//! match gateway.handle(&request) {
//!     GatewayOutcome::Deny(response) => {
//!         assert_eq!(response.status(), http::StatusCode::UNAUTHORIZED);
//!         assert!(response.headers().contains_key(http::header::WWW_AUTHENTICATE));
//!     }
//!     GatewayOutcome::Forward(identity) => {
//!         // attach to the request context and continue the pipeline, e.g.
//!         // request.extensions_mut().insert(identity);
//!         unreachable!("no credentials were sent: {identity:?}");
//!     }
//! }
//! ```
//!
//! The nonce sweeper is started once per process, typically right after the
//! authenticator is built:
//!
//! ```no_run
//! # use digest_gate::{DigestAuthenticator, DigestOptions, AuthUser};
//! # use std::sync::Arc;
//! use digest_gate::nonce::{
//!     DEFAULT_STALE_WINDOW, DEFAULT_SWEEP_FIRST_RUN, DEFAULT_SWEEP_INTERVAL,
//! };
//! # let authenticator = DigestAuthenticator::builder(DigestOptions::default())
//! #     .secret(b"change-me".to_vec())
//! #     .identity_lookup(|_: &str| None::<AuthUser>)
//! #     .build()
//! #     .unwrap();
//! authenticator.nonce_tracker().spawn_sweeper(
//!     DEFAULT_SWEEP_FIRST_RUN,
//!     DEFAULT_SWEEP_INTERVAL,
//!     DEFAULT_STALE_WINDOW,
//! );
//! ```

mod authenticator;
mod credentials;
mod enums;
mod error;
mod gateway;
pub mod nonce;
mod utils;

pub use crate::authenticator::{
    AuthRequest, AuthSecret, AuthUser, AuthenticationOutcome, DigestAuthenticator,
    DigestAuthenticatorBuilder, DigestOptions, Identity, IdentityLookup, NO_ENTITY_TAG,
};
pub use crate::credentials::{Challenge, Credentials, QOP_OPTIONS};
pub use crate::enums::{Algorithm, AlgorithmType, Qop};
pub use crate::error::{ConfigError, ParseError};
pub use crate::gateway::{AuthenticationGateway, GatewayOutcome};
pub use crate::nonce::{NonceOutcome, NonceTracker};

/// Parse an Authorization header value.
/// Convenience wrapper around [`Credentials::parse()`].
pub fn parse(authorization: &str) -> Result<Credentials, ParseError> {
    Credentials::parse(authorization)
}
