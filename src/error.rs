//! Error types.
//!
//! Two distinct classes: [`ConfigError`] is fatal and can only surface while
//! constructing an authenticator; [`ParseError`] covers malformed protocol
//! input and is always folded into a re-challenge outcome, never returned to
//! the HTTP client as anything other than a 401.

use thiserror::Error;

/// Fatal misconfiguration, checked once at construction.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("identity lookup is not configured")]
    MissingIdentityLookup,

    #[error("server secret is not configured or empty")]
    MissingSecret,

    #[error("unsupported hash algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// Recoverable failure while parsing protocol input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("authorization scheme is not Digest")]
    NotDigest,

    #[error("expected 5 to 10 credential fields, got {0}")]
    FieldCount(usize),

    #[error("no core credential field present")]
    MissingCoreFields,

    #[error("username contains a colon")]
    UsernameColon,

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("unknown qop value: {0}")]
    BadQop(String),
}
