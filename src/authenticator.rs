//! The per-request protocol state machine.
//!
//! [`DigestAuthenticator`] drives one authentication evaluation per inbound
//! request: parse the Authorization header, check nonce freshness and replay,
//! recompute the expected response digest, and compare it in constant time.
//! Every per-request failure folds into an [`AuthenticationOutcome`] carrying
//! a new challenge; only misconfiguration surfaces as an error, and only at
//! construction.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::credentials::{Challenge, Credentials};
use crate::enums::{Algorithm, Qop};
use crate::error::ConfigError;
use crate::nonce::{NonceOutcome, NonceTracker};
use crate::utils::constant_time_eq;

/// Nonce binding used when the caller has no entity tag for the response.
pub const NO_ENTITY_TAG: &str = "no-entity-tag";

fn default_realm() -> String {
    "restricted".to_string()
}

fn default_algorithm() -> String {
    "MD5".to_string()
}

fn default_nonce_ttl() -> u64 {
    30
}

fn default_unauthorized_body() -> String {
    "401 Unauthorized".to_string()
}

/// Plain-data configuration for a [`DigestAuthenticator`].
///
/// The algorithm is kept as its header name here and resolved once at build
/// time, so a typo fails startup instead of every request.
#[derive(Debug, Clone, Deserialize)]
pub struct DigestOptions {
    #[serde(default = "default_realm")]
    pub realm: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_nonce_ttl")]
    pub nonce_ttl_seconds: u64,
    /// Fixed opaque value; a random one is generated per instance when unset.
    #[serde(default)]
    pub opaque: Option<String>,
    #[serde(default = "default_unauthorized_body")]
    pub unauthorized_body: String,
}

impl Default for DigestOptions {
    fn default() -> Self {
        Self {
            realm: default_realm(),
            algorithm: default_algorithm(),
            nonce_ttl_seconds: default_nonce_ttl(),
            opaque: None,
            unauthorized_body: default_unauthorized_body(),
        }
    }
}

/// Authenticated principal attached to the request on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
}

/// Secret material for a user, as stored by the integration.
///
/// Deployments should store the pre-hashed `Ha1` form; `Password` exists for
/// integrations that cannot avoid plaintext at the lookup boundary. The
/// authenticator never retains either past the request.
#[derive(Debug, Clone)]
pub enum AuthSecret {
    Password(String),
    Ha1(String),
}

/// Lookup result: the principal plus its secret material.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub identity: Identity,
    pub secret: AuthSecret,
}

impl AuthUser {
    pub fn with_password(username: &str, password: &str) -> Self {
        Self {
            identity: Identity {
                username: username.to_string(),
            },
            secret: AuthSecret::Password(password.to_string()),
        }
    }

    pub fn with_ha1(username: &str, ha1: &str) -> Self {
        Self {
            identity: Identity {
                username: username.to_string(),
            },
            secret: AuthSecret::Ha1(ha1.to_string()),
        }
    }
}

/// Caller-supplied identity lookup.
pub trait IdentityLookup: Send + Sync {
    fn lookup(&self, username: &str) -> Option<AuthUser>;
}

impl<F> IdentityLookup for F
where
    F: Fn(&str) -> Option<AuthUser> + Send + Sync,
{
    fn lookup(&self, username: &str) -> Option<AuthUser> {
        self(username)
    }
}

/// Borrowed view of the inbound request.
///
/// All fields are borrowed; this struct is meaningful for one request only.
#[derive(Debug, Default)]
pub struct AuthRequest<'a> {
    /// HTTP method, uppercase
    pub method: &'a str,
    /// Request target URI (should start with a slash)
    pub uri: &'a str,
    /// Raw Authorization header value, if any
    pub authorization: Option<&'a str>,
    /// Request entity body, needed for qop=auth-int
    pub body: Option<&'a [u8]>,
    /// Entity tag of the response the challenge is issued for
    pub entity_tag: Option<&'a str>,
}

impl<'a> AuthRequest<'a> {
    pub fn new(method: &'a str, uri: &'a str) -> Self {
        Self {
            method,
            uri,
            ..Self::default()
        }
    }
}

/// Result of one authentication evaluation.
#[derive(Debug)]
pub enum AuthenticationOutcome {
    /// Credentials verified; the pipeline may continue.
    Authenticated(Identity),
    /// No usable credentials were presented; challenge the client.
    Unauthenticated(Challenge),
    /// Credentials were presented and failed validation; the embedded
    /// challenge carries the stale flag.
    Rejected(Challenge),
}

/// Server-side Digest authentication orchestrator.
///
/// Stateless per request apart from the shared [`NonceTracker`]; one instance
/// serves the whole process and may be shared freely across threads.
pub struct DigestAuthenticator {
    realm: String,
    algorithm: Algorithm,
    nonce_ttl: Duration,
    opaque: String,
    unauthorized_body: String,
    tracker: Arc<NonceTracker>,
    lookup: Arc<dyn IdentityLookup>,
}

impl fmt::Debug for DigestAuthenticator {
    /// Manual impl: the lookup is a trait object, and neither it nor the
    /// tracker secret belongs in debug output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestAuthenticator")
            .field("realm", &self.realm)
            .field("algorithm", &self.algorithm)
            .field("nonce_ttl", &self.nonce_ttl)
            .finish_non_exhaustive()
    }
}

impl DigestAuthenticator {
    pub fn builder(options: DigestOptions) -> DigestAuthenticatorBuilder {
        DigestAuthenticatorBuilder {
            options,
            secret: None,
            lookup: None,
            tracker: None,
        }
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn nonce_tracker(&self) -> &Arc<NonceTracker> {
        &self.tracker
    }

    /// Body text for 401 responses, as configured.
    pub fn unauthorized_body(&self) -> &str {
        &self.unauthorized_body
    }

    /// Run the full per-request protocol state machine.
    pub fn authenticate(&self, request: &AuthRequest) -> AuthenticationOutcome {
        let Some(raw) = request.authorization else {
            return AuthenticationOutcome::Unauthenticated(self.challenge(request, false));
        };

        let creds = match Credentials::parse(raw) {
            Ok(creds) => creds,
            Err(err) => {
                debug!(%err, "unusable authorization header, re-challenging");
                return AuthenticationOutcome::Unauthenticated(self.challenge(request, false));
            }
        };

        self.validate(request, &creds)
    }

    fn validate(&self, request: &AuthRequest, creds: &Credentials) -> AuthenticationOutcome {
        let Some(nonce) = creds.get("nonce") else {
            return AuthenticationOutcome::Rejected(self.challenge(request, false));
        };

        // Expired nonces are rejected before the identity lookup so a stale
        // retry leaks neither timing nor identity information.
        if self.tracker.is_expired(nonce, self.nonce_ttl) {
            info!("stale nonce presented");
            return AuthenticationOutcome::Rejected(self.challenge(request, true));
        }

        let Some(nc) = creds.get("nc") else {
            return AuthenticationOutcome::Rejected(self.challenge(request, false));
        };

        if self.tracker.check_and_track(nonce, nc) == NonceOutcome::Replayed {
            warn!("replayed nonce-count, rejecting");
            return AuthenticationOutcome::Rejected(self.challenge(request, false));
        }

        // Algorithm in the credentials must agree with the configured one;
        // a mismatch is an authentication failure, not a distinct error.
        if let Some(alg) = creds.get("algorithm") {
            match Algorithm::from_str(alg) {
                Ok(a) if a == self.algorithm => {}
                _ => {
                    info!(client_algorithm = alg, "algorithm mismatch");
                    return AuthenticationOutcome::Rejected(self.challenge(request, false));
                }
            }
        }

        let (Some(username), Some(uri), Some(response), Some(cnonce), Some(qop_raw)) = (
            creds.get("username"),
            creds.get("uri"),
            creds.get("response"),
            creds.get("cnonce"),
            creds.get("qop"),
        ) else {
            return AuthenticationOutcome::Rejected(self.challenge(request, false));
        };

        let Ok(qop) = Qop::from_str(qop_raw) else {
            return AuthenticationOutcome::Rejected(self.challenge(request, false));
        };

        let Some(user) = self.lookup.lookup(username) else {
            info!("unknown user");
            return AuthenticationOutcome::Rejected(self.challenge(request, false));
        };

        let ha1 = self.ha1(username, &user.secret);
        let ha2 = self.ha2(qop, request.method, uri, request.body);
        let expected = self.response_digest(&ha1, nonce, nc, cnonce, qop, &ha2);

        if constant_time_eq(expected.as_bytes(), response.as_bytes()) {
            debug!(username, "digest response verified");
            AuthenticationOutcome::Authenticated(user.identity)
        } else {
            info!("digest response mismatch");
            AuthenticationOutcome::Rejected(self.challenge(request, false))
        }
    }

    /// Build a fresh challenge bound to the request's entity tag.
    pub fn challenge(&self, request: &AuthRequest, stale: bool) -> Challenge {
        let entity_tag = request.entity_tag.unwrap_or(NO_ENTITY_TAG);
        Challenge {
            realm: self.realm.clone(),
            nonce: self.tracker.generate(entity_tag),
            opaque: self.opaque.clone(),
            stale,
            algorithm: self.algorithm,
        }
    }

    fn ha1(&self, username: &str, secret: &AuthSecret) -> String {
        match secret {
            AuthSecret::Password(password) => self
                .algorithm
                .hash_str(&format!("{username}:{realm}:{password}", realm = self.realm)),
            AuthSecret::Ha1(ha1) => ha1.clone(),
        }
    }

    fn ha2(&self, qop: Qop, method: &str, uri: &str, body: Option<&[u8]>) -> String {
        match qop {
            Qop::AUTH => self.algorithm.hash_str(&format!("{method}:{uri}")),
            Qop::AUTH_INT => {
                let body_hash = self.algorithm.hash(body.unwrap_or_default());
                self.algorithm.hash_str(&format!("{method}:{uri}:{body_hash}"))
            }
        }
    }

    fn response_digest(
        &self,
        ha1: &str,
        nonce: &str,
        nc: &str,
        cnonce: &str,
        qop: Qop,
        ha2: &str,
    ) -> String {
        self.algorithm
            .hash_str(&format!("{ha1}:{nonce}:{nc}:{cnonce}:{qop}:{ha2}"))
    }
}

/// Builder for [`DigestAuthenticator`]; `build` performs the once-only
/// configuration checks.
pub struct DigestAuthenticatorBuilder {
    options: DigestOptions,
    secret: Option<Vec<u8>>,
    lookup: Option<Arc<dyn IdentityLookup>>,
    tracker: Option<Arc<NonceTracker>>,
}

impl DigestAuthenticatorBuilder {
    /// Server secret used to sign nonces. Never transmitted or logged.
    pub fn secret(mut self, secret: impl Into<Vec<u8>>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    pub fn identity_lookup(mut self, lookup: impl IdentityLookup + 'static) -> Self {
        self.lookup = Some(Arc::new(lookup));
        self
    }

    /// Use an externally owned tracker instead of constructing one from the
    /// secret. Lets several authenticators share one nonce table, and lets
    /// tests drive the tracker clock directly.
    pub fn nonce_tracker(mut self, tracker: Arc<NonceTracker>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    pub fn build(self) -> Result<DigestAuthenticator, ConfigError> {
        let algorithm = Algorithm::from_str(&self.options.algorithm)
            .map_err(|_| ConfigError::UnknownAlgorithm(self.options.algorithm.clone()))?;

        let lookup = self.lookup.ok_or(ConfigError::MissingIdentityLookup)?;

        let tracker = match self.tracker {
            Some(tracker) => tracker,
            None => {
                let secret = self
                    .secret
                    .filter(|s| !s.is_empty())
                    .ok_or(ConfigError::MissingSecret)?;
                Arc::new(NonceTracker::new(secret, algorithm))
            }
        };

        let opaque = self.options.opaque.unwrap_or_else(|| {
            thread_rng()
                .sample_iter(&Alphanumeric)
                .take(32)
                .map(char::from)
                .collect()
        });

        Ok(DigestAuthenticator {
            realm: self.options.realm,
            algorithm,
            nonce_ttl: Duration::from_secs(self.options.nonce_ttl_seconds),
            opaque,
            unauthorized_body: self.options.unauthorized_body,
            tracker,
            lookup,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::AlgorithmType;
    use std::time::SystemTime;

    const SECRET: &[u8] = b"unit-test-secret";
    const CNONCE: &str = "0a4f113b";

    fn lookup(username: &str) -> Option<AuthUser> {
        match username {
            "Agent" => Some(AuthUser::with_password("Agent", "Test")),
            _ => None,
        }
    }

    fn options() -> DigestOptions {
        DigestOptions {
            realm: "unittest".to_string(),
            algorithm: "SHA-256".to_string(),
            ..DigestOptions::default()
        }
    }

    fn authenticator() -> DigestAuthenticator {
        DigestAuthenticator::builder(options())
            .secret(SECRET)
            .identity_lookup(lookup)
            .build()
            .unwrap()
    }

    /// What a correct RFC 2617 client would send back for a challenge.
    fn client_header(
        auth: &DigestAuthenticator,
        challenge: &Challenge,
        username: &str,
        password: &str,
        method: &str,
        uri: &str,
        nc: &str,
    ) -> String {
        let h = auth.algorithm();
        let ha1 = h.hash_str(&format!("{username}:{}:{password}", challenge.realm));
        let ha2 = h.hash_str(&format!("{method}:{uri}"));
        let response = h.hash_str(&format!(
            "{ha1}:{nonce}:{nc}:{CNONCE}:auth:{ha2}",
            nonce = challenge.nonce
        ));
        format!(
            "Digest username=\"{username}\", realm=\"{realm}\", nonce=\"{nonce}\", \
             uri=\"{uri}\", qop=auth, nc={nc}, cnonce=\"{CNONCE}\", \
             response=\"{response}\", opaque=\"{opaque}\"",
            realm = challenge.realm,
            nonce = challenge.nonce,
            opaque = challenge.opaque,
        )
    }

    #[test]
    fn test_golden_rfc2617_values() {
        let auth = authenticator();
        let nonce = "abcdef0123456789";

        let ha1 = auth.ha1("Agent", &AuthSecret::Password("Test".to_string()));
        assert_eq!(
            ha1,
            "a69d6da3eea4fa832dc1c0534863988e550e523f1f786c238951b7ec7abf4d57"
        );

        let ha2 = auth.ha2(Qop::AUTH, "GET", "/", None);
        assert_eq!(
            ha2,
            "602917ac128bfbb66c1f08d7ece0bb03f61e0320146cb376373a70f647738727"
        );

        let response = auth.response_digest(&ha1, nonce, "00000001", CNONCE, Qop::AUTH, &ha2);
        assert_eq!(
            response,
            "7530b01c1dde6a60ac0a7d61d8a7a4fb883d1931566809df8e0395d97eed9679"
        );
    }

    #[test]
    fn test_no_header_yields_challenge() {
        let auth = authenticator();
        let request = AuthRequest::new("GET", "/");
        match auth.authenticate(&request) {
            AuthenticationOutcome::Unauthenticated(challenge) => {
                assert!(!challenge.stale);
                assert_eq!(challenge.realm, "unittest");
                assert!(!challenge.nonce.is_empty());
            }
            other => panic!("expected challenge, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_scheme_yields_challenge() {
        let auth = authenticator();
        let mut request = AuthRequest::new("GET", "/");
        request.authorization = Some("Bearer abcdef");
        assert!(matches!(
            auth.authenticate(&request),
            AuthenticationOutcome::Unauthenticated(_)
        ));
    }

    #[test]
    fn test_full_handshake_then_replay() {
        let auth = authenticator();

        let challenge = auth.challenge(&AuthRequest::new("GET", "/"), false);
        let header = client_header(&auth, &challenge, "Agent", "Test", "GET", "/", "00000001");

        let mut request = AuthRequest::new("GET", "/");
        request.authorization = Some(&header);

        match auth.authenticate(&request) {
            AuthenticationOutcome::Authenticated(identity) => {
                assert_eq!(identity.username, "Agent");
            }
            other => panic!("expected success, got {other:?}"),
        }

        // identical (nonce, nc) a second time is a replay, even though the
        // response digest is still correct
        match auth.authenticate(&request) {
            AuthenticationOutcome::Rejected(challenge) => assert!(!challenge.stale),
            other => panic!("expected replay rejection, got {other:?}"),
        }

        // incrementing nc makes the nonce usable again
        let header2 = client_header(&auth, &challenge, "Agent", "Test", "GET", "/", "00000002");
        let mut request2 = AuthRequest::new("GET", "/");
        request2.authorization = Some(&header2);
        assert!(matches!(
            auth.authenticate(&request2),
            AuthenticationOutcome::Authenticated(_)
        ));

        // and going back down is rejected again
        let header3 = client_header(&auth, &challenge, "Agent", "Test", "GET", "/", "00000001");
        let mut request3 = AuthRequest::new("GET", "/");
        request3.authorization = Some(&header3);
        assert!(matches!(
            auth.authenticate(&request3),
            AuthenticationOutcome::Rejected(_)
        ));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let auth = authenticator();
        let challenge = auth.challenge(&AuthRequest::new("GET", "/"), false);
        let header = client_header(&auth, &challenge, "Agent", "wrong", "GET", "/", "00000001");

        let mut request = AuthRequest::new("GET", "/");
        request.authorization = Some(&header);
        assert!(matches!(
            auth.authenticate(&request),
            AuthenticationOutcome::Rejected(_)
        ));
    }

    #[test]
    fn test_unknown_user_rejected() {
        let auth = authenticator();
        let challenge = auth.challenge(&AuthRequest::new("GET", "/"), false);
        let header = client_header(&auth, &challenge, "Nobody", "Test", "GET", "/", "00000001");

        let mut request = AuthRequest::new("GET", "/");
        request.authorization = Some(&header);
        assert!(matches!(
            auth.authenticate(&request),
            AuthenticationOutcome::Rejected(_)
        ));
    }

    #[test]
    fn test_expired_nonce_rejected_as_stale() {
        let algorithm = Algorithm::new(AlgorithmType::SHA2_256);
        let tracker = Arc::new(NonceTracker::new(SECRET, algorithm));
        let auth = DigestAuthenticator::builder(options())
            .nonce_tracker(Arc::clone(&tracker))
            .identity_lookup(lookup)
            .build()
            .unwrap();

        // a nonce issued 60 s ago against a 30 s TTL
        let old = SystemTime::now() - Duration::from_secs(60);
        let nonce = tracker.generate_at(NO_ENTITY_TAG, old);
        let challenge = Challenge {
            realm: "unittest".to_string(),
            nonce,
            opaque: "o".to_string(),
            stale: false,
            algorithm,
        };
        // correct response for the expired nonce
        let header = client_header(&auth, &challenge, "Agent", "Test", "GET", "/", "00000001");

        let mut request = AuthRequest::new("GET", "/");
        request.authorization = Some(&header);
        match auth.authenticate(&request) {
            AuthenticationOutcome::Rejected(challenge) => assert!(challenge.stale),
            other => panic!("expected stale rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_auth_int_binds_body() {
        let auth = authenticator();
        let challenge = auth.challenge(&AuthRequest::new("POST", "/submit"), false);

        let h = auth.algorithm();
        let body = b"payload";
        let ha1 = h.hash_str("Agent:unittest:Test");
        let body_hash = h.hash(body);
        let ha2 = h.hash_str(&format!("POST:/submit:{body_hash}"));
        let response = h.hash_str(&format!(
            "{ha1}:{nonce}:00000001:{CNONCE}:auth-int:{ha2}",
            nonce = challenge.nonce
        ));
        let header = format!(
            "Digest username=\"Agent\", realm=\"unittest\", nonce=\"{nonce}\", \
             uri=\"/submit\", qop=auth-int, nc=00000001, cnonce=\"{CNONCE}\", \
             response=\"{response}\"",
            nonce = challenge.nonce,
        );

        let mut request = AuthRequest::new("POST", "/submit");
        request.authorization = Some(&header);
        request.body = Some(body.as_slice());
        assert!(matches!(
            auth.authenticate(&request),
            AuthenticationOutcome::Authenticated(_)
        ));

        // same auth-int digest against a tampered body must fail
        let header2 = header.replace("nc=00000001", "nc=00000002");
        let response2 = h.hash_str(&format!(
            "{ha1}:{nonce}:00000002:{CNONCE}:auth-int:{ha2}",
            nonce = challenge.nonce
        ));
        let header2 = header2.replace(&response, &response2);
        let mut tampered = AuthRequest::new("POST", "/submit");
        tampered.authorization = Some(&header2);
        tampered.body = Some(b"other payload".as_slice());
        assert!(matches!(
            auth.authenticate(&tampered),
            AuthenticationOutcome::Rejected(_)
        ));
    }

    #[test]
    fn test_ha1_secret_supported() {
        let algorithm = Algorithm::new(AlgorithmType::SHA2_256);
        let ha1 = algorithm.hash_str("Agent:unittest:Test");
        let auth = DigestAuthenticator::builder(options())
            .secret(SECRET)
            .identity_lookup(move |username: &str| {
                (username == "Agent").then(|| AuthUser::with_ha1("Agent", &ha1))
            })
            .build()
            .unwrap();

        let challenge = auth.challenge(&AuthRequest::new("GET", "/"), false);
        let header = client_header(&auth, &challenge, "Agent", "Test", "GET", "/", "00000001");
        let mut request = AuthRequest::new("GET", "/");
        request.authorization = Some(&header);
        assert!(matches!(
            auth.authenticate(&request),
            AuthenticationOutcome::Authenticated(_)
        ));
    }

    #[test]
    fn test_algorithm_mismatch_rejected() {
        let auth = authenticator();
        let challenge = auth.challenge(&AuthRequest::new("GET", "/"), false);
        let mut header = client_header(&auth, &challenge, "Agent", "Test", "GET", "/", "00000001");
        header.push_str(", algorithm=\"MD5\"");

        let mut request = AuthRequest::new("GET", "/");
        request.authorization = Some(&header);
        assert!(matches!(
            auth.authenticate(&request),
            AuthenticationOutcome::Rejected(_)
        ));
    }

    #[test]
    fn test_config_errors_at_build() {
        let err = DigestAuthenticator::builder(options())
            .secret(SECRET)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingIdentityLookup));

        let err = DigestAuthenticator::builder(options())
            .identity_lookup(lookup)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingSecret));

        let err = DigestAuthenticator::builder(options())
            .secret(b"".to_vec())
            .identity_lookup(lookup)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingSecret));

        let bad = DigestOptions {
            algorithm: "SHA-1".to_string(),
            ..options()
        };
        let err = DigestAuthenticator::builder(bad)
            .secret(SECRET)
            .identity_lookup(lookup)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownAlgorithm(_)));
    }

    #[test]
    fn test_debug_output_omits_secrets() {
        let auth = authenticator();
        let rendered = format!("{auth:?}");
        assert!(rendered.contains("DigestAuthenticator"));
        assert!(rendered.contains("unittest"));
        assert!(!rendered.contains("unit-test-secret"));
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: DigestOptions =
            serde_json::from_str(r#"{ "realm": "api@example.org" }"#).unwrap();
        assert_eq!(options.realm, "api@example.org");
        assert_eq!(options.algorithm, "MD5");
        assert_eq!(options.nonce_ttl_seconds, 30);
        assert_eq!(options.unauthorized_body, "401 Unauthorized");
        assert!(options.opaque.is_none());
    }
}
