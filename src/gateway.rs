//! Thin adapter between the hosting HTTP pipeline and the authenticator.
//!
//! The gateway does not own the server loop: the host calls [`AuthenticationGateway::handle`]
//! per request and either forwards (attaching the identity to the request
//! extensions) or writes the returned 401 response and stops.

use http::{header, HeaderValue, Request, Response, StatusCode};
use tracing::warn;

use crate::authenticator::{AuthRequest, AuthenticationOutcome, DigestAuthenticator, Identity};
use crate::credentials::Challenge;

/// Decision for one inbound request.
#[derive(Debug)]
pub enum GatewayOutcome {
    /// Authentication succeeded; attach the identity and continue the
    /// pipeline.
    Forward(Identity),
    /// Authentication failed; write this response and stop. Carries exactly
    /// one challenge.
    Deny(Response<String>),
}

/// Pipeline-facing wrapper around a [`DigestAuthenticator`].
pub struct AuthenticationGateway {
    authenticator: DigestAuthenticator,
}

impl AuthenticationGateway {
    pub fn new(authenticator: DigestAuthenticator) -> Self {
        Self { authenticator }
    }

    pub fn authenticator(&self) -> &DigestAuthenticator {
        &self.authenticator
    }

    /// Evaluate one request.
    pub fn handle<B: AsRef<[u8]>>(&self, request: &Request<B>) -> GatewayOutcome {
        let authorization = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let uri = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| request.uri().path());

        let auth_request = AuthRequest {
            method: request.method().as_str(),
            uri,
            authorization,
            body: Some(request.body().as_ref()),
            entity_tag: None,
        };

        match self.authenticator.authenticate(&auth_request) {
            AuthenticationOutcome::Authenticated(identity) => GatewayOutcome::Forward(identity),
            AuthenticationOutcome::Unauthenticated(challenge)
            | AuthenticationOutcome::Rejected(challenge) => {
                GatewayOutcome::Deny(self.deny_response(&challenge))
            }
        }
    }

    fn deny_response(&self, challenge: &Challenge) -> Response<String> {
        let mut response = Response::new(self.authenticator.unauthorized_body().to_string());
        *response.status_mut() = StatusCode::UNAUTHORIZED;
        match HeaderValue::from_str(&challenge.to_header_string()) {
            Ok(value) => {
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, value);
            }
            Err(err) => {
                // only reachable with a non-ASCII realm in the configuration
                warn!(%err, "challenge is not a valid header value");
            }
        }
        response
    }
}
