//! Credential codec: parsing of `Authorization: Digest ...` header values
//! and rendering of `WWW-Authenticate` challenges.

use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};

use crate::enums::Algorithm;
use crate::error::ParseError;
use crate::utils::QuoteForDigest;

/// Scheme prefix, matched case-sensitively.
const SCHEME_PREFIX: &str = "Digest ";

/// At least one of these must be present for a credential map to be
/// considered well-formed.
const CORE_FIELDS: [&str; 5] = ["username", "realm", "nonce", "uri", "response"];

/// QOP options offered in every challenge.
pub const QOP_OPTIONS: &str = "auth,auth-int";

/// Parsed credential fields from an Authorization header.
///
/// Keys are matched case-insensitively and drawn from the fixed RFC 2617
/// vocabulary (username, realm, nonce, uri, response, qop, nc, cnonce,
/// opaque, algorithm). Lives for one request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    fields: HashMap<String, String>,
}

impl Credentials {
    /// Parse a raw Authorization header value.
    ///
    /// The value must start with the exact prefix `"Digest "`. The remainder
    /// is split on commas that sit outside double quotes; each field is split
    /// on the first `=`. Quoted values have the quotes stripped, backslash
    /// escapes resolved, and the result trimmed.
    ///
    /// # Errors
    /// Fails on a scheme mismatch, on fewer than 5 or more than 10 fields,
    /// when none of the core fields is present, or when the username
    /// contains a literal colon (the HA1 field separator).
    pub fn parse(raw: &str) -> Result<Credentials, ParseError> {
        let rest = raw.strip_prefix(SCHEME_PREFIX).ok_or(ParseError::NotDigest)?;

        let segments = split_unquoted_commas(rest);
        if segments.len() < 5 || segments.len() > 10 {
            return Err(ParseError::FieldCount(segments.len()));
        }

        let mut fields = HashMap::new();
        for segment in &segments {
            let Some((key, value)) = segment.split_once('=') else {
                // empty or key-only segment: counts toward the field bound
                // above, carries nothing
                continue;
            };
            fields.insert(key.trim().to_ascii_lowercase(), unquote(value));
        }

        if !CORE_FIELDS.iter().any(|f| fields.contains_key(*f)) {
            return Err(ParseError::MissingCoreFields);
        }

        if fields.get("username").is_some_and(|u| u.contains(':')) {
            return Err(ParseError::UsernameColon);
        }

        Ok(Credentials { fields })
    }

    /// Field value by case-insensitive key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(&key.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Split on commas that are outside double quotes. Backslash escapes the
/// following character inside a quoted section. Empty segments are kept so
/// the caller's field count reflects the raw comma split.
fn split_unquoted_commas(input: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                segments.push(input[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    segments.push(input[start..].trim());
    segments
}

/// Strip surrounding quotes and resolve backslash escapes; unquoted values
/// are trimmed as-is.
fn unquote(value: &str) -> String {
    let value = value.trim();
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        let inner = &value[1..value.len() - 1];
        let mut out = String::with_capacity(inner.len());
        let mut escaped = false;
        for c in inner.chars() {
            if escaped {
                out.push(c);
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else {
                out.push(c);
            }
        }
        out.trim().to_string()
    } else {
        value.to_string()
    }
}

/// A WWW-Authenticate challenge. Never persisted beyond the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub realm: String,
    pub nonce: String,
    pub opaque: String,
    pub stale: bool,
    pub algorithm: Algorithm,
}

impl Challenge {
    /// Produce the WWW-Authenticate header value (also accessible through
    /// the Display trait)
    pub fn to_header_string(&self) -> String {
        self.to_string()
    }
}

impl Display for Challenge {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "Digest realm=\"{realm}\", qop=\"{qop}\", nonce=\"{nonce}\", \
             opaque=\"{opaque}\", stale=\"{stale}\", algorithm=\"{algorithm}\"",
            realm = self.realm.quote_for_digest(),
            qop = QOP_OPTIONS,
            nonce = self.nonce.quote_for_digest(),
            opaque = self.opaque.quote_for_digest(),
            stale = if self.stale { "TRUE" } else { "FALSE" },
            algorithm = self.algorithm,
        )
    }
}
