use crate::error::ParseError;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use digest::{Digest, DynDigest};
use md5::Md5;
use sha2::{Sha256, Sha512_256};

/// Algorithm type
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[allow(non_camel_case_types)]
pub enum AlgorithmType {
    MD5,
    SHA2_256,
    SHA2_512_256,
}

/// Hash algorithm used for nonce signing and response digests
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Algorithm {
    pub algo: AlgorithmType,
}

impl Algorithm {
    pub fn new(algo: AlgorithmType) -> Algorithm {
        Algorithm { algo }
    }

    /// Calculate a hash of bytes using the selected algorithm
    pub fn hash(self, bytes: &[u8]) -> String {
        let mut hash: Box<dyn DynDigest> = match self.algo {
            AlgorithmType::MD5 => Box::new(Md5::new()),
            AlgorithmType::SHA2_256 => Box::new(Sha256::new()),
            AlgorithmType::SHA2_512_256 => Box::new(Sha512_256::new()),
        };

        hash.update(bytes);
        hex::encode(hash.finalize())
    }

    /// Calculate a hash of string's bytes using the selected algorithm
    pub fn hash_str(self, bytes: &str) -> String {
        self.hash(bytes.as_bytes())
    }
}

impl FromStr for Algorithm {
    type Err = ParseError;

    /// Parse from the name used in WWW-Authenticate / Authorization headers
    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "MD5" => Ok(Algorithm::new(AlgorithmType::MD5)),
            "SHA-256" => Ok(Algorithm::new(AlgorithmType::SHA2_256)),
            "SHA-512-256" => Ok(Algorithm::new(AlgorithmType::SHA2_512_256)),
            _ => Err(ParseError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl Default for Algorithm {
    /// Get a MD5 instance
    fn default() -> Self {
        Algorithm::new(AlgorithmType::MD5)
    }
}

impl Display for Algorithm {
    /// Format to the name used in HTTP headers
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self.algo {
            AlgorithmType::MD5 => "MD5",
            AlgorithmType::SHA2_256 => "SHA-256",
            AlgorithmType::SHA2_512_256 => "SHA-512-256",
        })
    }
}

/// QOP field values
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[allow(non_camel_case_types)]
pub enum Qop {
    AUTH,
    AUTH_INT,
}

impl FromStr for Qop {
    type Err = ParseError;

    /// Parse from "auth" or "auth-int" as used in HTTP headers
    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "auth" => Ok(Qop::AUTH),
            "auth-int" => Ok(Qop::AUTH_INT),
            _ => Err(ParseError::BadQop(s.to_string())),
        }
    }
}

impl Display for Qop {
    /// Convert to "auth" or "auth-int" as used in HTTP headers
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            Qop::AUTH => "auth",
            Qop::AUTH_INT => "auth-int",
        })
    }
}
