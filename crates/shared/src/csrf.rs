//! CSRF token issuance and validation.
//!
//! Tokens are stateless: a digest of the server secret and the session the
//! token was issued for. A token issued for one session never validates for
//! another.

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::auth::Claims;

/// Errors returned by CSRF validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CsrfError {
    /// No token was supplied with the request.
    #[error("missing CSRF token")]
    Missing,

    /// The supplied token does not belong to this session.
    #[error("invalid CSRF token")]
    Invalid,
}

/// Issues and validates CSRF tokens bound to a session.
#[derive(Clone)]
pub struct CsrfService {
    secret: Vec<u8>,
}

impl std::fmt::Debug for CsrfService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsrfService")
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl CsrfService {
    /// Creates a new CSRF service.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
        }
    }

    /// Issues the token for a session.
    #[must_use]
    pub fn issue(&self, claims: &Claims) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.secret);
        hasher.update([0u8]);
        hasher.update(claims.sub.as_bytes());
        hasher.update(claims.partner.as_bytes());
        hasher.update(claims.iat.to_be_bytes());
        base64_url::encode(&hasher.finalize())
    }

    /// Validates a token supplied with a request.
    ///
    /// # Errors
    ///
    /// Returns `CsrfError::Missing` for an absent or empty token and
    /// `CsrfError::Invalid` when it was not issued for this session.
    pub fn validate(&self, claims: &Claims, supplied: Option<&str>) -> Result<(), CsrfError> {
        let supplied = supplied
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(CsrfError::Missing)?;

        if constant_time_eq(self.issue(claims).as_bytes(), supplied.as_bytes()) {
            Ok(())
        } else {
            Err(CsrfError::Invalid)
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
