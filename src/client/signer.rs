//! Request signing for the Marvel API
//!
//! Every request must carry `ts`, `apikey` and `hash`, where
//! `hash = md5(ts + private_key + public_key)` in lowercase hex.

use md5::{Digest, Md5};
use std::fmt;

/// Public/private key pair issued by the Marvel developer portal.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub public_key: String,
    pub private_key: String,
}

impl Credentials {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }

    /// Public key shortened for logs and status output.
    pub fn redacted_public_key(&self) -> String {
        redact(&self.public_key)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.redacted_public_key())
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Keep the first four characters of a secret and mask the rest.
pub fn redact(secret: &str) -> String {
    if secret.is_empty() {
        return "<empty>".to_string();
    }
    let visible: String = secret.chars().take(4).collect();
    format!("{}…", visible)
}

/// Authentication query parameters for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthParams {
    pub ts: String,
    pub apikey: String,
    pub hash: String,
}

impl AuthParams {
    /// Query pairs in the order upstream documents them.
    pub fn to_query_params(&self) -> [(&'static str, String); 3] {
        [
            ("ts", self.ts.clone()),
            ("apikey", self.apikey.clone()),
            ("hash", self.hash.clone()),
        ]
    }
}

/// Sign a request made at `now_millis`.
///
/// Empty keys are not rejected here; upstream answers with a 409 which the
/// transport classifies.
pub fn sign(now_millis: i64, public_key: &str, private_key: &str) -> AuthParams {
    let ts = now_millis.to_string();

    let mut hasher = Md5::new();
    hasher.update(ts.as_bytes());
    hasher.update(private_key.as_bytes());
    hasher.update(public_key.as_bytes());

    AuthParams {
        hash: format!("{:x}", hasher.finalize()),
        apikey: public_key.to_string(),
        ts,
    }
}
