//! Shared-secret authorization.
//!
//! A single password, configured once at startup, guards every mutating route.
//! [`SharedSecret::verify`] is the only place a credential is judged; where the
//! credential comes from (query string today) is the extractor's business.
//!
//! The comparison is plaintext and not constant-time, and the secret usually
//! travels in a URL. Both are known weaknesses of this scheme.

/// Outcome of checking a caller's credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Granted,
    Denied,
}

impl Verdict {
    pub fn is_granted(self) -> bool {
        matches!(self, Verdict::Granted)
    }
}

#[derive(Clone)]
pub struct SharedSecret {
    password: String,
}

impl SharedSecret {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    /// True when no password is configured, which locks every mutating route
    pub fn is_unset(&self) -> bool {
        self.password.is_empty()
    }

    /// Judge a caller-supplied credential. Missing or empty credentials never pass.
    pub fn verify(&self, credential: Option<&str>) -> Verdict {
        match credential {
            Some(supplied) if !supplied.is_empty() && supplied == self.password => Verdict::Granted,
            _ => Verdict::Denied,
        }
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecret")
            .field("password", &"<redacted>")
            .finish()
    }
}
