//! Shared-secret access check

use std::sync::{Arc, RwLock};

use tracing::warn;

/// Holds the access token callers must present.
///
/// An unconfigured gate denies everything. Blank tokens count as unconfigured.
#[derive(Default)]
pub struct AccessGate {
    token: RwLock<Option<Arc<str>>>,
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate")
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl AccessGate {
    pub fn new(token: Option<&str>) -> Self {
        let gate = Self::default();
        if let Some(token) = token {
            gate.configure(token);
        }
        gate
    }

    /// Replace the configured token
    pub fn configure(&self, token: &str) {
        let token = (!token.trim().is_empty()).then(|| Arc::from(token));
        match self.token.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    fn current(&self) -> Option<Arc<str>> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.current().is_some()
    }

    /// Exact, case-sensitive comparison against the configured token
    pub fn matches(&self, supplied: &str) -> bool {
        self.current()
            .is_some_and(|token| constant_time_eq(token.as_bytes(), supplied.as_bytes()))
    }

    /// Allow access only if a token is configured and `supplied` equals it
    pub fn check(&self, supplied: Option<&str>) -> bool {
        if !self.is_configured() {
            warn!("Access token not configured");
            return false;
        }

        supplied.is_some_and(|token| self.matches(token))
    }
}

/// Compare without short-circuiting on the first differing byte
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
