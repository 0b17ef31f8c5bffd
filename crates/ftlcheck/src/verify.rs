//! The load verifier.
//!
//! A [`Verifier`] asks its provider for a grammar handle, attempts to
//! construct a [`Language`](crate::load::Language) from it, and reports the
//! outcome as a [`VerificationResult`]. Every provider or construction error
//! is caught at this boundary and folded into the `Failed` reason; nothing
//! propagates to the caller.

use std::fmt::Display;

use crate::load::{GrammarLoadError, Language};
use crate::provider::{GrammarProvider, RuntimeProvider};

/// Reason prefix shared by every failed verification.
const FAILURE_PREFIX: &str = "Error loading Freemarker grammar";

/// The outcome of one verification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum VerificationResult {
    /// The artifact produced a usable language object.
    Ok,
    /// Loading failed; the reason is human-readable and self-contained.
    Failed(String),
}

impl VerificationResult {
    /// Returns `true` if verification succeeded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, VerificationResult::Ok)
    }

    /// Returns the failure reason, if verification failed.
    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            VerificationResult::Ok => None,
            VerificationResult::Failed(reason) => Some(reason),
        }
    }
}

/// Verifies that a provider's grammar artifact is loadable.
///
/// Stateless: repeated [`verify`](Verifier::verify) calls are independent
/// and, for a deterministic provider, yield identical results.
#[derive(Debug, Clone)]
pub struct Verifier<P> {
    provider: P,
}

impl<P: GrammarProvider> Verifier<P> {
    /// Creates a verifier over the given provider.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Obtains a handle from the provider and attempts language construction.
    pub fn verify(&self) -> VerificationResult {
        let handle = match self.provider.language() {
            Ok(handle) => handle,
            Err(e) => return failed(&GrammarLoadError::from(e)),
        };

        match Language::load(&handle) {
            Ok(language) => {
                log::debug!(
                    "verified grammar '{}' ({} rules)",
                    language.name(),
                    language.rule_count()
                );
                VerificationResult::Ok
            }
            Err(e) => failed(&e),
        }
    }
}

fn failed(cause: &dyn Display) -> VerificationResult {
    VerificationResult::Failed(format!("{FAILURE_PREFIX}: {cause}"))
}

/// Verifies the FreeMarker grammar artifact found in the runtime search
/// paths.
///
/// Convenience wrapper over [`Verifier`] with a
/// [`RuntimeProvider`]; see
/// [`artifact_search_paths`](crate::provider::artifact_search_paths) for the
/// probe order.
pub fn verify_can_load() -> VerificationResult {
    Verifier::new(RuntimeProvider::new()).verify()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::encode_artifact;
    use crate::provider::StaticProvider;

    const FIXTURE: &str = r#"{
        "name": "freemarker",
        "rules": {
            "template": {
                "type": "REPEAT",
                "content": {"type": "SYMBOL", "name": "interpolation"}
            },
            "interpolation": {
                "type": "SEQ",
                "members": [
                    {"type": "STRING", "value": "${"},
                    {"type": "SYMBOL", "name": "variable"},
                    {"type": "STRING", "value": "}"}
                ]
            },
            "variable": {"type": "PATTERN", "value": "[A-Za-z_][A-Za-z0-9_]*"}
        }
    }"#;

    #[test]
    fn test_valid_artifact_verifies() {
        let verifier = Verifier::new(StaticProvider::from_bytes(encode_artifact(FIXTURE)));
        assert_eq!(verifier.verify(), VerificationResult::Ok);
    }

    #[test]
    fn test_empty_handle_fails_with_reason() {
        let verifier = Verifier::new(StaticProvider::from_bytes(Vec::new()));
        let result = verifier.verify();
        let reason = result.failure_reason().unwrap();
        assert!(reason.starts_with("Error loading Freemarker grammar"));
        assert!(reason.contains("empty"));
    }

    #[test]
    fn test_verify_is_idempotent() {
        let verifier = Verifier::new(StaticProvider::from_bytes(encode_artifact(FIXTURE)));
        assert_eq!(verifier.verify(), verifier.verify());
    }
}
