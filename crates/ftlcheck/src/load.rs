//! Grammar loading: turning an opaque handle into a usable language object.

use crate::artifact::{ArtifactError, GrammarHandle};
use crate::grammar::kinds::NodeKind;
use crate::grammar::{parse_grammar, GrammarError};
use crate::provider::ProviderError;
use crate::validate::{validate, ValidationError};

/// A usable parser-language object constructed from a grammar artifact.
///
/// Holds the decoded rule vocabulary; construction succeeding is the
/// guarantee that the artifact is well-formed and loadable.
#[derive(Debug)]
pub struct Language {
    name: String,
    rule_names: Vec<String>,
    known_kinds: Vec<NodeKind>,
    external_count: usize,
}

impl Language {
    /// Constructs a language object from a grammar handle.
    ///
    /// Decodes the artifact frame, parses the JSON rule payload, and runs
    /// structural validation. The handle is only read; it can be loaded any
    /// number of times with the same outcome.
    ///
    /// # Errors
    ///
    /// Returns a [`GrammarLoadError`] if the frame is malformed, the payload
    /// fails to parse, or validation finds a hard violation.
    pub fn load(handle: &GrammarHandle) -> Result<Self, GrammarLoadError> {
        let payload = handle.decode()?;
        let grammar = parse_grammar(payload)?;
        validate(&grammar)?;

        let mut rule_names: Vec<String> = grammar.rules.keys().cloned().collect();
        rule_names.extend(grammar.external_names().into_iter().map(String::from));
        rule_names.sort_unstable();
        rule_names.dedup();

        let mut known_kinds: Vec<NodeKind> = rule_names
            .iter()
            .filter_map(|name| name.parse().ok())
            .collect();
        known_kinds.sort_unstable();
        known_kinds.dedup();

        let external_count = grammar.external_names().len();
        log::debug!(
            "loaded grammar '{}': {} rules, {} external tokens",
            grammar.name,
            rule_names.len(),
            external_count
        );

        Ok(Self {
            name: grammar.name,
            rule_names,
            known_kinds,
            external_count,
        })
    }

    /// The grammar's declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rules the grammar defines, external tokens included.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rule_names.len()
    }

    /// Number of external scanner tokens.
    #[must_use]
    pub fn external_count(&self) -> usize {
        self.external_count
    }

    /// Returns `true` if the grammar defines a rule with the given name.
    #[must_use]
    pub fn has_rule(&self, name: &str) -> bool {
        self.rule_names.binary_search_by(|r| r.as_str().cmp(name)).is_ok()
    }

    /// The FreeMarker [`NodeKind`]s this artifact defines, sorted.
    #[must_use]
    pub fn known_kinds(&self) -> &[NodeKind] {
        &self.known_kinds
    }
}

/// Any failure encountered while turning a [`GrammarHandle`] into a usable
/// [`Language`], or while obtaining the handle in the first place.
#[derive(Debug, thiserror::Error)]
pub enum GrammarLoadError {
    /// The provider could not supply an artifact.
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// The artifact frame was malformed.
    #[error("{0}")]
    Artifact(#[from] ArtifactError),

    /// The rule payload failed to deserialize.
    #[error("{0}")]
    Grammar(#[from] GrammarError),

    /// The grammar violated a structural invariant.
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::encode_artifact;

    const FIXTURE: &str = r#"{
        "name": "freemarker",
        "rules": {
            "template": {
                "type": "CHOICE",
                "members": [
                    {"type": "SYMBOL", "name": "if_clause"},
                    {"type": "SYMBOL", "name": "comment"}
                ]
            },
            "if_clause": {
                "type": "SEQ",
                "members": [
                    {"type": "SYMBOL", "name": "if_begin"},
                    {"type": "SYMBOL", "name": "if_close"}
                ]
            },
            "if_begin": {"type": "STRING", "value": "<#if"},
            "if_close": {"type": "STRING", "value": "</#if>"}
        },
        "externals": [
            {"type": "SYMBOL", "name": "comment"}
        ]
    }"#;

    #[test]
    fn test_load_fixture() {
        let handle = GrammarHandle::from_bytes(encode_artifact(FIXTURE));
        let language = Language::load(&handle).unwrap();

        assert_eq!(language.name(), "freemarker");
        assert_eq!(language.rule_count(), 5);
        assert_eq!(language.external_count(), 1);
        assert!(language.has_rule("if_clause"));
        assert!(!language.has_rule("list_clause"));
    }

    #[test]
    fn test_known_kinds_sorted_and_typed() {
        let handle = GrammarHandle::from_bytes(encode_artifact(FIXTURE));
        let language = Language::load(&handle).unwrap();

        let kinds = language.known_kinds();
        assert!(kinds.contains(&NodeKind::IfClause));
        assert!(kinds.contains(&NodeKind::Comment));
        assert!(kinds.windows(2).all(|w| w[0] < w[1]));
        // "template" is structural, not a named kind
        assert_eq!(kinds.len(), 4);
    }

    #[test]
    fn test_load_is_idempotent() {
        let handle = GrammarHandle::from_bytes(encode_artifact(FIXTURE));
        let first = Language::load(&handle).unwrap();
        let second = Language::load(&handle).unwrap();
        assert_eq!(first.rule_count(), second.rule_count());
        assert_eq!(first.known_kinds(), second.known_kinds());
    }

    #[test]
    fn test_load_rejects_truncated_artifact() {
        let mut bytes = encode_artifact(FIXTURE);
        bytes.truncate(bytes.len() / 2);
        let handle = GrammarHandle::from_bytes(bytes);
        assert!(matches!(
            Language::load(&handle),
            Err(GrammarLoadError::Grammar(_))
        ));
    }
}
