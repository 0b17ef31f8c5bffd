//! Load-verification for compiled FreeMarker template grammar artifacts.
//!
//! A grammar artifact is the output of the FreeMarker grammar toolchain: an
//! opaque binary that a parser loads at runtime. This crate checks that such
//! an artifact is well-formed and loadable, and reports the outcome as a
//! [`VerificationResult`] rather than a crash:
//!
//! ```
//! use ftlcheck::{encode_artifact, StaticProvider, Verifier};
//!
//! let artifact = encode_artifact(
//!     r#"{"name": "freemarker", "rules": {"text": {"type": "PATTERN", "value": "."}}}"#,
//! );
//! let verifier = Verifier::new(StaticProvider::from_bytes(artifact));
//! assert!(verifier.verify().is_ok());
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::multiple_crate_versions)]

/// The artifact container format and the opaque [`GrammarHandle`].
pub mod artifact;

/// Typed model of the grammar's rule payload, plus the FreeMarker node-kind
/// vocabulary.
///
/// This module defines how the crate understands the declarative shape of
/// the templating language: the grammar itself. The loader and the
/// structural checks build upon these types.
pub mod grammar;

/// Language construction from grammar handles.
pub mod load;

/// Grammar providers: the external collaborators that supply artifacts.
pub mod provider;

/// Structural validation of parsed grammars.
///
/// Validation exists to protect the loader from malformed artifacts. It
/// enforces the grammar format's invariants and ensures that what decodes is
/// also semantically coherent.
pub mod validate;

/// The load verifier and its pass/fail result type.
pub mod verify;

pub use artifact::{encode_artifact, ArtifactError, GrammarHandle};
pub use grammar::kinds::NodeKind;
pub use grammar::{parse_grammar, Grammar, GrammarError, Rule};
pub use load::{GrammarLoadError, Language};
pub use provider::{FileProvider, GrammarProvider, ProviderError, RuntimeProvider, StaticProvider};
pub use validate::{validate, ValidationError};
pub use verify::{verify_can_load, VerificationResult, Verifier};
