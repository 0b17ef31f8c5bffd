//! The compiled grammar artifact container.
//!
//! Artifacts are produced by the grammar toolchain as a small framed binary:
//! a 4-byte magic, a little-endian `u16` format version, then the UTF-8 JSON
//! rule payload. [`GrammarHandle`] wraps the raw bytes without interpreting
//! them; only the loader decodes the frame.

/// Magic bytes at the start of every grammar artifact.
pub const MAGIC: [u8; 4] = *b"FTLG";

/// The artifact format version this loader writes and prefers.
pub const FORMAT_VERSION: u16 = 1;

/// The oldest artifact format version this loader still accepts.
///
/// Version ranging mirrors tree-sitter's language ABI compatibility window.
pub const MIN_COMPATIBLE_FORMAT_VERSION: u16 = 1;

const HEADER_LEN: usize = MAGIC.len() + 2;

/// An opaque handle to compiled grammar data.
///
/// The handle is a capability token: callers obtain one from a
/// [`GrammarProvider`](crate::provider::GrammarProvider) and pass it to
/// [`Language::load`](crate::load::Language::load). Nothing outside the
/// loader inspects its contents.
#[derive(Debug, Clone)]
pub struct GrammarHandle {
    bytes: Vec<u8>,
}

impl GrammarHandle {
    /// Wraps raw artifact bytes in a handle.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns the size of the underlying artifact in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Decodes the artifact frame and returns the JSON rule payload.
    pub(crate) fn decode(&self) -> Result<&str, ArtifactError> {
        if self.bytes.is_empty() {
            return Err(ArtifactError::Empty);
        }
        if self.bytes.len() < HEADER_LEN {
            return Err(ArtifactError::Truncated(self.bytes.len()));
        }
        let (header, payload) = self.bytes.split_at(HEADER_LEN);
        if header[..MAGIC.len()] != MAGIC {
            return Err(ArtifactError::BadMagic);
        }
        let version = u16::from_le_bytes([header[4], header[5]]);
        if !(MIN_COMPATIBLE_FORMAT_VERSION..=FORMAT_VERSION).contains(&version) {
            return Err(ArtifactError::UnsupportedVersion(version));
        }
        if payload.is_empty() {
            return Err(ArtifactError::EmptyPayload);
        }
        std::str::from_utf8(payload).map_err(ArtifactError::Payload)
    }
}

/// Frames a JSON grammar payload as an artifact at the current
/// [`FORMAT_VERSION`].
///
/// This is the writer half of the container format, matching what the
/// grammar toolchain emits; tests use it to fabricate artifacts.
#[must_use]
pub fn encode_artifact(grammar_json: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(HEADER_LEN + grammar_json.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bytes.extend_from_slice(grammar_json.as_bytes());
    bytes
}

/// Ways an artifact frame can be malformed.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// The handle carried no bytes at all.
    #[error("artifact is empty")]
    Empty,

    /// The artifact is shorter than the fixed header.
    #[error("artifact truncated: {0} bytes is shorter than the header")]
    Truncated(usize),

    /// The artifact does not start with the `FTLG` magic.
    #[error("artifact has bad magic, expected \"FTLG\"")]
    BadMagic,

    /// The artifact was built by an incompatible toolchain version.
    #[error(
        "unsupported artifact format version {0} \
         (supported: {MIN_COMPATIBLE_FORMAT_VERSION}..={FORMAT_VERSION})"
    )]
    UnsupportedVersion(u16),

    /// The rule payload is not valid UTF-8.
    #[error("artifact payload is not valid UTF-8: {0}")]
    Payload(std::str::Utf8Error),

    /// The frame is well-formed but carries no rule payload.
    #[error("artifact payload is empty")]
    EmptyPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_round_trip() {
        let handle = GrammarHandle::from_bytes(encode_artifact(r#"{"name":"freemarker"}"#));
        assert_eq!(handle.decode().unwrap(), r#"{"name":"freemarker"}"#);
    }

    #[test]
    fn test_empty_handle() {
        let handle = GrammarHandle::from_bytes(Vec::new());
        assert!(matches!(handle.decode(), Err(ArtifactError::Empty)));
    }

    #[test]
    fn test_truncated_header() {
        let handle = GrammarHandle::from_bytes(b"FTL".to_vec());
        assert!(matches!(handle.decode(), Err(ArtifactError::Truncated(3))));
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = encode_artifact("{}");
        bytes[0] = b'X';
        let handle = GrammarHandle::from_bytes(bytes);
        assert!(matches!(handle.decode(), Err(ArtifactError::BadMagic)));
    }

    #[test]
    fn test_version_from_the_future() {
        let mut bytes = encode_artifact("{}");
        bytes[4..6].copy_from_slice(&99u16.to_le_bytes());
        let handle = GrammarHandle::from_bytes(bytes);
        assert!(matches!(
            handle.decode(),
            Err(ArtifactError::UnsupportedVersion(99))
        ));
    }

    #[test]
    fn test_header_without_payload() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&MAGIC);
        bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        let handle = GrammarHandle::from_bytes(bytes);
        assert!(matches!(handle.decode(), Err(ArtifactError::EmptyPayload)));
    }
}
