//! Grammar providers.
//!
//! A provider is the external collaborator that supplies a compiled grammar
//! artifact. The trait's single capability, [`GrammarProvider::language`],
//! returns an opaque [`GrammarHandle`]; where the bytes come from (a file, a
//! runtime directory, memory) is the provider's concern.

use std::path::{Path, PathBuf};

use crate::artifact::GrammarHandle;

/// The artifact filename searched for in runtime directories.
pub const ARTIFACT_FILENAME: &str = "freemarker.ftlg";

/// Supplies compiled grammar artifacts.
pub trait GrammarProvider {
    /// Returns a handle to the compiled FreeMarker grammar.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] if the artifact cannot be located or read.
    fn language(&self) -> Result<GrammarHandle, ProviderError>;
}

/// Errors raised while obtaining a grammar artifact.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// No artifact was found in any searched location.
    #[error("grammar artifact {ARTIFACT_FILENAME} not found (searched {0} directories)")]
    NotFound(usize),

    /// The artifact exists but could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads an artifact from an explicit filesystem path.
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    /// Creates a provider for the artifact at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this provider reads from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GrammarProvider for FileProvider {
    fn language(&self) -> Result<GrammarHandle, ProviderError> {
        let bytes = std::fs::read(&self.path)?;
        Ok(GrammarHandle::from_bytes(bytes))
    }
}

/// Serves an in-memory artifact.
///
/// Useful for bundled grammar data and for tests that fabricate artifacts
/// with [`encode_artifact`](crate::artifact::encode_artifact).
#[derive(Debug, Clone)]
pub struct StaticProvider {
    bytes: Vec<u8>,
}

impl StaticProvider {
    /// Creates a provider over raw artifact bytes.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl GrammarProvider for StaticProvider {
    fn language(&self) -> Result<GrammarHandle, ProviderError> {
        Ok(GrammarHandle::from_bytes(self.bytes.clone()))
    }
}

/// Discovers the artifact in the runtime search paths.
///
/// The first readable `freemarker.ftlg` wins; see [`artifact_search_paths`]
/// for the probe order.
#[derive(Debug, Clone, Default)]
pub struct RuntimeProvider;

impl RuntimeProvider {
    /// Creates a runtime-directory provider.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl GrammarProvider for RuntimeProvider {
    fn language(&self) -> Result<GrammarHandle, ProviderError> {
        let dirs = artifact_search_paths();
        for dir in &dirs {
            let candidate = dir.join(ARTIFACT_FILENAME);
            if candidate.is_file() {
                let bytes = std::fs::read(&candidate)?;
                return Ok(GrammarHandle::from_bytes(bytes));
            }
        }
        Err(ProviderError::NotFound(dirs.len()))
    }
}

/// Returns runtime directories where grammar artifacts are searched.
/// Order: `FTLCHECK_RUNTIME` env, user config dir, user data dir, exe-relative.
#[must_use]
pub fn artifact_search_paths() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    // Development: check FTLCHECK_RUNTIME env var first
    if let Ok(runtime) = std::env::var("FTLCHECK_RUNTIME") {
        dirs.push(PathBuf::from(runtime).join("grammars"));
    }

    // User config directory: ~/.config/ftlcheck/grammars/
    if let Some(config_dir) = config_dir() {
        dirs.push(config_dir.join("ftlcheck").join("grammars"));
    }

    if let Some(data_dir) = data_local_dir() {
        dirs.push(data_dir.join("ftlcheck").join("grammars"));
    }

    // Bundled artifacts relative to the executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.join("grammars"));
            // Also check ../share/ftlcheck/grammars for installed packages
            dirs.push(
                exe_dir
                    .join("..")
                    .join("share")
                    .join("ftlcheck")
                    .join("grammars"),
            );
        }
    }

    dirs
}

// Minimal platform-specific directory helpers
fn config_dir() -> Option<PathBuf> {
    #[cfg(unix)]
    {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
    }
    #[cfg(windows)]
    {
        std::env::var_os("APPDATA").map(PathBuf::from)
    }
    #[cfg(not(any(unix, windows)))]
    {
        None
    }
}

fn data_local_dir() -> Option<PathBuf> {
    #[cfg(unix)]
    {
        std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local").join("share"))
            })
    }
    #[cfg(windows)]
    {
        std::env::var_os("LOCALAPPDATA").map(PathBuf::from)
    }
    #[cfg(not(any(unix, windows)))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::encode_artifact;

    #[test]
    fn test_search_paths_not_empty() {
        // Should have at least the exe-relative path
        let dirs = artifact_search_paths();
        assert!(!dirs.is_empty());
    }

    #[test]
    fn test_file_provider_missing_file() {
        let provider = FileProvider::new("/nonexistent/freemarker.ftlg");
        assert!(matches!(provider.language(), Err(ProviderError::Io(_))));
    }

    #[test]
    fn test_static_provider_round_trip() {
        let bytes = encode_artifact("{}");
        let provider = StaticProvider::from_bytes(bytes.clone());
        let handle = provider.language().unwrap();
        assert_eq!(handle.size(), bytes.len());
    }
}
