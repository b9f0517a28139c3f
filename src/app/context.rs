use std::path::{Path, PathBuf};

/// What the host editor currently has open
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorContext {
    /// File shown in the active editor, if any
    pub active_file: Option<PathBuf>,
    /// Top-level directory of the open project, if any
    pub workspace_root: Option<PathBuf>,
}

impl EditorContext {
    pub fn new(active_file: Option<PathBuf>, workspace_root: Option<PathBuf>) -> Self {
        Self {
            active_file,
            workspace_root,
        }
    }

    /// Build a context for a terminal session.
    ///
    /// Relative inputs are made absolute against `cwd`. Without an explicit
    /// workspace, the nearest ancestor of `cwd` containing `.git` is used.
    pub fn detect(
        cwd: &Path,
        active_file: Option<PathBuf>,
        workspace_root: Option<PathBuf>,
    ) -> Self {
        let active_file = active_file.map(|p| crate::util::paths::resolve_against(cwd, &p));
        let workspace_root = workspace_root
            .map(|p| crate::util::paths::resolve_against(cwd, &p))
            .or_else(|| crate::util::paths::find_workspace_root(cwd));

        tracing::debug!(
            "Editor context: active_file={:?}, workspace_root={:?}",
            active_file,
            workspace_root
        );

        Self {
            active_file,
            workspace_root,
        }
    }

    /// Directory containing the active file
    pub fn active_dir(&self) -> Option<&Path> {
        self.active_file.as_deref().and_then(Path::parent)
    }

    /// Extension of the active file including the leading dot, e.g. `.rs`
    pub fn active_extension(&self) -> Option<String> {
        self.active_file
            .as_deref()
            .and_then(Path::extension)
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .map(|ext| format!(".{}", ext))
    }
}
