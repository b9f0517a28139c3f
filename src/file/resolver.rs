//! Path resolution policy
//!
//! Decides the base directory for a new file and turns the text the user
//! typed into an absolute target path.
//!
//! Base directory selection (`relative_to`):
//!
//! | setting   | first choice          | fallback                          |
//! |-----------|-----------------------|-----------------------------------|
//! | `file`    | active file directory | workspace root, `root_directory`  |
//! | `project` | workspace root        | `root_directory`                  |
//! | `root`    | `root_directory`      |                                   |

use crate::app::config::{RelativeTo, Settings, ShowPathRelativeTo};
use crate::app::context::EditorContext;
use crate::file::error::{FileError, FileResult};
use crate::util::paths::{expand_tilde, normalize_path, resolve_against};
use std::path::{Path, PathBuf};

const BASE_PROMPT: &str = "What's the path and name of the new file?";

pub struct PathResolver<'a> {
    settings: &'a Settings,
    context: &'a EditorContext,
}

impl<'a> PathResolver<'a> {
    pub fn new(settings: &'a Settings, context: &'a EditorContext) -> Self {
        Self { settings, context }
    }

    /// Base directory for a command started from the palette or a keybinding
    pub fn determine_root(&self) -> PathBuf {
        let preferred = match self.settings.relative_to {
            RelativeTo::Project => self.context.workspace_root.clone(),
            RelativeTo::File => self
                .context
                .active_dir()
                .map(Path::to_path_buf)
                .or_else(|| {
                    tracing::debug!("No active editor, falling back to workspace root");
                    self.context.workspace_root.clone()
                }),
            RelativeTo::Root => None,
        };

        match preferred {
            Some(root) => {
                tracing::debug!("Resolved root {:?} ({})", root, self.settings.relative_to);
                root
            }
            None => {
                let root = self.settings.root_directory_path();
                tracing::debug!("Using configured root directory {:?}", root);
                root
            }
        }
    }

    /// Base directory for a command started on an explorer entry.
    ///
    /// A directory is its own root; a file's root is its parent.
    pub async fn root_from_explorer_path(&self, path: &Path) -> FileResult<PathBuf> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| FileError::io(path, e))?;

        let dir = if metadata.is_dir() {
            path.to_path_buf()
        } else {
            path.parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("/"))
        };

        tracing::debug!("Explorer root for {:?} is {:?}", path, dir);
        Ok(normalize_path(&dir))
    }

    /// Value suggested in the input box
    pub fn default_file_value(&self, root: &Path) -> String {
        let extension = self
            .context
            .active_extension()
            .unwrap_or_else(|| self.settings.default_file_extension.clone());
        let file_name = format!("{}{}", self.settings.default_base_file_name, extension);

        match self.settings.show_path_relative_to {
            ShowPathRelativeTo::None => file_name,
            ShowPathRelativeTo::Root => root.join(&file_name).display().to_string(),
            ShowPathRelativeTo::Project => {
                let full_path = root.join(&file_name);
                match self.context.workspace_root.as_deref() {
                    Some(workspace) => match full_path.strip_prefix(workspace) {
                        Ok(relative) => relative.display().to_string(),
                        Err(_) => full_path.display().to_string(),
                    },
                    None => full_path.display().to_string(),
                }
            }
        }
    }

    /// Question shown in the input box
    pub fn prompt(&self, from_explorer: bool) -> String {
        let suffix = if from_explorer {
            " (Relative to selected file)"
        } else {
            match (self.settings.show_path_relative_to, self.settings.relative_to) {
                (ShowPathRelativeTo::None, RelativeTo::Project) => " (Relative to project root)",
                (ShowPathRelativeTo::None, RelativeTo::File) => " (Relative to current file)",
                (ShowPathRelativeTo::Project, _) => " (Relative to project root)",
                _ => "",
            }
        };
        format!("{}{}", BASE_PROMPT, suffix)
    }

    /// Byte span of the base file name in `value`, used to pre-select it
    pub fn selection_bounds(value: &str) -> (usize, usize) {
        let start = value.rfind('/').map_or(0, |i| i + 1);
        let end = match value.rfind('.') {
            Some(dot) if dot > start => dot,
            _ => value.len(),
        };
        (start, end)
    }

    /// Turn the text entered in the input box into an absolute path.
    ///
    /// An empty entry means the suggested `default_value` was accepted.
    pub fn resolve_entry(&self, entry: &str, default_value: &str, root: &Path) -> PathBuf {
        let entry = if entry.is_empty() { default_value } else { entry };

        let resolved = if entry.starts_with("./") {
            self.normalize_dot_path(entry, root)
        } else if self.settings.show_path_relative_to == ShowPathRelativeTo::Project {
            let base = self.context.workspace_root.as_deref().unwrap_or(root);
            self.full_path(base, entry)
        } else {
            self.full_path(root, entry)
        };

        tracing::debug!("Resolved entry {:?} to {:?}", entry, resolved);
        resolved
    }

    /// `./` paths are relative to the active file, else the workspace root
    fn normalize_dot_path(&self, entry: &str, root: &Path) -> PathBuf {
        let base = self
            .context
            .active_dir()
            .or(self.context.workspace_root.as_deref())
            .unwrap_or(root);
        resolve_against(base, Path::new(entry))
    }

    fn full_path(&self, root: &Path, entry: &str) -> PathBuf {
        if entry.starts_with('~') {
            return normalize_path(&expand_tilde(entry));
        }
        resolve_against(root, Path::new(entry))
    }
}
