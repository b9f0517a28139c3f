//! Bridge to the host editor
//!
//! The controller only talks to the editor through [`EditorHost`], so the same
//! command flow runs against the terminal host shipped with the binary or a
//! scripted host in tests.

use crate::file::error::{FileError, FileResult};
use std::path::{Path, PathBuf};

pub mod terminal;

pub use terminal::TerminalHost;

/// Options for a single-line input prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBoxOptions {
    /// Question shown to the user
    pub prompt: String,
    /// Pre-filled value
    pub value: String,
    /// Byte span of `value` to pre-select
    pub value_selection: (usize, usize),
}

/// A document opened by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    pub path: PathBuf,
}

/// Operations the host editor provides
#[allow(async_fn_in_trait)]
pub trait EditorHost {
    /// Ask the user for a line of text. `None` means the prompt was dismissed.
    async fn show_input_box(&mut self, options: InputBoxOptions) -> Option<String>;

    async fn show_information_message(&mut self, message: &str);

    async fn show_error_message(&mut self, message: &str);

    /// Load a document from disk
    async fn open_text_document(&mut self, path: &Path) -> FileResult<TextDocument>;

    /// Bring a loaded document into view
    async fn show_text_document(&mut self, document: TextDocument) -> FileResult<()>;
}

/// Message shown when a target turns out to be a directory
pub fn directory_message() -> String {
    FileError::IsDirectory(PathBuf::new()).to_string()
}

/// Open and show every path, skipping directories with a message.
///
/// Returns the documents that were shown.
pub async fn open_files_in_editor<H: EditorHost>(
    host: &mut H,
    paths: &[PathBuf],
) -> FileResult<Vec<TextDocument>> {
    let mut shown = Vec::with_capacity(paths.len());

    for path in paths {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| FileError::io(path, e))?;

        if metadata.is_dir() {
            tracing::info!("{:?} is a directory, not opening it", path);
            host.show_information_message(&directory_message()).await;
            continue;
        }

        let document = host.open_text_document(path).await?;
        host.show_text_document(document.clone()).await?;
        shown.push(document);
    }

    Ok(shown)
}
