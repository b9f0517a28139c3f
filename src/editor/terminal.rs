use super::{EditorHost, InputBoxOptions, TextDocument};
use crate::file::error::{FileError, FileResult};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Host for a terminal session.
///
/// Prompts on stdin/stderr and opens documents by running an editor command.
/// Without an editor command, showing a document is a no-op.
pub struct TerminalHost {
    editor: Option<String>,
    /// Answer for the next input box, used instead of prompting
    preset_entry: Option<String>,
}

impl TerminalHost {
    pub fn new(editor: Option<String>, preset_entry: Option<String>) -> Self {
        Self {
            editor,
            preset_entry,
        }
    }

    /// Editor command from settings, then `$VISUAL`, then `$EDITOR`
    pub fn resolve_editor_command(configured: Option<&str>) -> Option<String> {
        configured
            .map(str::to_string)
            .or_else(|| std::env::var("VISUAL").ok())
            .or_else(|| std::env::var("EDITOR").ok())
            .map(|cmd| cmd.trim().to_string())
            .filter(|cmd| !cmd.is_empty())
    }

    pub fn editor(&self) -> Option<&str> {
        self.editor.as_deref()
    }
}

impl EditorHost for TerminalHost {
    async fn show_input_box(&mut self, options: InputBoxOptions) -> Option<String> {
        if let Some(entry) = self.preset_entry.take() {
            tracing::debug!("Using preset entry {:?}", entry);
            return Some(entry);
        }

        let mut stderr = tokio::io::stderr();
        let question = format!("{}\n[{}] > ", options.prompt, options.value);
        if let Err(e) = stderr.write_all(question.as_bytes()).await {
            tracing::warn!("Failed to write prompt: {}", e);
        }
        if let Err(e) = stderr.flush().await {
            tracing::warn!("Failed to flush prompt: {}", e);
        }

        let mut line = String::new();
        let mut reader = BufReader::new(tokio::io::stdin());
        match reader.read_line(&mut line).await {
            // EOF dismisses the prompt
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                tracing::warn!("Failed to read from stdin: {}", e);
                None
            }
        }
    }

    async fn show_information_message(&mut self, message: &str) {
        eprintln!("{}", message);
    }

    async fn show_error_message(&mut self, message: &str) {
        eprintln!("Error: {}", message);
    }

    async fn open_text_document(&mut self, path: &Path) -> FileResult<TextDocument> {
        tokio::fs::File::open(path)
            .await
            .map_err(|e| FileError::open(path, e.to_string()))?;
        Ok(TextDocument {
            path: path.to_path_buf(),
        })
    }

    async fn show_text_document(&mut self, document: TextDocument) -> FileResult<()> {
        let Some(editor) = self.editor.as_deref() else {
            tracing::debug!("No editor command configured, not opening {:?}", document.path);
            return Ok(());
        };

        let mut parts = editor.split_whitespace();
        let Some(program) = parts.next() else {
            return Ok(());
        };

        tracing::debug!("Opening {:?} with {}", document.path, editor);
        let status = tokio::process::Command::new(program)
            .args(parts)
            .arg(&document.path)
            .status()
            .await
            .map_err(|e| FileError::open(&document.path, format!("failed to run {}: {}", program, e)))?;

        if !status.success() {
            return Err(FileError::open(
                &document.path,
                format!("{} exited with {}", program, status),
            ));
        }
        Ok(())
    }
}
