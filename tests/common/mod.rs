use newfile::app::config::{RelativeTo, Settings, ShowPathRelativeTo};
use newfile::editor::{EditorHost, InputBoxOptions, TextDocument};
use newfile::file::error::{FileError, FileResult};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Host that answers prompts from a script and records every call
#[derive(Debug, Default)]
pub struct ScriptedHost {
    /// Answers for successive input boxes; `None` dismisses the prompt
    pub answers: VecDeque<Option<String>>,
    pub prompts: Vec<InputBoxOptions>,
    pub info_messages: Vec<String>,
    pub error_messages: Vec<String>,
    pub shown: Vec<PathBuf>,
    /// Make `show_text_document` fail
    pub fail_show: bool,
}

impl ScriptedHost {
    pub fn answering(answer: &str) -> Self {
        Self {
            answers: VecDeque::from([Some(answer.to_string())]),
            ..Self::default()
        }
    }

    pub fn dismissing() -> Self {
        Self {
            answers: VecDeque::from([None]),
            ..Self::default()
        }
    }
}

impl EditorHost for ScriptedHost {
    async fn show_input_box(&mut self, options: InputBoxOptions) -> Option<String> {
        self.prompts.push(options);
        self.answers.pop_front().flatten()
    }

    async fn show_information_message(&mut self, message: &str) {
        self.info_messages.push(message.to_string());
    }

    async fn show_error_message(&mut self, message: &str) {
        self.error_messages.push(message.to_string());
    }

    async fn open_text_document(&mut self, path: &Path) -> FileResult<TextDocument> {
        Ok(TextDocument {
            path: path.to_path_buf(),
        })
    }

    async fn show_text_document(&mut self, document: TextDocument) -> FileResult<()> {
        if self.fail_show {
            return Err(FileError::open(&document.path, "Could not show document!"));
        }
        self.shown.push(document.path);
        Ok(())
    }
}

/// Temporary project with a `.git` marker, a `src/main.rs` and an
/// `existingFile.ts` holding known content
pub struct TestWorkspace {
    pub dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src").join("main.rs"), "fn main() {}\n").unwrap();
        std::fs::write(dir.path().join("existingFile.ts"), "Existing File!").unwrap();
        Self { dir }
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative)).unwrap()
    }
}

/// Settings with a fixed root directory and the given rules
pub fn create_test_settings(
    root_directory: &Path,
    relative_to: RelativeTo,
    show_path_relative_to: ShowPathRelativeTo,
) -> Settings {
    Settings {
        root_directory: root_directory.display().to_string(),
        relative_to,
        show_path_relative_to,
        ..Settings::default()
    }
}
