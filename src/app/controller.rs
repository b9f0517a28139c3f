use crate::app::config::Settings;
use crate::app::context::EditorContext;
use crate::editor::{self, EditorHost, InputBoxOptions, TextDocument};
use crate::file::error::{FileError, FileResult};
use crate::file::materializer::FileMaterializer;
use crate::file::resolver::PathResolver;
use std::path::{Path, PathBuf};

/// Outcome of one command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Files were created (or already existed) and handed to the editor
    Completed {
        files: Vec<PathBuf>,
        opened: Vec<TextDocument>,
    },
    /// The user dismissed the prompt
    Cancelled,
    /// An error was shown to the user
    Failed(String),
}

/// Runs the new-file commands against a host editor
pub struct FileController<H: EditorHost> {
    settings: Settings,
    context: EditorContext,
    host: H,
}

impl<H: EditorHost> FileController<H> {
    pub fn new(settings: Settings, context: EditorContext, host: H) -> Self {
        Self {
            settings,
            context,
            host,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Create a file relative to the configured base directory
    pub async fn create_new_file(&mut self) -> CommandOutcome {
        let result = self.run(None).await;
        self.finish(result).await
    }

    /// Create a file relative to an entry selected in a file explorer
    pub async fn create_from_explorer(&mut self, explorer_path: &Path) -> CommandOutcome {
        let result = self.run(Some(explorer_path)).await;
        self.finish(result).await
    }

    async fn run(
        &mut self,
        explorer_path: Option<&Path>,
    ) -> FileResult<(Vec<PathBuf>, Vec<TextDocument>)> {
        if let Some(notice) = self.settings.deprecation_notice() {
            self.host.show_information_message(notice).await;
        }

        let resolver = PathResolver::new(&self.settings, &self.context);

        let root = match explorer_path {
            Some(path) => resolver.root_from_explorer_path(path).await?,
            None => resolver.determine_root(),
        };

        let default_value = resolver.default_file_value(&root);
        let options = InputBoxOptions {
            prompt: resolver.prompt(explorer_path.is_some()),
            value_selection: PathResolver::selection_bounds(&default_value),
            value: default_value.clone(),
        };

        let entry = self
            .host
            .show_input_box(options)
            .await
            .ok_or(FileError::Cancelled)?;
        let target = resolver.resolve_entry(&entry, &default_value, &root);

        let files = FileMaterializer::new(&self.settings)
            .create_files(&target)
            .await?;
        let opened = editor::open_files_in_editor(&mut self.host, &files).await?;

        Ok((files, opened))
    }

    async fn finish(
        &mut self,
        result: FileResult<(Vec<PathBuf>, Vec<TextDocument>)>,
    ) -> CommandOutcome {
        match result {
            Ok((files, opened)) => CommandOutcome::Completed { files, opened },
            Err(FileError::Cancelled) => {
                tracing::debug!("Command cancelled by user");
                CommandOutcome::Cancelled
            }
            Err(e) => {
                tracing::error!("Command failed: {}", e);
                let message = e.to_string();
                self.host.show_error_message(&message).await;
                CommandOutcome::Failed(message)
            }
        }
    }
}
