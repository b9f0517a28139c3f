use super::error;
use super::output;
use super::{Commands, ConfigAction};
use crate::app::config::Settings;
use crate::app::context::EditorContext;
use crate::app::controller::{CommandOutcome, FileController};
use crate::editor::TerminalHost;
use anyhow::Result;
use std::path::PathBuf;

/// Handle a CLI command and return exit code
pub async fn handle_command(command: Commands, settings: Settings, context: EditorContext) -> i32 {
    let result = match command {
        Commands::New { entry, json } => handle_new(settings, context, None, entry, json).await,
        Commands::FromExplorer { path, entry, json } => {
            handle_new(settings, context, Some(path), entry, json).await
        }
        Commands::Config { action } => handle_config(action, settings),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            error::ERROR
        }
    }
}

/// Run the interactive new-file flow through the terminal host
async fn handle_new(
    settings: Settings,
    context: EditorContext,
    explorer_path: Option<PathBuf>,
    entry: Option<String>,
    json: bool,
) -> Result<i32> {
    let editor = TerminalHost::resolve_editor_command(settings.editor.as_deref());
    let host = TerminalHost::new(editor, entry);
    tracing::trace!("Terminal host editor: {:?}", host.editor());

    let mut controller = FileController::new(settings, context, host);

    let outcome = match explorer_path {
        Some(path) => controller.create_from_explorer(&path).await,
        None => controller.create_new_file().await,
    };

    match outcome {
        CommandOutcome::Completed { files, .. } => {
            println!("{}", output::format_created(&files, json));
            Ok(error::SUCCESS)
        }
        CommandOutcome::Cancelled => Ok(error::CANCELLED),
        // Already shown to the user by the host
        CommandOutcome::Failed(_) => Ok(error::ERROR),
    }
}

fn handle_config(action: ConfigAction, mut settings: Settings) -> Result<i32> {
    match action {
        ConfigAction::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            } else {
                println!("{}", toml::to_string_pretty(&settings)?);
            }
            Ok(error::SUCCESS)
        }
        ConfigAction::Get { key } => match settings.get_value(&key) {
            Ok(value) => {
                println!("{}", value);
                Ok(error::SUCCESS)
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                Ok(error::INVALID_INPUT)
            }
        },
        ConfigAction::Set { key, value } => {
            if let Err(e) = settings.set_value(&key, &value) {
                eprintln!("Error: {}", e);
                return Ok(error::INVALID_INPUT);
            }
            let path = settings.save()?;
            println!("Configuration updated: {} = {} ({})", key, value, path.display());
            Ok(error::SUCCESS)
        }
        ConfigAction::Path => {
            println!("{}", crate::util::paths::get_settings_path()?.display());
            Ok(error::SUCCESS)
        }
        ConfigAction::Init { force } => {
            let path = crate::util::paths::get_settings_path()?;
            if path.exists() && !force {
                eprintln!(
                    "Settings file already exists: {} (use --force to overwrite)",
                    path.display()
                );
                return Ok(error::INVALID_INPUT);
            }
            Settings::default().save_to(&path)?;
            println!("Wrote default settings to {}", path.display());
            Ok(error::SUCCESS)
        }
    }
}
