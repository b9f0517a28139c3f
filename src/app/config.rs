use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Notice shown once when the deprecated `show_full_path` option is set
pub const SHOW_FULL_PATH_DEPRECATION: &str =
    "You are using a deprecated option \"show_full_path\". Switch instead to \"show_path_relative_to\"";

/// Base directory rule for resolving typed paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativeTo {
    /// The configured `root_directory`
    Root,
    /// The workspace (project) root
    Project,
    /// The directory of the active file
    File,
}

/// How the suggested path is displayed in the input box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowPathRelativeTo {
    /// Full absolute path
    Root,
    /// Path relative to the workspace root
    Project,
    /// Only the file name
    None,
}

impl fmt::Display for RelativeTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "root"),
            Self::Project => write!(f, "project"),
            Self::File => write!(f, "file"),
        }
    }
}

impl FromStr for RelativeTo {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "root" => Ok(Self::Root),
            "project" => Ok(Self::Project),
            "file" => Ok(Self::File),
            _ => Err(anyhow::anyhow!(
                "Invalid relative_to value: {} (expected root, project or file)",
                s
            )),
        }
    }
}

impl fmt::Display for ShowPathRelativeTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "root"),
            Self::Project => write!(f, "project"),
            Self::None => write!(f, "none"),
        }
    }
}

impl FromStr for ShowPathRelativeTo {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "root" => Ok(Self::Root),
            "project" => Ok(Self::Project),
            "none" => Ok(Self::None),
            _ => Err(anyhow::anyhow!(
                "Invalid show_path_relative_to value: {} (expected root, project or none)",
                s
            )),
        }
    }
}

/// User preferences (saved to config/settings.toml)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub show_path_relative_to: ShowPathRelativeTo,
    pub relative_to: RelativeTo,
    /// Fallback base directory; a leading `~` means the home directory
    pub root_directory: String,
    pub default_file_extension: String,
    pub default_base_file_name: String,
    pub expand_braces: bool,
    pub use_file_templates: bool,
    /// Command used by the terminal host to open files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
    /// Deprecated: replaced by `show_path_relative_to = "root"`
    #[serde(skip_serializing)]
    pub show_full_path: Option<bool>,
    /// Extension (with or without leading dot) -> template path
    pub file_templates: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_path_relative_to: ShowPathRelativeTo::Root,
            relative_to: RelativeTo::File,
            root_directory: "~".to_string(),
            default_file_extension: ".ts".to_string(),
            default_base_file_name: "newFile".to_string(),
            expand_braces: false,
            use_file_templates: true,
            editor: None,
            show_full_path: None,
            file_templates: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Load settings from the discovered config directory
    pub fn load() -> anyhow::Result<Self> {
        let settings_path = crate::util::paths::get_settings_path()?;
        Self::load_from(&settings_path)
    }

    /// Load settings from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        if !path.exists() {
            tracing::info!("Settings file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read {:?}", path))?;
        let mut settings: Settings = toml::from_str(&content)
            .context(format!("Failed to parse {:?}", path))?;

        settings.apply_deprecated_options();
        tracing::debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Save settings to the discovered config directory
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let settings_path = crate::util::paths::get_settings_path()?;
        self.save_to(&settings_path)?;
        Ok(settings_path)
    }

    /// Save settings to a specific file
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        use anyhow::Context;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;

        // Atomic write using temp file + rename
        let temp_path = path.with_extension("toml.tmp");
        std::fs::write(&temp_path, &content).context("Failed to write temp settings file")?;
        std::fs::rename(&temp_path, path).context("Failed to rename temp settings file")?;

        tracing::info!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Map deprecated options onto their replacements
    fn apply_deprecated_options(&mut self) {
        if self.show_full_path == Some(true) {
            tracing::warn!("Deprecated option show_full_path is set");
            self.show_path_relative_to = ShowPathRelativeTo::Root;
        }
    }

    /// Message to show the user when deprecated options are in use
    pub fn deprecation_notice(&self) -> Option<&'static str> {
        (self.show_full_path == Some(true)).then_some(SHOW_FULL_PATH_DEPRECATION)
    }

    /// `root_directory` with `~` expanded
    pub fn root_directory_path(&self) -> PathBuf {
        crate::util::paths::expand_tilde(&self.root_directory)
    }

    /// Template path configured for an extension such as `.rs`
    pub fn template_for(&self, extension: &str) -> Option<&str> {
        if extension.is_empty() {
            return None;
        }
        let bare = extension.trim_start_matches('.');
        self.file_templates
            .get(extension)
            .or_else(|| self.file_templates.get(bare))
            .or_else(|| self.file_templates.get(&format!(".{}", bare)))
            .map(String::as_str)
    }

    /// Get a setting value by key (`file_templates.<ext>` for templates)
    pub fn get_value(&self, key: &str) -> anyhow::Result<String> {
        match key.split_once('.') {
            Some(("file_templates", ext)) => self
                .template_for(ext)
                .map(str::to_string)
                .ok_or_else(|| anyhow::anyhow!("No template configured for {}", ext)),
            _ => match key {
                "show_path_relative_to" => Ok(self.show_path_relative_to.to_string()),
                "relative_to" => Ok(self.relative_to.to_string()),
                "root_directory" => Ok(self.root_directory.clone()),
                "default_file_extension" => Ok(self.default_file_extension.clone()),
                "default_base_file_name" => Ok(self.default_base_file_name.clone()),
                "expand_braces" => Ok(self.expand_braces.to_string()),
                "use_file_templates" => Ok(self.use_file_templates.to_string()),
                "editor" => Ok(self.editor.clone().unwrap_or_default()),
                _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
            },
        }
    }

    /// Set a setting value by key (`file_templates.<ext>` for templates)
    pub fn set_value(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        if let Some(("file_templates", ext)) = key.split_once('.') {
            if value.is_empty() {
                self.file_templates.remove(ext);
            } else {
                self.file_templates.insert(ext.to_string(), value.to_string());
            }
            return Ok(());
        }

        match key {
            "show_path_relative_to" => self.show_path_relative_to = value.parse()?,
            "relative_to" => self.relative_to = value.parse()?,
            "root_directory" => self.root_directory = value.to_string(),
            "default_file_extension" => self.default_file_extension = value.to_string(),
            "default_base_file_name" => self.default_base_file_name = value.to_string(),
            "expand_braces" => self.expand_braces = value.parse()?,
            "use_file_templates" => self.use_file_templates = value.parse()?,
            "editor" => {
                self.editor = (!value.is_empty()).then(|| value.to_string());
            }
            _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
        }
        Ok(())
    }
}
