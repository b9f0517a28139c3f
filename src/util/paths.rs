use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

// Global config directory override (for --config flag and tests)
static CONFIG_DIR_OVERRIDE: RwLock<Option<PathBuf>> = RwLock::new(None);

/// Set config directory override (used by --config flag and tests)
pub fn set_config_dir_override(path: Option<PathBuf>) {
    let mut override_path = CONFIG_DIR_OVERRIDE
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *override_path = path;
}

/// Get current config directory override
pub fn get_config_dir_override() -> Option<PathBuf> {
    CONFIG_DIR_OVERRIDE
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// Find config directory by searching in priority order:
/// 1. Override from --config flag or set_config_dir_override() (highest priority)
/// 2. Environment variable NEWFILE_CONFIG_DIR
/// 3. User config directory (`~/.config/newfile/` on Unix, `%APPDATA%\newfile\` on Windows)
/// 4. Current working directory (`./config/`)
/// 5. Executable directory (`<exe_dir>/config/`)
///
/// If no config directory is found, falls back to the user config directory
/// without creating it. Reading settings from a missing directory yields defaults.
pub fn find_config_directory() -> Result<PathBuf> {
    // Priority 1: Override from --config flag or tests
    if let Some(override_path) = get_config_dir_override() {
        if override_path.exists() || std::env::var("NEWFILE_TEST_MODE").is_ok() {
            tracing::debug!("Using config directory override: {:?}", override_path);
            return Ok(override_path);
        }
        tracing::warn!("Config directory override does not exist: {:?}", override_path);
    }

    // Priority 2: Environment variable
    if let Ok(env_path) = std::env::var("NEWFILE_CONFIG_DIR") {
        let env_config = PathBuf::from(env_path);
        if env_config.exists() {
            tracing::debug!("Found config directory from NEWFILE_CONFIG_DIR: {:?}", env_config);
            return Ok(env_config);
        }
    }

    // Priority 3: User config directory (platform standard location)
    if let Ok(user_config) = get_user_config_dir() {
        if user_config.exists() {
            tracing::debug!("Found config directory at: {:?}", user_config);
            return Ok(user_config);
        }
    }

    // Priority 4: Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        let cwd_config = cwd.join("config");
        if cwd_config.exists() {
            tracing::debug!("Found config directory at: {:?}", cwd_config);
            return Ok(cwd_config);
        }
    }

    // Priority 5: Executable directory
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let exe_config = exe_dir.join("config");
            if exe_config.exists() {
                tracing::debug!("Found config directory at: {:?}", exe_config);
                return Ok(exe_config);
            }
        }
    }

    get_user_config_dir()
}

/// Get platform-specific user config directory
/// - Windows: `%APPDATA%\newfile`
/// - Unix: `~/.config/newfile`
fn get_user_config_dir() -> Result<PathBuf> {
    let base_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine user config directory"))?;
    Ok(base_dir.join("newfile"))
}

/// Get absolute path to settings.toml
pub fn get_settings_path() -> Result<PathBuf> {
    let config_dir = find_config_directory()?;
    Ok(config_dir.join("settings.toml"))
}

/// Get absolute path to application-wide logs directory, creating it if needed
pub fn get_logs_dir() -> Result<PathBuf> {
    let config_dir = find_config_directory()?;
    let logs_dir = config_dir.join(".logs");
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create logs directory {:?}", logs_dir))?;
    Ok(logs_dir)
}

/// Current user's home directory, `/` when it cannot be determined
pub fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine home directory, using filesystem root");
        PathBuf::from("/")
    })
}

/// Replace a leading `~` with the home directory.
///
/// `~`, `~/docs` and `~docs` all resolve below the home directory; any other
/// path is returned unchanged.
pub fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        // `~docs` is an entry in the home directory, not another user's home
        Some(rest) if !rest.is_empty() && !rest.starts_with(std::path::is_separator) => {
            home_dir().join(rest)
        }
        _ => PathBuf::from(shellexpand::tilde_with_context(path, || Some(home_dir().to_string_lossy().into_owned())).as_ref()),
    }
}

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding component. Does not touch the file system.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push("..");
                }
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}

/// Join `path` onto `base` unless it is already absolute, then normalize.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(&base.join(path))
    }
}

/// Find the nearest ancestor of `start` (inclusive) that looks like a project root.
///
/// A directory qualifies when it contains a `.git` entry.
pub fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    // Helper function to ensure clean test state
    fn reset_test_state() {
        set_config_dir_override(None);
        unsafe { std::env::remove_var("NEWFILE_TEST_MODE") };
        unsafe { std::env::remove_var("NEWFILE_CONFIG_DIR") };
    }

    #[test]
    #[serial]
    fn test_get_settings_path() {
        reset_test_state();
        let temp_dir = TempDir::new().unwrap();
        let config_dir = temp_dir.path().to_path_buf();

        set_config_dir_override(Some(config_dir.clone()));
        unsafe { std::env::set_var("NEWFILE_TEST_MODE", "1") };

        let path = get_settings_path().unwrap();
        assert_eq!(path, config_dir.join("settings.toml"));

        reset_test_state();
    }

    #[test]
    #[serial]
    fn test_config_dir_override() {
        reset_test_state();
        let temp_dir = TempDir::new().unwrap();
        let config_dir = temp_dir.path().to_path_buf();

        set_config_dir_override(Some(config_dir.clone()));

        let found_dir = find_config_directory().unwrap();
        assert_eq!(found_dir, config_dir);

        reset_test_state();
    }

    #[test]
    #[serial]
    fn test_config_dir_from_env_variable() {
        reset_test_state();

        let temp_dir = TempDir::new().unwrap();
        let config_dir = temp_dir.path().to_path_buf();
        fs::create_dir_all(&config_dir).unwrap();

        unsafe { std::env::set_var("NEWFILE_CONFIG_DIR", config_dir.to_str().unwrap()) };

        let found_dir = find_config_directory().unwrap();
        assert_eq!(found_dir, config_dir);

        reset_test_state();
    }

    #[test]
    #[serial]
    fn test_logs_dir_is_created() {
        reset_test_state();
        let temp_dir = TempDir::new().unwrap();
        set_config_dir_override(Some(temp_dir.path().to_path_buf()));

        let logs_dir = get_logs_dir().unwrap();
        assert_eq!(logs_dir, temp_dir.path().join(".logs"));
        assert!(logs_dir.is_dir());

        reset_test_state();
    }

    #[test]
    fn test_get_user_config_dir_returns_valid_path() {
        let user_dir = get_user_config_dir().unwrap();
        assert!(user_dir.to_str().unwrap().contains("newfile"));
    }

    #[test]
    fn test_expand_tilde() {
        let home = home_dir();
        assert_eq!(expand_tilde("~"), home);
        assert_eq!(expand_tilde("~/notes"), home.join("notes"));
        assert_eq!(expand_tilde("~notes"), home.join("notes"));
        assert_eq!(expand_tilde("~/a/b.md"), home.join("a").join("b.md"));
        assert_eq!(expand_tilde("docs/~/x"), PathBuf::from("docs/~/x"));
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
        assert_eq!(expand_tilde("rel/path"), PathBuf::from("rel/path"));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("/a/b/../c/./d.rs")),
            PathBuf::from("/a/c/d.rs")
        );
        assert_eq!(normalize_path(Path::new("/../x")), PathBuf::from("/x"));
        assert_eq!(normalize_path(Path::new("a/../../b")), PathBuf::from("../b"));
    }

    #[test]
    fn test_resolve_against() {
        let base = Path::new("/work/src");
        assert_eq!(
            resolve_against(base, Path::new("../lib/mod.rs")),
            PathBuf::from("/work/lib/mod.rs")
        );
        assert_eq!(
            resolve_against(base, Path::new("/etc/hosts")),
            PathBuf::from("/etc/hosts")
        );
    }

    #[test]
    fn test_find_workspace_root() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("project");
        let nested = project.join("src").join("deep");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir_all(project.join(".git")).unwrap();

        assert_eq!(find_workspace_root(&nested), Some(project.clone()));
        assert_eq!(find_workspace_root(&project), Some(project));
    }
}
