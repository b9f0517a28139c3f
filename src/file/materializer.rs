use crate::app::config::Settings;
use crate::file::error::{FileError, FileResult};
use crate::util::brace_expansion::expand_braces;
use crate::util::paths::{expand_tilde, resolve_against};
use futures_util::future::try_join_all;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Creates target files on disk, seeding them from templates
pub struct FileMaterializer<'a> {
    settings: &'a Settings,
}

impl<'a> FileMaterializer<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Create every file named by `target`.
    ///
    /// With `expand_braces` enabled the target is brace-expanded first and
    /// all files are created concurrently. The first failure fails the batch.
    pub async fn create_files(&self, target: &Path) -> FileResult<Vec<PathBuf>> {
        if !self.settings.expand_braces {
            return Ok(vec![self.create_file(target).await?]);
        }

        let targets: Vec<PathBuf> = match target.to_str() {
            Some(pattern) => expand_braces(pattern)?
                .into_iter()
                .map(PathBuf::from)
                .collect(),
            None => vec![target.to_path_buf()],
        };

        try_join_all(targets.iter().map(|path| self.create_file(path))).await
    }

    /// Create a single file unless it already exists.
    ///
    /// Missing parent directories are created. Existing files are never
    /// touched, and the input path is returned either way. The file is opened
    /// with `create_new`, so a file appearing after the existence check is
    /// still left alone.
    pub async fn create_file(&self, path: &Path) -> FileResult<PathBuf> {
        let exists = tokio::fs::try_exists(path)
            .await
            .map_err(|e| FileError::io(path, e))?;
        if exists {
            tracing::debug!("{:?} already exists, leaving it untouched", path);
            return Ok(path.to_path_buf());
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| FileError::io(parent, e))?;
        }

        let content = self.template_content(path).await?;

        let mut file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!("{:?} already exists, leaving it untouched", path);
                return Ok(path.to_path_buf());
            }
            Err(e) => return Err(FileError::io(path, e)),
        };
        file.write_all(content.as_bytes())
            .await
            .map_err(|e| FileError::io(path, e))?;
        file.flush().await.map_err(|e| FileError::io(path, e))?;

        tracing::info!("Created {:?} ({} bytes)", path, content.len());
        Ok(path.to_path_buf())
    }

    /// Template file configured for the extension of `path`, if any
    pub fn template_path(&self, path: &Path) -> Option<PathBuf> {
        if !self.settings.use_file_templates {
            return None;
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext))?;
        let template = self.settings.template_for(&extension)?;

        Some(resolve_against(
            &self.settings.root_directory_path(),
            &expand_tilde(template),
        ))
    }

    async fn template_content(&self, path: &Path) -> FileResult<String> {
        match self.template_path(path) {
            Some(template) => {
                tracing::debug!("Seeding {:?} from template {:?}", path, template);
                tokio::fs::read_to_string(&template)
                    .await
                    .map_err(|e| FileError::template_read(template, e))
            }
            None => Ok(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn settings_with_root(root: &Path) -> Settings {
        Settings {
            root_directory: root.display().to_string(),
            ..Settings::default()
        }
    }

    #[tokio::test]
    async fn test_create_new_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let settings = settings_with_root(temp_dir.path());
        let materializer = FileMaterializer::new(&settings);

        let path = temp_dir.path().join("newFile.ts");
        let created = materializer.create_file(&path).await.unwrap();

        assert_eq!(created, path);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[tokio::test]
    async fn test_existing_file_is_preserved() {
        let temp_dir = TempDir::new().unwrap();
        let settings = settings_with_root(temp_dir.path());
        let materializer = FileMaterializer::new(&settings);

        let path = temp_dir.path().join("existingFile.ts");
        std::fs::write(&path, "Existing File!").unwrap();

        let created = materializer.create_file(&path).await.unwrap();

        assert_eq!(created, path);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Existing File!");
    }

    #[tokio::test]
    async fn test_missing_parents_are_created() {
        let temp_dir = TempDir::new().unwrap();
        let settings = settings_with_root(temp_dir.path());
        let materializer = FileMaterializer::new(&settings);

        let path = temp_dir.path().join("nested").join("deeper").join("newFile.ts");
        materializer.create_file(&path).await.unwrap();

        assert!(path.is_file());
        assert!(temp_dir.path().join("nested").join("deeper").is_dir());
    }

    #[tokio::test]
    async fn test_template_seeds_content() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("templates")).unwrap();
        std::fs::write(
            temp_dir.path().join("templates").join("rust.rs"),
            "fn main() {}\n",
        )
        .unwrap();

        let mut settings = settings_with_root(temp_dir.path());
        settings
            .file_templates
            .insert(".rs".to_string(), "templates/rust.rs".to_string());
        let materializer = FileMaterializer::new(&settings);

        let path = temp_dir.path().join("bin.rs");
        materializer.create_file(&path).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fn main() {}\n");

        // Other extensions stay empty
        let other = temp_dir.path().join("notes.md");
        materializer.create_file(&other).await.unwrap();
        assert_eq!(std::fs::read_to_string(&other).unwrap(), "");
    }

    #[tokio::test]
    async fn test_templates_disabled() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("rust.tpl"), "// template\n").unwrap();

        let mut settings = settings_with_root(temp_dir.path());
        settings
            .file_templates
            .insert("rs".to_string(), "rust.tpl".to_string());
        settings.use_file_templates = false;
        let materializer = FileMaterializer::new(&settings);

        let path = temp_dir.path().join("lib.rs");
        assert_eq!(materializer.template_path(&path), None);
        materializer.create_file(&path).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[tokio::test]
    async fn test_missing_template_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut settings = settings_with_root(temp_dir.path());
        settings
            .file_templates
            .insert(".rs".to_string(), "absent.tpl".to_string());
        let materializer = FileMaterializer::new(&settings);

        let err = materializer
            .create_file(&temp_dir.path().join("lib.rs"))
            .await
            .unwrap_err();
        assert!(matches!(err, FileError::TemplateRead { .. }));
    }

    #[tokio::test]
    async fn test_create_files_expands_braces() {
        let temp_dir = TempDir::new().unwrap();
        let mut settings = settings_with_root(temp_dir.path());
        settings.expand_braces = true;
        let materializer = FileMaterializer::new(&settings);

        let pattern = temp_dir.path().join("file{1,2}.txt");
        let created = materializer.create_files(&pattern).await.unwrap();

        assert_eq!(
            created,
            vec![
                temp_dir.path().join("file1.txt"),
                temp_dir.path().join("file2.txt"),
            ]
        );
        assert!(created.iter().all(|p| p.is_file()));
        assert!(!pattern.exists());
    }

    #[tokio::test]
    async fn test_duplicate_expansions_write_template_once() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("rust.tpl"), "TEMPLATE\n").unwrap();

        let mut settings = settings_with_root(temp_dir.path());
        settings.expand_braces = true;
        settings
            .file_templates
            .insert(".rs".to_string(), "rust.tpl".to_string());
        let materializer = FileMaterializer::new(&settings);

        let created = materializer
            .create_files(&temp_dir.path().join("d{a,a,a,a}.rs"))
            .await
            .unwrap();

        assert_eq!(created, vec![temp_dir.path().join("da.rs")]);
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("da.rs")).unwrap(),
            "TEMPLATE\n"
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creation_writes_template_once() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("rust.tpl"), "TEMPLATE\n").unwrap();

        let mut settings = settings_with_root(temp_dir.path());
        settings
            .file_templates
            .insert(".rs".to_string(), "rust.tpl".to_string());
        let materializer = FileMaterializer::new(&settings);

        for i in 0..20 {
            let path = temp_dir.path().join(format!("d{}.rs", i));
            let created = try_join_all((0..4).map(|_| materializer.create_file(&path)))
                .await
                .unwrap();

            assert_eq!(created, vec![path.clone(); 4]);
            assert_eq!(std::fs::read_to_string(&path).unwrap(), "TEMPLATE\n");
        }
    }

    #[tokio::test]
    async fn test_failed_name_fails_the_batch() {
        let temp_dir = TempDir::new().unwrap();
        // A plain file where a directory is needed
        std::fs::write(temp_dir.path().join("blocker"), "").unwrap();

        let mut settings = settings_with_root(temp_dir.path());
        settings.expand_braces = true;
        let materializer = FileMaterializer::new(&settings);

        let err = materializer
            .create_files(&temp_dir.path().join("{ok,blocker/child}.txt"))
            .await
            .unwrap_err();

        assert!(matches!(err, FileError::Io { .. }));
        assert!(temp_dir.path().join("blocker").is_file());
    }

    #[tokio::test]
    async fn test_create_files_without_expansion_is_literal() {
        let temp_dir = TempDir::new().unwrap();
        let settings = settings_with_root(temp_dir.path());
        let materializer = FileMaterializer::new(&settings);

        let pattern = temp_dir.path().join("file{1,2}.txt");
        let created = materializer.create_files(&pattern).await.unwrap();

        assert_eq!(created, vec![pattern.clone()]);
        assert!(pattern.is_file());
    }
}
