use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::env::TargetEnv;
use crate::error::Error;
use crate::model::{Entry, LoadReport, MalformedLineMode, SubstitutionMode};
use crate::parser::parse_str_with_source;
use crate::substitute::substitute;

const DEFAULT_FILE: &str = ".env";

/// Load `.env` from the current working directory into the process environment.
///
/// A missing file is not an error; check [`LoadReport::file_found`].
///
/// # Safety
///
/// Mutates the process environment. See [`TargetEnv::process`].
pub unsafe fn dotenv() -> Result<LoadReport, Error> {
    unsafe { from_path(DEFAULT_FILE) }
}

/// Load a file by name from the current working directory into the process
/// environment.
///
/// # Safety
///
/// Mutates the process environment. See [`TargetEnv::process`].
pub unsafe fn from_filename(name: &str) -> Result<LoadReport, Error> {
    unsafe { from_path(PathBuf::from(name)) }
}

/// Load a file from a specific path into the process environment.
///
/// Relative paths are resolved against the current working directory.
///
/// # Safety
///
/// Mutates the process environment. See [`TargetEnv::process`].
pub unsafe fn from_path(path: impl AsRef<Path>) -> Result<LoadReport, Error> {
    let target = unsafe { TargetEnv::process() };
    let mut loader = EnvLoader::new().path(path).target(target);
    loader.load()
}

/// Builder-style environment file loader.
#[derive(Debug, Clone)]
pub struct EnvLoader {
    path: PathBuf,
    base_dir: Option<PathBuf>,
    required: bool,
    substitution_mode: SubstitutionMode,
    malformed_line_mode: MalformedLineMode,
    target: TargetEnv,
}

impl EnvLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// File name or path to load. Defaults to `.env`.
    ///
    /// Absolute paths are used as-is; relative ones are joined onto the base
    /// directory.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = path.as_ref().to_path_buf();
        self
    }

    /// Directory relative paths are resolved against.
    ///
    /// When unset the current working directory at load time is used.
    pub fn base_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.base_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Fail with [`Error::NotFound`] instead of loading nothing when the file
    /// is absent.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn substitution_mode(mut self, substitution_mode: SubstitutionMode) -> Self {
        self.substitution_mode = substitution_mode;
        self
    }

    pub fn malformed_line_mode(mut self, malformed_line_mode: MalformedLineMode) -> Self {
        self.malformed_line_mode = malformed_line_mode;
        self
    }

    pub fn target(mut self, target: TargetEnv) -> Self {
        self.target = target;
        self
    }

    pub fn target_env(&self) -> &TargetEnv {
        &self.target
    }

    pub fn target_env_mut(&mut self) -> &mut TargetEnv {
        &mut self.target
    }

    pub fn into_target(self) -> TargetEnv {
        self.target
    }

    /// Absolute location of the file if it exists, `None` otherwise.
    pub fn resolve_path(&self) -> Result<Option<PathBuf>, Error> {
        let candidate = self.candidate_path()?;
        Ok(candidate.is_file().then_some(candidate))
    }

    /// Parse the file and resolve substitutions without writing to the target.
    ///
    /// Placeholders see earlier entries of the same file, then the target.
    pub fn parse_only(&self) -> Result<Vec<Entry>, Error> {
        let (mut entries, _) = self.collect_entries()?;
        if self.substitution_mode == SubstitutionMode::Disabled {
            return Ok(entries);
        }

        let mut overlay = HashMap::<String, String>::new();
        for entry in &mut entries {
            entry.value = substitute(&entry.value, |name| {
                overlay
                    .get(name)
                    .cloned()
                    .or_else(|| self.target.get(name))
            });
            overlay.insert(entry.key.clone(), entry.value.clone());
        }

        Ok(entries)
    }

    /// Read the file and write every entry into the target in file order,
    /// overwriting existing values.
    ///
    /// Each value is expanded against the target as it stands when its line
    /// is reached, so a placeholder only sees variables defined on earlier
    /// lines or already present in the environment. A malformed line under
    /// [`MalformedLineMode::Reject`] fails the load before anything is written.
    pub fn load(&mut self) -> Result<LoadReport, Error> {
        let (entries, mut report) = self.collect_entries()?;

        for entry in entries {
            let value = match self.substitution_mode {
                SubstitutionMode::Disabled => entry.value,
                SubstitutionMode::Expand => {
                    substitute(&entry.value, |name| self.target.get(name))
                }
            };

            tracing::trace!(key = %entry.key, line = entry.line, "setting variable");
            self.target.set(&entry.key, &value);
            report.loaded += 1;
        }

        tracing::debug!(
            path = ?report.path,
            loaded = report.loaded,
            skipped_malformed = report.skipped_malformed,
            "environment file loaded"
        );
        Ok(report)
    }

    fn candidate_path(&self) -> Result<PathBuf, Error> {
        if self.path.is_absolute() {
            return Ok(self.path.clone());
        }

        let base = match &self.base_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().map_err(Error::CurrentDir)?,
        };
        Ok(base.join(&self.path))
    }

    fn collect_entries(&self) -> Result<(Vec<Entry>, LoadReport), Error> {
        let Some(path) = self.resolve_path()? else {
            let candidate = self.candidate_path()?;
            if self.required {
                return Err(Error::NotFound { path: candidate });
            }
            tracing::debug!(path = %candidate.display(), "environment file not found, nothing to load");
            return Ok((Vec::new(), LoadReport::default()));
        };

        let bytes = std::fs::read(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        let content = std::str::from_utf8(&bytes)?;
        let (entries, skipped) =
            parse_str_with_source(content, Some(&path), self.malformed_line_mode)?;
        tracing::debug!(path = %path.display(), entries = entries.len(), "read environment file");

        let report = LoadReport {
            path: Some(path),
            loaded: 0,
            skipped_malformed: skipped,
        };
        Ok((entries, report))
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_FILE),
            base_dir: None,
            required: false,
            substitution_mode: SubstitutionMode::default(),
            malformed_line_mode: MalformedLineMode::default(),
            target: TargetEnv::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(path: &Path, content: &str) {
        std::fs::write(path, content).expect("failed to write test file");
    }

    #[test]
    fn resolves_relative_name_against_base_dir() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        write_file(&dir.path().join("app.env"), "A=1\n");

        let loader = EnvLoader::new().path("app.env").base_dir(dir.path());
        let resolved = loader.resolve_path().expect("resolution should succeed");

        assert_eq!(resolved, Some(dir.path().join("app.env")));
    }

    #[test]
    fn absolute_path_ignores_base_dir() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let other = tempfile::tempdir().expect("failed to create temp dir");
        let file = dir.path().join(".env");
        write_file(&file, "A=1\n");

        let loader = EnvLoader::new().path(&file).base_dir(other.path());

        assert_eq!(loader.resolve_path().expect("resolution should succeed"), Some(file));
    }

    #[test]
    fn absent_file_and_directory_resolve_to_none() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        std::fs::create_dir(dir.path().join("nested.env")).expect("failed to create dir");

        let missing = EnvLoader::new().base_dir(dir.path());
        let directory = EnvLoader::new().path("nested.env").base_dir(dir.path());

        assert_eq!(missing.resolve_path().expect("resolution should succeed"), None);
        assert_eq!(directory.resolve_path().expect("resolution should succeed"), None);
    }

    #[test]
    fn parse_only_resolves_against_earlier_entries_without_writing() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        write_file(&dir.path().join(".env"), "B=$A\nA=one\nC=$A-$BASE\n");

        let mut initial = std::collections::BTreeMap::new();
        initial.insert("BASE".to_string(), "base".to_string());

        let loader = EnvLoader::new()
            .base_dir(dir.path())
            .target(TargetEnv::from_memory(initial.clone()));
        let entries = loader.parse_only().expect("parse should succeed");

        assert_eq!(entries[0].value, "");
        assert_eq!(entries[1].value, "one");
        assert_eq!(entries[2].value, "one-base");
        assert_eq!(loader.target_env().as_memory(), Some(&initial));
    }

    #[test]
    fn parse_only_keeps_placeholders_when_disabled() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        write_file(&dir.path().join(".env"), "A=x\nB=$A\n");

        let loader = EnvLoader::new()
            .base_dir(dir.path())
            .substitution_mode(SubstitutionMode::Disabled);
        let entries = loader.parse_only().expect("parse should succeed");

        assert_eq!(entries[1].value, "$A");
    }
}
