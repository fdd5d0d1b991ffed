use std::path::PathBuf;

/// A parsed `KEY=VALUE` entry from an environment file or input buffer.
///
/// `value` has its surrounding quotes removed but no `$NAME` substitution
/// applied; substitution depends on the environment at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
    pub source: Option<PathBuf>,
    pub line: u32,
}

/// Summary of the load operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// Resolved file, or `None` when nothing was found to load.
    pub path: Option<PathBuf>,
    pub loaded: usize,
    pub skipped_malformed: usize,
}

impl LoadReport {
    /// Whether a file existed at the resolved location.
    ///
    /// Distinguishes an absent file from an empty one, which both report
    /// zero loaded entries.
    pub fn file_found(&self) -> bool {
        self.path.is_some()
    }
}

/// Variable expansion behavior for loader values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubstitutionMode {
    /// Keep values as parsed with no expansion.
    Disabled,
    /// Expand `$VAR` placeholders against the environment as it stands when
    /// the line is loaded.
    #[default]
    Expand,
}

/// What to do with a line that is neither a comment, blank, nor `KEY=VALUE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedLineMode {
    /// Fail the whole parse with a [`ParseError`](crate::ParseError).
    #[default]
    Reject,
    /// Drop the line and emit a warning.
    Skip,
}
