//! Options controlling how a [`crate::Provider`] discovers localization files.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Directory names skipped during discovery (dependency managers and build
/// output).
pub const DEFAULT_IGNORED_DIRECTORIES: [&str; 4] = ["Pods", "Carthage", "build", ".framework"];

/// File extensions treated as localization files.
pub const DEFAULT_EXTENSIONS: [&str; 1] = ["strings"];

/// Suffix of per-language folders, e.g. `fr.lproj`.
pub const DEFAULT_LANGUAGE_FOLDER_SUFFIX: &str = ".lproj";

/// Discovery configuration supplied at [`crate::Provider`] construction.
///
/// Every field has a default, so a partial TOML table is enough to override a
/// single setting:
///
/// ```toml
/// ignored_directories = ["Pods", "DerivedData"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    /// Any file whose full path contains one of these strings is skipped.
    /// Matching is a case-sensitive substring test.
    pub ignored_directories: BTreeSet<String>,
    /// Extensions (without the dot) of files to load.
    pub recognized_extensions: BTreeSet<String>,
    /// Folder suffix stripped to get the language and removed from group paths.
    pub language_folder_suffix: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            ignored_directories: DEFAULT_IGNORED_DIRECTORIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            recognized_extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            language_folder_suffix: DEFAULT_LANGUAGE_FOLDER_SUFFIX.to_string(),
        }
    }
}

impl ProviderConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory name to skip.
    pub fn with_ignored_directory(mut self, name: impl Into<String>) -> Self {
        self.ignored_directories.insert(name.into());
        self
    }

    /// Replaces the whole ignore set.
    pub fn with_ignored_directories<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_directories = names.into_iter().map(Into::into).collect();
        self
    }

    /// Adds an extension to load.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.recognized_extensions.insert(extension.into());
        self
    }

    /// Sets the language folder suffix.
    pub fn with_language_folder_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.language_folder_suffix = suffix.into();
        self
    }

    /// Checks the configuration can find anything at all.
    pub fn validate(&self) -> Result<(), Error> {
        if self.recognized_extensions.is_empty() {
            return Err(Error::config_error(
                "recognized_extensions must contain at least one extension",
            ));
        }
        if let Some(ext) = self
            .recognized_extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(Error::config_error(format!(
                "extension `{}` must be non-empty and given without a leading dot",
                ext
            )));
        }
        if self.language_folder_suffix.is_empty() {
            return Err(Error::config_error("language_folder_suffix must not be empty"));
        }
        if self.ignored_directories.iter().any(String::is_empty) {
            // An empty pattern is a substring of every path.
            return Err(Error::config_error(
                "ignored_directories must not contain an empty name",
            ));
        }
        Ok(())
    }

    pub(crate) fn is_ignored(&self, path: &str) -> bool {
        self.ignored_directories
            .iter()
            .any(|name| path.contains(name.as_str()))
    }

    pub(crate) fn is_recognized(&self, extension: &str) -> bool {
        self.recognized_extensions.contains(extension)
    }

    pub(crate) fn language_from_folder<'a>(&self, folder: &'a str) -> &'a str {
        folder
            .strip_suffix(self.language_folder_suffix.as_str())
            .unwrap_or(folder)
    }

    pub(crate) fn is_language_folder(&self, component: &str) -> bool {
        component.ends_with(self.language_folder_suffix.as_str())
    }
}
