//! Core data model: a single entry, one language's file, and one logical file
//! across languages.

use std::{cmp::Ordering, fmt::Display, path::PathBuf};

use serde::Serialize;
use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// A single `"key" = "value";` pair with its optional comment.
///
/// Entries order by key only. Two entries are equal when key and value match;
/// the message is not compared.
#[derive(Debug, Clone, Eq, Serialize)]
pub struct LocalizationEntry {
    key: String,
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl LocalizationEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>, message: Option<String>) -> Self {
        LocalizationEntry {
            key: key.into(),
            value: value.into(),
            message,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// An empty value marks a missing translation.
    pub fn is_missing(&self) -> bool {
        self.value.is_empty()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn set_message(&mut self, message: Option<String>) {
        self.message = message;
    }
}

impl PartialEq for LocalizationEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}

impl PartialOrd for LocalizationEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LocalizationEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl Display for LocalizationEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.key, self.value)
    }
}

/// Complete translations of one file for one language, e.g.
/// `fr.lproj/Localizable.strings`.
///
/// Entries are kept sorted by key and keys are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Localization {
    language: String,
    entries: Vec<LocalizationEntry>,
    path: PathBuf,
}

impl Localization {
    /// Builds a localization, sorting the entries and dropping repeated keys.
    ///
    /// When a key appears more than once the last occurrence wins, which is
    /// what the `.strings` loader on Apple platforms does.
    pub fn new(
        language: impl Into<String>,
        entries: Vec<LocalizationEntry>,
        path: impl Into<PathBuf>,
    ) -> Self {
        let mut entries = entries;
        // Stable sort keeps file order among equal keys, so the last one is
        // the one kept by the reverse dedup below.
        entries.sort();
        entries.reverse();
        entries.dedup_by(|a, b| a.key == b.key);
        entries.reverse();

        Localization {
            language: language.into(),
            entries,
            path: path.into(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn entries(&self) -> &[LocalizationEntry] {
        &self.entries
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, key: &str) -> Option<&LocalizationEntry> {
        self.position(key).ok().map(|idx| &self.entries[idx])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_ok()
    }

    /// Sets value and message of `key`, inserting a new entry in sort order
    /// when the key is not present yet.
    pub fn update(&mut self, key: &str, value: &str, message: Option<String>) {
        match self.position(key) {
            Ok(idx) => {
                let existing = &mut self.entries[idx];
                existing.set_value(value);
                existing.set_message(message);
            }
            Err(idx) => self
                .entries
                .insert(idx, LocalizationEntry::new(key, value, message)),
        }
    }

    /// Inserts `key` with an empty value, replacing any existing entry.
    pub fn add(&mut self, key: &str, message: Option<String>) -> &LocalizationEntry {
        let entry = LocalizationEntry::new(key, "", message);
        let idx = match self.position(key) {
            Ok(idx) => {
                self.entries[idx] = entry;
                idx
            }
            Err(idx) => {
                self.entries.insert(idx, entry);
                idx
            }
        };
        &self.entries[idx]
    }

    /// Removes `key`, returning the removed entry if there was one.
    pub fn remove(&mut self, key: &str) -> Option<LocalizationEntry> {
        self.position(key).ok().map(|idx| self.entries.remove(idx))
    }

    /// Parses the language as a BCP-47 identifier. `Base` and other folder
    /// names that are not language tags give `None`.
    pub fn language_identifier(&self) -> Option<LanguageIdentifier> {
        if self.is_base() {
            return None;
        }
        self.language.parse().ok()
    }

    /// Checks whether this localization has a specific language, comparing the
    /// primary language subtag only.
    pub fn has_language(&self, lang: &str) -> bool {
        match (
            self.language_identifier(),
            lang.parse::<LanguageIdentifier>(),
        ) {
            (Some(lang_id), Ok(target_lang)) => lang_id.language == target_lang.language,
            _ => self.language == lang,
        }
    }

    /// `Base.lproj` holds the development language.
    pub fn is_base(&self) -> bool {
        self.language.eq_ignore_ascii_case("base")
    }

    /// One-line description for logs, e.g. `FR: 18 translations (fr.lproj/Localizable.strings)`.
    pub fn summary(&self) -> String {
        format!(
            "{}: {} translations ({})",
            self.language.to_uppercase(),
            self.entries.len(),
            self.path.display()
        )
    }

    fn position(&self, key: &str) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|entry| entry.key.as_str().cmp(key))
    }
}

impl Display for Localization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.language.to_uppercase())
    }
}

/// One logical file (e.g. `Localizable.strings`) across every language folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizationGroup {
    name: String,
    path: PathBuf,
    localizations: Vec<Localization>,
}

impl LocalizationGroup {
    /// Builds a group; localizations are sorted by language.
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        mut localizations: Vec<Localization>,
    ) -> Self {
        localizations.sort_by(|a, b| a.language.cmp(&b.language));
        LocalizationGroup {
            name: name.into(),
            path: path.into(),
            localizations,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Logical path of the group with language folders stripped.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub fn localizations(&self) -> &[Localization] {
        &self.localizations
    }

    /// Mutable access to the localizations. The collection itself stays fixed;
    /// only the entries inside each localization change.
    pub fn localizations_mut(&mut self) -> impl Iterator<Item = &mut Localization> {
        self.localizations.iter_mut()
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.localizations.iter().map(Localization::language)
    }

    pub fn localization(&self, language: &str) -> Option<&Localization> {
        self.localizations.iter().find(|l| l.language == language)
    }

    pub fn localization_mut(&mut self, language: &str) -> Result<&mut Localization, Error> {
        self.localizations
            .iter_mut()
            .find(|l| l.language == language)
            .ok_or_else(|| Error::LanguageNotFound(language.to_string()))
    }
}

impl Display for LocalizationGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialOrd for LocalizationGroup {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LocalizationGroup {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.path.cmp(&other.path))
    }
}

/// Finds a group by name. Names are unique after discovery: tables that share
/// a file name are named by their path relative to the scanned root instead.
pub fn find_group<'a>(
    groups: &'a [LocalizationGroup],
    name: &str,
) -> Result<&'a LocalizationGroup, Error> {
    groups
        .iter()
        .find(|g| g.name == name)
        .ok_or_else(|| Error::GroupNotFound(name.to_string()))
}

/// Finds a group by name for editing.
pub fn find_group_mut<'a>(
    groups: &'a mut [LocalizationGroup],
    name: &str,
) -> Result<&'a mut LocalizationGroup, Error> {
    groups
        .iter_mut()
        .find(|g| g.name == name)
        .ok_or_else(|| Error::GroupNotFound(name.to_string()))
}
