//! Finding `.strings` files on disk, loading them and writing edits back.
//!
//! A [`Provider`] only holds its [`ProviderConfig`]. The groups it discovers
//! are owned by the caller, who passes individual localizations back in to
//! edit them. Every mutating call rewrites the backing file straight away.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use ignore::WalkBuilder;

use crate::{
    config::ProviderConfig,
    error::Error,
    formats::StringsFormat,
    traits::Parser,
    types::{Localization, LocalizationEntry, LocalizationGroup},
};

/// Discovers, loads and saves localizations.
#[derive(Debug, Clone, Default)]
pub struct Provider {
    config: ProviderConfig,
}

impl Provider {
    pub fn new(config: ProviderConfig) -> Self {
        Provider { config }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Walks `root` recursively and groups every recognized file by its path
    /// with the language folders taken out.
    ///
    /// Hidden files are included and ignore files are not consulted. Anything
    /// whose path contains one of the ignored directory names is skipped.
    /// Files that cannot be read end up as localizations without entries.
    ///
    /// A group is named after its file, or after its path relative to `root`
    /// when another group has the same file name.
    pub fn discover<P: AsRef<Path>>(&self, root: P) -> Vec<LocalizationGroup> {
        let root = root.as_ref();
        tracing::debug!("searching {} for localization files", root.display());

        let files = self.find_files(root);
        tracing::info!("found {} localization files", files.len());

        let mut by_group: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
        for file in files {
            by_group.entry(self.group_path(&file)).or_default().push(file);
        }

        let mut name_counts: BTreeMap<String, usize> = BTreeMap::new();
        for group_path in by_group.keys() {
            *name_counts.entry(file_name(group_path)).or_default() += 1;
        }

        let mut groups: Vec<LocalizationGroup> = by_group
            .into_iter()
            .map(|(group_path, mut files)| {
                let mut name = file_name(&group_path);
                if name_counts.get(&name).is_some_and(|&count| count > 1) {
                    name = relative_name(root, &group_path);
                }
                files.sort();
                let localizations = self.load_languages(&name, &files);
                LocalizationGroup::new(name, group_path, localizations)
            })
            .collect();
        groups.sort();
        groups
    }

    /// Loads one localization per language. When two files map to the same
    /// language only the first, in path order, is kept.
    fn load_languages(&self, group: &str, files: &[PathBuf]) -> Vec<Localization> {
        let mut localizations: Vec<Localization> = Vec::with_capacity(files.len());
        for file in files {
            let language = self.language_of(file);
            if let Some(kept) = localizations.iter().find(|l| l.language() == language) {
                tracing::warn!(
                    "skipping {}: group {} already has language {} from {}",
                    file.display(),
                    group,
                    language,
                    kept.path().display()
                );
                continue;
            }
            localizations.push(self.load(file, &language));
        }
        localizations
    }

    /// Reads one file into a [`Localization`].
    ///
    /// The built-in grammar is tried first, then the property-list reader. A
    /// file that cannot be opened is logged and gives an empty localization.
    pub fn load(&self, path: &Path, language: &str) -> Localization {
        let entries = match StringsFormat::read_from(path) {
            Ok(format) => format.entries,
            Err(e) => {
                tracing::error!("could not read {}: {}", path.display(), e);
                Vec::new()
            }
        };
        let localization = Localization::new(language, entries, path);
        tracing::debug!("loaded {}", localization.summary());
        localization
    }

    /// Sets the value and message of `key` and saves the file.
    ///
    /// Nothing is written when the entry already holds exactly this value and
    /// message.
    pub fn update(
        &self,
        localization: &mut Localization,
        key: &str,
        value: &str,
        message: Option<String>,
    ) {
        if let Some(existing) = localization.entry(key) {
            if existing.value() == value && existing.message() == message.as_deref() {
                tracing::debug!("same value provided for {}, not updating", existing);
                return;
            }
        }

        tracing::debug!(
            "updating {} in {} with {:?} (message: {:?})",
            key,
            localization.path().display(),
            value,
            message
        );
        localization.update(key, value, message);
        self.save_logged(localization);
    }

    /// Removes `key` and saves the file. The file is rewritten even when the
    /// key was not present.
    pub fn delete(&self, localization: &mut Localization, key: &str) {
        if localization.remove(key).is_none() {
            tracing::debug!("{} not found in {}", key, localization.summary());
        }
        self.save_logged(localization);
    }

    /// Adds `key` with an empty value, replacing any entry with that key, and
    /// saves the file.
    pub fn add(
        &self,
        localization: &mut Localization,
        key: &str,
        message: Option<String>,
    ) -> LocalizationEntry {
        let entry = localization.add(key, message).clone();
        self.save_logged(localization);
        entry
    }

    /// Regenerates the backing file from the entries in memory.
    ///
    /// The file is truncated and rewritten in place. A crash halfway through
    /// leaves a partial file behind.
    pub fn save(&self, localization: &Localization) -> Result<(), Error> {
        StringsFormat::new(localization.entries().to_vec()).write_to(localization.path())?;
        tracing::debug!("localization file {} updated", localization.path().display());
        Ok(())
    }

    fn save_logged(&self, localization: &Localization) {
        if let Err(e) = self.save(localization) {
            // The in-memory edit stays applied.
            tracing::error!(
                "writing localization file {} failed: {}",
                localization.path().display(),
                e
            );
        }
    }

    fn find_files(&self, root: &Path) -> Vec<PathBuf> {
        let walker = WalkBuilder::new(root).standard_filters(false).build();

        let mut files = Vec::new();
        for dent in walker {
            let dent = match dent {
                Ok(d) => d,
                Err(e) => {
                    tracing::warn!("skipping unreadable entry under {}: {}", root.display(), e);
                    continue;
                }
            };
            if !dent.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let path = dent.path();
            let recognized = path
                .extension()
                .is_some_and(|ext| self.config.is_recognized(&ext.to_string_lossy()));
            if recognized && !self.config.is_ignored(&path.to_string_lossy()) {
                files.push(path.to_path_buf());
            }
        }
        files
    }

    /// The file path without any language folder components.
    fn group_path(&self, file: &Path) -> PathBuf {
        file.components()
            .filter(|c| !self.config.is_language_folder(&c.as_os_str().to_string_lossy()))
            .collect()
    }

    fn language_of(&self, file: &Path) -> String {
        let folder = file
            .parent()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.config.language_from_folder(&folder).to_string()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Group path relative to the scanned root, used as the name when several
/// groups share a file name.
fn relative_name(root: &Path, group_path: &Path) -> String {
    group_path
        .strip_prefix(root)
        .unwrap_or(group_path)
        .to_string_lossy()
        .into_owned()
}
