//! Per-key view of one [`LocalizationGroup`], for browsing and filtering.
//!
//! Rows are the keys of the group's main localization; columns are languages,
//! main language first. A cell is `None` when that language lacks the key.

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::types::{Localization, LocalizationEntry, LocalizationGroup};

/// Marker left in a message by automatic translation.
pub const AUTOTRANSLATED_TAG: &str = "#autotranslated";

/// Which keys an index query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    /// Keys missing in a language or with an empty value somewhere.
    Missing,
    /// Keys with at least one message carrying [`AUTOTRANSLATED_TAG`].
    Autotranslated,
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::All => write!(f, "all"),
            Filter::Missing => write!(f, "missing"),
            Filter::Autotranslated => write!(f, "autotranslated"),
        }
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "missing" => Ok(Filter::Missing),
            "autotranslated" => Ok(Filter::Autotranslated),
            other => Err(format!(
                "unknown filter `{}` (expected all, missing or autotranslated)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LocalizationIndex<'a> {
    group: &'a LocalizationGroup,
    languages: Vec<&'a str>,
    rows: BTreeMap<&'a str, Vec<Option<&'a LocalizationEntry>>>,
}

impl<'a> LocalizationIndex<'a> {
    /// Indexes `group`.
    ///
    /// The main localization is `Base` when present, otherwise the one with
    /// the most entries. Only its keys become rows.
    pub fn new(group: &'a LocalizationGroup) -> Self {
        let mut ordered: Vec<&Localization> = group.localizations().iter().collect();
        // Stable, so languages with equal counts keep alphabetical order.
        ordered.sort_by(|a, b| b.is_base().cmp(&a.is_base()).then(b.len().cmp(&a.len())));

        let languages: Vec<&str> = ordered.iter().map(|l| l.language()).collect();
        let rows = match ordered.first() {
            Some(main) => main
                .entries()
                .iter()
                .map(|entry| {
                    let cells = ordered.iter().map(|l| l.entry(entry.key())).collect();
                    (entry.key(), cells)
                })
                .collect(),
            None => BTreeMap::new(),
        };

        LocalizationIndex {
            group,
            languages,
            rows,
        }
    }

    pub fn group(&self) -> &'a LocalizationGroup {
        self.group
    }

    /// Languages in column order, main language first.
    pub fn languages(&self) -> &[&'a str] {
        &self.languages
    }

    pub fn main_language(&self) -> Option<&'a str> {
        self.languages.first().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.rows.keys().copied()
    }

    /// The entry for `key` in `language`, if both exist.
    pub fn get(&self, key: &str, language: &str) -> Option<&'a LocalizationEntry> {
        let column = self.languages.iter().position(|l| *l == language)?;
        self.rows.get(key)?.get(column).copied().flatten()
    }

    /// Cells of one row, in [`languages`](Self::languages) order.
    pub fn row(&self, key: &str) -> Option<&[Option<&'a LocalizationEntry>]> {
        self.rows.get(key).map(Vec::as_slice)
    }

    /// The message shown for a row, taken from the first language that has one.
    pub fn message(&self, key: &str) -> Option<&'a str> {
        self.rows
            .get(key)?
            .iter()
            .flatten()
            .find_map(|entry| entry.message())
    }

    /// Sorted keys passing `filter` and matching `search`.
    ///
    /// A key matches the search when the key itself or any of its values
    /// contains the search text, ignoring case. An empty search matches all.
    pub fn filtered_keys(&self, filter: Filter, search: Option<&str>) -> Vec<&'a str> {
        tracing::debug!("filtering by {} (search: {:?})", filter, search);
        let needle = search.filter(|s| !s.is_empty()).map(str::to_lowercase);

        self.rows
            .iter()
            .filter(|(_, cells)| self.passes(filter, cells))
            .filter(|(key, cells)| match &needle {
                None => true,
                Some(needle) => {
                    key.to_lowercase().contains(needle.as_str())
                        || cells
                            .iter()
                            .flatten()
                            .any(|entry| entry.value().to_lowercase().contains(needle.as_str()))
                }
            })
            .map(|(key, _)| *key)
            .collect()
    }

    /// Keys with at least one language missing or empty.
    pub fn incomplete_keys(&self) -> Vec<&'a str> {
        self.filtered_keys(Filter::Missing, None)
    }

    fn passes(&self, filter: Filter, cells: &[Option<&LocalizationEntry>]) -> bool {
        match filter {
            Filter::All => true,
            Filter::Missing => cells
                .iter()
                .any(|cell| cell.is_none_or(LocalizationEntry::is_missing)),
            Filter::Autotranslated => cells.iter().flatten().any(|entry| {
                entry
                    .message()
                    .is_some_and(|m| m.contains(AUTOTRANSLATED_TAG))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, value: &str, message: Option<&str>) -> LocalizationEntry {
        LocalizationEntry::new(key, value, message.map(str::to_string))
    }

    fn group() -> LocalizationGroup {
        LocalizationGroup::new(
            "Localizable.strings",
            "App/Localizable.strings",
            vec![
                Localization::new(
                    "de",
                    vec![
                        entry("back", "Zurück", None),
                        entry("done", "", None),
                        entry("hello", "Hallo", Some("#autotranslated greeting")),
                    ],
                    "App/de.lproj/Localizable.strings",
                ),
                Localization::new(
                    "Base",
                    vec![
                        entry("back", "Back", Some("Back button")),
                        entry("done", "Done", None),
                        entry("hello", "Hello", Some("greeting")),
                        entry("only_base", "Only", None),
                    ],
                    "App/Base.lproj/Localizable.strings",
                ),
                Localization::new(
                    "sk",
                    vec![
                        entry("back", "Späť", None),
                        entry("done", "Hotovo", None),
                        entry("hello", "Ahoj", None),
                        entry("only_base", "Len", None),
                        entry("sk_extra", "Extra", None),
                    ],
                    "App/sk.lproj/Localizable.strings",
                ),
            ],
        )
    }

    #[test]
    fn test_base_is_main_then_by_size() {
        let group = group();
        let index = LocalizationIndex::new(&group);
        assert_eq!(index.languages(), &["Base", "sk", "de"]);
        assert_eq!(index.main_language(), Some("Base"));
        // sk_extra only exists outside the main localization.
        assert_eq!(
            index.keys().collect::<Vec<_>>(),
            vec!["back", "done", "hello", "only_base"]
        );
    }

    #[test]
    fn test_largest_is_main_without_base() {
        let group = LocalizationGroup::new(
            "L.strings",
            "L.strings",
            vec![
                Localization::new("de", vec![entry("a", "A", None)], "de.lproj/L.strings"),
                Localization::new(
                    "fr",
                    vec![entry("a", "A", None), entry("b", "B", None)],
                    "fr.lproj/L.strings",
                ),
            ],
        );
        let index = LocalizationIndex::new(&group);
        assert_eq!(index.languages(), &["fr", "de"]);
        assert_eq!(index.get("b", "de"), None);
        assert_eq!(index.get("b", "fr").map(LocalizationEntry::value), Some("B"));
    }

    #[test]
    fn test_filters() {
        let group = group();
        let index = LocalizationIndex::new(&group);
        assert_eq!(index.filtered_keys(Filter::All, None).len(), 4);
        assert_eq!(
            index.filtered_keys(Filter::Missing, None),
            vec!["done", "only_base"]
        );
        assert_eq!(index.incomplete_keys(), vec!["done", "only_base"]);
        assert_eq!(index.filtered_keys(Filter::Autotranslated, None), vec!["hello"]);
    }

    #[test]
    fn test_search_matches_keys_and_values_ignoring_case() {
        let group = group();
        let index = LocalizationIndex::new(&group);
        assert_eq!(index.filtered_keys(Filter::All, Some("BACK")), vec!["back"]);
        assert_eq!(index.filtered_keys(Filter::All, Some("ahoj")), vec!["hello"]);
        assert_eq!(index.filtered_keys(Filter::All, Some("")).len(), 4);
        assert_eq!(
            index.filtered_keys(Filter::Missing, Some("hotovo")),
            vec!["done"]
        );
    }

    #[test]
    fn test_message_comes_from_first_language_with_one() {
        let group = group();
        let index = LocalizationIndex::new(&group);
        assert_eq!(index.message("back"), Some("Back button"));
        assert_eq!(index.message("done"), None);
        assert_eq!(index.row("back").map(<[_]>::len), Some(3));
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!("Missing".parse::<Filter>(), Ok(Filter::Missing));
        assert!("broken".parse::<Filter>().is_err());
        assert_eq!(Filter::Autotranslated.to_string(), "autotranslated");
    }

    #[test]
    fn test_empty_group() {
        let group = LocalizationGroup::new("L.strings", "L.strings", Vec::new());
        let index = LocalizationIndex::new(&group);
        assert!(index.is_empty());
        assert_eq!(index.main_language(), None);
    }
}
