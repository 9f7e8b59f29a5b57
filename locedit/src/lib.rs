#![forbid(unsafe_code)]
//! Reading, editing and writing back Apple `.strings` localization trees.
//!
//! A project keeps one folder per language (`en.lproj`, `Base.lproj`, ...)
//! holding files with the same names. [`Provider::discover`] finds them and
//! returns one [`LocalizationGroup`] per logical file, each holding a
//! [`Localization`] per language. Edits go through the provider, which
//! regenerates the file on every change.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use locedit::{Provider, types::find_group_mut};
//!
//! let provider = Provider::default();
//! let mut groups = provider.discover("MyApp");
//!
//! let group = find_group_mut(&mut groups, "Localizable.strings")?;
//! let german = group.localization_mut("de")?;
//! provider.update(german, "BACK", "Zurück", Some("Back button".to_string()));
//! # Ok::<(), locedit::Error>(())
//! ```
//!
//! Comments placed before an entry (or after it on the same line) are kept as
//! the entry's message. Files the commented grammar cannot read are decoded as
//! property lists instead; their comments are lost.

pub mod config;
pub mod error;
pub mod formats;
pub mod index;
pub mod provider;
pub mod traits;
pub mod types;

pub use crate::{
    config::ProviderConfig,
    error::{Error, ParseError},
    formats::StringsFormat,
    index::{Filter, LocalizationIndex},
    provider::Provider,
    types::{Localization, LocalizationEntry, LocalizationGroup},
};
