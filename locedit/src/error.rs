//! All error types for the locedit crate.
//!
//! [`ParseError`] is the local, recoverable failure of the `.strings` grammar;
//! [`Error`] is returned from every other fallible operation (I/O, property
//! list decoding, lookups, configuration).

use thiserror::Error;

/// Failure of the primary `.strings` grammar.
///
/// Never surfaced to users directly: the reader falls back to property-list
/// decoding when it sees one.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed input: no entry terminator could be determined")]
    MissingTerminator,

    #[error("malformed input: tokens were found but no entry could be assembled")]
    NoEntries,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("binary property list error: {0}")]
    BinaryPlist(#[from] plist::Error),

    #[error("invalid property list: {0}")]
    InvalidPropertyList(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("localization group `{0}` not found")]
    GroupNotFound(String),

    #[error("language `{0}` not found")]
    LanguageNotFound(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Creates a new property list error.
    pub fn invalid_plist(message: impl Into<String>) -> Self {
        Error::InvalidPropertyList(message.into())
    }

    /// Creates a new configuration error.
    pub fn config_error(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }
}
