//! Support for Apple `.strings` localization files.
//!
//! Reading is two-tiered. The built-in grammar ([`tokenizer`] then
//! [`builder`]) understands comments and keeps them as entry messages. When it
//! cannot make sense of a file the text is handed to the property-list reader
//! in [`crate::formats::plist`], which never fails but drops comments.
//!
//! Writing regenerates the whole file:
//!
//! ```text
//! /* message */
//! "key" = "value";
//!
//! ```

pub mod builder;
pub mod escape;
pub mod token;
pub mod tokenizer;

use std::io::{BufRead, Read, Write};

use crate::{
    error::{Error, ParseError},
    formats::plist,
    traits::Parser,
    types::LocalizationEntry,
};

use self::{builder::build_entries, escape::escape, tokenizer::Tokenizer};

/// Contents of one `.strings` file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    /// Entries in the order they were read or will be written.
    pub entries: Vec<LocalizationEntry>,
}

impl Format {
    pub fn new(entries: Vec<LocalizationEntry>) -> Self {
        Format { entries }
    }

    /// Reads `text` with the built-in grammar only, without the property-list
    /// fallback.
    pub fn from_str_strict(text: &str) -> Result<Self, Error> {
        Ok(Format::new(parse_strict(text)?))
    }
}

impl Parser for Format {
    /// Decodes the input (UTF-8, or UTF-16 when a BOM says so) and parses it,
    /// falling back to property-list decoding. Binary property lists are
    /// recognized by their magic bytes and never decoded as text.
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        if plist::is_binary(&bytes) {
            tracing::debug!("reading binary property list");
            return Ok(Format::new(plist::extract_binary(&bytes)));
        }

        let text = decode(bytes.as_slice())?;
        Ok(Format::new(parse(&text)))
    }

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        write_entries(&self.entries, writer)
    }
}

/// Tokenizes and assembles entries, in file order.
pub fn parse_strict(text: &str) -> Result<Vec<LocalizationEntry>, ParseError> {
    let tokens = Tokenizer::tokenize(text);
    build_entries(&tokens)
}

/// Parses with the built-in grammar, or as a property list when that fails.
pub fn parse(text: &str) -> Vec<LocalizationEntry> {
    parse_strict(text).unwrap_or_else(|err| {
        tracing::debug!("built-in parser failed ({}), reading as property list", err);
        plist::extract(text)
    })
}

/// Reads the whole input as text. A byte-order mark selects UTF-16; otherwise
/// UTF-8 is assumed and invalid sequences are replaced.
pub fn decode<R: Read>(reader: R) -> Result<String, Error> {
    let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
        .encoding(Some(encoding_rs::UTF_8))
        .bom_override(true)
        .build(reader);

    let mut decoded = String::new();
    decoder.read_to_string(&mut decoded).map_err(Error::Io)?;
    Ok(decoded)
}

/// Writes entries in the `.strings` layout, one block per entry.
///
/// The message line is left out when the message is missing or empty.
pub fn write_entries<W: Write>(entries: &[LocalizationEntry], mut writer: W) -> Result<(), Error> {
    for entry in entries {
        if let Some(message) = entry.message().filter(|m| !m.is_empty()) {
            writeln!(writer, "/* {} */", message)?;
        }
        writeln!(writer, "\"{}\" = \"{}\";", entry.key(), escape(entry.value()))?;
        writeln!(writer)?;
    }
    writer.flush().map_err(Error::Io)
}
