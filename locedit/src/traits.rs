//! Reading and writing a localization file through any I/O source.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::error::Error;

/// A file format that can be read from and written back to one file.
///
/// # Example
///
/// ```rust,no_run
/// use locedit::{formats::StringsFormat, traits::Parser};
///
/// let format = StringsFormat::read_from("en.lproj/Localizable.strings")?;
/// format.write_to("en.lproj/Localizable.strings")?;
/// Ok::<(), locedit::Error>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from a file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Write to any writer.
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to a file path, replacing whatever the file held.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        self.to_writer(BufWriter::new(file))
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Parse from raw bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(bytes))
    }
}
