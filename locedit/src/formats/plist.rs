//! Property-list reader used when the `.strings` grammar gives up.
//!
//! A `.strings` file is also a valid text (OpenStep) property list, some tools
//! emit the same table as an XML property list, and Xcode compiles it to a
//! binary property list when building an app bundle. All three are accepted as
//! long as the root is a dictionary of strings. Comments are not kept, and the
//! result is sorted by key.

use std::collections::BTreeMap;

use quick_xml::{Reader, events::Event};

use crate::{error::Error, types::LocalizationEntry};

/// Leading bytes of a binary property list.
pub const BINARY_MAGIC: &[u8] = b"bplist00";

/// Whether raw file contents are a binary property list.
pub fn is_binary(bytes: &[u8]) -> bool {
    bytes.starts_with(BINARY_MAGIC)
}

/// Reads `text` as a dictionary of strings.
///
/// Never fails: anything that is not such a dictionary is logged and gives an
/// empty list.
pub fn extract(text: &str) -> Vec<LocalizationEntry> {
    into_entries(parse_string_table(text))
}

/// Reads a binary property list as a dictionary of strings. Never fails, like
/// [`extract`].
pub fn extract_binary(bytes: &[u8]) -> Vec<LocalizationEntry> {
    into_entries(parse_binary_table(bytes))
}

/// Decodes a binary property list whose root is a dictionary of strings. The
/// pairs come back sorted by key.
pub fn parse_binary_table(bytes: &[u8]) -> Result<Vec<(String, String)>, Error> {
    let table: BTreeMap<String, String> = ::plist::from_bytes(bytes)?;
    Ok(table.into_iter().collect())
}

fn into_entries(table: Result<Vec<(String, String)>, Error>) -> Vec<LocalizationEntry> {
    match table {
        Ok(pairs) => {
            let mut entries: Vec<_> = pairs
                .into_iter()
                .map(|(key, value)| LocalizationEntry::new(key, value, None))
                .collect();
            entries.sort();
            tracing::debug!("found {} keys reading as property list", entries.len());
            entries
        }
        Err(err) => {
            tracing::warn!("could not read as property list: {}", err);
            Vec::new()
        }
    }
}

/// Parses a property list whose root is a dictionary of strings, returning the
/// pairs in document order.
pub fn parse_string_table(text: &str) -> Result<Vec<(String, String)>, Error> {
    let head = text.trim_start_matches('\u{feff}').trim_start();
    if head.starts_with("bplist") {
        return Err(Error::UnsupportedFormat(
            "binary property list read as text".to_string(),
        ));
    }
    if head.starts_with("<?xml") || head.starts_with("<!DOCTYPE") || head.starts_with("<plist") {
        return parse_xml(head);
    }
    TextReader::new(head).read_table()
}

/// Reader for the text (OpenStep) syntax, restricted to string tables.
struct TextReader<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TextReader<'a> {
    fn new(input: &'a str) -> Self {
        TextReader { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, message: &str) -> Error {
        Error::invalid_plist(format!("{} at byte {}", message, self.pos))
    }

    /// Skips whitespace and both comment styles.
    fn skip_trivia(&mut self) -> Result<(), Error> {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if let Some(comment) = trimmed.strip_prefix("//") {
                self.pos += 2 + comment.find('\n').unwrap_or(comment.len());
            } else if let Some(comment) = trimmed.strip_prefix("/*") {
                let end = comment
                    .find("*/")
                    .ok_or_else(|| self.error("unterminated comment"))?;
                self.pos += 2 + end + 2;
            } else {
                return Ok(());
            }
        }
    }

    fn read_table(mut self) -> Result<Vec<(String, String)>, Error> {
        self.skip_trivia()?;
        let braced = self.peek() == Some('{');
        if braced {
            self.bump();
        }

        let mut pairs = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                None if braced => return Err(self.error("missing closing `}`")),
                None => break,
                Some('}') if braced => {
                    self.bump();
                    self.skip_trivia()?;
                    if self.peek().is_some() {
                        return Err(self.error("unexpected text after dictionary"));
                    }
                    break;
                }
                Some(_) => pairs.push(self.read_pair()?),
            }
        }
        Ok(pairs)
    }

    /// `key = value;`, or the `key;` shorthand where the value is the key.
    fn read_pair(&mut self) -> Result<(String, String), Error> {
        let key = self.read_string()?;
        self.skip_trivia()?;
        match self.bump() {
            Some(';') => Ok((key.clone(), key)),
            Some('=') => {
                self.skip_trivia()?;
                let value = self.read_string()?;
                self.skip_trivia()?;
                match self.bump() {
                    Some(';') => Ok((key, value)),
                    _ => Err(self.error("expected `;`")),
                }
            }
            _ => Err(self.error("expected `=` or `;`")),
        }
    }

    fn read_string(&mut self) -> Result<String, Error> {
        match self.peek() {
            Some('"') => {
                self.bump();
                self.read_quoted()
            }
            Some(c) if is_unquoted_char(c) => {
                let len = self
                    .rest()
                    .find(|c: char| !is_unquoted_char(c))
                    .unwrap_or(self.rest().len());
                let word = self.rest()[..len].to_string();
                self.pos += len;
                Ok(word)
            }
            _ => Err(self.error("expected a string")),
        }
    }

    fn read_quoted(&mut self) -> Result<String, Error> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some('"') => return Ok(out),
                Some('\\') => out.push(self.read_escape()?),
                Some(c) => out.push(c),
            }
        }
    }

    fn read_escape(&mut self) -> Result<char, Error> {
        let escaped = match self.bump() {
            None => return Err(self.error("unterminated string")),
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('a') => '\u{07}',
            Some('b') => '\u{08}',
            Some('f') => '\u{0C}',
            Some('v') => '\u{0B}',
            Some('U') => {
                let digits: String = self.rest().chars().take(4).collect();
                let code = u32::from_str_radix(&digits, 16)
                    .ok()
                    .filter(|_| digits.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or_else(|| self.error("invalid \\U escape"))?;
                self.pos += 4;
                code
            }
            Some(d @ '0'..='7') => {
                let mut code = d.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            code = code * 8 + digit;
                            self.bump();
                        }
                        None => break,
                    }
                }
                char::from_u32(code).ok_or_else(|| self.error("invalid octal escape"))?
            }
            // `\"`, `\\`, `\'` and any other character stand for themselves.
            Some(c) => c,
        };
        Ok(escaped)
    }
}

fn is_unquoted_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '+' | '/' | ':' | '.' | '-')
}

/// Reads an XML property list with a root `<dict>` of `<key>`/`<string>` pairs.
fn parse_xml(text: &str) -> Result<Vec<(String, String)>, Error> {
    #[derive(Clone, Copy, PartialEq)]
    enum Field {
        Key,
        String,
    }

    let mut reader = Reader::from_str(text);
    let mut pairs = Vec::new();
    let mut seen_dict = false;
    let mut in_dict = false;
    let mut pending_key: Option<String> = None;
    let mut field: Option<Field> = None;
    let mut buf = String::new();

    loop {
        match reader.read_event().map_err(Error::XmlParse)? {
            Event::Start(e) => match e.name().as_ref() {
                b"plist" if !seen_dict => {}
                b"dict" if !seen_dict => {
                    seen_dict = true;
                    in_dict = true;
                }
                b"key" if in_dict && pending_key.is_none() => {
                    field = Some(Field::Key);
                    buf.clear();
                }
                b"string" if in_dict && pending_key.is_some() => {
                    field = Some(Field::String);
                    buf.clear();
                }
                other => {
                    return Err(Error::invalid_plist(format!(
                        "unexpected <{}> in a string table",
                        String::from_utf8_lossy(other)
                    )));
                }
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"dict" if !seen_dict => seen_dict = true,
                b"key" if in_dict && pending_key.is_none() => pending_key = Some(String::new()),
                b"string" if in_dict => {
                    let key = pending_key
                        .take()
                        .ok_or_else(|| Error::invalid_plist("value without a key"))?;
                    pairs.push((key, String::new()));
                }
                other => {
                    return Err(Error::invalid_plist(format!(
                        "unexpected <{}/> in a string table",
                        String::from_utf8_lossy(other)
                    )));
                }
            },
            Event::Text(e) if field.is_some() => {
                buf.push_str(&e.unescape().map_err(Error::XmlParse)?);
            }
            Event::CData(e) if field.is_some() => {
                buf.push_str(&String::from_utf8_lossy(&e));
            }
            Event::End(e) => {
                match (e.name().as_ref(), field) {
                    (b"key", Some(Field::Key)) => pending_key = Some(std::mem::take(&mut buf)),
                    (b"string", Some(Field::String)) => {
                        let key = pending_key
                            .take()
                            .ok_or_else(|| Error::invalid_plist("value without a key"))?;
                        pairs.push((key, std::mem::take(&mut buf)));
                    }
                    (b"dict", _) => in_dict = false,
                    _ => {}
                }
                field = None;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_dict {
        return Err(Error::invalid_plist("no root dictionary"));
    }
    if pending_key.is_some() {
        return Err(Error::invalid_plist("key without a value"));
    }
    Ok(pairs)
}
