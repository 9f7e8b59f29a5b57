//! Second pass of the `.strings` grammar: tokens to entries.

use super::{
    escape::unescape,
    token::{Token, TokenKind},
};
use crate::{error::ParseError, types::LocalizationEntry};

/// Decides which token kind closes an entry, from the token that follows the
/// first semicolon of the file.
///
/// A newline there means entries end at their semicolon. Anything else (in
/// practice a comment on the same line) means that token closes the entry, so
/// the trailing comment still belongs to it. The decision is made once for the
/// whole file; files mixing both placements are read with whichever the first
/// entry uses.
pub fn terminator(tokens: &[Token]) -> Result<TokenKind, ParseError> {
    let semicolon = tokens
        .iter()
        .position(|t| t.kind() == TokenKind::Semicolon)
        .ok_or(ParseError::MissingTerminator)?;

    match tokens.get(semicolon + 1).map(Token::kind) {
        Some(TokenKind::Newline) | None => Ok(TokenKind::Semicolon),
        Some(kind) => Ok(kind),
    }
}

/// Folds the token list into entries, in file order.
pub fn build_entries(tokens: &[Token]) -> Result<Vec<LocalizationEntry>, ParseError> {
    let terminator = terminator(tokens)?;

    let mut key: Option<&str> = None;
    let mut value: Option<&str> = None;
    let mut message: Option<&str> = None;
    let mut entries = Vec::new();

    for token in tokens {
        match token {
            Token::Key(text) => key = Some(text.as_str()),
            Token::Value(text) => value = Some(text.as_str()),
            Token::Message(text) => message = Some(text.as_str()),
            Token::Equal | Token::Semicolon | Token::Newline => {}
        }

        if token.kind() != terminator {
            continue;
        }
        if let (Some(k), Some(v)) = (key, value) {
            entries.push(LocalizationEntry::new(
                k,
                unescape(v),
                message.map(|m| m.trim_matches(' ').to_string()),
            ));
            key = None;
            value = None;
            message = None;
        }
    }

    if !tokens.is_empty() && entries.is_empty() {
        return Err(ParseError::NoEntries);
    }
    Ok(entries)
}
