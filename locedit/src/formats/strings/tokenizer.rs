//! First pass of the `.strings` grammar: raw text to a flat token list.
//!
//! The tokenizer walks a read cursor over the borrowed input once, front to
//! back. In [`ParserState::Other`] it jumps to the nearest control character
//! and lets [`transition`] decide what happens; in the reading states it
//! extracts text up to the matching close marker.
//!
//! The format has no escape for a quote inside a key or value. When a closing
//! quote is followed (as the next control character) by another quote or a
//! newline, the run is not over: the next piece of text is appended to the
//! previous token, joined by the quote that was consumed. Tokenization never
//! fails; input that defeats every recovery rule is consumed to the end.

use super::token::{ControlCharacter, ParserState, Token, TokenKind, transition};

/// Markers tried, in order, when a key or value has no closing quote.
const RECOVERY_MARKERS: [&str; 5] = ["*/", "\n", "\r\n", "\"", ";"];

pub struct Tokenizer<'a> {
    input: &'a str,
    cursor: usize,
    state: ParserState,
    tokens: Vec<Token>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            input,
            cursor: 0,
            state: ParserState::Other,
            tokens: Vec::new(),
        }
    }

    /// Tokenizes the whole input.
    pub fn tokenize(input: &str) -> Vec<Token> {
        Tokenizer::new(input).run()
    }

    pub fn run(mut self) -> Vec<Token> {
        while self.cursor < self.input.len() {
            match self.state {
                ParserState::Other => self.step_other(),
                ParserState::ReadingKey => self.read_run(TokenKind::Key),
                ParserState::ReadingValue => self.read_run(TokenKind::Value),
                ParserState::ReadingMessage { single_line } => {
                    let close = if single_line {
                        ControlCharacter::SingleLineMessageClose
                    } else {
                        ControlCharacter::MessageClose
                    };
                    // Never joined with a previous message: that one may be a
                    // license header rather than part of this comment.
                    let text = self.extract_until(close);
                    self.tokens.push(Token::Message(text.to_string()));
                    self.state = ParserState::Other;
                }
            }
        }
        self.tokens
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.cursor..]
    }

    /// Nearest control character in the remaining input and its byte offset.
    fn next_control(&self) -> Option<(ControlCharacter, usize)> {
        let bytes = self.remaining().as_bytes();
        (0..bytes.len())
            .filter(|&offset| matches!(bytes[offset], b'/' | b'*' | b'"' | b'\n' | b'=' | b';'))
            .find_map(|offset| {
                let tail = &bytes[offset..];
                ControlCharacter::ALL
                    .iter()
                    .copied()
                    .find(|control| tail.starts_with(control.marker().as_bytes()))
                    .map(|control| (control, offset))
            })
    }

    fn step_other(&mut self) {
        let Some((control, offset)) = self.next_control() else {
            // Nothing left that could carry information.
            self.cursor = self.input.len();
            return;
        };
        self.advance(offset + control.skip_len());

        let (state, token) = transition(self.state, control, self.tokens.last());
        self.state = state;
        if let Some(token) = token {
            self.tokens.push(token);
        }
    }

    fn read_run(&mut self, kind: TokenKind) {
        let text = self.extract_until(ControlCharacter::Quote);
        self.push_joined(kind, text);

        match self.next_control() {
            Some((control, _)) if control.continues_run() => {}
            Some(_) => self.state = ParserState::Other,
            None => {
                self.cursor = self.input.len();
                self.state = ParserState::Other;
            }
        }
    }

    /// Appends `text` to the last token when it has the same kind, otherwise
    /// pushes a new token.
    fn push_joined(&mut self, kind: TokenKind, text: &str) {
        let prior = match (self.tokens.last_mut(), kind) {
            (Some(Token::Key(prior)), TokenKind::Key)
            | (Some(Token::Value(prior)), TokenKind::Value) => Some(prior),
            _ => None,
        };
        if let Some(prior) = prior {
            prior.push_str(ControlCharacter::Quote.marker());
            prior.push_str(text);
            return;
        }

        let token = match kind {
            TokenKind::Key => Token::Key(text.to_string()),
            _ => Token::Value(text.to_string()),
        };
        self.tokens.push(token);
    }

    /// Returns the text before `close` and moves the cursor past it.
    fn extract_until(&mut self, close: ControlCharacter) -> &'a str {
        let rest = self.remaining();
        let end = rest.find(close.marker()).unwrap_or_else(|| {
            tracing::trace!(
                marker = close.marker(),
                offset = self.cursor,
                "missing close marker, recovering"
            );
            recovery_offset(rest)
        });
        self.advance(end + close.skip_len());
        &rest[..end]
    }

    /// Moves the cursor forward, clamped to the input and to a char boundary.
    fn advance(&mut self, by: usize) {
        let mut cursor = (self.cursor + by).min(self.input.len());
        while !self.input.is_char_boundary(cursor) {
            cursor += 1;
        }
        self.cursor = cursor;
    }
}

fn recovery_offset(rest: &str) -> usize {
    RECOVERY_MARKERS
        .iter()
        .find_map(|marker| rest.find(marker))
        .unwrap_or(rest.len())
}
