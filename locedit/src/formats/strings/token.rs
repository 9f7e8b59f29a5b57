//! Tokens, control characters and the parser state machine of the `.strings`
//! grammar.

/// A typed fragment of a `.strings` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Key(String),
    Value(String),
    Message(String),
    Equal,
    Semicolon,
    Newline,
}

/// The variant of a [`Token`] without its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Key,
    Value,
    Message,
    Equal,
    Semicolon,
    Newline,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Key(_) => TokenKind::Key,
            Token::Value(_) => TokenKind::Value,
            Token::Message(_) => TokenKind::Message,
            Token::Equal => TokenKind::Equal,
            Token::Semicolon => TokenKind::Semicolon,
            Token::Newline => TokenKind::Newline,
        }
    }
}

/// Markers the tokenizer reacts to.
///
/// Enclosing markers open or close a span of extracted text; separating
/// markers only mark positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlCharacter {
    MessageOpen,
    MessageClose,
    Quote,
    SingleLineMessageOpen,
    SingleLineMessageClose,
    Equal,
    Semicolon,
    Newline,
}

impl ControlCharacter {
    /// Enclosing markers first: on equal offsets the first match in this list
    /// wins, so `\n` resolves to [`ControlCharacter::SingleLineMessageClose`].
    pub const ALL: [ControlCharacter; 8] = [
        ControlCharacter::MessageOpen,
        ControlCharacter::MessageClose,
        ControlCharacter::Quote,
        ControlCharacter::SingleLineMessageOpen,
        ControlCharacter::SingleLineMessageClose,
        ControlCharacter::Equal,
        ControlCharacter::Semicolon,
        ControlCharacter::Newline,
    ];

    pub fn marker(self) -> &'static str {
        match self {
            ControlCharacter::MessageOpen => "/*",
            ControlCharacter::MessageClose => "*/",
            ControlCharacter::Quote => "\"",
            ControlCharacter::SingleLineMessageOpen => "//",
            ControlCharacter::SingleLineMessageClose => "\n",
            ControlCharacter::Equal => "=",
            ControlCharacter::Semicolon => ";",
            ControlCharacter::Newline => "\n",
        }
    }

    /// Number of bytes consumed after the close marker is found.
    pub fn skip_len(self) -> usize {
        self.marker().len()
    }

    pub fn is_enclosing(self) -> bool {
        !matches!(
            self,
            ControlCharacter::Equal | ControlCharacter::Semicolon | ControlCharacter::Newline
        )
    }

    /// Whether a key or value run continues when this is the next marker after
    /// its closing quote.
    pub fn continues_run(self) -> bool {
        matches!(
            self,
            ControlCharacter::Quote
                | ControlCharacter::Newline
                | ControlCharacter::SingleLineMessageClose
        )
    }
}

/// What the tokenizer is currently extracting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserState {
    #[default]
    Other,
    ReadingKey,
    ReadingValue,
    ReadingMessage {
        single_line: bool,
    },
}

/// Transition out of [`ParserState::Other`] on the next control character.
///
/// `last_token` is the most recently emitted token; it decides whether a
/// quote opens a key or a value since the format has no escape for them.
pub fn transition(
    state: ParserState,
    control: ControlCharacter,
    last_token: Option<&Token>,
) -> (ParserState, Option<Token>) {
    if state != ParserState::Other {
        // Reading states are driven by text extraction, not by markers.
        return (state, None);
    }

    match control {
        ControlCharacter::Quote => (quote_state(last_token), None),
        ControlCharacter::MessageOpen => (ParserState::ReadingMessage { single_line: false }, None),
        ControlCharacter::SingleLineMessageOpen => {
            (ParserState::ReadingMessage { single_line: true }, None)
        }
        // A close marker outside of a message is stray input.
        ControlCharacter::MessageClose => (ParserState::Other, None),
        ControlCharacter::Equal => (ParserState::Other, Some(Token::Equal)),
        ControlCharacter::Semicolon => (ParserState::Other, Some(Token::Semicolon)),
        ControlCharacter::Newline | ControlCharacter::SingleLineMessageClose => {
            (ParserState::Other, Some(Token::Newline))
        }
    }
}

fn quote_state(last_token: Option<&Token>) -> ParserState {
    match last_token.map(Token::kind) {
        Some(TokenKind::Value) | Some(TokenKind::Equal) => ParserState::ReadingValue,
        _ => ParserState::ReadingKey,
    }
}
