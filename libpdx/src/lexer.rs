//! Phase 2: Tokenizer
//!
//! Converts comment-stripped text into tokens, one read at a time.
//! There is no token buffer: the parser pulls tokens on demand from a
//! [`Cursor`] and peeks at most one raw character ahead. The cursor
//! only ever moves forward.

/// Token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Structural symbol: `{`, `}`, or `=`.
    Symbol,
    /// Comparison operator: `==`, `!=`, `<`, `<=`, `>`, `>=`, `?=`.
    Operator,
    /// Quoted string contents, quotes removed, no escape processing.
    Quoted,
    /// Identifier or number; empty at end of input.
    Word,
}

/// A single lexical token: its kind and raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    fn new(kind: TokenKind, text: &str) -> Self {
        Token {
            kind,
            text: text.to_string(),
        }
    }

    fn end() -> Self {
        Token {
            kind: TokenKind::Word,
            text: String::new(),
        }
    }

    /// True for a token with no text. This is how end-of-input reaches
    /// the parser; a quoted `""` reads the same way and likewise ends
    /// the enclosing body when it lands in key position.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// True for the characters an identifier/number token may contain.
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | ':' | '.' | '-' | '@')
}

/// Forward-only cursor over the source text.
pub struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Cursor { src, pos: 0 }
    }

    /// The next raw character, without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    /// Consume the next raw character.
    pub fn advance(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
        }
    }

    /// Advance past whitespace (space, tab, newline, carriage return).
    pub fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == ' ' || ch == '\t' || ch == '\n' || ch == '\r' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn rest(&self) -> &str {
        &self.src[self.pos..]
    }

    /// Read the next token. Returns the empty token at end of input, or
    /// when the next character starts no token (a stray `!` or `?`),
    /// which is left unconsumed.
    pub fn read_token(&mut self) -> Token {
        self.skip_whitespace();

        let Some(ch) = self.peek() else {
            return Token::end();
        };

        match ch {
            '{' => {
                self.advance();
                Token::new(TokenKind::Symbol, "{")
            }
            '}' => {
                self.advance();
                Token::new(TokenKind::Symbol, "}")
            }
            '=' | '<' | '>' => {
                self.advance();
                if self.peek() == Some('=') {
                    self.advance();
                    let text = match ch {
                        '=' => "==",
                        '<' => "<=",
                        _ => ">=",
                    };
                    Token::new(TokenKind::Operator, text)
                } else if ch == '=' {
                    Token::new(TokenKind::Symbol, "=")
                } else if ch == '<' {
                    Token::new(TokenKind::Operator, "<")
                } else {
                    Token::new(TokenKind::Operator, ">")
                }
            }
            '!' if self.rest().starts_with("!=") => {
                self.pos += 2;
                Token::new(TokenKind::Operator, "!=")
            }
            '?' if self.rest().starts_with("?=") => {
                self.pos += 2;
                Token::new(TokenKind::Operator, "?=")
            }
            '"' => self.read_quoted(),
            _ => self.read_word(),
        }
    }

    /// Read a quoted string. A missing closing quote takes the rest of
    /// the input rather than failing.
    fn read_quoted(&mut self) -> Token {
        self.advance();
        let start = self.pos;

        while let Some(ch) = self.peek() {
            if ch == '"' {
                let token = Token::new(TokenKind::Quoted, &self.src[start..self.pos]);
                self.advance();
                return token;
            }
            self.advance();
        }

        Token::new(TokenKind::Quoted, &self.src[start..])
    }

    /// Read a maximal run of identifier/number characters. The run may
    /// be empty when the next character belongs to no token class; the
    /// cursor does not move in that case.
    fn read_word(&mut self) -> Token {
        let start = self.pos;

        while let Some(ch) = self.peek() {
            if is_word_char(ch) {
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Word, &self.src[start..self.pos])
    }
}
