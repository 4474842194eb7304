//! Tokenizer (§5): turns GLYPH text into a stream of tokens with one-token
//! lookahead support for the parser. Byte positions are tracked throughout
//! so error messages can point at the offending byte.
//!
//! The tabular row reader (see `parser::read_table`) drops below this
//! tokenizer entirely and reads raw bytes directly; [`Lexer::byte_pos`] and
//! [`Lexer::seek`] are the seam that lets it do so and then hand control
//! back.

use base64::Engine as _;

use crate::error::LexError;

const RESERVED_BOOL_TRUE: &[&str] = &["t", "true"];
const RESERVED_BOOL_FALSE: &[&str] = &["f", "false"];
const RESERVED_NULL: &[&str] = &["null", "nil", "_", "\u{2205}"];

/// A lexical token. `Bool` and `Int` carry their original lexeme alongside
/// the parsed value, since `^t:ARS` must be able to recover the literal
/// text `"t"` as an Id prefix rather than the boolean `true`.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Null,
    Bool(bool, String),
    Int(i64, String),
    Float(f64),
    /// An unquoted bare word that is not `Bool`/`Int`/`Null` — an
    /// identifier, struct type name, sum tag, or bare string/id part.
    Bare(String),
    Str(String),
    Bytes(Vec<u8>),
    Caret,
    Colon,
    Equals,
    /// Accepted as an alternative element/field separator, per the
    /// parser's looser-than-canonical grammar; never emitted.
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    At(String),
    Eof,
}

pub struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(src: &'a str) -> Self {
        Self { src, bytes: src.as_bytes(), pos: 0 }
    }

    /// Current byte offset, pointing exactly at the end of the
    /// most-recently-returned token's text (whitespace before the *next*
    /// token has not yet been skipped).
    #[must_use]
    pub fn byte_pos(&self) -> usize {
        self.pos
    }

    /// The full source text, for raw-byte slicing by the tabular reader.
    #[must_use]
    pub fn source(&self) -> &'a str {
        self.src
    }

    /// Repositions the lexer's cursor, for resuming normal tokenization
    /// after the tabular reader has consumed a block directly.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    fn peek_char(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while let Some(c) = self.peek_char() {
                if c.is_whitespace() {
                    self.bump();
                } else {
                    break;
                }
            }
            if self.peek_char() == Some('#') {
                while let Some(c) = self.peek_char() {
                    if c == '\n' {
                        break;
                    }
                    self.bump();
                }
            } else {
                break;
            }
        }
    }

    /// Produces the next token, advancing past it.
    ///
    /// # Errors
    ///
    /// Returns [`LexError`] on malformed string/bytes escapes or
    /// out-of-range integer literals.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments();
        let Some(c) = self.peek_char() else {
            return Ok(Token::Eof);
        };
        let start = self.pos;
        match c {
            '^' => {
                self.bump();
                Ok(Token::Caret)
            }
            ':' => {
                self.bump();
                Ok(Token::Colon)
            }
            ',' => {
                self.bump();
                Ok(Token::Comma)
            }
            '=' => {
                self.bump();
                Ok(Token::Equals)
            }
            '(' => {
                self.bump();
                Ok(Token::LParen)
            }
            ')' => {
                self.bump();
                Ok(Token::RParen)
            }
            '[' => {
                self.bump();
                Ok(Token::LBracket)
            }
            ']' => {
                self.bump();
                Ok(Token::RBracket)
            }
            '{' => {
                self.bump();
                Ok(Token::LBrace)
            }
            '}' => {
                self.bump();
                Ok(Token::RBrace)
            }
            '@' => {
                self.bump();
                let name = self.scan_bare_run();
                Ok(Token::At(name))
            }
            '"' => self.scan_string(start),
            '\u{2205}' => {
                self.bump();
                Ok(Token::Null)
            }
            c if c.is_ascii_digit() || (c == '-' && self.is_number_lookahead()) => self.scan_number(start),
            c if is_ident_start(c) => self.scan_bare_or_bytes(start),
            c => Err(LexError::UnexpectedChar { pos: start, ch: c }),
        }
    }

    fn is_number_lookahead(&self) -> bool {
        let mut iter = self.src[self.pos..].chars();
        iter.next();
        matches!(iter.next(), Some(c) if c.is_ascii_digit())
    }

    fn scan_bare_run(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if is_ident_continue(c) {
                self.bump();
            } else {
                break;
            }
        }
        self.src[start..self.pos].to_string()
    }

    fn scan_bare_or_bytes(&mut self, start: usize) -> Result<Token, LexError> {
        let word = self.scan_bare_run();
        if word == "b64" && self.peek_char() == Some('"') {
            return self.scan_bytes(start);
        }
        if RESERVED_BOOL_TRUE.contains(&word.as_str()) {
            return Ok(Token::Bool(true, word));
        }
        if RESERVED_BOOL_FALSE.contains(&word.as_str()) {
            return Ok(Token::Bool(false, word));
        }
        if RESERVED_NULL.contains(&word.as_str()) {
            return Ok(Token::Null);
        }
        Ok(Token::Bare(word))
    }

    fn scan_number(&mut self, start: usize) -> Result<Token, LexError> {
        if self.peek_char() == Some('-') {
            self.bump();
        }
        while matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
        let mut is_float = false;
        if self.peek_char() == Some('.') {
            is_float = true;
            self.bump();
            while matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
                self.bump();
            }
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            is_float = true;
            self.bump();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.bump();
            }
            while matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
                self.bump();
            }
        }
        let text = &self.src[start..self.pos];
        if is_float {
            let v: f64 = text.parse().map_err(|_| LexError::UnexpectedChar { pos: start, ch: text.chars().next().unwrap_or('?') })?;
            Ok(Token::Float(v))
        } else {
            let v: i64 = text.parse().map_err(|_| LexError::IntLiteralOverflow { pos: start })?;
            Ok(Token::Int(v, text.to_string()))
        }
    }

    fn scan_string(&mut self, start: usize) -> Result<Token, LexError> {
        self.bump(); // opening quote
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(LexError::UnterminatedString { pos: start }),
                Some('"') => break,
                Some('\\') => out.push(self.scan_escape(start)?),
                Some(c) => out.push(c),
            }
        }
        Ok(Token::Str(out))
    }

    fn scan_escape(&mut self, start: usize) -> Result<char, LexError> {
        match self.bump() {
            Some('"') => Ok('"'),
            Some('\\') => Ok('\\'),
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('t') => Ok('\t'),
            Some('u') => {
                let mut hex = String::with_capacity(4);
                for _ in 0..4 {
                    match self.bump() {
                        Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                        _ => return Err(LexError::BadUnicodeEscape { pos: start }),
                    }
                }
                let code = u32::from_str_radix(&hex, 16).map_err(|_| LexError::BadUnicodeEscape { pos: start })?;
                char::from_u32(code).ok_or(LexError::BadUnicodeEscape { pos: start })
            }
            _ => Err(LexError::BadUnicodeEscape { pos: start }),
        }
    }

    fn scan_bytes(&mut self, start: usize) -> Result<Token, LexError> {
        self.bump(); // opening quote
        let content_start = self.pos;
        loop {
            match self.bump() {
                None => return Err(LexError::UnterminatedBytes { pos: start }),
                Some('"') => break,
                Some(_) => {}
            }
        }
        let content = &self.src[content_start..self.pos - 1];
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(content)
            .map_err(|_| LexError::BadBase64 { pos: start })?;
        Ok(Token::Bytes(decoded))
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | '+' | '@')
}
