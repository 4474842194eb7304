//! Recursive-descent parser (§5): single-pass, one-token lookahead. Every
//! bounded position — a list element, a map/struct field value, a sum
//! payload — holds exactly one `Value` production; `List` is the only
//! composite that needs its own delimiter (`[...]`), which is what lets a
//! `List` nest inside another `List` unambiguously.
//!
//! The tabular row reader (see [`Parser::parse_table`]) drops below the
//! tokenizer entirely and reads raw bytes directly; [`Lexer::byte_pos`] and
//! [`Lexer::seek`] are the seam that lets it do so and then hand control
//! back.

use crate::error::ParseError;
use crate::lexer::{Lexer, Token};
use crate::value::{Id, Struct, Sum, Value};

/// Parses `text` as a single GLYPH value.
///
/// # Errors
///
/// Returns [`ParseError`] on any lexical or grammatical defect, or if the
/// text has trailing content after the value.
pub fn parse(text: &str) -> Result<Value, ParseError> {
    let mut p = Parser::new(text)?;
    let v = p.parse_value()?;
    p.expect_eof()?;
    Ok(v)
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(src);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn expect_eof(&self) -> Result<(), ParseError> {
        if self.current == Token::Eof {
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                pos: self.lexer.byte_pos(),
                found: format!("{:?}", self.current),
                expected: "end of input",
            })
        }
    }

    fn at_close_paren(&mut self) -> bool {
        self.current == Token::RParen
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.current.clone() {
            Token::Null => {
                self.advance()?;
                Ok(Value::Null)
            }
            Token::Bool(b, _) => {
                self.advance()?;
                Ok(Value::Bool(b))
            }
            Token::Int(n, _) => {
                self.advance()?;
                Ok(Value::Int(n))
            }
            Token::Float(f) => {
                self.advance()?;
                Ok(Value::Float(f))
            }
            Token::Str(s) => {
                self.advance()?;
                Ok(Value::Str(s))
            }
            Token::Bytes(b) => {
                self.advance()?;
                Ok(Value::Bytes(b))
            }
            Token::Caret => self.parse_id(),
            Token::LBracket => self.parse_list(),
            Token::LBrace => self.parse_map(),
            Token::At(name) if name == "tab" => self.parse_table(),
            Token::At(name) => Err(ParseError::UnknownDirective { pos: self.lexer.byte_pos(), name }),
            Token::Bare(word) => self.parse_bare_led(word),
            other => Err(ParseError::UnexpectedToken { pos: self.lexer.byte_pos(), found: format!("{other:?}"), expected: "a value" }),
        }
    }

    /// Dispatches on a leading bare word: a struct (`Name{...}`), a sum
    /// with payload (`Tag(...)`), a sum without payload (bare `Tag`), or a
    /// plain bare string.
    fn parse_bare_led(&mut self, word: String) -> Result<Value, ParseError> {
        self.advance()?;
        match &self.current {
            Token::LBrace => {
                let fields = self.parse_field_list()?;
                Ok(Value::Struct(Struct { type_name: word, fields }))
            }
            Token::LParen => {
                self.advance()?;
                let inner = if self.at_close_paren() { None } else { Some(Box::new(self.parse_value()?)) };
                self.expect(Token::RParen, "')'")?;
                Ok(Value::Sum(Sum { tag: word, value: inner }))
            }
            _ => Ok(Value::Str(word)),
        }
    }

    fn expect(&mut self, tok: Token, expected: &'static str) -> Result<(), ParseError> {
        if self.current == tok {
            self.advance()?;
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken { pos: self.lexer.byte_pos(), found: format!("{:?}", self.current), expected })
        }
    }

    /// `^value` or `^prefix:value`. The combined-quoted form (`^"a:b"`)
    /// splits on the first `:`; the two-atom form (`^t:ARS`) requires the
    /// original lexeme of a `Bool`/`Int` token to recover its literal text.
    fn parse_id(&mut self) -> Result<Value, ParseError> {
        let start = self.lexer.byte_pos();
        self.advance()?; // consume '^'
        if let Token::Str(combined) = self.current.clone() {
            self.advance()?;
            return Ok(match combined.split_once(':') {
                Some((prefix, value)) => Value::Id(Id::new(prefix, value)),
                None => Value::Id(Id::new("", combined)),
            });
        }
        let first = self.atom_text(start)?;
        if self.current == Token::Colon {
            self.advance()?;
            let second = self.atom_text(start)?;
            Ok(Value::Id(Id::new(first, second)))
        } else {
            Ok(Value::Id(Id::new("", first)))
        }
    }

    /// The literal source text of an atom usable as an Id component:
    /// a bare word, or the original lexeme of a bool/int literal.
    fn atom_text(&mut self, pos: usize) -> Result<String, ParseError> {
        let text = match self.current.clone() {
            Token::Bare(s) => s,
            Token::Bool(_, lexeme) => lexeme,
            Token::Int(_, lexeme) => lexeme,
            other => return Err(ParseError::UnexpectedToken { pos, found: format!("{other:?}"), expected: "an id component" }),
        };
        self.advance()?;
        Ok(text)
    }

    /// `[v1 v2 v3]`: each element is a single `Value` production. `,` is
    /// accepted and ignored between elements, as a non-canonical
    /// convenience for human-written input.
    fn parse_list(&mut self) -> Result<Value, ParseError> {
        let start = self.lexer.byte_pos();
        self.advance()?; // '['
        let mut items = Vec::new();
        loop {
            while self.current == Token::Comma {
                self.advance()?;
            }
            if self.current == Token::RBracket {
                break;
            }
            if self.current == Token::Eof {
                return Err(ParseError::UnterminatedList { pos: start });
            }
            items.push(self.parse_value()?);
        }
        self.advance()?; // ']'
        Ok(Value::List(items))
    }

    fn parse_map(&mut self) -> Result<Value, ParseError> {
        let fields = self.parse_field_list()?;
        Ok(Value::Map(fields))
    }

    /// Parses `{ key=value key=value ... }`, consuming the already-current
    /// `{` and the closing `}`. Each value is a single `Value` production.
    /// `:` is accepted in place of `=`, and `,` is accepted and ignored
    /// between fields — both non-canonical conveniences for human-written
    /// input.
    fn parse_field_list(&mut self) -> Result<Vec<(String, Value)>, ParseError> {
        let start = self.lexer.byte_pos();
        self.advance()?; // '{'
        let mut fields = Vec::new();
        loop {
            while self.current == Token::Comma {
                self.advance()?;
            }
            if self.current == Token::RBrace {
                break;
            }
            if self.current == Token::Eof {
                return Err(ParseError::UnterminatedMap { pos: start });
            }
            let key = match self.current.clone() {
                Token::Bare(s) => s,
                Token::Str(s) => s,
                other => return Err(ParseError::UnexpectedToken { pos: self.lexer.byte_pos(), found: format!("{other:?}"), expected: "a field name" }),
            };
            self.advance()?;
            if self.current == Token::Equals || self.current == Token::Colon {
                self.advance()?;
            } else {
                return Err(ParseError::UnexpectedToken { pos: self.lexer.byte_pos(), found: format!("{:?}", self.current), expected: "'=' or ':'" });
            }
            let value = self.parse_value()?;
            fields.push((key, value));
        }
        self.advance()?; // '}'
        Ok(fields)
    }

    /// `@tab _ [col col ...]\n|cell|cell|\n...\n@end`.
    ///
    /// Column names and cells are read directly off the source bytes
    /// rather than through `next_token`: after the `]` token, the lexer's
    /// cursor sits at the start of the row section, and this reads lines
    /// by splitting on `|`, re-invoking [`parse`] on each cell's text.
    fn parse_table(&mut self) -> Result<Value, ParseError> {
        let start = self.lexer.byte_pos();
        self.advance()?; // '@tab'
        // A single '_' placeholder name token, currently unused but part
        // of the wire grammar (reserved for a future named-table form).
        match self.current.clone() {
            Token::Null | Token::Bare(_) => {
                self.advance()?;
            }
            _ => return Err(ParseError::UnexpectedToken { pos: self.lexer.byte_pos(), found: format!("{:?}", self.current), expected: "table name" }),
        }
        self.expect(Token::LBracket, "'['")?;
        let mut cols = Vec::new();
        loop {
            while self.current == Token::Comma {
                self.advance()?;
            }
            if self.current == Token::RBracket {
                break;
            }
            if self.current == Token::Eof {
                return Err(ParseError::UnterminatedCell { pos: start });
            }
            let col = match self.current.clone() {
                Token::Bare(s) => s,
                Token::Str(s) => s,
                other => return Err(ParseError::UnexpectedToken { pos: self.lexer.byte_pos(), found: format!("{other:?}"), expected: "a column name" }),
            };
            self.advance()?;
            cols.push(col);
        }
        // `self.current` is already the `]` token here, which means the
        // lexer's cursor already sits exactly at the end of it — calling
        // `self.advance()` would invoke `next_token` and try to tokenize the
        // row section's leading `|`, which isn't a valid token. So the raw
        // row-reader below reads straight off `lexer.byte_pos()` without
        // advancing past `]` through the tokenizer at all.
        let src = self.lexer.source();
        let mut cursor = self.lexer.byte_pos();
        let bytes = src.as_bytes();
        if bytes.get(cursor) == Some(&b'\r') {
            cursor += 1;
        }
        if bytes.get(cursor) == Some(&b'\n') {
            cursor += 1;
        } else {
            return Err(ParseError::MissingSeparator { pos: cursor });
        }

        let mut rows = Vec::new();
        loop {
            let line_end = src[cursor..].find('\n').map(|i| cursor + i).unwrap_or(src.len());
            let mut line = &src[cursor..line_end];
            let consumed_len = line_end - cursor;
            if let Some(stripped) = line.strip_suffix('\r') {
                line = stripped;
            }
            let trimmed = line.trim();
            if trimmed == "@end" {
                // Consume the line, and its trailing newline if one exists
                // (the block may legally end at EOF right after `@end`).
                cursor += consumed_len;
                if line_end < src.len() {
                    cursor += 1;
                }
                break;
            }
            if line_end >= src.len() {
                return Err(ParseError::MissingEnd { pos: start });
            }
            let cells = split_row_cells(line, start)?;
            if cells.len() != cols.len() {
                return Err(ParseError::MissingSeparator { pos: cursor });
            }
            let mut fields = Vec::with_capacity(cols.len());
            for (col, cell) in cols.iter().zip(cells) {
                let value = parse(&cell)?;
                fields.push((col.clone(), value));
            }
            rows.push(Value::Map(fields));
            cursor = line_end + 1;
        }

        self.lexer.seek(cursor);
        self.current = self.lexer.next_token()?;
        Ok(Value::List(rows))
    }
}

/// Splits one `|cell|cell|...|` row into unescaped cell texts: `\\` -> `\`,
/// `\|` -> `|`, `\n` -> a literal newline, mirroring [`super::canon::tabular`]'s
/// cell escaping.
fn split_row_cells(line: &str, block_start: usize) -> Result<Vec<String>, ParseError> {
    let line = line.trim();
    let line = line.strip_prefix('|').ok_or(ParseError::UnterminatedCell { pos: block_start })?;
    let line = line.strip_suffix('|').ok_or(ParseError::UnterminatedCell { pos: block_start })?;

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('\\') => current.push('\\'),
                Some('|') => current.push('|'),
                Some('n') => current.push('\n'),
                Some(other) => {
                    current.push('\\');
                    current.push(other);
                }
                None => current.push('\\'),
            },
            '|' => {
                cells.push(std::mem::take(&mut current));
            }
            c => current.push(c),
        }
    }
    cells.push(current);
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canon::canonicalize_no_tabular;

    #[test]
    fn scalars_round_trip() {
        assert_eq!(parse("\u{2205}").unwrap(), Value::Null);
        assert_eq!(parse("t").unwrap(), Value::Bool(true));
        assert_eq!(parse("42").unwrap(), Value::Int(42));
        assert_eq!(parse("-7").unwrap(), Value::Int(-7));
        assert_eq!(parse("3.14").unwrap(), Value::Float(3.14));
        assert_eq!(parse("hello").unwrap(), Value::Str("hello".to_string()));
        assert_eq!(parse("\"hello world\"").unwrap(), Value::Str("hello world".to_string()));
        assert_eq!(parse("b64\"aGVsbG8=\"").unwrap(), Value::Bytes(b"hello".to_vec()));
    }

    #[test]
    fn explicit_list() {
        assert_eq!(parse("[1 2 3]").unwrap(), Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));
        assert_eq!(parse("[]").unwrap(), Value::List(vec![]));
    }

    #[test]
    fn commas_are_accepted_and_ignored_in_lists_and_maps() {
        assert_eq!(parse("[1, 2, 3]").unwrap(), Value::List(vec![Value::int(1), Value::int(2), Value::int(3)]));
        let m = parse("{a=1, b=2}").unwrap();
        assert_eq!(m.get("a").unwrap(), &Value::Int(1));
        assert_eq!(m.get("b").unwrap(), &Value::Int(2));
    }

    #[test]
    fn colon_is_accepted_as_a_field_separator() {
        let m = parse("{a: 1, b: 2}").unwrap();
        assert_eq!(m.get("a").unwrap(), &Value::Int(1));
        assert_eq!(m.get("b").unwrap(), &Value::Int(2));
    }

    #[test]
    fn map_field_value_is_a_single_value() {
        let m = parse("{a=1 b=[2 3]}").unwrap();
        assert_eq!(m.get("a").unwrap(), &Value::Int(1));
        assert_eq!(m.get("b").unwrap(), &Value::List(vec![Value::Int(2), Value::Int(3)]));
    }

    #[test]
    fn trailing_content_after_a_value_errors() {
        assert!(parse("1 2").is_err());
    }

    #[test]
    fn nested_list_requires_explicit_brackets() {
        let v = parse("[[1 2] [3 4]]").unwrap();
        assert_eq!(v, Value::List(vec![Value::list(vec![Value::int(1), Value::int(2)]), Value::list(vec![Value::int(3), Value::int(4)])]));
    }

    #[test]
    fn struct_and_sum() {
        let s = parse("Team{name=Arsenal}").unwrap();
        assert_eq!(s.as_struct().unwrap().type_name, "Team");
        assert_eq!(parse("Some(7)").unwrap(), Value::Sum(Sum { tag: "Some".to_string(), value: Some(Box::new(Value::Int(7))) }));
        assert_eq!(parse("None").unwrap(), Value::Sum(Sum { tag: "None".to_string(), value: None }));
        assert_eq!(parse("None()").unwrap(), Value::Sum(Sum { tag: "None".to_string(), value: None }));
    }

    #[test]
    fn sum_payload_is_a_single_value() {
        assert_eq!(parse("Pair([1 2])").unwrap(), Value::Sum(Sum { tag: "Pair".to_string(), value: Some(Box::new(Value::list(vec![Value::int(1), Value::int(2)]))) }));
    }

    #[test]
    fn ids() {
        assert_eq!(parse("^t:ARS").unwrap(), Value::Id(Id::new("t", "ARS")));
        assert_eq!(parse("^123").unwrap(), Value::Id(Id::new("", "123")));
        assert_eq!(parse("^\"a b:c\"").unwrap(), Value::Id(Id::new("a b", "c")));
    }

    #[test]
    fn tabular_round_trips_through_canon() {
        let text = "@tab _ [a b]\n|1|2|\n|3|4|\n|5|6|\n@end";
        let v = parse(text).unwrap();
        assert_eq!(v.len(), 3);
        assert_eq!(canonicalize_no_tabular(&v), "[{a=1 b=2} {a=3 b=4} {a=5 b=6}]");
    }

    #[test]
    fn tabular_cell_escapes_round_trip() {
        let text = "@tab _ [a]\n|\"x\\|y\"|\n@end";
        let v = parse(text).unwrap();
        assert_eq!(v.index(0).unwrap().get("a").unwrap(), &Value::Str("x|y".to_string()));
    }

    #[test]
    fn tabular_followed_by_trailing_content_resumes_tokenizing() {
        let text = "[@tab _ [a]\n|1|\n@end\n]";
        let v = parse(text).unwrap();
        // The outer explicit brackets hold a one-element list whose sole
        // element is the table's own one-row list.
        assert_eq!(v, Value::List(vec![Value::list(vec![Value::map(vec![("a".to_string(), Value::int(1))])])]));
    }

    #[test]
    fn unterminated_list_errors() {
        assert!(parse("[1 2").is_err());
    }

    #[test]
    fn unterminated_map_errors() {
        assert!(parse("{a=1").is_err());
    }

    #[test]
    fn missing_end_errors() {
        assert!(parse("@tab _ [a]\n|1|\n").is_err());
    }
}
