//! Parser for the stringified nested fields in the source tables.
//!
//! Cast, crew, keyword and genre cells hold lists of records written as
//! Python literals:
//!
//! ```text
//! [{'cast_id': 14, 'character': 'Woody', 'name': 'Tom Hanks', 'profile_path': None}]
//! ```
//!
//! This module parses that grammar into [`Literal`] values and offers typed
//! extraction into the entry structs from [`crate::types`].

use crate::error::{DataLoadError, Result};
use crate::types::{CastEntry, CrewEntry, GenreEntry, KeywordEntry};

/// A parsed literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Literal>),
    /// Key order is preserved; keys are always strings in the source data
    Dict(Vec<(String, Literal)>),
}

impl Literal {
    /// Look up a key in a dict literal
    pub fn get(&self, key: &str) -> Option<&Literal> {
        match self {
            Literal::Dict(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Literal::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// String value of `key`, or empty string when the key is absent or not a string
    fn str_field(&self, key: &str) -> String {
        self.get(key)
            .and_then(Literal::as_str)
            .unwrap_or_default()
            .to_string()
    }
}

/// Parse a complete literal.
///
/// An empty or whitespace-only cell is treated as an empty list.
pub fn parse_literal(text: &str) -> Result<Literal> {
    let mut parser = LiteralParser::new(text);
    parser.skip_whitespace();
    if parser.at_end() {
        return Ok(Literal::List(Vec::new()));
    }
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if !parser.at_end() {
        return Err(parser.error("unexpected trailing characters"));
    }
    Ok(value)
}

/// Parse a literal that must be a list of dicts
fn parse_record_list(text: &str) -> Result<Vec<Literal>> {
    match parse_literal(text)? {
        Literal::List(items) => {
            for item in &items {
                if !matches!(item, Literal::Dict(_)) {
                    return Err(DataLoadError::LiteralError {
                        position: 0,
                        reason: "expected a list of records".to_string(),
                    });
                }
            }
            Ok(items)
        }
        _ => Err(DataLoadError::LiteralError {
            position: 0,
            reason: "expected a list".to_string(),
        }),
    }
}

pub fn parse_cast(text: &str) -> Result<Vec<CastEntry>> {
    Ok(parse_record_list(text)?
        .iter()
        .map(|item| CastEntry {
            name: item.str_field("name"),
            character: item.str_field("character"),
            order: item.get("order").and_then(Literal::as_int),
        })
        .collect())
}

pub fn parse_crew(text: &str) -> Result<Vec<CrewEntry>> {
    Ok(parse_record_list(text)?
        .iter()
        .map(|item| CrewEntry {
            name: item.str_field("name"),
            job: item.str_field("job"),
            department: item.str_field("department"),
        })
        .collect())
}

pub fn parse_keywords(text: &str) -> Result<Vec<KeywordEntry>> {
    Ok(parse_record_list(text)?
        .iter()
        .map(|item| KeywordEntry {
            id: item.get("id").and_then(Literal::as_int),
            name: item.str_field("name"),
        })
        .collect())
}

pub fn parse_genres(text: &str) -> Result<Vec<GenreEntry>> {
    Ok(parse_record_list(text)?
        .iter()
        .map(|item| GenreEntry {
            id: item.get("id").and_then(Literal::as_int),
            name: item.str_field("name"),
        })
        .collect())
}

/// Recursive-descent parser over the characters of one cell
struct LiteralParser {
    chars: Vec<char>,
    pos: usize,
}

impl LiteralParser {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn error(&self, reason: &str) -> DataLoadError {
        DataLoadError::LiteralError {
            position: self.pos,
            reason: reason.to_string(),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            _ => Err(self.error(&format!("expected '{}'", expected))),
        }
    }

    fn parse_value(&mut self) -> Result<Literal> {
        self.skip_whitespace();
        match self.peek() {
            Some('[') => self.parse_list(),
            Some('{') => self.parse_dict(),
            Some('\'') | Some('"') => Ok(Literal::Str(self.parse_string()?)),
            Some(c) if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => self.parse_number(),
            Some(c) if c.is_ascii_alphabetic() => self.parse_keyword(),
            Some(_) => Err(self.error("unexpected character")),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_list(&mut self) -> Result<Literal> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(']') {
                self.pos += 1;
                return Ok(Literal::List(items));
            }
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.bump() {
                Some(',') => continue,
                Some(']') => return Ok(Literal::List(items)),
                _ => return Err(self.error("expected ',' or ']' in list")),
            }
        }
    }

    fn parse_dict(&mut self) -> Result<Literal> {
        self.expect('{')?;
        let mut entries = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.pos += 1;
                return Ok(Literal::Dict(entries));
            }
            let key = match self.peek() {
                Some('\'') | Some('"') => self.parse_string()?,
                _ => return Err(self.error("expected string key")),
            };
            self.skip_whitespace();
            self.expect(':')?;
            let value = self.parse_value()?;
            entries.push((key, value));
            self.skip_whitespace();
            match self.bump() {
                Some(',') => continue,
                Some('}') => return Ok(Literal::Dict(entries)),
                _ => return Err(self.error("expected ',' or '}' in dict")),
            }
        }
    }

    fn parse_string(&mut self) -> Result<String> {
        let quote = self.bump().ok_or_else(|| self.error("expected quote"))?;
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => {
                    let escaped = self.bump().ok_or_else(|| self.error("dangling escape"))?;
                    match escaped {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        '\\' | '\'' | '"' => out.push(escaped),
                        'x' => out.push(self.parse_hex_escape(2)?),
                        'u' => out.push(self.parse_hex_escape(4)?),
                        // Python keeps unknown escapes verbatim
                        other => {
                            out.push('\\');
                            out.push(other);
                        }
                    }
                }
                Some(c) => out.push(c),
            }
        }
    }

    fn parse_hex_escape(&mut self, digits: usize) -> Result<char> {
        let mut code = 0u32;
        for _ in 0..digits {
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error("invalid hex escape"))?;
            code = code * 16 + digit;
        }
        char::from_u32(code).ok_or_else(|| self.error("invalid code point"))
    }

    fn parse_number(&mut self) -> Result<Literal> {
        let start = self.pos;
        while matches!(
            self.peek(),
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')
        ) {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        if let Ok(i) = text.parse::<i64>() {
            return Ok(Literal::Int(i));
        }
        text.parse::<f64>()
            .map(Literal::Float)
            .map_err(|_| self.error(&format!("invalid number '{}'", text)))
    }

    fn parse_keyword(&mut self) -> Result<Literal> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();
        match word.as_str() {
            "None" => Ok(Literal::None),
            "True" => Ok(Literal::Bool(true)),
            "False" => Ok(Literal::Bool(false)),
            _ => Err(DataLoadError::LiteralError {
                position: start,
                reason: format!("unknown identifier '{}'", word),
            }),
        }
    }
}
