//! Lexer (tokenizer) for schema source text.
//!
//! Commas are insignificant and skipped like whitespace. Keywords such as
//! `type` or `interface` are lexed as names and recognized by the parser,
//! so they stay usable as field names.

use crate::{ParseError, ParseResult, Span};

/// Token types.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Name(String),
    Int(i64),
    Float(f64),
    /// Regular or block string, with escapes and indentation resolved.
    String(String),

    // Punctuators
    Bang,     // !
    Dollar,   // $
    Amp,      // &
    LParen,   // (
    RParen,   // )
    Spread,   // ...
    Colon,    // :
    Eq,       // =
    At,       // @
    LBracket, // [
    RBracket, // ]
    LBrace,   // {
    RBrace,   // }
    Pipe,     // |

    // End of file
    Eof,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Name(_) => "name",
            TokenKind::Int(_) => "integer",
            TokenKind::Float(_) => "float",
            TokenKind::String(_) => "string",
            TokenKind::Bang => "!",
            TokenKind::Dollar => "$",
            TokenKind::Amp => "&",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Spread => "...",
            TokenKind::Colon => ":",
            TokenKind::Eq => "=",
            TokenKind::At => "@",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Pipe => "|",
            TokenKind::Eof => "end of input",
        }
    }
}

/// A token with its span.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn eof(pos: usize, line: usize, column: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            span: Span::new(pos, pos, line, column),
        }
    }
}

/// Lexer state.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize all input into a vector of tokens.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn span_from(&self, start: usize, start_line: usize, start_col: usize) -> Span {
        Span::new(start, self.pos, start_line, start_col)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    /// Look `n` characters past the next one without consuming.
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.chars.clone().nth(n).map(|(_, c)| c)
    }

    fn next_char(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.pos = pos + c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(c)
        } else {
            None
        }
    }

    /// Skip whitespace, commas, and `#` comments.
    fn skip_ignored(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() || c == ',' || c == '\u{feff}' {
                self.next_char();
            } else if c == '#' {
                while let Some(c) = self.peek_char() {
                    if c == '\n' {
                        break;
                    }
                    self.next_char();
                }
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> ParseResult<Token> {
        self.skip_ignored();

        let start = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        let Some(c) = self.next_char() else {
            return Ok(Token::eof(self.pos, self.line, self.column));
        };

        let kind = match c {
            '!' => TokenKind::Bang,
            '$' => TokenKind::Dollar,
            '&' => TokenKind::Amp,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ':' => TokenKind::Colon,
            '=' => TokenKind::Eq,
            '@' => TokenKind::At,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '|' => TokenKind::Pipe,
            '.' => {
                if self.peek_char() == Some('.') && self.peek_nth(1) == Some('.') {
                    self.next_char();
                    self.next_char();
                    TokenKind::Spread
                } else {
                    return Err(ParseError::unexpected_char(
                        self.span_from(start, start_line, start_col),
                        '.',
                    ));
                }
            }
            '"' => {
                if self.peek_char() == Some('"') && self.peek_nth(1) == Some('"') {
                    self.next_char();
                    self.next_char();
                    self.scan_block_string(start, start_line, start_col)?
                } else {
                    self.scan_string(start, start_line, start_col)?
                }
            }
            c if c == '_' || c.is_ascii_alphabetic() => self.scan_name(c),
            c if c == '-' || c.is_ascii_digit() => {
                self.scan_number(c, start, start_line, start_col)?
            }
            c => {
                return Err(ParseError::unexpected_char(
                    self.span_from(start, start_line, start_col),
                    c,
                ));
            }
        };

        Ok(Token::new(
            kind,
            self.span_from(start, start_line, start_col),
        ))
    }

    fn scan_string(
        &mut self,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        let mut value = String::new();

        loop {
            match self.next_char() {
                None | Some('\n') => {
                    return Err(ParseError::unterminated_string(
                        self.span_from(start, start_line, start_col),
                    ));
                }
                Some('"') => break,
                Some('\\') => {
                    let escaped = match self.next_char() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('b') => '\u{8}',
                        Some('f') => '\u{c}',
                        Some('/') => '/',
                        Some('\\') => '\\',
                        Some('"') => '"',
                        Some('u') => self.scan_unicode_escape(start, start_line, start_col)?,
                        Some(c) => {
                            return Err(ParseError::new(
                                format!("invalid escape sequence '\\{}'", c),
                                self.span_from(start, start_line, start_col),
                            ));
                        }
                        None => {
                            return Err(ParseError::unterminated_string(
                                self.span_from(start, start_line, start_col),
                            ));
                        }
                    };
                    value.push(escaped);
                }
                Some(c) => value.push(c),
            }
        }

        Ok(TokenKind::String(value))
    }

    fn scan_unicode_escape(
        &mut self,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<char> {
        let mut hex = String::new();
        for _ in 0..4 {
            match self.next_char() {
                Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                _ => {
                    return Err(ParseError::new(
                        "invalid unicode escape",
                        self.span_from(start, start_line, start_col),
                    ));
                }
            }
        }
        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| {
                ParseError::new(
                    format!("invalid unicode escape '\\u{}'", hex),
                    self.span_from(start, start_line, start_col),
                )
            })
    }

    fn scan_block_string(
        &mut self,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        let mut raw = String::new();

        loop {
            match self.next_char() {
                None => {
                    return Err(ParseError::unterminated_string(
                        self.span_from(start, start_line, start_col),
                    ));
                }
                Some('"') if self.peek_char() == Some('"') && self.peek_nth(1) == Some('"') => {
                    self.next_char();
                    self.next_char();
                    break;
                }
                Some('\\')
                    if self.peek_char() == Some('"')
                        && self.peek_nth(1) == Some('"')
                        && self.peek_nth(2) == Some('"') =>
                {
                    self.next_char();
                    self.next_char();
                    self.next_char();
                    raw.push_str("\"\"\"");
                }
                Some(c) => raw.push(c),
            }
        }

        Ok(TokenKind::String(block_string_value(&raw)))
    }

    fn scan_name(&mut self, first: char) -> TokenKind {
        let mut name = String::new();
        name.push(first);

        while let Some(c) = self.peek_char() {
            if c.is_ascii_alphanumeric() || c == '_' {
                name.push(c);
                self.next_char();
            } else {
                break;
            }
        }

        TokenKind::Name(name)
    }

    fn scan_number(
        &mut self,
        first: char,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        let mut number = String::new();
        number.push(first);
        let mut is_float = false;

        self.push_digits(&mut number);

        if self.peek_char() == Some('.') {
            is_float = true;
            number.push('.');
            self.next_char();
            self.push_digits(&mut number);
        }

        if matches!(self.peek_char(), Some('e' | 'E')) {
            is_float = true;
            number.push('e');
            self.next_char();
            if let Some(sign @ ('+' | '-')) = self.peek_char() {
                number.push(sign);
                self.next_char();
            }
            self.push_digits(&mut number);
        }

        let span = self.span_from(start, start_line, start_col);
        if is_float {
            number
                .parse()
                .map(TokenKind::Float)
                .map_err(|_| ParseError::invalid_number(span, &number))
        } else {
            number
                .parse()
                .map(TokenKind::Int)
                .map_err(|_| ParseError::invalid_number(span, &number))
        }
    }

    fn push_digits(&mut self, number: &mut String) {
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                number.push(c);
                self.next_char();
            } else {
                break;
            }
        }
    }
}

/// Resolve a raw block string: drop the common indentation of every line
/// after the first, then drop leading and trailing blank lines.
fn block_string_value(raw: &str) -> String {
    let lines: Vec<&str> = raw.split('\n').map(|l| l.trim_end_matches('\r')).collect();

    let common_indent = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    let mut out: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, &l)| {
            if i == 0 {
                l
            } else if l.trim().is_empty() {
                ""
            } else {
                &l[common_indent..]
            }
        })
        .collect();

    while out.first().is_some_and(|l| l.trim().is_empty()) {
        out.remove(0);
    }
    while out.last().is_some_and(|l| l.trim().is_empty()) {
        out.pop();
    }

    out.join("\n")
}
