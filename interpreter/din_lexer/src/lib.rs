//! Din Lexer - hand-written UTF-8 tokenizer.
//!
//! The tokenizer decodes the input one Unicode scalar at a time, tracking a
//! 1-based line/column [`Position`] for every token it produces. It is a
//! pull lexer: [`Tokenizer::next_token`] yields the next token and, once the
//! input is exhausted, an infinite tail of `Eof` tokens. Errors are not
//! fatal to the lexer itself — they surface as `Illegal` tokens whose text
//! carries the diagnostic, and the parser stops at the first one.
//!
//! Restarting is by constructing a new tokenizer over the same input.

mod keywords;

use din_ir::{Position, Token, TokenKind};

/// The tokenizer's view of the current character.
///
/// `Eof` is sticky: once the input is exhausted (or an undecodable byte is
/// hit) the tokenizer stays at end-of-input.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Ch {
    Char(char),
    Eof,
}

/// A pull tokenizer over a byte slice.
///
/// Construction reads the first character, so `pos` always refers to the
/// character currently under the cursor.
pub struct Tokenizer<'a> {
    /// Raw source bytes.
    input: &'a [u8],
    /// Byte offset of the next character to decode.
    offset: usize,
    /// The character currently under the cursor.
    ch: Ch,
    /// Pending lexer error, reported as an `Illegal` token at EOF.
    error_msg: Option<String>,
    /// Position of the character under the cursor.
    pos: Position,
    /// Position of the next character.
    next_pos: Position,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer positioned at the first character of `input`.
    pub fn new(input: &'a [u8]) -> Self {
        let mut t = Tokenizer {
            input,
            offset: 0,
            ch: Ch::Eof,
            error_msg: None,
            pos: Position::start(),
            next_pos: Position::start(),
        };
        t.advance();
        t
    }

    /// Decode the next scalar, updating position tracking.
    ///
    /// Invalid UTF-8 stops the lexer with a sticky error so the caller sees
    /// a single `Illegal` token at the offending byte.
    fn advance(&mut self) {
        self.pos = self.next_pos;

        let Some(&first) = self.input.get(self.offset) else {
            self.ch = Ch::Eof;
            return;
        };

        let width = utf8_width(first);
        let ch = self
            .input
            .get(self.offset..self.offset + width)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .and_then(|s| s.chars().next());

        let Some(ch) = ch else {
            self.ch = Ch::Eof;
            self.error_msg = Some(format!("invalid UTF-8 byte 0x{first:02x}"));
            return;
        };

        self.next_pos = self.next_pos.advanced(ch);
        self.ch = Ch::Char(ch);
        self.offset += width;
    }

    /// Raw first byte of the next character, without decoding it.
    ///
    /// Comment delimiters are ASCII, so a byte peek is enough to decide
    /// whether `/` starts a comment.
    #[inline]
    fn peek_byte(&self) -> Option<u8> {
        self.input.get(self.offset).copied()
    }

    /// Skip whitespace, line comments, and block comments.
    ///
    /// Block comments do not nest; an unterminated one leaves a sticky
    /// error that the next `next_token` call reports.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while matches!(self.ch, Ch::Char(' ' | '\t' | '\r' | '\n')) {
                self.advance();
            }

            if self.ch == Ch::Char('/') {
                match self.peek_byte() {
                    Some(b'/') => {
                        self.advance();
                        self.advance();
                        while !matches!(self.ch, Ch::Char('\n') | Ch::Eof) {
                            self.advance();
                        }
                        self.advance();
                        continue;
                    }
                    Some(b'*') => {
                        self.advance();
                        self.advance();
                        loop {
                            match self.ch {
                                Ch::Eof => {
                                    if self.error_msg.is_none() {
                                        self.error_msg =
                                            Some("unterminated multiline comment".to_string());
                                    }
                                    return;
                                }
                                Ch::Char('*') if self.peek_byte() == Some(b'/') => {
                                    self.advance();
                                    self.advance();
                                    break;
                                }
                                Ch::Char(_) => self.advance(),
                            }
                        }
                        continue;
                    }
                    _ => {}
                }
            }

            break;
        }
    }

    /// Produce the next token.
    ///
    /// After the end of input this keeps returning `Eof` (or the same
    /// `Illegal` token if the lexer stopped on an error).
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        let Ch::Char(ch) = self.ch else {
            if let Some(msg) = &self.error_msg {
                return Token::with_text(self.pos, TokenKind::Illegal, msg.clone());
            }
            return Token::fixed(self.pos, TokenKind::Eof);
        };

        let pos = self.pos;
        self.advance();

        if is_name_start(ch) {
            return self.scan_name(pos, ch);
        }

        match ch {
            ':' => Token::fixed(pos, TokenKind::Colon),
            ',' => Token::fixed(pos, TokenKind::Comma),
            '{' => Token::fixed(pos, TokenKind::LBrace),
            '[' => Token::fixed(pos, TokenKind::LBracket),
            '(' => Token::fixed(pos, TokenKind::LParen),
            '}' => Token::fixed(pos, TokenKind::RBrace),
            ']' => Token::fixed(pos, TokenKind::RBracket),
            ')' => Token::fixed(pos, TokenKind::RParen),
            '?' => Token::fixed(pos, TokenKind::Question),
            '+' => self.with_eq(pos, TokenKind::Plus, TokenKind::PlusAssign),
            '-' => self.with_eq(pos, TokenKind::Minus, TokenKind::MinusAssign),
            '*' => self.with_eq(pos, TokenKind::Times, TokenKind::TimesAssign),
            '/' => self.with_eq(pos, TokenKind::Divide, TokenKind::DivideAssign),
            '%' => self.with_eq(pos, TokenKind::Modulo, TokenKind::ModuloAssign),
            '=' => self.with_eq(pos, TokenKind::Assign, TokenKind::Equal),
            '<' => self.with_eq(pos, TokenKind::Lt, TokenKind::LtEq),
            '>' => self.with_eq(pos, TokenKind::Gt, TokenKind::GtEq),
            '!' => {
                if self.ch == Ch::Char('=') {
                    self.advance();
                    Token::fixed(pos, TokenKind::NotEqual)
                } else {
                    let msg = match self.ch {
                        Ch::Char(c) => format!("expected != instead of !{c}"),
                        Ch::Eof => "expected != instead of !".to_string(),
                    };
                    Token::with_text(pos, TokenKind::Illegal, msg)
                }
            }
            '.' => {
                if self.ch == Ch::Char('.') {
                    self.advance();
                    if self.ch != Ch::Char('.') {
                        return Token::with_text(pos, TokenKind::Illegal, "unexpected ..");
                    }
                    self.advance();
                    Token::fixed(pos, TokenKind::Ellipsis)
                } else {
                    Token::fixed(pos, TokenKind::Dot)
                }
            }
            '0'..='9' => self.scan_number(pos, ch),
            '"' | '\'' => self.scan_string(pos, ch),
            _ => Token::with_text(pos, TokenKind::Illegal, format!("unexpected {ch}")),
        }
    }

    /// One- or two-character operator: `single`, or `double` when the next
    /// character is `=`.
    fn with_eq(&mut self, pos: Position, single: TokenKind, double: TokenKind) -> Token {
        if self.ch == Ch::Char('=') {
            self.advance();
            Token::fixed(pos, double)
        } else {
            Token::fixed(pos, single)
        }
    }

    /// Scan an identifier or keyword starting with `first`.
    fn scan_name(&mut self, pos: Position, first: char) -> Token {
        let mut name = String::new();
        name.push(first);
        while let Ch::Char(c) = self.ch {
            if is_name_start(c) || c.is_ascii_digit() {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }
        match keywords::lookup(&name) {
            Some(kind) => Token::fixed(pos, kind),
            None => Token::with_text(pos, TokenKind::Name, name),
        }
    }

    /// Scan an integer or float literal starting with digit `first`.
    ///
    /// At most one `.` may appear; its presence promotes the token to
    /// `Float`. A second `.` is an error (`1.2.3` is not a number).
    fn scan_number(&mut self, pos: Position, first: char) -> Token {
        let mut text = String::new();
        text.push(first);
        let mut is_float = false;
        while let Ch::Char(c) = self.ch {
            if c.is_ascii_digit() {
                text.push(c);
                self.advance();
            } else if c == '.' {
                if is_float {
                    return Token::with_text(
                        pos,
                        TokenKind::Illegal,
                        "unexpected second '.' in number",
                    );
                }
                is_float = true;
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let kind = if is_float {
            TokenKind::Float
        } else {
            TokenKind::Int
        };
        Token::with_text(pos, kind, text)
    }

    /// Scan a string literal delimited by `quote` (`"` or `'`).
    ///
    /// Raw CR/LF are rejected; the recognized escapes are the matching
    /// quote, `\\`, `\t`, `\r`, and `\n`. The returned token text is the
    /// decoded string contents.
    fn scan_string(&mut self, pos: Position, quote: char) -> Token {
        let mut value = String::new();
        loop {
            let c = match self.ch {
                Ch::Eof => {
                    if let Some(msg) = self.error_msg.take() {
                        // Invalid UTF-8 inside the literal wins over the
                        // unterminated-string report.
                        return Token::with_text(pos, TokenKind::Illegal, msg);
                    }
                    return Token::with_text(
                        pos,
                        TokenKind::Illegal,
                        "didn't find end quote in string",
                    );
                }
                Ch::Char(c) if c == quote => {
                    self.advance();
                    return Token::with_text(pos, TokenKind::Str, value);
                }
                Ch::Char('\r') | Ch::Char('\n') => {
                    return Token::with_text(
                        pos,
                        TokenKind::Illegal,
                        "can't have newline in string",
                    );
                }
                Ch::Char('\\') => {
                    self.advance();
                    match self.ch {
                        Ch::Char(c) if c == quote => c,
                        Ch::Char('\\') => '\\',
                        Ch::Char('t') => '\t',
                        Ch::Char('r') => '\r',
                        Ch::Char('n') => '\n',
                        Ch::Char(c) => {
                            return Token::with_text(
                                pos,
                                TokenKind::Illegal,
                                format!("invalid string escape \\{c}"),
                            );
                        }
                        Ch::Eof => {
                            return Token::with_text(
                                pos,
                                TokenKind::Illegal,
                                "didn't find end quote in string",
                            );
                        }
                    }
                }
                Ch::Char(c) => c,
            };
            value.push(c);
            self.advance();
        }
    }
}

/// Whether `ch` can start a name: `_` or an ASCII letter.
#[inline]
fn is_name_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

/// Byte width of the UTF-8 sequence introduced by `first`.
#[inline]
fn utf8_width(first: u8) -> usize {
    match first {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}
