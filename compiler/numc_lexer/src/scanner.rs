//! Hand-written scanner producing one [`Token`] at a time.
//!
//! Dispatch is a single `match` over the current byte. Whitespace is
//! skipped before every token, so the token stream carries no trivia.

use numc_ir::Span;

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Scanner configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Let `a-f`/`A-F` start a literal, for sources whose integers are
    /// hexadecimal by default. Identifiers can then only start with
    /// `g-z`, `_`, `@`, `$` or `#`.
    pub hex_letters_start_literals: bool,
}

pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    options: ScanOptions,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str, options: ScanOptions) -> Self {
        Scanner {
            cursor: Cursor::new(source),
            options,
        }
    }

    /// Produce the next token. Returns `Eof` forever once input is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.cursor.eat_whitespace();
        let start = self.cursor.pos();
        let current = self.cursor.current();
        match current {
            0 if self.cursor.is_eof() => Token::new(TokenKind::Eof, Span::point(start)),
            b'0'..=b'9' => self.literal(start),
            b'a'..=b'f' | b'A'..=b'F' if self.options.hex_letters_start_literals => {
                self.literal(start)
            }
            b if is_identifier_byte(b) => self.identifier(start),
            b'+' => self.single(start, TokenKind::Plus),
            b'-' => self.single(start, TokenKind::Minus),
            b'*' => self.single(start, TokenKind::Star),
            b'/' => self.single(start, TokenKind::Slash),
            b'%' => self.single(start, TokenKind::Percent),
            b'^' => self.single(start, TokenKind::Caret),
            b'~' => self.single(start, TokenKind::Tilde),
            b'(' => self.single(start, TokenKind::LParen),
            b')' => self.single(start, TokenKind::RParen),
            b',' => self.single(start, TokenKind::Comma),
            b'!' => self.one_or_two(start, b'=', TokenKind::Bang, TokenKind::BangEq),
            b'=' => self.one_or_two(start, b'=', TokenKind::Unknown, TokenKind::EqEq),
            b'&' => self.one_or_two(start, b'&', TokenKind::Amp, TokenKind::AmpAmp),
            b'|' => self.one_or_two(start, b'|', TokenKind::Pipe, TokenKind::PipePipe),
            b'<' => self.angle(start, TokenKind::Lt, TokenKind::LtEq, TokenKind::LtLt),
            b'>' => self.angle(start, TokenKind::Gt, TokenKind::GtEq, TokenKind::GtGt),
            _ => {
                self.cursor.advance_char();
                self.finish(start, TokenKind::Unknown)
            }
        }
    }

    fn finish(&self, start: u32, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(start, self.cursor.pos()))
    }

    fn single(&mut self, start: u32, kind: TokenKind) -> Token {
        self.cursor.advance();
        self.finish(start, kind)
    }

    /// `first` alone, or `doubled` when followed by `next`.
    fn one_or_two(&mut self, start: u32, next: u8, first: TokenKind, doubled: TokenKind) -> Token {
        self.cursor.advance();
        if self.cursor.current() == next {
            self.cursor.advance();
            self.finish(start, doubled)
        } else {
            self.finish(start, first)
        }
    }

    /// `<`, `<=`, `<<` and their `>` mirrors.
    fn angle(&mut self, start: u32, alone: TokenKind, or_eq: TokenKind, shift: TokenKind) -> Token {
        let angle = self.cursor.current();
        self.cursor.advance();
        let kind = match self.cursor.current() {
            b'=' => or_eq,
            b if b == angle => shift,
            _ => return self.finish(start, alone),
        };
        self.cursor.advance();
        self.finish(start, kind)
    }

    fn identifier(&mut self, start: u32) -> Token {
        self.cursor.eat_while(is_identifier_byte);
        self.finish(start, TokenKind::Identifier)
    }

    /// Digits, hex letters and `_`, an optional radix prefix after a
    /// leading `0`, and an optional `.digits` fraction. Validation is
    /// left to the parser, which knows the target type.
    fn literal(&mut self, start: u32) -> Token {
        let first = self.cursor.current();
        self.cursor.advance();
        if first == b'0' && matches!(self.cursor.current(), b'x' | b'X' | b'b' | b'B') {
            self.cursor.advance();
        }
        self.cursor
            .eat_while(|b| b == b'_' || b.is_ascii_hexdigit());
        if self.cursor.current() == b'.' {
            self.cursor.advance();
            self.cursor.eat_while(|b| b.is_ascii_digit());
        }
        self.finish(start, TokenKind::Literal)
    }
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'@' | b'$' | b'#')
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    /// Yields tokens up to, but not including, `Eof`.
    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}
