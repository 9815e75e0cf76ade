//! Tokenizer for numc expressions.
//!
//! The scanner is a hand-written byte dispatcher over a [`Cursor`]. It
//! never fails: malformed input is reported as [`TokenKind::Unknown`] and
//! the parser turns that into a diagnostic. Literal text is kept verbatim,
//! digit separators included, so the lexer knows nothing about the
//! numeric type being parsed.

mod cursor;
mod scanner;
mod token;

pub use cursor::Cursor;
pub use scanner::{ScanOptions, Scanner};
pub use token::{Token, TokenKind, TokenList};

/// Lex `source` into a token list terminated by [`TokenKind::Eof`].
pub fn tokenize(source: &str, options: ScanOptions) -> TokenList {
    let mut scanner = Scanner::new(source, options);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }
    TokenList::new(tokens)
}
