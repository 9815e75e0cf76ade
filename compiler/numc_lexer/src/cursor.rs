//! Byte cursor with a virtual sentinel.
//!
//! Reading past the end yields `0`, so the scanner's dispatch can treat
//! end-of-input as just another byte. A NUL inside the source is told
//! apart from the sentinel by comparing the position against the length.

use numc_ir::Span;

#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    source: &'a str,
    pos: u32,
}

impl<'a> Cursor<'a> {
    /// Sources longer than `u32::MAX` bytes are truncated at that length.
    pub fn new(source: &'a str) -> Self {
        let source = match u32::try_from(source.len()) {
            Ok(_) => source,
            Err(_) => truncate_to_boundary(source, u32::MAX as usize),
        };
        Cursor { source, pos: 0 }
    }

    /// Current byte, or `0` at end of input.
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    /// Byte after the current one, or `0` past the end.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.byte_at(self.pos + 1)
    }

    #[inline]
    fn byte_at(&self, pos: u32) -> u8 {
        self.source.as_bytes().get(pos as usize).copied().unwrap_or(0)
    }

    #[inline]
    pub fn advance(&mut self) {
        self.advance_n(1);
    }

    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos = self.pos.saturating_add(n).min(self.source_len());
    }

    /// Advance over one full UTF-8 character.
    pub fn advance_char(&mut self) {
        let width = self
            .source
            .get(self.pos as usize..)
            .and_then(|rest| rest.chars().next())
            .map_or(1, char::len_utf8);
        self.advance_n(u32::try_from(width).unwrap_or(1));
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len()
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    #[allow(clippy::cast_possible_truncation, reason = "length is capped in `new`")]
    pub fn source_len(&self) -> u32 {
        self.source.len() as u32
    }

    /// Source text of `span`, or `""` when it does not fall on char boundaries.
    pub fn slice(&self, span: Span) -> &'a str {
        self.source.get(span.to_range()).unwrap_or("")
    }

    /// Advance while `pred` holds for the current byte.
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.advance();
        }
    }

    /// Skip ASCII whitespace, including newlines.
    pub fn eat_whitespace(&mut self) {
        self.eat_while(|b| b.is_ascii_whitespace());
    }
}

fn truncate_to_boundary(source: &str, max: usize) -> &str {
    let mut end = max;
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    &source[..end]
}
