use numc_lexer::ScanOptions;

/// How an integer literal without a `0x`/`0b` prefix is read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum IntegerParseMode {
    #[default]
    Decimal,
    /// Unprefixed literals are hexadecimal; `a-f` may start a literal.
    Hexadecimal,
    Binary,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ParseOptions {
    pub integer_mode: IntegerParseMode,
}

impl ParseOptions {
    #[must_use]
    pub fn with_integer_mode(mut self, mode: IntegerParseMode) -> Self {
        self.integer_mode = mode;
        self
    }

    pub(crate) fn scan_options(self) -> ScanOptions {
        ScanOptions {
            hex_letters_start_literals: self.integer_mode == IntegerParseMode::Hexadecimal,
        }
    }
}
