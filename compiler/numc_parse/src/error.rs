//! Parse errors.

use numc_ir::{NumKind, Span};
use numc_lexer::TokenKind;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected {found} `{text}` at {span:?}, expected {expected}")]
    UnexpectedToken {
        found: TokenKind,
        text: String,
        expected: &'static str,
        span: Span,
    },

    #[error("invalid {ty} literal `{text}` at {span:?}")]
    InvalidLiteral { text: String, ty: NumKind, span: Span },

    #[error("unknown character `{text}` at {span:?}")]
    UnknownCharacter { text: String, span: Span },

    /// Rejected by the caller's [`Validator`](crate::Validator).
    #[error("{message} at {span:?}")]
    Validation { message: String, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::InvalidLiteral { span, .. }
            | ParseError::UnknownCharacter { span, .. }
            | ParseError::Validation { span, .. } => *span,
        }
    }
}
