//! Precedence-climbing expression parser.

use numc_ir::{Name, Node, Number, OperatorType, Span};
use numc_lexer::{tokenize, Token, TokenKind, TokenList};
use numc_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::{parse_literal, ParseError, ParseOptions, Validator};

/// Operand precedence of prefix operators; tighter than any binary operator.
const UNARY_PRECEDENCE: u8 = 11;

/// Binding precedence and operator for a binary token.
fn binary_operator(kind: TokenKind) -> Option<(u8, OperatorType)> {
    let entry = match kind {
        TokenKind::Star => (10, OperatorType::Multiplication),
        TokenKind::Slash => (10, OperatorType::Division),
        TokenKind::Percent => (10, OperatorType::Modulo),

        TokenKind::Plus => (9, OperatorType::Plus),
        TokenKind::Minus => (9, OperatorType::Minus),

        TokenKind::LtLt => (8, OperatorType::LShift),
        TokenKind::GtGt => (8, OperatorType::RShift),

        TokenKind::Lt => (7, OperatorType::LessThan),
        TokenKind::LtEq => (7, OperatorType::LessThanOrEqualTo),
        TokenKind::Gt => (7, OperatorType::GreaterThan),
        TokenKind::GtEq => (7, OperatorType::GreaterThanOrEqualTo),

        TokenKind::EqEq => (6, OperatorType::EqualTo),
        TokenKind::BangEq => (6, OperatorType::NotEqualTo),

        TokenKind::Amp => (5, OperatorType::And),
        TokenKind::Caret => (4, OperatorType::Xor),
        TokenKind::Pipe => (3, OperatorType::Or),

        TokenKind::AmpAmp => (2, OperatorType::ConditionalAnd),
        TokenKind::PipePipe => (1, OperatorType::ConditionalOr),
        _ => return None,
    };
    Some(entry)
}

fn unary_operator(kind: TokenKind) -> Option<OperatorType> {
    match kind {
        TokenKind::Plus => Some(OperatorType::Plus),
        TokenKind::Minus => Some(OperatorType::Minus),
        TokenKind::Tilde => Some(OperatorType::OnesComplement),
        TokenKind::Bang => Some(OperatorType::BoolNot),
        _ => None,
    }
}

/// Parser state for one source string.
pub struct Parser<'a, T> {
    source: &'a str,
    tokens: TokenList,
    pos: usize,
    options: ParseOptions,
    validator: &'a dyn Validator<T>,
}

impl<'a, T: Number> Parser<'a, T> {
    pub fn new(source: &'a str, options: &ParseOptions, validator: &'a dyn Validator<T>) -> Self {
        Parser {
            source,
            tokens: tokenize(source, options.scan_options()),
            pos: 0,
            options: *options,
            validator,
        }
    }

    /// Parse the whole source as one expression.
    pub fn parse(mut self) -> Result<Node<T>, ParseError> {
        trace!(source = self.source, ty = %T::KIND, "parsing expression");
        let node = self.parse_expr(0)?;
        self.expect(TokenKind::Eof, "an operator or end of input")?;
        Ok(node)
    }

    // Token access

    fn current(&self) -> Token {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    fn advance(&mut self) -> Token {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn text(&self, span: Span) -> &'a str {
        self.source.get(span.to_range()).unwrap_or("")
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token, ParseError> {
        if self.current_kind() == kind {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        let token = self.current();
        let text = self.text(token.span).to_owned();
        if token.kind == TokenKind::Unknown {
            ParseError::UnknownCharacter {
                text,
                span: token.span,
            }
        } else {
            ParseError::UnexpectedToken {
                found: token.kind,
                text,
                expected,
                span: token.span,
            }
        }
    }

    // Grammar

    /// Parse a unary operand followed by every binary operator binding at
    /// least as tightly as `min_precedence`.
    fn parse_expr(&mut self, min_precedence: u8) -> Result<Node<T>, ParseError> {
        ensure_sufficient_stack(|| {
            let mut left = self.parse_unary()?;
            while let Some((precedence, op)) = binary_operator(self.current_kind()) {
                if precedence < min_precedence {
                    break;
                }
                self.advance();
                let right = self.parse_expr(precedence + 1)?;
                left = Node::binary(op, left, right);
            }
            Ok(left)
        })
    }

    fn parse_unary(&mut self) -> Result<Node<T>, ParseError> {
        match unary_operator(self.current_kind()) {
            Some(op) => {
                self.advance();
                let operand = self.parse_expr(UNARY_PRECEDENCE)?;
                Ok(Node::unary(op, operand))
            }
            None => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Node<T>, ParseError> {
        match self.current_kind() {
            TokenKind::Literal => {
                let token = self.advance();
                self.literal(token)
            }
            TokenKind::Identifier => {
                let token = self.advance();
                let name = Name::new(self.text(token.span));
                if self.current_kind() == TokenKind::LParen {
                    self.call(name, token.span)
                } else {
                    self.validator
                        .validate_variable(&name)
                        .map_err(|message| ParseError::Validation {
                            message,
                            span: token.span,
                        })?;
                    Ok(Node::Variable(name))
                }
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr(0)?;
                self.expect(TokenKind::RParen, "`)`")?;
                Ok(inner)
            }
            _ => Err(self.unexpected("an expression")),
        }
    }

    fn literal(&self, token: Token) -> Result<Node<T>, ParseError> {
        let text = self.text(token.span);
        parse_literal::<T>(text, self.options.integer_mode)
            .map(Node::Literal)
            .ok_or_else(|| ParseError::InvalidLiteral {
                text: text.to_owned(),
                ty: T::KIND,
                span: token.span,
            })
    }

    /// `name(args...)`; the current token is the opening parenthesis.
    fn call(&mut self, name: Name, name_span: Span) -> Result<Node<T>, ParseError> {
        self.advance();
        let mut args = Vec::new();
        if self.current_kind() != TokenKind::RParen {
            args.push(self.parse_expr(0)?);
            while self.current_kind() == TokenKind::Comma {
                self.advance();
                args.push(self.parse_expr(0)?);
            }
        }
        let close = self.expect(TokenKind::RParen, "`,` or `)`")?;
        self.validator
            .validate_function(&name, args.len())
            .map_err(|message| ParseError::Validation {
                message,
                span: name_span.merge(close.span),
            })?;
        Ok(Node::Call { name, args })
    }
}
