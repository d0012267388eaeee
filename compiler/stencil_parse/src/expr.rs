//! Directive argument expressions.
//!
//! Precedence, loosest first: `||`, `&&`, equality, relational, additive,
//! unary, primary. Word forms (`or`, `and`, `eq`, `ne`, `lt`, `le`, `gt`,
//! `ge`, `not`) are accepted alongside the symbols.

use stencil_diagnostic::ErrorCode;
use stencil_ir::{is_ident_start, BinaryOp, Expr, ExprKind, UnaryOp};
use stencil_stack::ensure_sufficient_stack;

use crate::parser::Parser;
use crate::ParseError;

type Operators = &'static [(&'static str, BinaryOp)];

const OR: Operators = &[("||", BinaryOp::Or), ("or", BinaryOp::Or)];
const AND: Operators = &[("&&", BinaryOp::And), ("and", BinaryOp::And)];
const EQUALITY: Operators = &[
    ("==", BinaryOp::Eq),
    ("eq", BinaryOp::Eq),
    ("!=", BinaryOp::NotEq),
    ("ne", BinaryOp::NotEq),
];
// Two-character forms first so `<=` is not read as `<`.
const RELATIONAL: Operators = &[
    ("<=", BinaryOp::LtEq),
    ("le", BinaryOp::LtEq),
    (">=", BinaryOp::GtEq),
    ("ge", BinaryOp::GtEq),
    ("<", BinaryOp::Lt),
    ("lt", BinaryOp::Lt),
    (">", BinaryOp::Gt),
    ("gt", BinaryOp::Gt),
];
const ADDITIVE: Operators = &[("+", BinaryOp::Add), ("-", BinaryOp::Sub)];

type ParseResult = Result<Expr, ParseError>;

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) -> ParseResult {
        ensure_sufficient_stack(|| self.parse_or())
    }

    fn parse_or(&mut self) -> ParseResult {
        self.parse_binary(OR, Self::parse_and)
    }

    fn parse_and(&mut self) -> ParseResult {
        self.parse_binary(AND, Self::parse_equality)
    }

    fn parse_equality(&mut self) -> ParseResult {
        self.parse_binary(EQUALITY, Self::parse_relational)
    }

    fn parse_relational(&mut self) -> ParseResult {
        self.parse_binary(RELATIONAL, Self::parse_additive)
    }

    fn parse_additive(&mut self) -> ParseResult {
        self.parse_binary(ADDITIVE, Self::parse_unary)
    }

    /// Left-associative chain of one precedence level.
    fn parse_binary(&mut self, operators: Operators, next: fn(&mut Self) -> ParseResult) -> ParseResult {
        let mut left = next(self)?;
        loop {
            self.cursor.eat_whitespace();
            let Some(op) = self.eat_operator(operators) else {
                return Ok(left);
            };
            let right = next(self)?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
    }

    fn eat_operator(&mut self, operators: Operators) -> Option<BinaryOp> {
        operators.iter().find_map(|&(text, op)| {
            let matched = if text.as_bytes()[0].is_ascii_alphabetic() {
                self.eat_word(text)
            } else {
                self.eat_symbol(text)
            };
            matched.then_some(op)
        })
    }

    fn parse_unary(&mut self) -> ParseResult {
        self.cursor.eat_whitespace();
        let start = self.cursor.pos();
        let op = if self.cursor.current() == b'!' && self.cursor.peek() != b'=' {
            self.cursor.advance();
            Some(UnaryOp::Not)
        } else if self.eat_word("not") {
            Some(UnaryOp::Not)
        } else if self.cursor.current() == b'-' && !self.cursor.peek().is_ascii_digit() {
            self.cursor.advance();
            Some(UnaryOp::Neg)
        } else {
            None
        };

        match op {
            Some(op) => {
                let operand = ensure_sufficient_stack(|| self.parse_unary())?;
                let span = self.span(start, start).merge(operand.span);
                Ok(Expr::new(
                    ExprKind::Unary {
                        op,
                        operand: Box::new(operand),
                    },
                    span,
                ))
            }
            None => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> ParseResult {
        self.cursor.eat_whitespace();
        let start = self.cursor.pos();
        match self.cursor.current() {
            b'$' => match self.lex_reference()? {
                Some(reference) => {
                    let span = reference.span;
                    Ok(Expr::new(ExprKind::Ref(reference), span))
                }
                None => Err(ParseError::expected_expression(self.span(start, start + 1))),
            },
            b'"' => self.parse_interpolated(),
            b'\'' => self.parse_single_quoted(),
            b'[' => self.parse_list(),
            b'(' => {
                self.cursor.advance();
                let inner = self.parse_expr()?;
                self.cursor.eat_whitespace();
                if self.cursor.is_eof() {
                    return Err(ParseError::new(
                        ErrorCode::E1003,
                        "`(` is missing its closing `)`",
                        self.span_from(start),
                    ));
                }
                if self.cursor.current() != b')' {
                    let pos = self.cursor.pos();
                    return Err(ParseError::unexpected(
                        &self.found(),
                        "parenthesized expression",
                        self.span(pos, pos + 1),
                    ));
                }
                self.cursor.advance();
                Ok(Expr::new(inner.kind, self.span_from(start)))
            }
            b'-' | b'0'..=b'9' => self.parse_int(),
            b if is_ident_start(b) => {
                if self.eat_word("true") {
                    Ok(Expr::new(ExprKind::Bool(true), self.span_from(start)))
                } else if self.eat_word("false") {
                    Ok(Expr::new(ExprKind::Bool(false), self.span_from(start)))
                } else {
                    self.cursor.eat_while(stencil_ir::is_ident_continue);
                    let word = self.cursor.slice_from(start);
                    Err(ParseError::unexpected(word, "expression", self.span_from(start)))
                }
            }
            _ if self.cursor.is_eof() => Err(ParseError::expected_expression(self.span(start, start))),
            _ => Err(ParseError::expected_expression(self.span(start, start + 1))),
        }
    }

    fn parse_int(&mut self) -> ParseResult {
        let start = self.cursor.pos();
        if self.cursor.current() == b'-' {
            self.cursor.advance();
        }
        self.cursor.eat_while(|b| b.is_ascii_digit());
        let text = self.cursor.slice_from(start);
        let span = self.span_from(start);
        match text.parse::<i64>() {
            Ok(value) => Ok(Expr::new(ExprKind::Int(value), span)),
            Err(_) => Err(ParseError::invalid_int(text, span)),
        }
    }

    /// `"..."`: the content is template text, parsed in place.
    fn parse_interpolated(&mut self) -> ParseResult {
        let start = self.cursor.pos();
        self.cursor.advance();
        let content_start = self.cursor.pos();
        self.cursor.eat_until(b'"');
        if self.cursor.is_eof() {
            return Err(ParseError::unterminated_string(self.span_from(start)));
        }
        let content = self.cursor.slice_from(content_start);
        self.cursor.advance();
        let nodes = crate::parse_fragment(content, self.base + content_start)?;
        Ok(Expr::new(ExprKind::Interpolated(nodes), self.span_from(start)))
    }

    fn parse_single_quoted(&mut self) -> ParseResult {
        let start = self.cursor.pos();
        self.cursor.advance();
        let content_start = self.cursor.pos();
        self.cursor.eat_until(b'\'');
        if self.cursor.is_eof() {
            return Err(ParseError::unterminated_string(self.span_from(start)));
        }
        let content = self.cursor.slice_from(content_start).to_owned();
        self.cursor.advance();
        Ok(Expr::new(ExprKind::Str(content), self.span_from(start)))
    }

    /// `[a, b, c]` or the inclusive range `[lo..hi]`.
    fn parse_list(&mut self) -> ParseResult {
        let start = self.cursor.pos();
        self.cursor.advance();
        self.cursor.eat_whitespace();
        if self.eat_symbol("]") {
            return Ok(Expr::new(ExprKind::List(Vec::new()), self.span_from(start)));
        }

        let first = self.parse_expr()?;
        self.cursor.eat_whitespace();
        if self.eat_symbol("..") {
            let last = self.parse_expr()?;
            self.expect_bracket(start)?;
            return Ok(Expr::new(
                ExprKind::Range(Box::new(first), Box::new(last)),
                self.span_from(start),
            ));
        }

        let mut items = vec![first];
        loop {
            self.cursor.eat_whitespace();
            if !self.eat_symbol(",") {
                break;
            }
            items.push(self.parse_expr()?);
        }
        self.expect_bracket(start)?;
        Ok(Expr::new(ExprKind::List(items), self.span_from(start)))
    }

    fn expect_bracket(&mut self, start: u32) -> Result<(), ParseError> {
        self.cursor.eat_whitespace();
        if self.cursor.is_eof() {
            return Err(ParseError::new(
                ErrorCode::E1003,
                "list is missing its closing `]`",
                self.span_from(start),
            ));
        }
        if !self.eat_symbol("]") {
            let pos = self.cursor.pos();
            return Err(ParseError::unexpected(&self.found(), "list", self.span(pos, pos + 1)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
