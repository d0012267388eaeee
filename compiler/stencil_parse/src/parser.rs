//! Text-level parsing: literals, references, comments and directives.

use stencil_ir::{is_ident_continue, is_ident_start, Expr, ExprKind, IfBranch, Node, Reference, Span};
use stencil_lexer_core::Cursor;
use stencil_stack::ensure_sufficient_stack;

use crate::{DirectiveKind, ParseError};

/// What closed a run of nodes.
pub(crate) enum BlockEnd {
    Eof,
    End(Span),
    Else(Span),
    ElseIf(Expr, Span),
}

/// Outcome of scanning at a `#`.
enum Hash {
    /// Not markup: the `#` is text.
    Text,
    Comment,
    Node(Node),
    Close(BlockEnd),
}

pub(crate) struct Parser<'a> {
    pub(crate) cursor: Cursor<'a>,
    /// Offset of this text within the enclosing template.
    pub(crate) base: u32,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(cursor: Cursor<'a>, base: u32) -> Self {
        Parser { cursor, base }
    }

    #[inline]
    pub(crate) fn span(&self, start: u32, end: u32) -> Span {
        Span::new(self.base + start, self.base + end)
    }

    #[inline]
    pub(crate) fn span_from(&self, start: u32) -> Span {
        self.span(start, self.cursor.pos())
    }

    /// The next character, for error messages.
    pub(crate) fn found(&self) -> String {
        self.cursor
            .rest()
            .chars()
            .next()
            .map_or_else(|| "end of input".to_owned(), String::from)
    }

    /// Consume `symbol` if the input starts with it.
    pub(crate) fn eat_symbol(&mut self, symbol: &str) -> bool {
        if self.cursor.starts_with(symbol.as_bytes()) {
            self.cursor
                .advance_n(u32::try_from(symbol.len()).unwrap_or(0));
            true
        } else {
            false
        }
    }

    /// Consume `word` if the input starts with it as a whole word.
    pub(crate) fn eat_word(&mut self, word: &str) -> bool {
        if !self.cursor.starts_with(word.as_bytes()) {
            return false;
        }
        let mut after = self.cursor;
        after.advance_n(u32::try_from(word.len()).unwrap_or(0));
        if is_ident_continue(after.current()) {
            return false;
        }
        self.cursor = after;
        true
    }

    pub(crate) fn parse_top_level(&mut self) -> Result<Vec<Node>, ParseError> {
        let (nodes, end) = self.parse_nodes()?;
        match end {
            BlockEnd::Eof => Ok(nodes),
            BlockEnd::End(span) => Err(ParseError::stray(DirectiveKind::End, span)),
            BlockEnd::Else(span) => Err(ParseError::stray(DirectiveKind::Else, span)),
            BlockEnd::ElseIf(_, span) => Err(ParseError::stray(DirectiveKind::ElseIf, span)),
        }
    }

    fn parse_nodes(&mut self) -> Result<(Vec<Node>, BlockEnd), ParseError> {
        ensure_sufficient_stack(|| self.parse_nodes_inner())
    }

    fn parse_nodes_inner(&mut self) -> Result<(Vec<Node>, BlockEnd), ParseError> {
        let mut nodes = Vec::new();
        let mut text_start = self.cursor.pos();
        loop {
            let delim = self.cursor.skip_to_text_delim();
            let here = self.cursor.pos();
            match delim {
                b'\\' | b'$' => {
                    if let Some(reference) = self.lex_reference()? {
                        self.push_text(&mut nodes, text_start, here);
                        nodes.push(Node::Reference(reference));
                        text_start = self.cursor.pos();
                    } else if delim == b'\\' {
                        self.cursor.eat_while(|b| b == b'\\');
                    } else {
                        self.cursor.advance();
                    }
                }
                b'#' => match self.lex_hash()? {
                    Hash::Text => self.cursor.advance(),
                    Hash::Comment => {
                        self.push_text(&mut nodes, text_start, here);
                        text_start = self.cursor.pos();
                    }
                    Hash::Node(node) => {
                        self.push_text(&mut nodes, text_start, here);
                        nodes.push(node);
                        text_start = self.cursor.pos();
                    }
                    Hash::Close(end) => {
                        self.push_text(&mut nodes, text_start, here);
                        return Ok((nodes, end));
                    }
                },
                _ => {
                    self.push_text(&mut nodes, text_start, here);
                    return Ok((nodes, BlockEnd::Eof));
                }
            }
        }
    }

    fn push_text(&self, nodes: &mut Vec<Node>, start: u32, end: u32) {
        if start < end {
            nodes.push(Node::Literal {
                text: self.cursor.slice(start, end).to_owned(),
                span: self.span(start, end),
            });
        }
    }

    /// Lex a reference at the cursor (leading backslashes included).
    ///
    /// Returns `Ok(None)` and leaves the cursor untouched when the text is
    /// not a reference (`$5`, `\n`, `${}`).
    pub(crate) fn lex_reference(&mut self) -> Result<Option<Reference>, ParseError> {
        let start = self.cursor.pos();
        let mut c = self.cursor;
        c.eat_while(|b| b == b'\\');
        if c.current() != b'$' {
            return Ok(None);
        }
        c.advance();
        if c.current() == b'!' {
            c.advance();
        }
        if c.current() == b'{' {
            if !is_ident_start(c.peek()) {
                return Ok(None);
            }
            c.advance();
            c.eat_while(|b| b != b'}' && b != b'\n');
            if c.is_eof() || c.current() != b'}' {
                return Err(ParseError::unterminated_reference(
                    self.span(start, c.pos()),
                ));
            }
            c.advance();
        } else if is_ident_start(c.current()) {
            c.eat_while(is_ident_continue);
            while c.current() == b'.' && is_ident_start(c.peek()) {
                c.advance();
                c.eat_while(is_ident_continue);
            }
        } else {
            return Ok(None);
        }

        let reference = Reference::from_raw(c.slice_from(start), self.span(start, c.pos()));
        self.cursor = c;
        Ok(reference)
    }

    fn lex_hash(&mut self) -> Result<Hash, ParseError> {
        let start = self.cursor.pos();
        if self.cursor.starts_with(b"##") {
            self.cursor.eat_line();
            return Ok(Hash::Comment);
        }
        if self.cursor.starts_with(b"#*") {
            self.cursor.advance_n(2);
            if !self.cursor.eat_past(b"*#") {
                return Err(ParseError::unterminated_comment(self.span(start, start + 2)));
            }
            return Ok(Hash::Comment);
        }
        if self.cursor.starts_with(b"#[[") {
            self.cursor.advance_n(3);
            let content_start = self.cursor.pos();
            if !self.cursor.eat_past(b"]]#") {
                return Err(ParseError::unterminated_unparsed(self.span(start, start + 3)));
            }
            let content_end = self.cursor.pos() - 3;
            return Ok(Hash::Node(Node::Literal {
                text: self.cursor.slice(content_start, content_end).to_owned(),
                span: self.span(content_start, content_end),
            }));
        }

        let mut c = self.cursor;
        c.advance();
        let braced = c.current() == b'{';
        if braced {
            c.advance();
        }
        let name_start = c.pos();
        c.eat_while(|b| b.is_ascii_alphabetic());
        let Some(kind) = DirectiveKind::from_name(c.slice_from(name_start)) else {
            return Ok(Hash::Text);
        };
        if braced {
            if c.current() != b'}' {
                return Ok(Hash::Text);
            }
            c.advance();
        } else if is_ident_continue(c.current()) {
            return Ok(Hash::Text);
        }
        let head_span = self.span(start, c.pos());

        let mut probe = c;
        probe.eat_while(|b| b == b' ' || b == b'\t');
        let takes_args = probe.current() == b'('
            && !matches!(kind, DirectiveKind::Else | DirectiveKind::End);
        if kind.requires_args() && !takes_args {
            return Ok(Hash::Text);
        }
        if takes_args {
            probe.advance();
            self.cursor = probe;
        } else {
            self.cursor = c;
        }

        match kind {
            DirectiveKind::End => Ok(Hash::Close(BlockEnd::End(head_span))),
            DirectiveKind::Else => Ok(Hash::Close(BlockEnd::Else(head_span))),
            DirectiveKind::ElseIf => {
                let condition = self.parse_expr()?;
                self.expect_close(kind, start)?;
                Ok(Hash::Close(BlockEnd::ElseIf(condition, self.span_from(start))))
            }
            DirectiveKind::Set => self.parse_set(start).map(Hash::Node),
            DirectiveKind::Parse => self.parse_include(start).map(Hash::Node),
            DirectiveKind::If => self.parse_if(start).map(Hash::Node),
            DirectiveKind::Foreach => self.parse_foreach(start).map(Hash::Node),
            DirectiveKind::Include
            | DirectiveKind::Evaluate
            | DirectiveKind::Macro
            | DirectiveKind::Define
            | DirectiveKind::Break
            | DirectiveKind::Stop => self.parse_other(kind, start, takes_args).map(Hash::Node),
        }
    }

    /// Skip whitespace and consume the `)` closing a directive's arguments.
    fn expect_close(&mut self, kind: DirectiveKind, start: u32) -> Result<(), ParseError> {
        self.cursor.eat_whitespace();
        if self.cursor.is_eof() {
            return Err(ParseError::unclosed_args(kind, self.span_from(start)));
        }
        if self.cursor.current() != b')' {
            let pos = self.cursor.pos();
            let context = format!("`#{}` arguments", kind.name());
            return Err(ParseError::unexpected(&self.found(), &context, self.span(pos, pos + 1)));
        }
        self.cursor.advance();
        Ok(())
    }

    fn expect_reference(&mut self, kind: DirectiveKind) -> Result<Reference, ParseError> {
        self.cursor.eat_whitespace();
        let pos = self.cursor.pos();
        if self.cursor.current() == b'$' {
            if let Some(reference) = self.lex_reference()? {
                return Ok(reference);
            }
        }
        Err(ParseError::expected_reference(kind, self.span(pos, pos + 1)))
    }

    /// `#set($lhs = expr)`; a newline right after the `)` belongs to the directive.
    fn parse_set(&mut self, start: u32) -> Result<Node, ParseError> {
        let lhs = self.expect_reference(DirectiveKind::Set)?;
        self.cursor.eat_whitespace();
        if self.cursor.is_eof() {
            return Err(ParseError::unclosed_args(DirectiveKind::Set, self.span_from(start)));
        }
        if self.cursor.current() != b'=' || self.cursor.peek() == b'=' {
            let pos = self.cursor.pos();
            return Err(ParseError::unexpected(
                &self.found(),
                "`#set` arguments (expected `=`)",
                self.span(pos, pos + 1),
            ));
        }
        self.cursor.advance();
        let rhs = self.parse_expr()?;
        self.expect_close(DirectiveKind::Set, start)?;
        let span = self.span_from(start);

        if !self.eat_symbol("\r\n") && self.cursor.current() == b'\n' && !self.cursor.is_eof() {
            self.cursor.advance();
        }
        Ok(Node::Set { lhs, rhs, span })
    }

    /// `#parse("name")` becomes an include; any other argument shape is opaque.
    fn parse_include(&mut self, start: u32) -> Result<Node, ParseError> {
        let arg = self.parse_expr()?;
        self.expect_close(DirectiveKind::Parse, start)?;
        let span = self.span_from(start);
        Ok(match literal_path(&arg) {
            Some(path) => Node::Include { path, span },
            None => Node::Other {
                name: DirectiveKind::Parse.name().to_owned(),
                args: vec![arg],
                children: Vec::new(),
                span,
            },
        })
    }

    fn parse_if(&mut self, start: u32) -> Result<Node, ParseError> {
        let mut condition = self.parse_expr()?;
        self.expect_close(DirectiveKind::If, start)?;
        let head = self.span_from(start);

        let mut branches = Vec::new();
        loop {
            let (body, end) = self.parse_nodes()?;
            branches.push(IfBranch { condition, body });
            match end {
                BlockEnd::ElseIf(next, _) => condition = next,
                BlockEnd::Else(_) => {
                    let otherwise = self.parse_body(DirectiveKind::If, head)?;
                    return Ok(Node::If {
                        branches,
                        otherwise: Some(otherwise),
                        span: self.span_from(start),
                    });
                }
                BlockEnd::End(_) => {
                    return Ok(Node::If {
                        branches,
                        otherwise: None,
                        span: self.span_from(start),
                    });
                }
                BlockEnd::Eof => return Err(ParseError::missing_end(DirectiveKind::If, head)),
            }
        }
    }

    fn parse_foreach(&mut self, start: u32) -> Result<Node, ParseError> {
        let var = self.expect_reference(DirectiveKind::Foreach)?;
        self.cursor.eat_whitespace();
        if !self.eat_word("in") {
            let pos = self.cursor.pos();
            return Err(ParseError::unexpected(
                &self.found(),
                "`#foreach` arguments (expected `in`)",
                self.span(pos, pos + 1),
            ));
        }
        let iterable = self.parse_expr()?;
        self.expect_close(DirectiveKind::Foreach, start)?;
        let head = self.span_from(start);
        let body = self.parse_body(DirectiveKind::Foreach, head)?;
        Ok(Node::Foreach {
            var,
            iterable,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_other(
        &mut self,
        kind: DirectiveKind,
        start: u32,
        takes_args: bool,
    ) -> Result<Node, ParseError> {
        let args = if takes_args {
            self.parse_arg_list(kind, start)?
        } else {
            Vec::new()
        };
        let head = self.span_from(start);
        let children = if kind.has_body() {
            self.parse_body(kind, head)?
        } else {
            Vec::new()
        };
        Ok(Node::Other {
            name: kind.name().to_owned(),
            args,
            children,
            span: self.span_from(start),
        })
    }

    /// Arguments separated by whitespace or commas; bare words (macro names)
    /// are kept as single-quoted strings.
    fn parse_arg_list(&mut self, kind: DirectiveKind, start: u32) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        loop {
            self.cursor.eat_whitespace();
            if self.cursor.is_eof() {
                return Err(ParseError::unclosed_args(kind, self.span_from(start)));
            }
            match self.cursor.current() {
                b')' => {
                    self.cursor.advance();
                    return Ok(args);
                }
                b',' => self.cursor.advance(),
                b if is_ident_start(b) && !self.at_bool() => {
                    let word_start = self.cursor.pos();
                    self.cursor.eat_while(is_ident_continue);
                    args.push(Expr::new(
                        ExprKind::Str(self.cursor.slice_from(word_start).to_owned()),
                        self.span_from(word_start),
                    ));
                }
                _ => args.push(self.parse_expr()?),
            }
        }
    }

    fn at_bool(&self) -> bool {
        let mut probe = Parser::new(self.cursor, self.base);
        probe.eat_word("true") || probe.eat_word("false")
    }

    fn parse_body(&mut self, kind: DirectiveKind, head: Span) -> Result<Vec<Node>, ParseError> {
        let (body, end) = self.parse_nodes()?;
        match end {
            BlockEnd::End(_) => Ok(body),
            BlockEnd::Eof => Err(ParseError::missing_end(kind, head)),
            BlockEnd::Else(span) => Err(ParseError::stray(DirectiveKind::Else, span)),
            BlockEnd::ElseIf(_, span) => Err(ParseError::stray(DirectiveKind::ElseIf, span)),
        }
    }
}

/// The path of `#parse("...")` when its argument is a plain string.
fn literal_path(arg: &Expr) -> Option<String> {
    match &arg.kind {
        ExprKind::Str(path) => Some(path.clone()),
        ExprKind::Interpolated(nodes) => nodes
            .iter()
            .map(|node| match node {
                Node::Literal { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect(),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
