//! The driver loop: turns a source buffer into a stream of tokens.

use pylex_source::types::Position;

use crate::classify;
use crate::cursor::Cursor;
use crate::error::ScanError;
use crate::indent::{self, IndentOutcome, IndentStack};
use crate::token::{Token, TokenKind};

/// What [`Scanner::measure_line_indent`] found at the start of a logical
/// line.
enum LineIndent {
    /// The line (or what remains of the input) carries no indentation
    /// decision of its own: a comment-only or blank line, or the tail end
    /// of the buffer reached while looking for one.
    Blank,
    /// A real line was found, indented to `usize` columns (tabs counted as
    /// 4).
    Width(usize),
}

/// Scans a single borrowed source buffer into a stream of [`Token`]s.
///
/// A `Scanner` is a one-shot pull parser: each call to [`Scanner::next_token`]
/// (or each step of the [`Iterator`] implementation) advances internal
/// state and returns exactly one token, synthesizing `INDENT`/`DEDENT`
/// tokens from changes in leading whitespace as needed. Once `ENDMARKER`
/// has been produced, the `Iterator` is exhausted; `next_token` itself can
/// still be called and keeps returning `ENDMARKER`.
pub struct Scanner<'src> {
    cursor: Cursor<'src>,
    indents: IndentStack,
    pending_dedents: usize,
    level: i32,
    done: bool,
}

impl<'src> Scanner<'src> {
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            indents: IndentStack::new(),
            pending_dedents: 0,
            level: 0,
            done: false,
        }
    }

    /// Scans and returns the next token.
    ///
    /// Line continuations and bracket-interior newlines restart this loop
    /// from the top rather than recursing, so arbitrarily long runs of
    /// either cannot overflow the stack.
    pub fn next_token(&mut self) -> Token<'src> {
        loop {
            if !self.cursor.is_line_start() || self.level != 0 {
                self.skip_whitespace();
            }
            self.cursor.mark_start();

            loop {
                if !((self.cursor.is_line_start() && self.level == 0) || self.cursor.is_at_end()) {
                    break;
                }
                match self.measure_line_indent() {
                    LineIndent::Blank => {
                        let _ = self.cursor.matches(b'\n');
                        self.cursor.mark_start();
                    }
                    LineIndent::Width(width) => {
                        match indent::classify(&mut self.indents, &mut self.pending_dedents, width) {
                            IndentOutcome::Increment => return self.make_token(TokenKind::Indent),
                            IndentOutcome::Decrement => return self.make_token(TokenKind::Dedent),
                            IndentOutcome::Exceed => return self.make_error(ScanError::IndentExceeded),
                            IndentOutcome::Inconsistent => return self.make_error(ScanError::InconsistentDedent),
                            IndentOutcome::None => {
                                self.cursor.mark_start();
                                break;
                            }
                        }
                    }
                }
            }

            if self.cursor.is_at_end() {
                if self.level != 0 {
                    self.level = 0;
                    return self.make_error(ScanError::UnbalancedBrackets);
                }
                return self.make_token(TokenKind::EndMarker);
            }

            if self.cursor.matches(b'\n') {
                if self.level != 0 {
                    continue;
                }
                return self.make_token(TokenKind::Newline);
            }

            let c = self.cursor.peek();
            if classify::is_digit(c) || (c == b'.' && classify::is_digit(self.cursor.peek_next())) {
                return self.number();
            } else if classify::is_ident_start(c) {
                return self.identifier();
            } else if c == b'"' || c == b'\'' {
                return self.string_literal();
            }

            let _ = self.cursor.advance();

            if c == b'\\' {
                if self.cursor.matches(b'\n') {
                    self.cursor.clear_line_start();
                    continue;
                }
                return self.make_error(ScanError::BadLineContinuation);
            }

            return self.operator(c);
        }
    }

    /// Consumes spaces, tabs, carriage returns, and a trailing comment, but
    /// never a newline: the newline is always the caller's to interpret.
    fn skip_whitespace(&mut self) {
        loop {
            let c = self.cursor.peek();
            if classify::is_horizontal_whitespace(c) {
                let _ = self.cursor.advance();
            } else if c == b'#' {
                while !self.cursor.is_at_end() && self.cursor.peek() != b'\n' {
                    let _ = self.cursor.advance();
                }
                return;
            } else {
                return;
            }
        }
    }

    /// Measures the leading indentation of the line at the cursor.
    ///
    /// Tabs count as 4 columns. Reaching the end of input while measuring,
    /// or finding only a comment and/or newline after the leading run, is
    /// reported as [`LineIndent::Blank`] so neither contributes a bogus
    /// `INDENT`/`DEDENT`; hitting end of input is folded into a `Width(0)`
    /// comparison instead so any indentation levels still open are drained
    /// before `ENDMARKER`.
    fn measure_line_indent(&mut self) -> LineIndent {
        if self.cursor.is_at_end() {
            return LineIndent::Width(0);
        }

        let mut width = 0usize;
        let mut saw_space = false;
        let mut saw_tab = false;
        loop {
            if self.cursor.matches(b' ') {
                width += 1;
                saw_space = true;
            } else if self.cursor.matches(b'\t') {
                width += 4;
                saw_tab = true;
            } else {
                break;
            }
        }
        if saw_space && saw_tab {
            log::warn!(
                "line {} mixes tabs and spaces in its indentation",
                self.cursor.start_line()
            );
        }

        self.skip_whitespace();

        if self.cursor.is_at_end() {
            LineIndent::Width(0)
        } else if self.cursor.peek() == b'\n' {
            LineIndent::Blank
        } else {
            LineIndent::Width(width)
        }
    }

    fn number(&mut self) -> Token<'src> {
        let has_point = self.cursor.advance() == b'.';
        while classify::is_digit(self.cursor.peek()) {
            let _ = self.cursor.advance();
        }
        if self.cursor.peek() == b'.' && !has_point {
            let _ = self.cursor.advance();
            while classify::is_digit(self.cursor.peek()) {
                let _ = self.cursor.advance();
            }
        }
        self.make_token(TokenKind::Number)
    }

    fn identifier(&mut self) -> Token<'src> {
        while classify::is_ident_continue(self.cursor.peek()) {
            let _ = self.cursor.advance();
        }
        let kind = TokenKind::keyword(self.cursor.lexeme()).unwrap_or(TokenKind::Name);
        self.make_token(kind)
    }

    fn string_literal(&mut self) -> Token<'src> {
        let quote = self.cursor.advance();

        let is_multiline = if self.cursor.peek() == quote && self.cursor.peek_next() == quote {
            let _ = self.cursor.advance();
            let _ = self.cursor.advance();
            true
        } else {
            false
        };

        loop {
            if self.cursor.is_at_end() || (!is_multiline && self.cursor.peek() == b'\n') {
                return self.make_error(ScanError::UnterminatedString);
            }

            let c = self.cursor.advance();

            if c == quote && is_multiline && self.cursor.peek() == quote && self.cursor.peek_next() == quote {
                let _ = self.cursor.advance();
                let _ = self.cursor.advance();
                break;
            } else if c == quote && !is_multiline {
                break;
            } else if c == b'\\' {
                let _ = self.cursor.matches(b'\n');
            }
        }

        self.make_token(TokenKind::String)
    }

    /// Dispatches on `c`, the already-consumed first byte of a punctuation
    /// or operator token, using maximal munch.
    fn operator(&mut self, c: u8) -> Token<'src> {
        match c {
            b'(' => {
                self.level += 1;
                self.make_token(TokenKind::LPar)
            }
            b')' => {
                self.level -= 1;
                self.make_token(TokenKind::RPar)
            }
            b'{' => {
                self.level += 1;
                self.make_token(TokenKind::LBrace)
            }
            b'}' => {
                self.level -= 1;
                self.make_token(TokenKind::RBrace)
            }
            b'[' => {
                self.level += 1;
                self.make_token(TokenKind::LSqb)
            }
            b']' => {
                self.level -= 1;
                self.make_token(TokenKind::RSqb)
            }
            b':' => self.make_token(TokenKind::Colon),
            b';' => self.make_token(TokenKind::Semi),
            b',' => self.make_token(TokenKind::Comma),
            b'.' => {
                if self.cursor.peek() == b'.' && self.cursor.peek_next() == b'.' {
                    let _ = self.cursor.advance();
                    let _ = self.cursor.advance();
                    self.make_token(TokenKind::Ellipsis)
                } else {
                    self.make_token(TokenKind::Dot)
                }
            }
            b'+' => {
                let kind = if self.cursor.matches(b'=') { TokenKind::PlusEqual } else { TokenKind::Plus };
                self.make_token(kind)
            }
            b'-' => {
                if self.cursor.matches(b'>') {
                    self.make_token(TokenKind::RArrow)
                } else {
                    let kind = if self.cursor.matches(b'=') { TokenKind::MinEqual } else { TokenKind::Minus };
                    self.make_token(kind)
                }
            }
            b'*' => {
                if self.cursor.matches(b'*') {
                    let kind = if self.cursor.matches(b'=') { TokenKind::DoubleStarEqual } else { TokenKind::DoubleStar };
                    self.make_token(kind)
                } else {
                    let kind = if self.cursor.matches(b'=') { TokenKind::StarEqual } else { TokenKind::Star };
                    self.make_token(kind)
                }
            }
            b'/' => {
                if self.cursor.matches(b'/') {
                    let kind =
                        if self.cursor.matches(b'=') { TokenKind::DoubleSlashEqual } else { TokenKind::DoubleSlash };
                    self.make_token(kind)
                } else {
                    let kind = if self.cursor.matches(b'=') { TokenKind::SlashEqual } else { TokenKind::Slash };
                    self.make_token(kind)
                }
            }
            b'@' => {
                let kind = if self.cursor.matches(b'=') { TokenKind::AtEqual } else { TokenKind::At };
                self.make_token(kind)
            }
            b'%' => {
                let kind = if self.cursor.matches(b'=') { TokenKind::PercentEqual } else { TokenKind::Percent };
                self.make_token(kind)
            }
            b'|' => {
                let kind = if self.cursor.matches(b'=') { TokenKind::VBarEqual } else { TokenKind::VBar };
                self.make_token(kind)
            }
            b'&' => {
                let kind = if self.cursor.matches(b'=') { TokenKind::AmperEqual } else { TokenKind::Amper };
                self.make_token(kind)
            }
            b'^' => {
                let kind = if self.cursor.matches(b'=') { TokenKind::CircumflexEqual } else { TokenKind::Circumflex };
                self.make_token(kind)
            }
            b'~' => self.make_token(TokenKind::Tilde),
            b'=' => {
                let kind = if self.cursor.matches(b'=') { TokenKind::EqEqual } else { TokenKind::Equal };
                self.make_token(kind)
            }
            b'<' => {
                if self.cursor.matches(b'<') {
                    let kind = if self.cursor.matches(b'=') { TokenKind::LeftShiftEqual } else { TokenKind::LeftShift };
                    self.make_token(kind)
                } else {
                    let kind = if self.cursor.matches(b'=') { TokenKind::LessEqual } else { TokenKind::Less };
                    self.make_token(kind)
                }
            }
            b'>' => {
                if self.cursor.matches(b'>') {
                    let kind =
                        if self.cursor.matches(b'=') { TokenKind::RightShiftEqual } else { TokenKind::RightShift };
                    self.make_token(kind)
                } else {
                    let kind = if self.cursor.matches(b'=') { TokenKind::GreaterEqual } else { TokenKind::Greater };
                    self.make_token(kind)
                }
            }
            b'!' => {
                if self.cursor.matches(b'=') {
                    self.make_token(TokenKind::NotEqual)
                } else {
                    self.make_error(ScanError::UnexpectedCharacter)
                }
            }
            _ => self.make_error(ScanError::UnexpectedCharacter),
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token<'src> {
        Token::new(kind, self.cursor.lexeme(), self.start_position())
    }

    fn make_error(&self, err: ScanError) -> Token<'src> {
        Token::new(TokenKind::Error, err.message(), self.start_position())
    }

    fn start_position(&self) -> Position {
        Position::new(self.cursor.start_line(), self.cursor.start_column(), self.cursor.start_offset())
    }
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::EndMarker {
            self.done = true;
        }
        Some(token)
    }
}
