//! Lexical errors, modeled as values rather than panics.
//!
//! The scanner never panics on malformed input: every failure the driver
//! loop can encounter is one of the variants below, carried by an `ERROR`
//! token rather than raised as an exception. This keeps the tokenizer a
//! total function over its input.

use thiserror::Error;

/// A lexical error the scanner can report.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanError {
    /// A `'` or `"` string never found its closing quote before a bare
    /// newline (single-quoted) or end of input (any quote style).
    #[error("unterminated string literal")]
    UnterminatedString,

    /// The indentation stack would need to grow past its fixed capacity.
    #[error("indents exceeded the maximum indentation limit")]
    IndentExceeded,

    /// A dedent's width does not match any enclosing indentation level.
    #[error("unexpected indent")]
    InconsistentDedent,

    /// A backslash at end-of-line was followed by something other than a
    /// newline before the following logical line resumed.
    #[error("unexpected character after line continuation character")]
    BadLineContinuation,

    /// A byte that starts no recognizer and no operator in the dispatch
    /// table.
    #[error("unexpected character")]
    UnexpectedCharacter,

    /// End of input was reached with one or more brackets still open.
    #[error("EOF in multi-line statement")]
    UnbalancedBrackets,
}

impl ScanError {
    /// The static diagnostic message carried as the `ERROR` token's lexeme.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::UnterminatedString => "unterminated string literal",
            Self::IndentExceeded => "indents exceeded the maximum indentation limit",
            Self::InconsistentDedent => "unexpected indent",
            Self::BadLineContinuation => "unexpected character after line continuation character",
            Self::UnexpectedCharacter => "unexpected character",
            Self::UnbalancedBrackets => "EOF in multi-line statement",
        }
    }
}
