//! Lexical analysis diagnostics.
//!
//! The lexer's `next()` is a total function (spec §4.1): it never returns
//! `Result`. Problems it detects — unknown characters, unterminated
//! literals, bad escapes — are recorded as [`crate::diagnostics::Diagnostic`]
//! values on an internal buffer and drained by the driver after lexing.

use crate::diagnostics::Diagnostic;
use crate::token::Span;

pub(super) fn unknown_char(c: char, span: Span) -> Diagnostic {
    Diagnostic::warning(format!("unknown character '{c}'"), Some(span))
}

pub(super) fn unterminated_char_literal(span: Span) -> Diagnostic {
    Diagnostic::warning("unterminated character literal".to_string(), Some(span))
}

pub(super) fn unterminated_string_literal(span: Span) -> Diagnostic {
    Diagnostic::warning("unterminated string literal".to_string(), Some(span))
}

pub(super) fn unknown_escape(c: char, span: Span) -> Diagnostic {
    Diagnostic::warning(format!("unrecognized escape sequence '\\{c}'"), Some(span))
}
