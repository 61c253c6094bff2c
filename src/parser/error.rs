//! Syntax diagnostics.

use crate::diagnostics::Diagnostic;
use crate::token::{Span, TokenKind};

pub(super) fn unexpected_token(expected: &str, found: &TokenKind, span: Span) -> Diagnostic {
    Diagnostic::error(
        format!("expected {expected}, found {}", display_kind(found)),
        Some(span),
    )
}

pub(super) fn missing_semicolon(span: Span) -> Diagnostic {
    Diagnostic::warning("expected ';' after statement".to_string(), Some(span))
        .with_help("insert a ';' here")
}

pub(super) fn redefinition(name: &str, span: Span, detail: &str) -> Diagnostic {
    Diagnostic::error(format!("redefinition of '{name}': {detail}"), Some(span))
}

pub(super) fn display_kind(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Identifier(s) => format!("identifier '{s}'"),
        TokenKind::IntLiteral(n) => format!("integer literal '{n}'"),
        TokenKind::FloatLiteral(n) => format!("float literal '{n}'"),
        TokenKind::StringLiteral(s) => format!("string literal {s}"),
        TokenKind::CharLiteral(c) => format!("character literal '{c}'"),
        TokenKind::Eof => "end of input".to_string(),
        TokenKind::Unknown(c) => format!("unknown character '{c}'"),
        other => format!("'{other:?}'"),
    }
}
