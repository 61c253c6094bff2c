//! Token navigation and other small parser helpers.

use super::error;
use super::Parser;
use crate::diagnostics::Diagnostic;
use crate::token::{Span, Token, TokenKind};

impl<'a> Parser<'a> {
    pub(super) fn current(&self) -> &Token {
        &self.current
    }

    pub(super) fn current_kind(&self) -> &TokenKind {
        &self.current.kind
    }

    pub(super) fn current_span(&self) -> Span {
        self.current.span
    }

    pub(super) fn peek_kind(&self) -> &TokenKind {
        &self.peek.kind
    }

    pub(super) fn is_eof(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof)
    }

    /// Advances one token, pulling a fresh one from the lexer and merging in
    /// any diagnostics it raised along the way.
    pub(super) fn advance(&mut self) -> Token {
        let old_current = std::mem::replace(&mut self.current, std::mem::replace(&mut self.peek, self.lexer.next()));
        self.diagnostics.extend(self.lexer.take_diagnostics());
        old_current
    }

    /// Consumes the current token if it matches `kind`'s discriminant,
    /// returning it; otherwise records a diagnostic and returns `None`.
    pub(super) fn expect(&mut self, expected: &TokenKind, description: &str) -> Option<Token> {
        if std::mem::discriminant(&self.current.kind) == std::mem::discriminant(expected) {
            Some(self.advance())
        } else {
            self.error_here(description);
            None
        }
    }

    pub(super) fn matches(&mut self, expected: &TokenKind) -> bool {
        if std::mem::discriminant(&self.current.kind) == std::mem::discriminant(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn check(&self, expected: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(expected)
    }

    pub(super) fn error_here(&mut self, expected: &str) {
        let diagnostic = error::unexpected_token(expected, &self.current.kind, self.current.span);
        self.diagnostics.push(diagnostic);
    }

    pub(super) fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub(super) fn declare_typedef(&mut self, name: String) {
        self.typedef_names.insert(name);
    }

    /// Records a struct tag as declared, returning `false` (without
    /// recording anything) if that tag is already taken.
    pub(super) fn declare_struct_tag(&mut self, name: &str) -> bool {
        self.struct_names.insert(name.to_string())
    }

    /// Records an enum tag as declared, returning `false` (without
    /// recording anything) if that tag is already taken.
    pub(super) fn declare_enum_tag(&mut self, name: &str) -> bool {
        self.enum_names.insert(name.to_string())
    }

    /// Allocates the next `__anon_struct_<n>` name for an unnamed
    /// `typedef struct { ... } Name;` body (spec §4.2).
    pub(super) fn next_anon_struct_id(&mut self) -> usize {
        let id = self.anon_struct_counter;
        self.anon_struct_counter += 1;
        id
    }

    pub(super) fn is_typedef_name(&self, name: &str) -> bool {
        self.typedef_names.contains(name)
    }

    /// `true` if the current token can begin a type: a base-type keyword,
    /// `struct`/`union`/`enum`, `const`, or a known typedef name.
    pub(super) fn at_type_start(&self) -> bool {
        match &self.current.kind {
            TokenKind::Const | TokenKind::Struct | TokenKind::Union | TokenKind::Enum => true,
            k if k.is_base_type_keyword() => true,
            TokenKind::Identifier(name) => self.is_typedef_name(name),
            _ => false,
        }
    }

    /// Recovery for a missing semicolon: if the following token plausibly
    /// begins a new statement, log a diagnostic and continue without
    /// consuming it (spec §4.2, §7); otherwise the caller should abort.
    pub(super) fn recover_missing_semicolon(&mut self) -> bool {
        let recoverable = self.at_type_start()
            || matches!(
                self.current.kind,
                TokenKind::If
                    | TokenKind::While
                    | TokenKind::Do
                    | TokenKind::For
                    | TokenKind::Return
                    | TokenKind::Break
                    | TokenKind::Continue
                    | TokenKind::Switch
                    | TokenKind::RightBrace
                    | TokenKind::Eof
            );
        if recoverable {
            let diagnostic = error::missing_semicolon(self.current_span());
            self.diagnostics.push(diagnostic);
        }
        recoverable
    }
}
