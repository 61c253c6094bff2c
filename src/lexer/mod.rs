//! Lexical analyzer for the ccc compiler.
//!
//! Reduces the character stream to a token stream on demand: the parser
//! calls [`Lexer::next`] and gets exactly one token back. `next` is total —
//! at end of input it returns [`crate::token::TokenKind::Eof`] forever, and
//! it never fails. Problems it notices (unknown characters, unterminated
//! literals, bad escapes) are pushed onto an internal diagnostics buffer
//! instead, drained by the driver once lexing is done.
//!
//! # Module structure
//!
//! - [`cursor`] - character navigation (current/peek/advance)
//! - [`skip`] - whitespace, `//` comments, preprocessor line markers
//! - [`tokens`] - token recognition and reading
//! - [`error`] - diagnostic constructors for lexical problems

mod cursor;
mod error;
mod skip;
mod tokens;

use crate::diagnostics::Diagnostic;
use crate::token::Token;

/// A lexical analyzer over a single source file.
///
/// Not restartable across files (spec §4.1): construct a fresh `Lexer` per
/// compilation unit.
pub struct Lexer<'a> {
    pub(super) input: &'a str,
    pub(super) pos: usize,
    pub(super) line: usize,
    pub(super) column: usize,
    pub(super) diagnostics: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            pos: 0,
            line: 1,
            column: 1,
            diagnostics: Vec::new(),
        }
    }

    /// Returns the next token in the stream, skipping trivia first.
    pub fn next(&mut self) -> Token {
        self.skip_trivia();
        self.read_token()
    }

    /// Drains diagnostics accumulated since the lexer was created (or since
    /// the last drain).
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn test_eof_is_returned_indefinitely() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next().kind, TokenKind::Eof);
        assert_eq!(lexer.next().kind, TokenKind::Eof);
        assert_eq!(lexer.next().kind, TokenKind::Eof);
    }

    #[test]
    fn test_skips_whitespace_and_comments_between_tokens() {
        let mut lexer = Lexer::new("  // leading comment\n  int   x ;");
        assert_eq!(lexer.next().kind, TokenKind::Int);
        assert_eq!(lexer.next().kind, TokenKind::Identifier("x".to_string()));
        assert_eq!(lexer.next().kind, TokenKind::Semicolon);
        assert_eq!(lexer.next().kind, TokenKind::Eof);
    }

    #[test]
    fn test_idempotence_same_input_same_tokens() {
        let source = "int main(){return 2+3*4;}";
        let collect = || {
            let mut lexer = Lexer::new(source);
            let mut kinds = Vec::new();
            loop {
                let tok = lexer.next();
                let eof = tok.is_eof();
                kinds.push(tok.kind);
                if eof {
                    break;
                }
            }
            kinds
        };
        assert_eq!(collect(), collect());
    }
}
