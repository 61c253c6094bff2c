//! Whitespace, comment, and preprocessor-marker skipping for the lexer.

use super::Lexer;

impl<'a> Lexer<'a> {
    /// Skips whitespace, `//` line comments, and preprocessor line markers
    /// (`# <digits> "<file>" ...`) in a loop, since any of the three may be
    /// followed by another.
    pub(super) fn skip_trivia(&mut self) {
        loop {
            let before = self.pos;
            self.skip_whitespace();
            self.skip_line_comment();
            self.skip_line_marker();
            if self.pos == before {
                break;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(|c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn skip_line_comment(&mut self) {
        if self.input[self.pos..].starts_with("//") {
            while let Some(c) = self.current_char() {
                if c == '\n' {
                    break;
                }
                self.advance();
            }
        }
    }

    /// A preprocessor line marker is recognized only when `#` begins a
    /// line-initial run (column 1); otherwise `#` is left for the tokenizer
    /// to report as unknown.
    fn skip_line_marker(&mut self) {
        if self.column != 1 || self.current_char() != Some('#') {
            return;
        }
        let save = (self.pos, self.line, self.column);
        self.advance(); // consume '#'
        self.skip_spaces_only();
        if !self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.pos = save.0;
            self.line = save.1;
            self.column = save.2;
            return;
        }
        while let Some(c) = self.current_char() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn skip_spaces_only(&mut self) {
        while matches!(self.current_char(), Some(' ') | Some('\t')) {
            self.advance();
        }
    }
}
