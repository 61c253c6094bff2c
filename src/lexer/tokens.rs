//! Token recognition: dispatch on the current character's category and
//! read the matching token.

use super::error;
use super::Lexer;
use crate::token::{Span, Token, TokenKind};

impl<'a> Lexer<'a> {
    pub(super) fn read_token(&mut self) -> Token {
        let start_pos = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        let Some(c) = self.current_char() else {
            return Token::new(TokenKind::Eof, self.pos_span(start_pos, start_line, start_col), "");
        };

        if c.is_ascii_digit() {
            return self.read_number(start_pos, start_line, start_col);
        }
        if c.is_ascii_alphabetic() || c == '_' {
            return self.read_identifier_or_keyword(start_pos, start_line, start_col);
        }
        if c == '\'' {
            return self.read_char_literal(start_pos, start_line, start_col);
        }
        if c == '"' {
            return self.read_string_literal(start_pos, start_line, start_col);
        }
        self.read_operator_or_punctuator(start_pos, start_line, start_col)
    }

    fn read_number(&mut self, start_pos: usize, start_line: usize, start_col: usize) -> Token {
        let mut is_float = false;
        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.current_char() == Some('.') && self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance();
            while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        if matches!(self.current_char(), Some('e') | Some('E')) {
            let mut lookahead = self.input[self.pos..].chars();
            lookahead.next();
            let next = lookahead.next();
            let exponent_starts = next.is_some_and(|c| c.is_ascii_digit())
                || (matches!(next, Some('+') | Some('-'))
                    && lookahead.next().is_some_and(|c| c.is_ascii_digit()));
            if exponent_starts {
                is_float = true;
                self.advance();
                if matches!(self.current_char(), Some('+') | Some('-')) {
                    self.advance();
                }
                while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }
        if matches!(self.current_char(), Some('f') | Some('F')) {
            is_float = true;
            self.advance();
        }

        let span = self.pos_span(start_pos, start_line, start_col);
        let lexeme = &self.input[start_pos..self.pos];
        let kind = if is_float {
            let trimmed = lexeme.trim_end_matches(['f', 'F']);
            TokenKind::FloatLiteral(trimmed.parse().unwrap_or(0.0))
        } else {
            TokenKind::IntLiteral(lexeme.parse().unwrap_or(0))
        };
        Token::new(kind, span, lexeme)
    }

    fn read_identifier_or_keyword(&mut self, start_pos: usize, start_line: usize, start_col: usize) -> Token {
        while self.current_char().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }
        let span = self.pos_span(start_pos, start_line, start_col);
        let lexeme = &self.input[start_pos..self.pos];
        let kind = TokenKind::keyword(lexeme).unwrap_or_else(|| TokenKind::Identifier(lexeme.to_string()));
        Token::new(kind, span, lexeme)
    }

    fn read_char_literal(&mut self, start_pos: usize, start_line: usize, start_col: usize) -> Token {
        self.advance(); // opening '
        let value = match self.current_char() {
            Some('\\') => {
                self.advance();
                self.read_escape(start_line, start_col)
            }
            Some(c) => {
                self.advance();
                c
            }
            None => '\0',
        };
        if self.current_char() == Some('\'') {
            self.advance();
        } else {
            let span = self.pos_span(start_pos, start_line, start_col);
            self.diagnostics.push(error::unterminated_char_literal(span));
        }
        let span = self.pos_span(start_pos, start_line, start_col);
        let lexeme = &self.input[start_pos..self.pos];
        Token::new(TokenKind::CharLiteral(value), span, lexeme)
    }

    fn read_escape(&mut self, line: usize, col: usize) -> char {
        match self.current_char() {
            Some('n') => {
                self.advance();
                '\n'
            }
            Some('t') => {
                self.advance();
                '\t'
            }
            Some('r') => {
                self.advance();
                '\r'
            }
            Some('\\') => {
                self.advance();
                '\\'
            }
            Some('\'') => {
                self.advance();
                '\''
            }
            Some('0') => {
                self.advance();
                '\0'
            }
            Some(c) => {
                self.advance();
                self.diagnostics
                    .push(error::unknown_escape(c, Span::new(self.pos, self.pos, line, col)));
                c
            }
            None => '\0',
        }
    }

    fn read_string_literal(&mut self, start_pos: usize, start_line: usize, start_col: usize) -> Token {
        self.advance(); // opening "
        loop {
            match self.current_char() {
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\n') | None => {
                    let span = self.pos_span(start_pos, start_line, start_col);
                    self.diagnostics.push(error::unterminated_string_literal(span));
                    break;
                }
                Some('\\') => {
                    self.advance();
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
        let span = self.pos_span(start_pos, start_line, start_col);
        // The lexeme (and the stored literal payload) preserve the quotes and
        // escapes verbatim; unescaping is the emitter's concern, not the
        // lexer's (spec §4.1).
        let lexeme = self.input[start_pos..self.pos].to_string();
        Token::new(TokenKind::StringLiteral(lexeme.clone()), span, lexeme)
    }

    fn read_operator_or_punctuator(&mut self, start_pos: usize, start_line: usize, start_col: usize) -> Token {
        let c = self.current_char().unwrap();
        self.advance();
        let next = self.current_char();

        macro_rules! two_char {
            ($second:expr, $kind:expr) => {
                if next == Some($second) {
                    self.advance();
                    let span = self.pos_span(start_pos, start_line, start_col);
                    let lexeme = &self.input[start_pos..self.pos];
                    return Token::new($kind, span, lexeme);
                }
            };
        }

        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '~' => TokenKind::Tilde,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,
            '.' => {
                if next == Some('.') && self.peek_char() == Some('.') {
                    self.advance();
                    self.advance();
                    TokenKind::Ellipsis
                } else {
                    TokenKind::Dot
                }
            }
            '-' => {
                two_char!('>', TokenKind::Arrow);
                two_char!('=', TokenKind::MinusAssign);
                two_char!('-', TokenKind::MinusMinus);
                TokenKind::Minus
            }
            '+' => {
                two_char!('=', TokenKind::PlusAssign);
                two_char!('+', TokenKind::PlusPlus);
                TokenKind::Plus
            }
            '*' => {
                two_char!('=', TokenKind::StarAssign);
                TokenKind::Star
            }
            '/' => {
                two_char!('=', TokenKind::SlashAssign);
                TokenKind::Slash
            }
            '%' => TokenKind::Percent,
            '=' => {
                two_char!('=', TokenKind::EqualEqual);
                TokenKind::Assign
            }
            '!' => {
                two_char!('=', TokenKind::BangEqual);
                TokenKind::Bang
            }
            '<' => {
                two_char!('=', TokenKind::LessEqual);
                two_char!('<', TokenKind::Shl);
                TokenKind::Less
            }
            '>' => {
                two_char!('=', TokenKind::GreaterEqual);
                two_char!('>', TokenKind::Shr);
                TokenKind::Greater
            }
            '&' => {
                two_char!('&', TokenKind::AmpAmp);
                TokenKind::Amp
            }
            '|' => {
                two_char!('|', TokenKind::PipePipe);
                TokenKind::Pipe
            }
            '^' => TokenKind::Caret,
            other => {
                let span = self.pos_span(start_pos, start_line, start_col);
                self.diagnostics.push(error::unknown_char(other, span));
                TokenKind::Unknown(other)
            }
        };

        let span = self.pos_span(start_pos, start_line, start_col);
        let lexeme = &self.input[start_pos..self.pos];
        Token::new(kind, span, lexeme)
    }
}
