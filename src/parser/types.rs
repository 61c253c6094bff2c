//! Type-name parsing (spec §3): a base type, optional leading `const`, any
//! number of trailing `*`, or the function-pointer special form
//! `<return>(*)(<param-types>)`.
//!
//! Split into [`Parser::parse_base_type`] (the bare base type, no `const`
//! prefix or suffix) and [`Parser::finish_type_suffix`] (stars and the
//! function-pointer tail) so item-level parsing can build a `struct <tag>`
//! base itself after already having branched on whether a `{` follows the
//! tag (spec §4.2's function-vs-variable and struct-declaration-vs-struct-
//! typed-declarator ambiguities).

use super::Parser;
use crate::ast::TypeName;
use crate::token::TokenKind;

impl<'a> Parser<'a> {
    pub(super) fn parse_type_name(&mut self) -> Option<TypeName> {
        let is_const = self.matches(&TokenKind::Const);
        let base = self.parse_base_type()?;
        let prefixed = if is_const { format!("const {base}") } else { base };
        self.finish_type_suffix(prefixed)
    }

    /// The base type only: a keyword, `struct`/`union`/`enum <tag>`, or a
    /// known typedef name. No `const` prefix, no `*` suffix.
    pub(super) fn parse_base_type(&mut self) -> Option<String> {
        match self.current_kind().clone() {
            TokenKind::Int => {
                self.advance();
                Some("int".to_string())
            }
            TokenKind::Char => {
                self.advance();
                Some("char".to_string())
            }
            TokenKind::Float => {
                self.advance();
                Some("float".to_string())
            }
            TokenKind::Double => {
                self.advance();
                Some("double".to_string())
            }
            TokenKind::Void => {
                self.advance();
                Some("void".to_string())
            }
            TokenKind::Struct => {
                self.advance();
                let name = self.expect_identifier("struct tag name")?;
                Some(format!("struct {name}"))
            }
            TokenKind::Union => {
                self.advance();
                let name = self.expect_identifier("union tag name")?;
                Some(format!("union {name}"))
            }
            TokenKind::Enum => {
                self.advance();
                let name = self.expect_identifier("enum tag name")?;
                Some(format!("enum {name}"))
            }
            TokenKind::Identifier(name) if self.is_typedef_name(&name) => {
                self.advance();
                Some(name)
            }
            _ => {
                self.error_here("a type name");
                None
            }
        }
    }

    /// Appends trailing `*` pointer stars, or recognizes the
    /// `<ret>(*)(<params>)` function-pointer special form, onto an
    /// already-parsed base (possibly `const`-prefixed).
    pub(super) fn finish_type_suffix(&mut self, mut out: String) -> Option<TypeName> {
        while self.matches(&TokenKind::Star) {
            out.push('*');
        }

        if self.check(&TokenKind::LeftParen) && self.peek_kind() == &TokenKind::Star {
            self.advance(); // (
            self.advance(); // *
            self.expect(&TokenKind::RightParen, "')' after function-pointer '*'")?;
            self.expect(&TokenKind::LeftParen, "'(' for function-pointer parameter list")?;
            let mut params = Vec::new();
            if !self.check(&TokenKind::RightParen) {
                loop {
                    params.push(self.parse_type_name()?);
                    if !self.matches(&TokenKind::Comma) {
                        break;
                    }
                }
            }
            self.expect(&TokenKind::RightParen, "')' closing function-pointer parameter list")?;
            return Some(format!("{out}(*)({})", params.join(",")));
        }

        Some(out)
    }

    pub(super) fn expect_identifier(&mut self, description: &str) -> Option<String> {
        match self.current_kind().clone() {
            TokenKind::Identifier(name) => {
                self.advance();
                Some(name)
            }
            _ => {
                self.error_here(description);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::Parser;

    #[test]
    fn test_parse_base_type() {
        let mut parser = Parser::new("int");
        assert_eq!(parser.parse_type_name().as_deref(), Some("int"));
    }

    #[test]
    fn test_parse_pointer_type() {
        let mut parser = Parser::new("char **");
        assert_eq!(parser.parse_type_name().as_deref(), Some("char**"));
    }

    #[test]
    fn test_parse_const_struct_pointer() {
        let mut parser = Parser::new("const struct Point *");
        assert_eq!(parser.parse_type_name().as_deref(), Some("const struct Point*"));
    }

    #[test]
    fn test_parse_typedef_name_as_type() {
        let mut parser = Parser::new("Point");
        parser.declare_typedef("Point".to_string());
        assert_eq!(parser.parse_type_name().as_deref(), Some("Point"));
    }

    #[test]
    fn test_parse_function_pointer_type() {
        let mut parser = Parser::new("int(*)(int,char)");
        assert_eq!(parser.parse_type_name().as_deref(), Some("int(*)(int,char)"));
    }
}
