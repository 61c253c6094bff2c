//! Program root and top-level item declarations.

use super::stmt::{Stmt, VarDecl};
use super::types::TypeName;
use crate::token::Span;

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: TypeName,
    pub span: Span,
}

/// `name, return type (string), ordered parameter list, variadic flag,
/// static/extern flags, body (optional; absent = prototype)` — spec §3.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub return_type: TypeName,
    pub params: Vec<Param>,
    pub variadic: bool,
    pub is_static: bool,
    pub is_extern: bool,
    pub body: Option<Stmt>,
    pub span: Span,
}

impl Function {
    /// A function either has a body (definition) or does not (prototype);
    /// a prototype contributes a symbol but no emitted code (spec §3
    /// invariant 6).
    pub fn is_prototype(&self) -> bool {
        self.body.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Typedef {
    pub name: String,
    pub underlying: TypeName,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enumerator {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: Option<String>,
    pub enumerators: Vec<Enumerator>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructMember {
    pub name: String,
    pub ty: TypeName,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    pub name: String,
    pub members: Vec<StructMember>,
    pub span: Span,
}

/// A top-level program item, in source order (spec §3: "ordered sequences
/// of typedefs, enums, struct declarations, global variables, and function
/// definitions").
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Typedef(Typedef),
    Enum(EnumDecl),
    Struct(StructDecl),
    GlobalVar(VarDecl),
    Function(Function),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub items: Vec<Item>,
}

impl Program {
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.items.iter().filter_map(|item| match item {
            Item::Function(f) => Some(f),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_is_prototype_without_body() {
        let f = Function {
            name: "foo".to_string(),
            return_type: "int".to_string(),
            params: vec![],
            variadic: false,
            is_static: false,
            is_extern: true,
            body: None,
            span: Span::new(0, 0, 1, 1),
        };
        assert!(f.is_prototype());
    }

    #[test]
    fn test_program_functions_filters_other_items() {
        let program = Program {
            items: vec![
                Item::Typedef(Typedef {
                    name: "byte".to_string(),
                    underlying: "char".to_string(),
                    span: Span::new(0, 0, 1, 1),
                }),
                Item::Function(Function {
                    name: "main".to_string(),
                    return_type: "int".to_string(),
                    params: vec![],
                    variadic: false,
                    is_static: false,
                    is_extern: false,
                    body: None,
                    span: Span::new(0, 0, 1, 1),
                }),
            ],
        };
        assert_eq!(program.functions().count(), 1);
    }
}
