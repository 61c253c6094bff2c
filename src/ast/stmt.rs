//! Statement nodes.

use super::expr::Expr;
use super::types::TypeName;
use crate::token::Span;

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

/// A declared variable: `[static|extern] [const] <ty> <name> [[size]] [= init];`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub ty: TypeName,
    pub name: String,
    pub init: Option<Expr>,
    /// Present for `name[size]` array declarators.
    pub array_size: Option<Expr>,
    pub is_static: bool,
    pub is_const: bool,
    pub is_extern: bool,
    /// Set by the parser for declarations at program scope, so the emitter
    /// can route them to the module's globals instead of a stack slot.
    pub is_global: bool,
}

/// One `case <value>: <stmts>` or `default: <stmts>` arm inside a `switch`
/// body, in source order. Fall-through is preserved: the emitter does not
/// insert an implicit break between arms (spec §4.2).
#[derive(Debug, Clone, PartialEq)]
pub enum SwitchArm {
    Case { value: Expr, body: Vec<Stmt> },
    Default { body: Vec<Stmt> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Compound(Vec<Stmt>),

    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    While {
        cond: Expr,
        body: Box<Stmt>,
    },

    DoWhile {
        body: Box<Stmt>,
        cond: Expr,
    },

    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        update: Option<Expr>,
        body: Box<Stmt>,
    },

    Switch {
        expr: Expr,
        arms: Vec<SwitchArm>,
    },

    Break,
    Continue,
    Return(Option<Expr>),
    ExprStmt(Expr),
    VarDecl(VarDecl),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expr::ExprKind;

    fn span() -> Span {
        Span::new(0, 1, 1, 1)
    }

    #[test]
    fn test_switch_arm_fallthrough_has_no_implicit_break() {
        let arms = vec![
            SwitchArm::Case {
                value: Expr::new(ExprKind::IntLiteral(1), span()),
                body: vec![Stmt::new(StmtKind::ExprStmt(Expr::new(ExprKind::IntLiteral(1), span())), span())],
            },
            SwitchArm::Default {
                body: vec![Stmt::new(StmtKind::Break, span())],
            },
        ];
        assert_eq!(arms.len(), 2);
        assert!(matches!(arms[0], SwitchArm::Case { .. }));
        assert!(matches!(arms[1], SwitchArm::Default { .. }));
    }

    #[test]
    fn test_var_decl_defaults() {
        let decl = VarDecl {
            ty: "int".to_string(),
            name: "x".to_string(),
            init: None,
            array_size: None,
            is_static: false,
            is_const: false,
            is_extern: false,
            is_global: false,
        };
        assert!(!decl.is_static);
        assert!(decl.init.is_none());
    }
}
