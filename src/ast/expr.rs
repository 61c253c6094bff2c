//! Expression nodes.

use super::types::TypeName;
use crate::token::{Span, TokenKind};

/// An expression: a closed tagged union carrying its source [`Span`].
///
/// The optimizer and emitter both depend on matching every variant
/// exhaustively (spec §9); adding syntax means adding a variant here, not
/// overloading an existing one.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Either half of a `sizeof` node — exactly one is populated (spec §3
/// invariant 3).
#[derive(Debug, Clone, PartialEq)]
pub enum SizeofArg {
    Type(TypeName),
    Expr(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    IntLiteral(i64),
    FloatLiteral(f64),
    CharLiteral(char),
    StringLiteral(String),
    Identifier(String),

    /// `!x`, `~x`, `-x`, `+x`, prefix/postfix `++x`/`x++`/`--x`/`x--`.
    /// `is_postfix` only distinguishes the two forms of `++`/`--`; every
    /// other operator here is always prefix.
    Unary {
        op: TokenKind,
        operand: Box<Expr>,
        is_postfix: bool,
    },

    /// A binary operator applied to two operands, carrying the lexed
    /// [`TokenKind`] so the optimizer and emitter share one source of truth
    /// for "which operator is this."
    Binary {
        op: TokenKind,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// `name = value`. The assignment target is a bare name (spec §3); it is
    /// not a general lvalue expression.
    Assign {
        name: String,
        value: Box<Expr>,
    },

    Call {
        name: String,
        args: Vec<Expr>,
    },

    ArrayAccess {
        array: Box<Expr>,
        index: Box<Expr>,
    },

    AddrOf(Box<Expr>),
    Deref(Box<Expr>),

    Member {
        base: Box<Expr>,
        field: String,
        /// `true` for `base->field`, `false` for `base.field`.
        arrow: bool,
    },

    Sizeof(SizeofArg),

    Ternary {
        cond: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },

    Cast {
        ty: TypeName,
        expr: Box<Expr>,
    },
}

impl ExprKind {
    pub fn int_literal(&self) -> Option<i64> {
        match self {
            ExprKind::IntLiteral(n) => Some(*n),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span() -> Span {
        Span::new(0, 1, 1, 1)
    }

    #[test]
    fn test_int_literal_accessor() {
        let e = ExprKind::IntLiteral(7);
        assert_eq!(e.int_literal(), Some(7));
        assert_eq!(ExprKind::Identifier("x".into()).int_literal(), None);
    }

    #[test]
    fn test_sizeof_variants_are_exclusive() {
        let by_type = SizeofArg::Type("int".to_string());
        let by_expr = SizeofArg::Expr(Box::new(Expr::new(ExprKind::IntLiteral(1), span())));
        assert!(matches!(by_type, SizeofArg::Type(_)));
        assert!(matches!(by_expr, SizeofArg::Expr(_)));
    }

    #[test]
    fn test_compound_assignment_clone_is_independent() {
        let target = Expr::new(ExprKind::Identifier("x".to_string()), span());
        let cloned = target.clone();
        assert_eq!(target, cloned);
        // Independently owned: mutating one does not affect the other.
        let mut cloned = cloned;
        cloned.kind = ExprKind::Identifier("y".to_string());
        assert_ne!(target, cloned);
    }
}
