//! Algebraic simplification (spec §4.3 pass 3): identity rewrites that
//! apply regardless of whether the other operand is itself a constant,
//! run after folding so `x + (1+2)`-style operands have already reduced
//! to literals.

use crate::ast::{Expr, ExprKind};
use crate::token::TokenKind;

pub(super) fn simplify_expr(e: &mut Expr) {
    match classify(e) {
        Rewrite::TakeLeft => {
            let ExprKind::Binary { left, .. } = &mut e.kind else { unreachable!() };
            *e = take(left);
        }
        Rewrite::TakeRight => {
            let ExprKind::Binary { right, .. } = &mut e.kind else { unreachable!() };
            *e = take(right);
        }
        Rewrite::Zero => e.kind = ExprKind::IntLiteral(0),
        Rewrite::None => {}
    }
}

enum Rewrite {
    None,
    TakeLeft,
    TakeRight,
    Zero,
}

fn classify(e: &Expr) -> Rewrite {
    let ExprKind::Binary { op, left, right } = &e.kind else { return Rewrite::None };
    match op {
        TokenKind::Plus if is_zero(right) => Rewrite::TakeLeft,
        TokenKind::Plus if is_zero(left) => Rewrite::TakeRight,
        TokenKind::Minus if is_zero(right) => Rewrite::TakeLeft,
        TokenKind::Star if is_zero(left) || is_zero(right) => Rewrite::Zero,
        TokenKind::Star if is_one(right) => Rewrite::TakeLeft,
        TokenKind::Star if is_one(left) => Rewrite::TakeRight,
        TokenKind::Slash if is_one(right) => Rewrite::TakeLeft,
        _ => Rewrite::None,
    }
}

fn is_zero(e: &Expr) -> bool {
    matches!(e.kind, ExprKind::IntLiteral(0))
}

fn is_one(e: &Expr) -> bool {
    matches!(e.kind, ExprKind::IntLiteral(1))
}

fn take(boxed: &mut Box<Expr>) -> Expr {
    std::mem::replace(boxed.as_mut(), Expr::new(ExprKind::IntLiteral(0), crate::token::Span::synthetic()))
}
