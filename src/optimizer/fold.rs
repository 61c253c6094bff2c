//! Constant folding (spec §4.3 pass 2): when both operands of a binary
//! operator are integer literals, compute the result; `!` on a constant
//! folds to `0`/`1`. Division and modulo by a literal zero are skipped
//! with a warning, not folded.

use crate::ast::{Expr, ExprKind};
use crate::token::TokenKind;

pub(super) fn fold_expr(e: &mut Expr) {
    let folded = match &e.kind {
        ExprKind::Unary { op: TokenKind::Bang, operand, is_postfix: false } => {
            operand.kind.int_literal().map(|n| if n == 0 { 1 } else { 0 })
        }
        ExprKind::Binary { op, left, right } => match (left.kind.int_literal(), right.kind.int_literal()) {
            (Some(a), Some(b)) => fold_binary(op, a, b),
            _ => None,
        },
        _ => None,
    };
    if let Some(n) = folded {
        e.kind = ExprKind::IntLiteral(n);
    }
}

fn fold_binary(op: &TokenKind, a: i64, b: i64) -> Option<i64> {
    match op {
        TokenKind::Plus => Some(a.wrapping_add(b)),
        TokenKind::Minus => Some(a.wrapping_sub(b)),
        TokenKind::Star => Some(a.wrapping_mul(b)),
        TokenKind::Slash => {
            if b == 0 {
                tracing::warn!("division by literal zero skipped during constant folding");
                None
            } else {
                Some(a.wrapping_div(b))
            }
        }
        TokenKind::Percent => {
            if b == 0 {
                tracing::warn!("modulo by literal zero skipped during constant folding");
                None
            } else {
                Some(a.wrapping_rem(b))
            }
        }
        TokenKind::EqualEqual => Some((a == b) as i64),
        TokenKind::BangEqual => Some((a != b) as i64),
        TokenKind::Less => Some((a < b) as i64),
        TokenKind::Greater => Some((a > b) as i64),
        TokenKind::LessEqual => Some((a <= b) as i64),
        TokenKind::GreaterEqual => Some((a >= b) as i64),
        TokenKind::AmpAmp => Some(((a != 0) && (b != 0)) as i64),
        TokenKind::PipePipe => Some(((a != 0) || (b != 0)) as i64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Span;

    fn span() -> Span {
        Span::new(0, 1, 1, 1)
    }

    fn int(n: i64) -> Box<Expr> {
        Box::new(Expr::new(ExprKind::IntLiteral(n), span()))
    }

    #[test]
    fn test_fold_arithmetic() {
        let mut e = Expr::new(ExprKind::Binary { op: TokenKind::Plus, left: int(1), right: int(2) }, span());
        fold_expr(&mut e);
        assert_eq!(e.kind, ExprKind::IntLiteral(3));
    }

    #[test]
    fn test_fold_is_associative_either_grouping() {
        let mut left_first = Expr::new(
            ExprKind::Binary {
                op: TokenKind::Plus,
                left: Box::new(Expr::new(
                    ExprKind::Binary { op: TokenKind::Plus, left: int(1), right: int(2) },
                    span(),
                )),
                right: int(3),
            },
            span(),
        );
        let mut right_first = Expr::new(
            ExprKind::Binary {
                op: TokenKind::Plus,
                left: int(1),
                right: Box::new(Expr::new(
                    ExprKind::Binary { op: TokenKind::Plus, left: int(2), right: int(3) },
                    span(),
                )),
            },
            span(),
        );
        super::super::walk_expr(&mut left_first, &mut fold_expr);
        super::super::walk_expr(&mut right_first, &mut fold_expr);
        assert_eq!(left_first.kind, ExprKind::IntLiteral(6));
        assert_eq!(right_first.kind, ExprKind::IntLiteral(6));
    }

    #[test]
    fn test_division_by_literal_zero_not_folded() {
        let mut e = Expr::new(ExprKind::Binary { op: TokenKind::Slash, left: int(4), right: int(0) }, span());
        fold_expr(&mut e);
        assert!(matches!(e.kind, ExprKind::Binary { .. }));
    }

    #[test]
    fn test_fold_bang_of_constant() {
        let mut e = Expr::new(
            ExprKind::Unary { op: TokenKind::Bang, operand: int(0), is_postfix: false },
            span(),
        );
        fold_expr(&mut e);
        assert_eq!(e.kind, ExprKind::IntLiteral(1));
    }
}
