//! Strength reduction (spec §4.3 pass 4): log-only by design (spec §9
//! decision 2). Detects multiplication/division by a positive power of
//! two and records the opportunity via `tracing::debug!`; the AST is
//! never rewritten into a shift.

use crate::ast::{Expr, ExprKind};
use crate::token::TokenKind;

pub(super) fn detect(e: &mut Expr) {
    let ExprKind::Binary { op, right, .. } = &e.kind else { return };
    if !matches!(op, TokenKind::Star | TokenKind::Slash) {
        return;
    }
    if let Some(n) = right.kind.int_literal() {
        if is_power_of_two(n) {
            tracing::debug!(
                operator = ?op,
                operand = n,
                "multiplication/division by a power of two could be strength-reduced to a shift"
            );
        }
    }
}

fn is_power_of_two(n: i64) -> bool {
    n > 0 && (n & (n - 1)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Span;

    #[test]
    fn test_is_power_of_two() {
        assert!(is_power_of_two(1));
        assert!(is_power_of_two(8));
        assert!(!is_power_of_two(0));
        assert!(!is_power_of_two(-2));
        assert!(!is_power_of_two(6));
    }

    #[test]
    fn test_detect_does_not_rewrite_the_expression() {
        let span = Span::new(0, 1, 1, 1);
        let mut e = Expr::new(
            ExprKind::Binary {
                op: TokenKind::Star,
                left: Box::new(Expr::new(ExprKind::Identifier("x".to_string()), span)),
                right: Box::new(Expr::new(ExprKind::IntLiteral(8), span)),
            },
            span,
        );
        let before = e.clone();
        detect(&mut e);
        assert_eq!(e, before);
    }
}
