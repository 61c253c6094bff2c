//! Constant propagation (spec §4.3 pass 1): a flat name→value map, not
//! scope-aware. Spec §9 "Constant propagation scoping" names this as a
//! deliberate compatibility choice rather than an oversight — the map is
//! shared across the whole function body, including nested blocks and
//! loop bodies, matching the source behavior being preserved.

use std::collections::HashMap;

use crate::ast::{Expr, ExprKind, SizeofArg, Stmt, StmtKind, SwitchArm};

pub(super) fn run(stmt: &mut Stmt) {
    let mut known = HashMap::new();
    walk(stmt, &mut known);
}

fn walk(stmt: &mut Stmt, known: &mut HashMap<String, i64>) {
    match &mut stmt.kind {
        StmtKind::Compound(stmts) => {
            for s in stmts.iter_mut() {
                walk(s, known);
            }
        }
        StmtKind::If { cond, then_branch, else_branch } => {
            substitute(cond, known);
            walk(then_branch, known);
            if let Some(e) = else_branch {
                walk(e, known);
            }
        }
        StmtKind::While { cond, body } => {
            substitute(cond, known);
            walk(body, known);
        }
        StmtKind::DoWhile { body, cond } => {
            walk(body, known);
            substitute(cond, known);
        }
        StmtKind::For { init, cond, update, body } => {
            if let Some(i) = init {
                walk(i, known);
            }
            if let Some(c) = cond {
                substitute(c, known);
            }
            if let Some(u) = update {
                substitute(u, known);
            }
            walk(body, known);
        }
        StmtKind::Switch { expr, arms } => {
            substitute(expr, known);
            for arm in arms {
                match arm {
                    SwitchArm::Case { value, body } => {
                        substitute(value, known);
                        for s in body.iter_mut() {
                            walk(s, known);
                        }
                    }
                    SwitchArm::Default { body } => {
                        for s in body.iter_mut() {
                            walk(s, known);
                        }
                    }
                }
            }
        }
        StmtKind::Break | StmtKind::Continue => {}
        StmtKind::Return(value) => {
            if let Some(e) = value {
                substitute(e, known);
            }
        }
        StmtKind::ExprStmt(e) => substitute(e, known),
        StmtKind::VarDecl(decl) => {
            if let Some(init) = &mut decl.init {
                substitute(init, known);
                match init.kind.int_literal() {
                    Some(n) => {
                        known.insert(decl.name.clone(), n);
                    }
                    None => {
                        known.remove(&decl.name);
                    }
                }
            } else {
                known.remove(&decl.name);
            }
        }
    }
}

/// Replaces `Identifier` leaves with their tracked constant (if any) and
/// recurses into subexpressions; updates the map in place when it passes
/// through an assignment.
fn substitute(e: &mut Expr, known: &mut HashMap<String, i64>) {
    match &mut e.kind {
        ExprKind::Identifier(name) => {
            if let Some(n) = known.get(name) {
                e.kind = ExprKind::IntLiteral(*n);
            }
        }
        ExprKind::Unary { operand, .. } => substitute(operand, known),
        ExprKind::Binary { left, right, .. } => {
            substitute(left, known);
            substitute(right, known);
        }
        ExprKind::Assign { name, value } => {
            substitute(value, known);
            match value.kind.int_literal() {
                Some(n) => {
                    known.insert(name.clone(), n);
                }
                None => {
                    known.remove(name);
                }
            }
        }
        ExprKind::Call { args, .. } => {
            for a in args.iter_mut() {
                substitute(a, known);
            }
        }
        ExprKind::ArrayAccess { array, index } => {
            substitute(array, known);
            substitute(index, known);
        }
        ExprKind::AddrOf(inner) | ExprKind::Deref(inner) => substitute(inner, known),
        ExprKind::Member { base, .. } => substitute(base, known),
        ExprKind::Sizeof(SizeofArg::Expr(inner)) => substitute(inner, known),
        ExprKind::Sizeof(SizeofArg::Type(_)) => {}
        ExprKind::Ternary { cond, then_expr, else_expr } => {
            substitute(cond, known);
            substitute(then_expr, known);
            substitute(else_expr, known);
        }
        ExprKind::Cast { expr, .. } => substitute(expr, known),
        ExprKind::IntLiteral(_) | ExprKind::FloatLiteral(_) | ExprKind::CharLiteral(_) | ExprKind::StringLiteral(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::VarDecl;
    use crate::token::Span;

    fn span() -> Span {
        Span::new(0, 1, 1, 1)
    }

    fn int(n: i64) -> Expr {
        Expr::new(ExprKind::IntLiteral(n), span())
    }

    #[test]
    fn test_propagates_constant_initializer_into_later_use() {
        let decl = Stmt::new(
            StmtKind::VarDecl(VarDecl {
                ty: "int".to_string(),
                name: "x".to_string(),
                init: Some(int(5)),
                array_size: None,
                is_static: false,
                is_const: false,
                is_extern: false,
                is_global: false,
            }),
            span(),
        );
        let use_stmt = Stmt::new(
            StmtKind::Return(Some(Expr::new(ExprKind::Identifier("x".to_string()), span()))),
            span(),
        );
        let mut body = Stmt::new(StmtKind::Compound(vec![decl, use_stmt]), span());
        run(&mut body);

        let StmtKind::Compound(stmts) = &body.kind else { panic!("expected block") };
        let StmtKind::Return(Some(ret)) = &stmts[1].kind else { panic!("expected return") };
        assert_eq!(ret.kind, ExprKind::IntLiteral(5));
    }

    #[test]
    fn test_non_constant_assignment_invalidates_tracked_value() {
        let decl = Stmt::new(
            StmtKind::VarDecl(VarDecl {
                ty: "int".to_string(),
                name: "x".to_string(),
                init: Some(int(5)),
                array_size: None,
                is_static: false,
                is_const: false,
                is_extern: false,
                is_global: false,
            }),
            span(),
        );
        let reassign = Stmt::new(
            StmtKind::ExprStmt(Expr::new(
                ExprKind::Assign {
                    name: "x".to_string(),
                    value: Box::new(Expr::new(ExprKind::Identifier("y".to_string()), span())),
                },
                span(),
            )),
            span(),
        );
        let use_stmt = Stmt::new(
            StmtKind::Return(Some(Expr::new(ExprKind::Identifier("x".to_string()), span()))),
            span(),
        );
        let mut body = Stmt::new(StmtKind::Compound(vec![decl, reassign, use_stmt]), span());
        run(&mut body);

        let StmtKind::Compound(stmts) = &body.kind else { panic!("expected block") };
        let StmtKind::Return(Some(ret)) = &stmts[2].kind else { panic!("expected return") };
        assert_eq!(ret.kind, ExprKind::Identifier("x".to_string()));
    }
}
