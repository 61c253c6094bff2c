//! Dead-code elimination (spec §4.3 pass 5). `if` with a constant condition
//! collapses to the taken branch; `while (0)` is eliminated entirely;
//! a `for` whose condition is literal `0` reduces to its init clause (or
//! an empty block if none). `do { B } while (0)` is deliberately left
//! alone (spec §9 decision 1: the body always executes once).

use crate::ast::{Stmt, StmtKind, SwitchArm};

pub(super) fn run(stmt: &mut Stmt) {
    recurse_into_children(stmt);
    collapse(stmt);
}

fn recurse_into_children(stmt: &mut Stmt) {
    match &mut stmt.kind {
        StmtKind::Compound(stmts) => {
            for s in stmts.iter_mut() {
                run(s);
            }
        }
        StmtKind::If { then_branch, else_branch, .. } => {
            run(then_branch);
            if let Some(e) = else_branch {
                run(e);
            }
        }
        StmtKind::While { body, .. } => run(body),
        StmtKind::DoWhile { body, .. } => run(body),
        StmtKind::For { init, body, .. } => {
            if let Some(i) = init {
                run(i);
            }
            run(body);
        }
        StmtKind::Switch { arms, .. } => {
            for arm in arms {
                match arm {
                    SwitchArm::Case { body, .. } | SwitchArm::Default { body } => {
                        for s in body.iter_mut() {
                            run(s);
                        }
                    }
                }
            }
        }
        StmtKind::Break
        | StmtKind::Continue
        | StmtKind::Return(_)
        | StmtKind::ExprStmt(_)
        | StmtKind::VarDecl(_) => {}
    }
}

fn empty_block(span: crate::token::Span) -> Stmt {
    Stmt::new(StmtKind::Compound(Vec::new()), span)
}

fn collapse(stmt: &mut Stmt) {
    let span = stmt.span;
    let replacement = match &mut stmt.kind {
        StmtKind::If { cond, then_branch, else_branch } => cond.kind.int_literal().map(|c| {
            if c != 0 {
                *std::mem::replace(then_branch, Box::new(empty_block(span)))
            } else {
                match else_branch.take() {
                    Some(e) => *e,
                    None => empty_block(span),
                }
            }
        }),
        StmtKind::While { cond, .. } => {
            if matches!(cond.kind.int_literal(), Some(0)) {
                Some(empty_block(span))
            } else {
                None
            }
        }
        StmtKind::For { init, cond, .. } => {
            let cond_is_dead = matches!(cond.as_ref().and_then(|c| c.kind.int_literal()), Some(0));
            if cond_is_dead {
                Some(match init.take() {
                    Some(i) => *i,
                    None => empty_block(span),
                })
            } else {
                None
            }
        }
        _ => None,
    };
    if let Some(r) = replacement {
        *stmt = r;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, ExprKind, VarDecl};
    use crate::token::Span;

    fn span() -> Span {
        Span::new(0, 1, 1, 1)
    }

    fn int(n: i64) -> Expr {
        Expr::new(ExprKind::IntLiteral(n), span())
    }

    #[test]
    fn test_if_true_collapses_to_then_branch() {
        let then_branch = Box::new(Stmt::new(StmtKind::Return(Some(int(100))), span()));
        let else_branch = Some(Box::new(Stmt::new(StmtKind::Return(Some(int(200))), span())));
        let mut stmt = Stmt::new(StmtKind::If { cond: int(1), then_branch, else_branch }, span());
        run(&mut stmt);
        assert!(matches!(stmt.kind, StmtKind::Return(Some(_))));
        let StmtKind::Return(Some(v)) = &stmt.kind else { unreachable!() };
        assert_eq!(v.kind, ExprKind::IntLiteral(100));
    }

    #[test]
    fn test_if_false_without_else_becomes_empty_block() {
        let then_branch = Box::new(Stmt::new(StmtKind::Return(Some(int(100))), span()));
        let mut stmt = Stmt::new(StmtKind::If { cond: int(0), then_branch, else_branch: None }, span());
        run(&mut stmt);
        assert!(matches!(&stmt.kind, StmtKind::Compound(v) if v.is_empty()));
    }

    #[test]
    fn test_while_zero_eliminated() {
        let body = Box::new(Stmt::new(StmtKind::Break, span()));
        let mut stmt = Stmt::new(StmtKind::While { cond: int(0), body }, span());
        run(&mut stmt);
        assert!(matches!(&stmt.kind, StmtKind::Compound(v) if v.is_empty()));
    }

    #[test]
    fn test_for_dead_condition_reduces_to_init() {
        let init = Some(Box::new(Stmt::new(
            StmtKind::VarDecl(VarDecl {
                ty: "int".to_string(),
                name: "i".to_string(),
                init: Some(int(0)),
                array_size: None,
                is_static: false,
                is_const: false,
                is_extern: false,
                is_global: false,
            }),
            span(),
        )));
        let body = Box::new(Stmt::new(StmtKind::Break, span()));
        let mut stmt = Stmt::new(StmtKind::For { init, cond: Some(int(0)), update: None, body }, span());
        run(&mut stmt);
        assert!(matches!(stmt.kind, StmtKind::VarDecl(_)));
    }

    #[test]
    fn test_do_while_zero_is_never_eliminated() {
        let body = Box::new(Stmt::new(StmtKind::Return(Some(int(1))), span()));
        let mut stmt = Stmt::new(StmtKind::DoWhile { body, cond: int(0) }, span());
        run(&mut stmt);
        assert!(matches!(stmt.kind, StmtKind::DoWhile { .. }));
    }
}
