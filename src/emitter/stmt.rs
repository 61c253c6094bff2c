//! Statement emission (spec §4.4 "Statement emission"). Basic-block
//! wiring is adapted from `compiler/src/codegen/stmt.rs`'s `generate_if`
//! (then/else/merge blocks, terminator-aware merge insertion), generalized
//! to `while`/`do`-`while`/`for`/`switch`, none of which the teacher's
//! Lak language has.

use inkwell::IntPredicate;

use crate::ast::{Stmt, StmtKind, SwitchArm};

use super::binding::{llvm_type_for, VarBinding};
use super::{EmitValue, Emitter, SlotKind};

impl<'ctx, 'd> Emitter<'ctx, 'd> {
    pub(super) fn emit_stmt(&mut self, stmt: &Stmt) -> Option<()> {
        match &stmt.kind {
            StmtKind::Compound(stmts) => self.emit_compound(stmts),
            StmtKind::If { cond, then_branch, else_branch } => self.emit_if(cond, then_branch, else_branch.as_deref(), stmt.span),
            StmtKind::While { cond, body } => self.emit_while(cond, body, stmt.span),
            StmtKind::DoWhile { body, cond } => self.emit_do_while(body, cond, stmt.span),
            StmtKind::For { init, cond, update, body } => self.emit_for(init.as_deref(), cond.as_ref(), update.as_ref(), body, stmt.span),
            StmtKind::Switch { expr, arms } => self.emit_switch(expr, arms, stmt.span),
            StmtKind::Break => self.emit_break(stmt.span),
            StmtKind::Continue => self.emit_continue(stmt.span),
            StmtKind::Return(value) => self.emit_return(value.as_ref(), stmt.span),
            StmtKind::ExprStmt(expr) => self.emit_expr(expr).map(|_| ()),
            StmtKind::VarDecl(decl) => self.emit_var_decl(decl, stmt.span),
        }
    }

    fn emit_compound(&mut self, stmts: &[Stmt]) -> Option<()> {
        self.enter_scope();
        for s in stmts {
            self.emit_stmt(s)?;
            if self.current_block_has_terminator() {
                break;
            }
        }
        self.exit_scope();
        Some(())
    }

    fn emit_if(&mut self, cond: &crate::ast::Expr, then_branch: &Stmt, else_branch: Option<&Stmt>, span: crate::token::Span) -> Option<()> {
        let function = self.current_function(span)?;
        let cond_value = self.emit_int(cond)?;
        let zero = self.context.i32_type().const_int(0, true);
        let cmp_name = self.next_temp();
        let cond_bool = self.builder.build_int_compare(IntPredicate::NE, cond_value, zero, &cmp_name).ok()?;

        let then_label = self.next_label();
        let merge_label = self.next_label();
        let then_block = self.context.append_basic_block(function, &then_label);
        let merge_block = self.context.append_basic_block(function, &merge_label);

        if let Some(else_branch) = else_branch {
            let else_label = self.next_label();
            let else_block = self.context.append_basic_block(function, &else_label);
            self.builder.build_conditional_branch(cond_bool, then_block, else_block).ok()?;

            self.builder.position_at_end(then_block);
            self.emit_stmt(then_branch)?;
            if !self.current_block_has_terminator() {
                self.builder.build_unconditional_branch(merge_block).ok()?;
            }

            self.builder.position_at_end(else_block);
            self.emit_stmt(else_branch)?;
            if !self.current_block_has_terminator() {
                self.builder.build_unconditional_branch(merge_block).ok()?;
            }
        } else {
            self.builder.build_conditional_branch(cond_bool, then_block, merge_block).ok()?;

            self.builder.position_at_end(then_block);
            self.emit_stmt(then_branch)?;
            if !self.current_block_has_terminator() {
                self.builder.build_unconditional_branch(merge_block).ok()?;
            }
        }

        self.builder.position_at_end(merge_block);
        Some(())
    }

    fn emit_while(&mut self, cond: &crate::ast::Expr, body: &Stmt, span: crate::token::Span) -> Option<()> {
        let function = self.current_function(span)?;
        let cond_label = self.next_label();
        let body_label = self.next_label();
        let end_label = self.next_label();
        let cond_block = self.context.append_basic_block(function, &cond_label);
        let body_block = self.context.append_basic_block(function, &body_label);
        let end_block = self.context.append_basic_block(function, &end_label);

        self.builder.build_unconditional_branch(cond_block).ok()?;

        self.builder.position_at_end(cond_block);
        let cond_value = self.emit_int(cond)?;
        let zero = self.context.i32_type().const_int(0, true);
        let cmp_name = self.next_temp();
        let cond_bool = self.builder.build_int_compare(IntPredicate::NE, cond_value, zero, &cmp_name).ok()?;
        self.builder.build_conditional_branch(cond_bool, body_block, end_block).ok()?;

        self.control.break_targets.push(end_block);
        self.control.continue_targets.push(cond_block);
        self.builder.position_at_end(body_block);
        self.emit_stmt(body)?;
        if !self.current_block_has_terminator() {
            self.builder.build_unconditional_branch(cond_block).ok()?;
        }
        self.control.break_targets.pop();
        self.control.continue_targets.pop();

        self.builder.position_at_end(end_block);
        Some(())
    }

    fn emit_do_while(&mut self, body: &Stmt, cond: &crate::ast::Expr, span: crate::token::Span) -> Option<()> {
        let function = self.current_function(span)?;
        let body_label = self.next_label();
        let cond_label = self.next_label();
        let end_label = self.next_label();
        let body_block = self.context.append_basic_block(function, &body_label);
        let cond_block = self.context.append_basic_block(function, &cond_label);
        let end_block = self.context.append_basic_block(function, &end_label);

        self.builder.build_unconditional_branch(body_block).ok()?;

        self.control.break_targets.push(end_block);
        self.control.continue_targets.push(cond_block);
        self.builder.position_at_end(body_block);
        self.emit_stmt(body)?;
        if !self.current_block_has_terminator() {
            self.builder.build_unconditional_branch(cond_block).ok()?;
        }
        self.control.break_targets.pop();
        self.control.continue_targets.pop();

        self.builder.position_at_end(cond_block);
        let cond_value = self.emit_int(cond)?;
        let zero = self.context.i32_type().const_int(0, true);
        let cmp_name = self.next_temp();
        let cond_bool = self.builder.build_int_compare(IntPredicate::NE, cond_value, zero, &cmp_name).ok()?;
        self.builder.build_conditional_branch(cond_bool, body_block, end_block).ok()?;

        self.builder.position_at_end(end_block);
        Some(())
    }

    fn emit_for(
        &mut self,
        init: Option<&Stmt>,
        cond: Option<&crate::ast::Expr>,
        update: Option<&crate::ast::Expr>,
        body: &Stmt,
        span: crate::token::Span,
    ) -> Option<()> {
        let function = self.current_function(span)?;
        self.enter_scope();
        if let Some(init) = init {
            self.emit_stmt(init)?;
        }

        let cond_label = self.next_label();
        let body_label = self.next_label();
        let update_label = self.next_label();
        let end_label = self.next_label();
        let cond_block = self.context.append_basic_block(function, &cond_label);
        let body_block = self.context.append_basic_block(function, &body_label);
        let update_block = self.context.append_basic_block(function, &update_label);
        let end_block = self.context.append_basic_block(function, &end_label);

        self.builder.build_unconditional_branch(cond_block).ok()?;

        self.builder.position_at_end(cond_block);
        match cond {
            Some(cond) => {
                let cond_value = self.emit_int(cond)?;
                let zero = self.context.i32_type().const_int(0, true);
                let cmp_name = self.next_temp();
                let cond_bool = self.builder.build_int_compare(IntPredicate::NE, cond_value, zero, &cmp_name).ok()?;
                self.builder.build_conditional_branch(cond_bool, body_block, end_block).ok()?;
            }
            None => {
                self.builder.build_unconditional_branch(body_block).ok()?;
            }
        }

        self.control.break_targets.push(end_block);
        self.control.continue_targets.push(update_block);
        self.builder.position_at_end(body_block);
        self.emit_stmt(body)?;
        if !self.current_block_has_terminator() {
            self.builder.build_unconditional_branch(update_block).ok()?;
        }
        self.control.break_targets.pop();
        self.control.continue_targets.pop();

        self.builder.position_at_end(update_block);
        if let Some(update) = update {
            self.emit_expr(update)?;
        }
        self.builder.build_unconditional_branch(cond_block).ok()?;

        self.builder.position_at_end(end_block);
        self.exit_scope();
        Some(())
    }

    /// `switch` via inkwell's native `build_switch`: arms are emitted in
    /// source order into their own blocks, and any arm whose block falls
    /// off the end without a terminator gets an explicit branch to the
    /// next arm's block (or `end` for the last one) — spec §4.2/§4.3's "no
    /// implicit break" fallthrough semantics. Only `break_targets` is
    /// pushed: `continue` inside a `switch` must still reach the nearest
    /// enclosing *loop*, which `continue_targets` already holds.
    fn emit_switch(&mut self, expr: &crate::ast::Expr, arms: &[SwitchArm], span: crate::token::Span) -> Option<()> {
        let function = self.current_function(span)?;
        let switch_value = self.emit_int(expr)?;

        let end_label = self.next_label();
        let end_block = self.context.append_basic_block(function, &end_label);

        let mut arm_blocks = Vec::with_capacity(arms.len());
        let mut default_block = None;
        for arm in arms {
            let label = self.next_label();
            let block = self.context.append_basic_block(function, &label);
            match arm {
                SwitchArm::Case { value, .. } => {
                    let Some(n) = value.kind.int_literal() else {
                        return self.error("`case` value must be an integer-literal constant", span);
                    };
                    arm_blocks.push((Some(n), block));
                }
                SwitchArm::Default { .. } => {
                    default_block = Some(block);
                    arm_blocks.push((None, block));
                }
            }
        }

        let cases: Vec<_> = arm_blocks
            .iter()
            .filter_map(|(n, block)| n.map(|n| (self.context.i32_type().const_int(n as u64, true), *block)))
            .collect();
        self.builder
            .build_switch(switch_value, default_block.unwrap_or(end_block), &cases)
            .ok()?;

        self.control.break_targets.push(end_block);
        for (idx, arm) in arms.iter().enumerate() {
            let (body, block) = match arm {
                SwitchArm::Case { body, .. } => (body, arm_blocks[idx].1),
                SwitchArm::Default { body } => (body, arm_blocks[idx].1),
            };
            self.builder.position_at_end(block);
            for s in body {
                self.emit_stmt(s)?;
                if self.current_block_has_terminator() {
                    break;
                }
            }
            if !self.current_block_has_terminator() {
                let fallthrough = arm_blocks.get(idx + 1).map(|(_, b)| *b).unwrap_or(end_block);
                self.builder.build_unconditional_branch(fallthrough).ok()?;
            }
        }
        self.control.break_targets.pop();

        self.builder.position_at_end(end_block);
        Some(())
    }

    fn emit_break(&mut self, span: crate::token::Span) -> Option<()> {
        let Some(target) = self.control.break_targets.last().copied() else {
            return self.error("`break` outside of a loop or switch", span);
        };
        self.builder.build_unconditional_branch(target).ok()?;
        Some(())
    }

    fn emit_continue(&mut self, span: crate::token::Span) -> Option<()> {
        let Some(target) = self.control.continue_targets.last().copied() else {
            return self.error("`continue` outside of a loop", span);
        };
        self.builder.build_unconditional_branch(target).ok()?;
        Some(())
    }

    fn emit_return(&mut self, value: Option<&crate::ast::Expr>, span: crate::token::Span) -> Option<()> {
        match value {
            Some(value) => {
                let v = self.emit_int(value)?;
                self.builder.build_return(Some(&v)).ok()?;
            }
            None => {
                let _ = span;
                let zero = self.context.i32_type().const_int(0, true);
                self.builder.build_return(Some(&zero)).ok()?;
            }
        }
        Some(())
    }

    fn emit_var_decl(&mut self, decl: &crate::ast::VarDecl, span: crate::token::Span) -> Option<()> {
        if decl.array_size.is_some() {
            return self.error("array declarations are not supported by the emitter", span);
        }
        let kind = self.classify_type(&decl.ty, span)?;

        let alloca = self.builder.build_alloca(llvm_type_for(self.context, kind), &decl.name).ok()?;
        if let Some(init) = &decl.init {
            let value = self.emit_expr(init)?;
            match (kind, value) {
                (SlotKind::Int, EmitValue::Int(v)) => {
                    self.builder.build_store(alloca, v).ok()?;
                }
                (SlotKind::Pointer, EmitValue::Ptr(v)) => {
                    self.builder.build_store(alloca, v).ok()?;
                }
                _ => return self.error(format!("initializer type mismatch for `{}`", decl.name), span),
            }
        }
        self.define_variable(&decl.name, decl.ty.clone(), VarBinding::new(alloca, kind), span)
    }
}
