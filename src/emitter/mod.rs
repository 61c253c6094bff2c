//! The emitter (spec §4.4): walks the optimized AST and writes LLVM
//! textual IR for a single translation unit.
//!
//! Every function is emitted with the literal signature shape
//! `define i32 @<name>(i32 %<p>.param, …)` regardless of its source
//! return type — this language's back end models exactly one scalar
//! return kind, and a trailing `ret i32 0` safety terminator is appended
//! to every function body that does not already end in one (spec.md
//! §4.4 "Function emission"). Parameters and locals are otherwise either
//! `i32` or an opaque pointer (spec.md §4.4's "integer type... modeled
//! as 32-bit signed").
//!
//! Grounded in `compiler/src/codegen/mod.rs` (an `inkwell`-based
//! `Context`/`Module`/`Builder` walker with a variable-scope stack) and
//! `compiler/src/codegen/stmt.rs` (if/while basic-block wiring), adapted
//! from object-file output to textual-IR-only: `target.rs`'s
//! `TargetMachine`/object-file machinery is dropped entirely, the target
//! triple is the fixed string from spec.md §6 rather than the host
//! triple, and `Module::print_to_string()` is the terminal step instead
//! of `write_object_file`. The `%t = add i32 0, <n>` literal idiom and
//! the monotonic temp/label counters (spec.md §9) are implemented as
//! explicit `next_temp`/`next_label` counters that name every
//! instruction and block, rather than relying on LLVM's anonymous
//! numbering.

mod binding;
mod expr;
mod stmt;

use std::collections::HashMap;

use inkwell::AddressSpace;
use inkwell::basic_block::BasicBlock;
use inkwell::builder::Builder;
use inkwell::context::Context;
use inkwell::module::Module;
use inkwell::targets::TargetTriple;
use inkwell::types::BasicMetadataTypeEnum;
use inkwell::values::{FunctionValue, IntValue, PointerValue};

use crate::ast::types::base_and_stars;
use crate::ast::{Function, Item, Program, TypeName, VarDecl};
use crate::diagnostics::{Diagnostic, DiagnosticManager};
use crate::symbol::{Symbol, SymbolTable};
use crate::token::Span;
use binding::{llvm_type_for, VarBinding};

/// Fixed per spec.md §6; this emitter never queries the host triple.
pub const TARGET_TRIPLE: &str = "x86_64-unknown-linux-gnu";

/// The two scalar kinds this back end models (spec.md §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SlotKind {
    Int,
    Pointer,
}

/// A value produced by expression emission: either of the two scalar
/// kinds a `VarBinding` can hold.
#[derive(Debug, Clone, Copy)]
pub(super) enum EmitValue<'ctx> {
    Int(IntValue<'ctx>),
    Ptr(PointerValue<'ctx>),
}

/// Break/continue targets for the innermost enclosing construct. Kept as
/// two independent stacks (not one `LoopControl` pair, unlike the
/// teacher) because `switch` only ever supplies a break target — a
/// `continue` inside a `switch` must still reach the nearest enclosing
/// *loop*.
#[derive(Default)]
struct ControlTargets<'ctx> {
    break_targets: Vec<BasicBlock<'ctx>>,
    continue_targets: Vec<BasicBlock<'ctx>>,
}

pub struct Emitter<'ctx, 'd> {
    context: &'ctx Context,
    module: Module<'ctx>,
    builder: Builder<'ctx>,
    /// Lexically nested scopes. Index 0 holds module-level globals and is
    /// never popped; each function truncates back to it before pushing
    /// its own frames. Kept in lockstep with `symbols`, which is the
    /// actual enforcement point for scoping/duplicate rules (spec.md §3);
    /// this map only carries the LLVM-specific half of a binding
    /// (`symbol::Symbol` has no room for an inkwell `PointerValue`).
    variables: Vec<HashMap<String, VarBinding<'ctx>>>,
    symbols: SymbolTable,
    function_arity: HashMap<String, usize>,
    function_variadic: HashMap<String, bool>,
    control: ControlTargets<'ctx>,
    temp_counter: u64,
    label_counter: u64,
    diagnostics: &'d mut DiagnosticManager,
}

impl<'ctx, 'd> Emitter<'ctx, 'd> {
    pub fn new(
        context: &'ctx Context,
        module_name: &str,
        diagnostics: &'d mut DiagnosticManager,
    ) -> Self {
        let module = context.create_module(module_name);
        module.set_triple(&TargetTriple::create(TARGET_TRIPLE));
        let builder = context.create_builder();
        Emitter {
            context,
            module,
            builder,
            variables: vec![HashMap::new()],
            symbols: SymbolTable::new(),
            function_arity: HashMap::new(),
            function_variadic: HashMap::new(),
            control: ControlTargets::default(),
            temp_counter: 0,
            label_counter: 0,
            diagnostics,
        }
    }

    /// Compiles a whole program to textual LLVM IR, or pushes diagnostics
    /// and returns `None` (spec.md §4.4 "Failure semantics").
    pub fn compile(&mut self, program: &Program) -> Option<String> {
        for item in &program.items {
            if let Item::Function(function) = item {
                self.declare_function(function)?;
            }
        }

        for item in &program.items {
            if let Item::GlobalVar(decl) = item {
                self.declare_global(decl)?;
            }
        }

        for item in &program.items {
            if let Item::Function(function) = item {
                if function.body.is_some() {
                    self.generate_function_body(function)?;
                }
            }
        }

        Some(self.module.print_to_string().to_string())
    }

    fn declare_function(&mut self, function: &Function) -> Option<()> {
        let mut llvm_param_types: Vec<BasicMetadataTypeEnum> = Vec::with_capacity(function.params.len());
        for param in &function.params {
            let kind = self.classify_type(&param.ty, param.span)?;
            llvm_param_types.push(llvm_type_for(self.context, kind).into());
        }
        let fn_type = self.context.i32_type().fn_type(&llvm_param_types, function.variadic);
        let llvm_fn = self.module.add_function(&function.name, fn_type, None);
        for (idx, param) in function.params.iter().enumerate() {
            if let Some(llvm_param) = llvm_fn.get_nth_param(idx as u32) {
                llvm_param.set_name(&format!("{}.param", param.name));
            }
        }
        self.function_arity.insert(function.name.clone(), function.params.len());
        self.function_variadic.insert(function.name.clone(), function.variadic);
        let param_types: Vec<TypeName> = function.params.iter().map(|p| p.ty.clone()).collect();
        let param_names: Vec<String> = function.params.iter().map(|p| p.name.clone()).collect();
        let symbol = Symbol::function(function.name.clone(), function.return_type.clone(), param_types, param_names);
        if self.symbols.insert_global(symbol).is_err() {
            return self.error(format!("`{}` is already declared in this scope", function.name), function.span);
        }
        Some(())
    }

    fn declare_global(&mut self, decl: &VarDecl) -> Option<()> {
        let span = decl.init.as_ref().map(|e| e.span).unwrap_or_else(Span::synthetic);
        match self.classify_type(&decl.ty, span)? {
            SlotKind::Int => {
                let n = match &decl.init {
                    Some(e) => e.kind.int_literal().or_else(|| {
                        self.error("global variable initializer must be a compile-time constant", e.span)
                    })?,
                    None => 0,
                };
                let global = self.module.add_global(self.context.i32_type(), None, &decl.name);
                global.set_initializer(&self.context.i32_type().const_int(n as u64, true));
                self.define_variable_in(0, &decl.name, decl.ty.clone(), VarBinding::new(global.as_pointer_value(), SlotKind::Int), span)?;
            }
            SlotKind::Pointer => {
                if decl.init.is_some() {
                    return self.error("global pointer initializers are not supported by the emitter", span);
                }
                let ptr_ty = self.context.i32_type().ptr_type(AddressSpace::default());
                let global = self.module.add_global(ptr_ty, None, &decl.name);
                global.set_initializer(&ptr_ty.const_null());
                self.define_variable_in(0, &decl.name, decl.ty.clone(), VarBinding::new(global.as_pointer_value(), SlotKind::Pointer), span)?;
            }
        }
        Some(())
    }

    fn generate_function_body(&mut self, function: &Function) -> Option<()> {
        self.variables.truncate(1);
        self.symbols.reset_to_global();
        self.enter_scope();
        self.temp_counter = 0;
        self.label_counter = 0;

        let llvm_fn = self.module.get_function(&function.name)?;
        let entry = self.context.append_basic_block(llvm_fn, "entry");
        self.builder.position_at_end(entry);

        for (idx, param) in function.params.iter().enumerate() {
            let kind = self.classify_type(&param.ty, param.span)?;
            let llvm_param = llvm_fn.get_nth_param(idx as u32)?;
            let alloca = self
                .builder
                .build_alloca(llvm_type_for(self.context, kind), &param.name)
                .ok()?;
            self.builder.build_store(alloca, llvm_param).ok()?;
            self.define_variable(&param.name, param.ty.clone(), VarBinding::new(alloca, kind), param.span)?;
        }

        if let Some(body) = &function.body {
            self.emit_stmt(body)?;
        }

        if !self.current_block_has_terminator() {
            let zero = self.context.i32_type().const_int(0, true);
            self.builder.build_return(Some(&zero)).ok()?;
        }

        Some(())
    }

    /// Classifies a source type name into the scalar kind this back end
    /// models, or reports the spec.md §9-style "unsupported by the
    /// emitter" diagnostic for anything else (floats, aggregates, `void`
    /// as a value type).
    fn classify_type(&mut self, ty: &TypeName, span: Span) -> Option<SlotKind> {
        let (base, stars) = base_and_stars(ty);
        if stars > 0 {
            return Some(SlotKind::Pointer);
        }
        match base {
            "int" | "char" => Some(SlotKind::Int),
            other => self.error(format!("type `{other}` is not supported by the emitter"), span),
        }
    }

    fn next_temp(&mut self) -> String {
        let n = self.temp_counter;
        self.temp_counter += 1;
        format!("t{n}")
    }

    fn next_label(&mut self) -> String {
        let n = self.label_counter;
        self.label_counter += 1;
        format!("L{n}")
    }

    fn current_function(&mut self, span: Span) -> Option<FunctionValue<'ctx>> {
        match self.builder.get_insert_block().and_then(|bb| bb.get_parent()) {
            Some(f) => Some(f),
            None => self.error("no current function at this emission point", span),
        }
    }

    fn current_block_has_terminator(&self) -> bool {
        self.builder
            .get_insert_block()
            .and_then(|bb| bb.get_terminator())
            .is_some()
    }

    fn enter_scope(&mut self) {
        self.variables.push(HashMap::new());
        self.symbols.enter_scope();
    }

    fn exit_scope(&mut self) {
        self.variables.pop();
        self.symbols.exit_scope();
    }

    /// Declares `name` in the current (innermost) scope, enforcing spec
    /// §3's duplicate rule through [`crate::symbol::SymbolTable`] before
    /// ever touching the LLVM-specific `variables` map.
    fn define_variable(&mut self, name: &str, ty: TypeName, binding: VarBinding<'ctx>, span: Span) -> Option<()> {
        if self.symbols.insert(Symbol::variable(name, ty)).is_err() {
            return self.error(format!("`{name}` is already declared in this scope"), span);
        }
        self.variables.last_mut()?.insert(name.to_string(), binding);
        Some(())
    }

    /// Declares `name` in a specific scope depth rather than the current
    /// one — used for globals, which are always recorded in scope 0 even
    /// when `declare_global` runs before any function scope is pushed.
    fn define_variable_in(&mut self, depth: usize, name: &str, ty: TypeName, binding: VarBinding<'ctx>, span: Span) -> Option<()> {
        if depth == 0 && self.symbols.insert_global(Symbol::variable(name, ty)).is_err() {
            return self.error(format!("`{name}` is already declared in this scope"), span);
        }
        self.variables.get_mut(depth)?.insert(name.to_string(), binding);
        Some(())
    }

    fn lookup_variable(&self, name: &str) -> Option<&VarBinding<'ctx>> {
        self.variables.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Pushes an error diagnostic and returns `None`, for use with `?` at
    /// every emission call site (spec.md §4.4 "any ... inconsistency is
    /// fatal").
    fn error<T>(&mut self, message: impl Into<String>, span: Span) -> Option<T> {
        self.diagnostics.push(Diagnostic::error(message.into(), Some(span)));
        None
    }
}
