//! Common test utilities for ccc integration tests.
//!
//! This module provides shared helper functions used across all
//! integration test files.

// Each test file is compiled as a separate crate, so not all functions
// are used in every test file. This is expected behavior.
#![allow(dead_code)]

use ccc::diagnostics::DiagnosticManager;
use ccc::optimizer::OptLevel;
use inkwell::context::Context;
use inkwell::memory_buffer::MemoryBuffer;
use inkwell::targets::{InitializationConfig, Target};
use inkwell::OptimizationLevel;

/// Compiles `source` at the given optimization level and returns the
/// textual LLVM IR, or the accumulated diagnostic messages if any stage
/// failed.
pub fn compile_ir_at(source: &str, opt: OptLevel) -> Result<String, Vec<String>> {
    let mut diagnostics = DiagnosticManager::new("test.c", source);
    let ir = ccc::driver::compile(source, "test", opt, &mut diagnostics);
    match ir {
        Some(ir) if !diagnostics.has_errors() => Ok(ir),
        _ => Err(diagnostics.diagnostics().iter().map(|d| d.message.clone()).collect()),
    }
}

/// Compiles `source` at `-O1`, the default level (spec §6).
pub fn compile_ir(source: &str) -> Result<String, Vec<String>> {
    compile_ir_at(source, OptLevel::O1)
}

/// Asserts that `source` compiles successfully at `-O1` and returns its IR.
pub fn expect_ir(source: &str) -> String {
    compile_ir(source).unwrap_or_else(|errs| panic!("expected successful compile, got: {errs:?}"))
}

/// Asserts that `source` compiles successfully at the given level.
pub fn expect_ir_at(source: &str, opt: OptLevel) -> String {
    compile_ir_at(source, opt).unwrap_or_else(|errs| panic!("expected successful compile, got: {errs:?}"))
}

/// Asserts that `source` fails to compile (diagnostics report at least one
/// error) at `-O1`, and returns the diagnostic messages.
pub fn expect_error(source: &str) -> Vec<String> {
    match compile_ir(source) {
        Ok(_) => panic!("expected compilation to fail for: {source}"),
        Err(messages) => messages,
    }
}

/// Compiles a zero-argument `int main()` program and JIT-executes it,
/// returning the value it actually returns — not just the IR text. Mirrors
/// the teacher's `compile_and_run` in spirit (`compiler/tests/common/mod.rs`):
/// that helper links and runs a native executable, but `ccc` never drives a
/// linker (spec.md §6), so this parses the emitted IR straight back into an
/// `inkwell` module and runs it through a JIT `ExecutionEngine` instead.
pub fn run_main(source: &str) -> i32 {
    let ir = expect_ir(source);
    Target::initialize_native(&InitializationConfig::default())
        .expect("failed to initialize native target for JIT execution");

    let context = Context::create();
    let buffer = MemoryBuffer::create_from_memory_range_copy(ir.as_bytes(), "test");
    let module = context
        .create_module_from_ir(buffer)
        .unwrap_or_else(|e| panic!("emitted IR failed to parse back in:\n{ir}\nerror: {e}"));
    let engine = module
        .create_jit_execution_engine(OptimizationLevel::None)
        .expect("failed to create JIT execution engine");
    unsafe {
        let main_fn = engine
            .get_function::<unsafe extern "C" fn() -> i32>("main")
            .expect("emitted module has no callable `main`");
        main_fn.call()
    }
}

/// Counts non-overlapping occurrences of `needle` in `haystack`.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}
