//! Pipeline orchestration (spec §5): lex → parse → optimize → emit,
//! threading one [`DiagnosticManager`] through every stage and stopping at
//! the first stage that fails.
//!
//! Grounded in the teacher's `driver::compile_to_executable` (the same
//! "thread one context struct through sequential phases, map each phase's
//! error into a common enum" shape), collapsed here since this language
//! has no module resolution, no semantic pass, and no linking: the
//! optimizer runs directly on the parser's AST and the emitter's textual
//! IR is the final artifact (spec §6 "Compiles to an object file or
//! prints LLVM IR").

use inkwell::context::Context;

use crate::diagnostics::DiagnosticManager;
use crate::emitter::Emitter;
use crate::optimizer::{self, OptLevel, OptimizerConfig};
use crate::parser::Parser;

/// Runs the full pipeline over `source` and returns the textual LLVM IR,
/// or `None` if any stage reported an error. Diagnostics accumulate in
/// `diagnostics` regardless of outcome; the caller is responsible for
/// printing them (spec §7: the driver reports once, at the end).
pub fn compile(source: &str, module_name: &str, opt_level: OptLevel, diagnostics: &mut DiagnosticManager) -> Option<String> {
    let mut parser = Parser::new(source);
    let program = parser.parse();
    diagnostics.extend(parser.take_diagnostics());
    let mut program = program?;

    if diagnostics.has_errors() {
        return None;
    }

    let config = OptimizerConfig::for_level(opt_level);
    optimizer::optimize(&mut program, &config);

    let context = Context::create();
    let mut emitter = Emitter::new(&context, module_name, diagnostics);
    let ir = emitter.compile(&program);

    if diagnostics.has_errors() { None } else { ir }
}
