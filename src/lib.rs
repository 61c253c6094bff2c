//! `ccc`: a compiler for a small C-like language, targeting textual LLVM IR.
//!
//! Pipeline: [`lexer`] → [`parser`] → [`ast`] → [`optimizer`] → [`emitter`],
//! with [`diagnostics`] threaded through every stage as shared mutable
//! state (spec §5, §7). [`driver`] wires the stages together for the CLI
//! in `main.rs`.

pub mod ast;
pub mod diagnostics;
pub mod driver;
pub mod emitter;
pub mod lexer;
pub mod optimizer;
pub mod parser;
pub mod symbol;
pub mod token;
