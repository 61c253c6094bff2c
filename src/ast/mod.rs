//! Abstract Syntax Tree definitions (spec §3).
//!
//! The tree is a closed set of tagged unions: every node carries a source
//! [`crate::token::Span`], children are exclusively owned (`Box`/`Vec`, no
//! shared references), and the optimizer/emitter both depend on matching
//! every variant exhaustively.
//!
//! # Module structure
//!
//! - [`types`] - the type-name string grammar
//! - [`expr`] - expression nodes
//! - [`stmt`] - statement nodes
//! - [`program`] - top-level items and the program root

mod expr;
mod program;
mod stmt;
pub mod types;

pub use expr::{Expr, ExprKind, SizeofArg};
pub use program::{EnumDecl, Enumerator, Function, Item, Param, Program, StructDecl, StructMember, Typedef};
pub use stmt::{Stmt, StmtKind, SwitchArm, VarDecl};
pub use types::{base_and_stars, base_size, pointer_depth, TypeName};
