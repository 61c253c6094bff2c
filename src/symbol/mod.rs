//! The symbol table (spec §3 "Symbol" / "Symbol table"): a lexically
//! nested scope chain shared by the parser (which records declared names
//! as it goes) and the emitter (which uses the same shape to resolve
//! names to storage).
//!
//! Grounded in the shape of `compiler/src/semantic/symbol.rs`'s
//! `FunctionInfo`/`VariableInfo`/`Scope`/`SymbolTable` — a flat function
//! namespace plus a `Vec<Scope>` stack searched innermost-first — widened
//! from the teacher's two info structs into the single `Symbol` variant
//! spec §3 describes, since this language's symbol kinds (variable,
//! function, struct, typedef, enum constant) share one scope chain rather
//! than a function table and a variable table.

use std::collections::HashMap;

use crate::ast::TypeName;

/// What a [`Symbol`] names (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
    Struct,
    Typedef,
    EnumConstant,
}

/// One declared name and the facts recorded about it at declaration time
/// (spec §3). Fields unused by a given kind are left at their defaults —
/// e.g. `param_types`/`param_names` are only meaningful for `Function`,
/// `members` only for `Struct`.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub data_type: TypeName,
    pub stack_offset: Option<i64>,
    pub is_param: bool,
    pub is_array: bool,
    pub array_len: Option<u64>,
    pub is_const: bool,
    pub param_types: Vec<TypeName>,
    pub param_names: Vec<String>,
    pub members: Vec<(String, TypeName)>,
}

impl Symbol {
    pub fn variable(name: impl Into<String>, data_type: TypeName) -> Self {
        Symbol {
            name: name.into(),
            kind: SymbolKind::Variable,
            data_type,
            stack_offset: None,
            is_param: false,
            is_array: false,
            array_len: None,
            is_const: false,
            param_types: Vec::new(),
            param_names: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn param(name: impl Into<String>, data_type: TypeName) -> Self {
        Symbol { is_param: true, ..Symbol::variable(name, data_type) }
    }

    pub fn array(name: impl Into<String>, data_type: TypeName, len: Option<u64>) -> Self {
        Symbol { is_array: true, array_len: len, ..Symbol::variable(name, data_type) }
    }

    pub fn function(
        name: impl Into<String>,
        return_type: TypeName,
        param_types: Vec<TypeName>,
        param_names: Vec<String>,
    ) -> Self {
        Symbol {
            name: name.into(),
            kind: SymbolKind::Function,
            data_type: return_type,
            stack_offset: None,
            is_param: false,
            is_array: false,
            array_len: None,
            is_const: false,
            param_types,
            param_names,
            members: Vec::new(),
        }
    }

    pub fn struct_decl(name: impl Into<String>, members: Vec<(String, TypeName)>) -> Self {
        Symbol {
            name: name.into(),
            kind: SymbolKind::Struct,
            data_type: String::new(),
            stack_offset: None,
            is_param: false,
            is_array: false,
            array_len: None,
            is_const: false,
            param_types: Vec::new(),
            param_names: Vec::new(),
            members,
        }
    }

    pub fn typedef(name: impl Into<String>, target: TypeName) -> Self {
        Symbol { kind: SymbolKind::Typedef, ..Symbol::variable(name, target) }
    }

    pub fn enum_constant(name: impl Into<String>) -> Self {
        Symbol { kind: SymbolKind::EnumConstant, is_const: true, ..Symbol::variable(name, "int".to_string()) }
    }
}

/// One lexical scope: an ordered set of symbols declared directly in it
/// (spec §3 "an ordered list of symbols plus a link to the enclosing
/// scope" — the link is the position of this `Scope` in
/// [`SymbolTable::scopes`], so no explicit parent pointer is stored).
#[derive(Debug, Default)]
struct Scope {
    symbols: HashMap<String, Symbol>,
}

/// Returned by [`SymbolTable::insert`] when a name already exists in the
/// current scope (spec §3 "Insertion into the current scope fails if a
/// symbol of the same name already exists in that scope").
#[derive(Debug, Clone)]
pub struct DuplicateSymbol {
    pub name: String,
}

/// A lexically nested scope chain (spec §3). Scope 0 is the global scope
/// and is never popped; `enter_scope`/`exit_scope` push and pop everything
/// above it. Lookup walks outward from the innermost scope; shadowing an
/// outer symbol is permitted, matching the teacher's
/// innermost-to-outermost `lookup_variable` search.
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable { scopes: vec![Scope::default()] }
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    pub fn exit_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Truncates back to just the global scope, discarding every scope
    /// pushed for a previous function (the emitter calls this between
    /// function bodies rather than unwinding one `exit_scope` at a time).
    pub fn reset_to_global(&mut self) {
        self.scopes.truncate(1);
    }

    /// Inserts into the *current* (innermost) scope. Fails without
    /// mutating the table if a symbol of that name already exists there.
    pub fn insert(&mut self, symbol: Symbol) -> Result<(), DuplicateSymbol> {
        let scope = self.scopes.last_mut().expect("global scope is never popped");
        if scope.symbols.contains_key(&symbol.name) {
            return Err(DuplicateSymbol { name: symbol.name });
        }
        scope.symbols.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Inserts into the global scope specifically, regardless of how many
    /// scopes are currently pushed (used for top-level declarations, which
    /// the parser/emitter record before — or, for forward-referenced
    /// functions, without ever — entering a function scope).
    pub fn insert_global(&mut self, symbol: Symbol) -> Result<(), DuplicateSymbol> {
        let scope = self.scopes.first_mut().expect("global scope always exists");
        if scope.symbols.contains_key(&symbol.name) {
            return Err(DuplicateSymbol { name: symbol.name });
        }
        scope.symbols.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Walks from the innermost scope outward to the global scope.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.symbols.get(name))
    }

    /// Looks up only in the current (innermost) scope — "local lookup does
    /// not [walk up]" (spec §3).
    pub fn lookup_in_current_scope(&self, name: &str) -> Option<&Symbol> {
        self.scopes.last().and_then(|scope| scope.symbols.get(name))
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
