//! Type-name grammar (spec §3).
//!
//! Type names are plain strings rather than a parsed `Type` tree: the
//! grammar is simple enough (a base type, an optional `const` prefix, any
//! number of trailing `*`, and a function-pointer special form) that
//! carrying it as text and inspecting it at the points that need to — the
//! emitter, mainly — keeps the AST matching the spec's own description
//! literally.

/// A type name as produced by the parser: e.g. `"int"`, `"const char *"`,
/// `"struct Point *"`, `"int(*)(int,int)"`.
pub type TypeName = String;

/// Number of leading `*` after stripping an optional `const ` prefix.
pub fn pointer_depth(ty: &TypeName) -> usize {
    base_and_stars(ty).1
}

/// Splits a type name into its base spelling (e.g. `"int"`, `"struct Point"`)
/// and its pointer depth, ignoring a leading `const`.
pub fn base_and_stars(ty: &TypeName) -> (&str, usize) {
    let without_const = ty.strip_prefix("const ").unwrap_or(ty);
    let trimmed = without_const.trim_end();
    let stars = trimmed.chars().rev().take_while(|c| *c == '*').count();
    let base = trimmed[..trimmed.len() - stars].trim_end();
    (base, stars)
}

/// `sizeof` for the base (non-aggregate) scalar types this language emits
/// code for. Pointers are 8 bytes regardless of pointee (spec §8).
pub fn base_size(ty: &TypeName) -> Option<u64> {
    let (base, stars) = base_and_stars(ty);
    if stars > 0 {
        return Some(8);
    }
    Some(match base {
        "char" => 1,
        "int" => 4,
        "float" => 4,
        "double" => 8,
        "void" => 0,
        _ => return None,
    })
}
