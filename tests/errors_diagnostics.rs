//! Error-path integration tests: each case exercises one diagnostic-fatal
//! condition named in spec.md §7 or the emitter's own invariants, and
//! checks the pipeline stops instead of producing IR.

mod common;

use common::expect_error;

#[test]
fn undeclared_identifier_is_an_error() {
    expect_error("int main(){return undeclared_var;}");
}

#[test]
fn break_outside_any_loop_or_switch_is_an_error() {
    expect_error("int main(){break; return 0;}");
}

#[test]
fn continue_outside_any_loop_is_an_error() {
    expect_error("int main(){continue; return 0;}");
}

#[test]
fn redeclaring_a_variable_in_the_same_scope_is_an_error() {
    expect_error("int main(){int x=1;int x=2;return x;}");
}

#[test]
fn redeclaring_a_global_variable_is_an_error() {
    expect_error("int g=1; int g=2; int main(){return g;}");
}

#[test]
fn calling_a_function_with_the_wrong_arity_is_an_error() {
    let source = "int add(int a,int b){return a+b;} int main(){return add(1);}";
    expect_error(source);
}

#[test]
fn unsupported_parameter_type_is_an_error_not_a_panic() {
    // Every function is emitted as `i32 @name(...)` regardless of its
    // source return type (spec.md §4.4), so only parameter and local
    // types are actually classified; floating-point isn't one of the two
    // scalar kinds this back end models, and must be diagnosed there.
    expect_error("int main(float x){return 0;}");
}

#[test]
fn modulo_is_diagnosed_as_unsupported_by_the_emitter() {
    // Non-literal operands so constant folding can't fold this away
    // before the emitter ever sees the operator (spec.md §9's decision:
    // unsupported binary operators are a diagnosed emitter error rather
    // than a silent miscompile).
    expect_error("int main(int a, int b){return a % b;}");
}

#[test]
fn syntax_error_stops_before_optimization_or_emission() {
    expect_error("int main( { return 0; }");
}

#[test]
fn a_parser_diagnostic_carries_through_from_the_lexer() {
    // The lexer's own diagnostics reach the driver through the parser's
    // `advance()` merge (parser/helpers.rs), without a separate lex pass.
    expect_error("int main(){return 1 @ 2;}");
}
