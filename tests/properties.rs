//! Round-trip and boundary properties (spec.md §8), plus the module-level
//! invariants that don't need a full scenario to exercise.

mod common;

use common::{count_occurrences, expect_ir, expect_ir_at, run_main};
use ccc::optimizer::OptLevel;

#[test]
fn integer_literal_round_trips_as_add_i32_0_k() {
    let source = "int main(){return 42;}";
    let ir = expect_ir_at(source, OptLevel::O0);
    assert!(ir.contains("add i32 0, 42"), "expected literal round-trip idiom in:\n{ir}");
    assert_eq!(run_main(source), 42);
}

#[test]
fn sizeof_int_folds_to_four() {
    let source = "int main(){return sizeof(int);}";
    let ir = expect_ir(source);
    assert!(ir.contains("add i32 0, 4"), "sizeof(int) should fold to 4:\n{ir}");
    assert_eq!(run_main(source), 4);
}

#[test]
fn sizeof_char_folds_to_one() {
    let ir = expect_ir("int main(){return sizeof(char);}");
    assert!(ir.contains("add i32 0, 1"), "sizeof(char) should fold to 1:\n{ir}");
}

#[test]
fn sizeof_pointer_folds_to_eight() {
    let ir = expect_ir("int main(){return sizeof(int*);}");
    assert!(ir.contains("add i32 0, 8"), "sizeof(pointer) should fold to 8:\n{ir}");
}

#[test]
fn constant_folding_is_associative_either_grouping() {
    let left_first_src = "int main(){return (1+2)+3;}";
    let right_first_src = "int main(){return 1+(2+3);}";
    let left_first = expect_ir(left_first_src);
    let right_first = expect_ir(right_first_src);
    assert!(left_first.contains("add i32 0, 6"));
    assert!(right_first.contains("add i32 0, 6"));
    assert_eq!(run_main(left_first_src), 6);
    assert_eq!(run_main(right_first_src), 6);
}

#[test]
fn dead_branch_of_if_zero_leaves_no_code_for_eliminated_side() {
    let source = "int main(){if(0){return 100;}else{return 200;}}";
    let ir = expect_ir_at(source, OptLevel::O2);
    assert!(!ir.contains("100"));
    assert!(ir.contains("200"));
    assert_eq!(run_main(source), 200);
}

#[test]
fn optimization_preserves_observable_return_value_across_levels() {
    let source = "int main(){int x=3;int y=4;return x*y+1;}";
    let o0 = expect_ir_at(source, OptLevel::O0);
    let o1 = expect_ir_at(source, OptLevel::O1);
    let o2 = expect_ir_at(source, OptLevel::O2);
    // At -O0 nothing folds, so the arithmetic survives as instructions;
    // at -O1/-O2 constant propagation plus folding collapse it to the
    // literal 13 (spec.md §8's optimization-preserves-exit-status
    // invariant, observed here as identical folded output at both levels).
    assert!(o0.contains("mul") || o0.contains("add"));
    assert!(o1.contains("add i32 0, 13"));
    assert!(o2.contains("add i32 0, 13"));
    // The optimizer must not just produce matching *text* at every level —
    // it must preserve the actual runtime value too.
    assert_eq!(run_main(source), 13);
}

#[test]
fn every_label_is_defined_exactly_once() {
    let source = "int main(){int r=0;for(int i=0;i<5;i=i+1){if(i==2)continue;if(i==4)break;r=r+i;}return r;}";
    let ir = expect_ir(source);
    for line in ir.lines() {
        let trimmed = line.trim_start();
        if let Some(label) = trimmed.strip_suffix(':') {
            if label.starts_with('L') && label[1..].chars().all(|c| c.is_ascii_digit()) {
                assert_eq!(
                    count_occurrences(&ir, &format!("{label}:")),
                    1,
                    "label {label} must be defined exactly once:\n{ir}"
                );
            }
        }
    }
}

#[test]
fn module_preamble_uses_fixed_target_triple() {
    let ir = expect_ir("int main(){return 0;}");
    assert!(ir.contains("target triple = \"x86_64-unknown-linux-gnu\""));
}
