//! Variable binding management (spec §4.4 "State"): the lexical symbol
//! table of stack slots. Every slot models either a plain `i32` or an
//! opaque pointer — the only two scalar kinds this back end understands
//! (spec.md §4.4 "Parameters and local variables of integer type are
//! modeled as 32-bit signed"). Adapted from `compiler/src/codegen/binding.rs`'s
//! `VarBinding`, collapsed from the teacher's eleven-variant `Type` enum
//! down to the two kinds this language's emitter actually models.

use inkwell::AddressSpace;
use inkwell::context::Context;
use inkwell::types::BasicTypeEnum;
use inkwell::values::PointerValue;

use super::SlotKind;

/// A variable binding: a stack allocation (or, for globals, the global's
/// own pointer value) plus the slot kind that alloca was built with.
#[derive(Clone, Copy, Debug)]
pub(super) struct VarBinding<'ctx> {
    alloca: PointerValue<'ctx>,
    kind: SlotKind,
}

impl<'ctx> VarBinding<'ctx> {
    pub(super) fn new(alloca: PointerValue<'ctx>, kind: SlotKind) -> Self {
        VarBinding { alloca, kind }
    }

    pub(super) fn alloca(&self) -> PointerValue<'ctx> {
        self.alloca
    }

    pub(super) fn kind(&self) -> SlotKind {
        self.kind
    }
}

/// The LLVM type backing a given slot kind: `i32` for `Int`, an opaque
/// `ptr` for `Pointer`.
pub(super) fn llvm_type_for(context: &Context, kind: SlotKind) -> BasicTypeEnum<'_> {
    match kind {
        SlotKind::Int => context.i32_type().into(),
        SlotKind::Pointer => context.i32_type().ptr_type(AddressSpace::default()).into(),
    }
}
