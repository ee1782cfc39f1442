//! Assembly generation from the IR list.
//!
//! Registers are allocated greedily while instructions are selected:
//! two general registers cycled round-robin with spilling to a
//! bump-allocated stack frame, and an accumulator-forcing step for
//! multiply and divide. The output is an asm AST; rendering to text
//! lives in the emission module.

mod allocator;
mod asm_ast;
mod gen;

pub use asm_ast::*;
pub use gen::codegen;
