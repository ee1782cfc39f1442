//! Code emission using [Display]
//!
//! Implements [Display] for the [`AsmAst`](crate::codegen) types,
//! which allows rendering the whole translation unit with
//! [`to_string`] or as a formatting arg in any formatting context
//! (e.g. [`format!`], [`write!`], [`println!`], ..).
//!
//! [Display]: std::fmt::Display
//! [`to_string`]: std::string::ToString::to_string

use crate::codegen::*;

use std::fmt;

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Ax => write!(f, "%rax"),
            Self::Bx => write!(f, "%rbx"),
            Self::Si => write!(f, "%rsi"),
            Self::Di => write!(f, "%rdi"),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Imm(i) => write!(f, "${i}"),
            Self::Reg(r) => write!(f, "{r}"),
            Self::Stack(i) => write!(f, "{i}(%rsp)"),
        }
    }
}

impl fmt::Display for AsmUnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Neg => write!(f, "negq"),
        }
    }
}

impl fmt::Display for AsmBinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Add => write!(f, "addq"),
            Self::Sub => write!(f, "subq"),
        }
    }
}

impl fmt::Display for AsmInstruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Mov(src, dst) => write!(f, "movq {src}, {dst}"),
            Self::Unary(op, operand) => write!(f, "{op} {operand}"),
            Self::Binary(op, src, dst) => write!(f, "{op} {src}, {dst}"),
            Self::Xchg(a, b) => write!(f, "xchgq {a}, {b}"),
            Self::Imul(operand) => write!(f, "imulq {operand}"),
            Self::Cqo => write!(f, "cqto"),
            Self::Idiv(operand) => write!(f, "idivq {operand}"),
            Self::Lea(label, dst) => write!(f, "leaq {label}(%rip), {dst}"),
            Self::Call(symbol) => write!(f, "call {symbol}"),
            Self::Ret => write!(f, "movq %rbp, %rsp\n\tpopq %rbp\n\tret"),
        }
    }
}

impl fmt::Display for AsmFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "\t.globl {}", self.name)?;
        writeln!(f, "\t.text")?;
        writeln!(f, "{}:", self.name)?;
        //Prologue:
        writeln!(f, "\tpushq %rbp")?;
        writeln!(f, "\tmovq %rsp, %rbp")?;
        if self.frame_size != 0 {
            writeln!(f, "\tsubq ${}, %rsp", self.frame_size)?;
        }
        for instruction in &self.body {
            writeln!(f, "\t{instruction}")?;
        }
        Ok(())
    }
}

impl fmt::Display for AsmAst {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.function)?;
        writeln!(f, "\t.section .rodata")?;
        writeln!(f, "{FORMAT_LABEL}:")?;
        writeln!(f, "\t.asciz \"%ld\\n\"")?;
        writeln!(f, ".section .note.GNU-stack,\"\",@progbits")
    }
}

#[cfg(test)]
mod emission_tests {
    use crate::codegen::*;
    use crate::{ir, lexer, parser, semantic_analysis};

    fn emit(source: &str) -> String {
        let tokens = lexer::lex(source).expect("should lex");
        let ast = parser::parse(&tokens).expect("should parse");
        let ast = semantic_analysis::validate(ast).expect("should validate");
        codegen(&ir::emit_ir(&ast)).to_string()
    }

    #[test]
    fn test_translation_unit_shape() {
        let asm = emit("return 1;");
        assert!(asm.contains("\t.globl main"));
        assert!(asm.contains("main:"));
        assert!(asm.contains("\tpushq %rbp"));
        assert!(asm.contains("\tmovq %rsp, %rbp"));
        assert!(asm.contains("\tcall printf"));
        assert!(asm.contains("format:"));
        assert!(asm.contains(".asciz \"%ld\\n\""));
        assert!(asm.contains(".note.GNU-stack"));
    }

    #[test]
    fn test_no_frame_allocation_without_spills() {
        let asm = emit("return 1;");
        assert!(!asm.contains("subq $"));
    }

    #[test]
    fn test_frame_allocation_when_spilling() {
        let asm = emit("return 2 * 3;");
        assert!(asm.contains("\tsubq $16, %rsp"));
    }

    #[test]
    fn test_stack_operands_are_rsp_relative() {
        let asm = emit("let a = 1; let b = 2; return a + b;");
        assert!(asm.contains("(%rsp)"));
    }

    #[test]
    fn test_instruction_rendering() {
        assert_eq!(
            AsmInstruction::Mov(Operand::Imm(-3), Operand::Reg(Register::Ax)).to_string(),
            "movq $-3, %rax"
        );
        assert_eq!(
            AsmInstruction::Binary(
                AsmBinaryOp::Sub,
                Operand::Reg(Register::Ax),
                Operand::Reg(Register::Bx)
            )
            .to_string(),
            "subq %rax, %rbx"
        );
        assert_eq!(
            AsmInstruction::Mov(Operand::Reg(Register::Bx), Operand::Stack(8)).to_string(),
            "movq %rbx, 8(%rsp)"
        );
        assert_eq!(
            AsmInstruction::Lea("format".into(), Operand::Reg(Register::Di)).to_string(),
            "leaq format(%rip), %rdi"
        );
    }
}
