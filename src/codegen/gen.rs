use super::allocator::{Allocator, ACCUMULATOR};
use super::asm_ast::*;
use crate::ir::{IrBinaryOp, IrInstruction, IrInstructions, IrUnaryOp, Name};

pub fn codegen(ir: &IrInstructions) -> AsmAst {
    let mut gen = CodeGen::new();
    for instruction in ir {
        gen.compile_instruction(instruction);
    }
    gen.finish()
}

/// Per-run generation state: the growing instruction list and the
/// register/stack allocator. Each compilation owns a fresh instance.
struct CodeGen {
    instructions: AsmInstructions,
    allocator: Allocator,
}

impl CodeGen {
    fn new() -> Self {
        Self {
            instructions: AsmInstructions::new(),
            allocator: Allocator::new(),
        }
    }

    fn finish(self) -> AsmAst {
        AsmAst {
            function: AsmFunction {
                name: ENTRY_SYMBOL.to_owned(),
                frame_size: self.allocator.frame_size(),
                body: self.instructions,
            },
        }
    }

    fn compile_instruction(&mut self, instruction: &IrInstruction) {
        match instruction {
            IrInstruction::LoadConstant(dest, value) => self.compile_load_constant(dest, *value),
            IrInstruction::LoadVariable(dest, src) => self.compile_load_variable(dest, src),
            IrInstruction::Unary(op, name) => self.compile_unary(*op, name),
            IrInstruction::Binary(dest, op, lhs, rhs) => self.compile_binary(dest, *op, lhs, rhs),
            IrInstruction::Return(name) => self.compile_return(name),
        }
    }

    fn compile_load_constant(&mut self, dest: &Name, value: i64) {
        let reg = self.allocator.acquire(None, &mut self.instructions);
        self.instructions
            .push(AsmInstruction::Mov(Operand::Imm(value), Operand::Reg(reg)));
        self.allocator.bind(dest, reg);
    }

    fn compile_load_variable(&mut self, dest: &Name, src: &Name) {
        // Acquiring first may evict the source itself; the stack
        // fallback below then reads the freshly spilled copy.
        let reg = self.allocator.acquire(None, &mut self.instructions);
        let src_operand = match self.allocator.reg_of(src) {
            Some(src_reg) => Operand::Reg(src_reg),
            None => {
                let slot = self
                    .allocator
                    .stack_of(src)
                    .unwrap_or_else(|| panic!("internal error: \"{src}\" read before definition"));
                Operand::Stack(slot)
            }
        };
        self.instructions
            .push(AsmInstruction::Mov(src_operand, Operand::Reg(reg)));
        self.allocator.bind(dest, reg);
    }

    fn compile_unary(&mut self, op: IrUnaryOp, name: &Name) {
        let reg = self.allocator.load_backup(name, &mut self.instructions);
        self.instructions
            .push(AsmInstruction::Unary(AsmUnaryOp::from(op), Operand::Reg(reg)));
    }

    fn compile_binary(&mut self, dest: &Name, op: IrBinaryOp, lhs: &Name, rhs: &Name) {
        let lhs_reg = self.allocator.load_backup(lhs, &mut self.instructions);
        let rhs_reg = self
            .allocator
            .load(rhs, Some(lhs_reg), &mut self.instructions);
        let result = match op {
            IrBinaryOp::Add => self.compile_accumulate(AsmBinaryOp::Add, lhs_reg, rhs_reg),
            IrBinaryOp::Substract => self.compile_accumulate(AsmBinaryOp::Sub, lhs_reg, rhs_reg),
            IrBinaryOp::Multiply => self.compile_mul(lhs, rhs),
            IrBinaryOp::Divide => self.compile_div(lhs, rhs),
        };
        self.allocator.bind(dest, result);
    }

    /// `+` and `-` accumulate in place into the left operand's
    /// register; the result stays there.
    fn compile_accumulate(
        &mut self,
        op: AsmBinaryOp,
        lhs_reg: Register,
        rhs_reg: Register,
    ) -> Register {
        self.instructions.push(AsmInstruction::Binary(
            op,
            Operand::Reg(rhs_reg),
            Operand::Reg(lhs_reg),
        ));
        lhs_reg
    }

    /// Hardware constraint: the multiplicand must sit in the
    /// accumulator. The right operand's register is re-read after the
    /// forcing step since an exchange may have moved it.
    fn compile_mul(&mut self, lhs: &Name, rhs: &Name) -> Register {
        self.allocator
            .force_into(lhs, ACCUMULATOR, &mut self.instructions);
        let rhs_reg = self.allocator.reg_of(rhs).expect("operand stays resident");
        self.instructions
            .push(AsmInstruction::Imul(Operand::Reg(rhs_reg)));
        ACCUMULATOR
    }

    fn compile_div(&mut self, lhs: &Name, rhs: &Name) -> Register {
        self.allocator
            .force_into(lhs, ACCUMULATOR, &mut self.instructions);
        let rhs_reg = self.allocator.reg_of(rhs).expect("operand stays resident");
        self.instructions.push(AsmInstruction::Cqo);
        self.instructions
            .push(AsmInstruction::Idiv(Operand::Reg(rhs_reg)));
        ACCUMULATOR
    }

    fn compile_return(&mut self, name: &Name) {
        let reg = self.allocator.load(name, None, &mut self.instructions);
        self.instructions.push(AsmInstruction::Mov(
            Operand::Reg(reg),
            Operand::Reg(Register::Si),
        ));
        self.instructions.push(AsmInstruction::Lea(
            FORMAT_LABEL.to_owned(),
            Operand::Reg(Register::Di),
        ));
        self.instructions
            .push(AsmInstruction::Call(PRINT_SYMBOL.to_owned()));
        // Exit status, not the printed value.
        self.instructions.push(AsmInstruction::Mov(
            Operand::Imm(0),
            Operand::Reg(Register::Ax),
        ));
        self.instructions.push(AsmInstruction::Ret);
    }
}
