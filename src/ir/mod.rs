//! Lowering of the syntax tree into three-address IR.
//!
//! Instructions operate on names: user variables or generated `%N`
//! temporaries (the percent sign cannot start a user identifier, so
//! uniqueness is free). Numbering restarts at zero for every run.


use crate::ast::*;

pub type Name = String;
pub type IrInstructions = Vec<IrInstruction>;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IrInstruction {
    LoadConstant(Name, i64),
    /// Copies one named slot into another. Used both to materialize a
    /// variable into a temporary and to bind a temporary back into a
    /// user variable.
    LoadVariable(Name, Name),
    /// In-place operation on the named slot.
    Unary(IrUnaryOp, Name),
    Binary(Name, IrBinaryOp, Name, Name),
    Return(Name),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IrUnaryOp {
    Negate,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IrBinaryOp {
    Add,
    Substract,
    Multiply,
    Divide,
}

impl From<AstUnaryOp> for IrUnaryOp {
    fn from(value: AstUnaryOp) -> Self {
        match value {
            AstUnaryOp::Negate => IrUnaryOp::Negate,
        }
    }
}

impl From<AstBinaryOp> for IrBinaryOp {
    fn from(value: AstBinaryOp) -> Self {
        match value {
            AstBinaryOp::Add => Self::Add,
            AstBinaryOp::Substract => Self::Substract,
            AstBinaryOp::Multiply => Self::Multiply,
            AstBinaryOp::Divide => Self::Divide,
        }
    }
}

pub fn emit_ir(ast: &Ast) -> IrInstructions {
    LoweringPass::new().lower(ast)
}

/// Per-run lowering state: the growing instruction list and the
/// temporary counter. Each compilation owns a fresh instance.
pub struct LoweringPass {
    instructions: IrInstructions,
    temporaries: u64,
}

impl Default for LoweringPass {
    fn default() -> Self {
        Self::new()
    }
}

impl LoweringPass {
    pub fn new() -> Self {
        Self {
            instructions: IrInstructions::new(),
            temporaries: 0,
        }
    }

    pub fn lower(mut self, ast: &Ast) -> IrInstructions {
        for statement in ast {
            self.lower_statement(statement);
        }
        self.instructions
    }

    /// Lowers a single expression tree, for callers that want IR for
    /// an expression without a surrounding statement.
    pub fn lower_expression(mut self, exp: &AstExp) -> IrInstructions {
        self.lower_operand(exp);
        self.instructions
    }

    fn lower_statement(&mut self, statement: &AstStatement) {
        match statement {
            AstStatement::Declaration(declaration) => {
                let src = self.lower_source(&declaration.init);
                self.instructions
                    .push(IrInstruction::LoadVariable(declaration.name.clone(), src));
            }
            AstStatement::Assignment(assignment) => {
                let src = self.lower_source(&assignment.src);
                self.instructions
                    .push(IrInstruction::LoadVariable(assignment.dst.clone(), src));
            }
            AstStatement::Return(exp) => {
                let name = self.lower_operand(exp);
                self.instructions.push(IrInstruction::Return(name));
            }
        }
    }

    /// Lowers the source of a declaration or assignment. A bare
    /// identifier propagates its own name; the copy into the target is
    /// the statement's own `LoadVariable`.
    fn lower_source(&mut self, exp: &AstExp) -> Name {
        match exp {
            AstExp::Var(name, _) => name.clone(),
            other => self.lower_operand(other),
        }
    }

    /// Lowers an expression into a name that is safe to operate on.
    /// Identifiers are materialized into fresh temporaries here:
    /// operators mutate or clobber their operand slots, so a user
    /// variable must never flow into one directly.
    fn lower_operand(&mut self, exp: &AstExp) -> Name {
        match exp {
            AstExp::Constant(value) => {
                let dest = self.new_temp();
                self.instructions
                    .push(IrInstruction::LoadConstant(dest.clone(), *value));
                dest
            }
            AstExp::Var(name, _) => {
                let dest = self.new_temp();
                self.instructions
                    .push(IrInstruction::LoadVariable(dest.clone(), name.clone()));
                dest
            }
            AstExp::Unary(op, operand) => {
                let name = self.lower_operand(operand);
                self.instructions
                    .push(IrInstruction::Unary(IrUnaryOp::from(*op), name.clone()));
                name
            }
            AstExp::Binary(binary) => {
                // Right-hand side first. This deepens right-leaning
                // live ranges and costs extra spills compared to the
                // mirrored order; kept for output compatibility.
                // TODO: lower the deeper subtree first and measure.
                let rhs = self.lower_operand(&binary.rhs);
                let lhs = self.lower_operand(&binary.lhs);
                let dest = self.new_temp();
                self.instructions.push(IrInstruction::Binary(
                    dest.clone(),
                    IrBinaryOp::from(binary.op),
                    lhs,
                    rhs,
                ));
                dest
            }
        }
    }

    fn new_temp(&mut self) -> Name {
        let count = self.temporaries;
        self.temporaries += 1;
        format!("%{count}")
    }
}
