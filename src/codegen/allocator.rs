//! Greedy register and stack-slot allocation.
//!
//! Two general registers are cycled round-robin; whoever holds the
//! next register in the cycle is spilled to the stack to make room.
//! Stack slots are handed out lazily on first spill, one machine word
//! each, and never reused. Values are addressed by name: a user
//! variable or a `%N` temporary.

use super::asm_ast::{AsmInstruction, AsmInstructions, Operand, Register};
use crate::ir::Name;
use std::collections::HashMap;

pub const REGISTER_POOL: [Register; 2] = [Register::Ax, Register::Bx];

/// The register the hardware multiply and divide read and write.
pub const ACCUMULATOR: Register = Register::Ax;

const WORD_SIZE: i64 = 8;
const STACK_ALIGNMENT: i64 = 16;

/// Where a named value currently lives. `reg` and `stack` are
/// independent: a value can be register-resident, spilled, or both
/// (after a backup store). Neither set means the name was read before
/// any instruction defined it, which is a lowering bug.
#[derive(Copy, Clone, Debug, Default)]
struct Variable {
    reg: Option<Register>,
    stack: Option<i64>,
}

pub struct Allocator {
    variables: HashMap<Name, Variable>,
    registers: HashMap<Register, Name>,
    cycle: usize,
    stack_top: i64,
}

impl Allocator {
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
            registers: HashMap::new(),
            cycle: 0,
            stack_top: 0,
        }
    }

    pub fn reg_of(&self, name: &Name) -> Option<Register> {
        self.variables.get(name).and_then(|v| v.reg)
    }

    pub fn stack_of(&self, name: &Name) -> Option<i64> {
        self.variables.get(name).and_then(|v| v.stack)
    }

    /// Takes the next register in the round-robin cycle, skipping
    /// `exclude`, and evicts its current holder to the stack.
    pub fn acquire(&mut self, exclude: Option<Register>, out: &mut AsmInstructions) -> Register {
        let mut reg = self.cycle_next();
        while Some(reg) == exclude {
            reg = self.cycle_next();
        }
        self.evict(reg, out);
        reg
    }

    fn cycle_next(&mut self) -> Register {
        let reg = REGISTER_POOL[self.cycle % REGISTER_POOL.len()];
        self.cycle += 1;
        reg
    }

    /// Spills whatever value holds `reg` and unbinds it.
    fn evict(&mut self, reg: Register, out: &mut AsmInstructions) {
        let Some(occupant) = self.registers.get(&reg).cloned() else {
            return;
        };
        self.store(&occupant, out);
        self.variables
            .get_mut(&occupant)
            .expect("occupant is tracked")
            .reg = None;
        self.registers.remove(&reg);
    }

    /// Writes the register-resident value of `name` to its stack slot,
    /// assigning a slot on first spill. The register binding stays.
    pub fn store(&mut self, name: &Name, out: &mut AsmInstructions) {
        let variable = self.variables.get(name).copied().expect("value is tracked");
        let reg = variable.reg.expect("store needs a register-resident value");
        let slot = match variable.stack {
            Some(slot) => slot,
            None => {
                let slot = self.alloc_stack();
                self.variables.get_mut(name).expect("value is tracked").stack = Some(slot);
                slot
            }
        };
        out.push(AsmInstruction::Mov(
            Operand::Reg(reg),
            Operand::Stack(slot),
        ));
    }

    fn alloc_stack(&mut self) -> i64 {
        let slot = self.stack_top;
        self.stack_top += WORD_SIZE;
        slot
    }

    /// Binds `name` as the sole holder of `reg`, clearing both the
    /// register's previous occupant and any register `name` held
    /// before. The bindings stay a bijection.
    pub fn bind(&mut self, name: &Name, reg: Register) {
        if let Some(old) = self.variables.get(name).and_then(|v| v.reg) {
            if old != reg {
                self.registers.remove(&old);
            }
        }
        if let Some(previous) = self.registers.insert(reg, name.clone()) {
            if previous != *name {
                self.variables
                    .get_mut(&previous)
                    .expect("occupant is tracked")
                    .reg = None;
            }
        }
        self.variables.entry(name.clone()).or_default().reg = Some(reg);
    }

    /// Makes `name` register-resident, reloading from its stack slot
    /// if needed. Panics if the name was never defined.
    pub fn load(
        &mut self,
        name: &Name,
        exclude: Option<Register>,
        out: &mut AsmInstructions,
    ) -> Register {
        if let Some(reg) = self.reg_of(name) {
            return reg;
        }
        let slot = self
            .variables
            .get(name)
            .and_then(|v| v.stack)
            .unwrap_or_else(|| panic!("internal error: \"{name}\" read before definition"));
        let reg = self.acquire(exclude, out);
        out.push(AsmInstruction::Mov(
            Operand::Stack(slot),
            Operand::Reg(reg),
        ));
        self.bind(name, reg);
        reg
    }

    /// Like [`load`](Self::load), but if the value is already in a
    /// register its current contents are first written back to the
    /// stack, so the register may be clobbered by an in-place
    /// operation without losing the slot copy.
    pub fn load_backup(&mut self, name: &Name, out: &mut AsmInstructions) -> Register {
        match self.reg_of(name) {
            Some(reg) => {
                self.store(name, out);
                reg
            }
            None => self.load(name, None, out),
        }
    }

    /// Forces a register-resident `name` into `target`. If another
    /// value holds `target` the two registers are exchanged and both
    /// bindings swap; if `target` is free a plain move rebinds. The
    /// two paths emit different instruction sequences.
    pub fn force_into(&mut self, name: &Name, target: Register, out: &mut AsmInstructions) {
        let current = self
            .reg_of(name)
            .expect("force_into needs a register-resident value");
        if current == target {
            return;
        }
        match self.registers.get(&target).cloned() {
            Some(displaced) => {
                out.push(AsmInstruction::Xchg(
                    Operand::Reg(current),
                    Operand::Reg(target),
                ));
                self.registers.insert(current, displaced.clone());
                self.variables
                    .get_mut(&displaced)
                    .expect("displaced value is tracked")
                    .reg = Some(current);
            }
            None => {
                out.push(AsmInstruction::Mov(
                    Operand::Reg(current),
                    Operand::Reg(target),
                ));
                self.registers.remove(&current);
            }
        }
        self.registers.insert(target, name.clone());
        self.variables
            .get_mut(name)
            .expect("value is tracked")
            .reg = Some(target);
    }

    /// Final frame size: total spill bytes rounded up to the ABI
    /// alignment.
    pub fn frame_size(&self) -> i64 {
        (self.stack_top + (STACK_ALIGNMENT - 1)) & !(STACK_ALIGNMENT - 1)
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new()
    }
}
