//! Declaration checking.
//!
//! One flat scope: `let` declares, assignment and expression use
//! require an earlier declaration, a second `let` of the same name is
//! an error carrying the original declaration's span. The tree passes
//! through structurally unchanged; later stages may assume every
//! identifier reference is bound.

mod semanalysis_error;

use crate::ast::*;
use crate::position::Position;
use std::collections::HashMap;

pub use semanalysis_error::SemAnalysisError;

pub type Result<T> = std::result::Result<T, SemAnalysisError>;

pub fn validate(ast: Ast) -> Result<Ast> {
    let mut analyzer = SemanticAnalyzer::new();
    analyzer.analyze(&ast)?;
    Ok(ast)
}

struct SemanticAnalyzer {
    declared: HashMap<Identifier, Position>,
}

impl SemanticAnalyzer {
    fn new() -> Self {
        Self {
            declared: HashMap::new(),
        }
    }

    fn analyze(&mut self, ast: &Ast) -> Result<()> {
        for statement in ast {
            self.analyze_statement(statement)?;
        }
        Ok(())
    }

    fn analyze_statement(&mut self, statement: &AstStatement) -> Result<()> {
        match statement {
            AstStatement::Declaration(declaration) => self.analyze_declaration(declaration),
            AstStatement::Assignment(assignment) => self.analyze_assignment(assignment),
            AstStatement::Return(exp) => self.analyze_exp(exp),
        }
    }

    fn analyze_declaration(&mut self, declaration: &AstDeclaration) -> Result<()> {
        // The declared name is not visible to its own initializer.
        self.analyze_exp(&declaration.init)?;
        if let Some(original) = self.declared.get(&declaration.name) {
            return Err(SemAnalysisError::Redeclaration {
                name: declaration.name.clone(),
                pos: declaration.pos.clone(),
                original: original.clone(),
            });
        }
        self.declared
            .insert(declaration.name.clone(), declaration.pos.clone());
        Ok(())
    }

    fn analyze_assignment(&mut self, assignment: &AstAssignment) -> Result<()> {
        // Assignment does not declare; its target must already exist.
        if !self.declared.contains_key(&assignment.dst) {
            return Err(SemAnalysisError::UndeclaredVariable(
                assignment.dst.clone(),
                assignment.pos.clone(),
            ));
        }
        self.analyze_exp(&assignment.src)
    }

    fn analyze_exp(&self, exp: &AstExp) -> Result<()> {
        match exp {
            AstExp::Constant(_) => Ok(()),
            AstExp::Var(name, pos) => {
                if self.declared.contains_key(name) {
                    Ok(())
                } else {
                    Err(SemAnalysisError::UndeclaredVariable(
                        name.clone(),
                        pos.clone(),
                    ))
                }
            }
            AstExp::Unary(_, operand) => self.analyze_exp(operand),
            AstExp::Binary(binary) => {
                // Right-hand side first, matching lowering order.
                self.analyze_exp(&binary.rhs)?;
                self.analyze_exp(&binary.lhs)
            }
        }
    }
}
