mod args;
mod driver_error;

use anyhow::{anyhow, Context, Result};
use args::Args;
use clap::Parser;
use driver_error::DriverError;
use log::debug;
use rillc::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{exit, Command};

/// Runs the pipeline. Returns `None` when a stage-stop flag consumed
/// the run after dumping that stage's output.
fn compile(source: &str, args: &Args) -> Result<Option<codegen::AsmAst>, DriverError> {
    let tokens = lexer::lex(source)?;
    debug!("lexed {} tokens", tokens.len());
    if args.lex {
        dbg!(&tokens);
        return Ok(None);
    }

    let ast = parser::parse(&tokens)?;
    debug!("parsed {} statements", ast.len());
    if args.parse {
        dbg!(&ast);
        return Ok(None);
    }

    let validated_ast = semantic_analysis::validate(ast)?;
    debug!("semantic analysis passed");
    if args.validate {
        dbg!(&validated_ast);
        return Ok(None);
    }

    let ir = ir::emit_ir(&validated_ast);
    debug!("lowered to {} IR instructions", ir.len());
    if args.ir {
        dbg!(&ir);
        return Ok(None);
    }

    let asm_ast = codegen::codegen(&ir);
    debug!(
        "generated {} instructions, {} byte frame",
        asm_ast.function.body.len(),
        asm_ast.function.frame_size
    );
    if args.codegen {
        dbg!(&asm_ast);
        return Ok(None);
    }

    Ok(Some(asm_ast))
}

fn asm_path(args: &Args) -> PathBuf {
    if args.no_assemble {
        if let Some(output) = &args.output {
            return output.clone();
        }
    }
    let mut path = args.input.clone();
    path.set_extension("s");
    path
}

fn out_path(args: &Args) -> PathBuf {
    if let Some(output) = &args.output {
        return output.clone();
    }
    if args.no_link {
        let mut path = args.input.clone();
        path.set_extension("o");
        return path;
    }
    PathBuf::from("a.out")
}

fn assemble(asm_file: &Path, args: &Args) -> Result<()> {
    let out_file = out_path(args);
    let mut command = Command::new("gcc");
    command.arg(asm_file);
    if args.no_link {
        command.arg("-c");
    }
    command.arg("-o").arg(&out_file);

    let status = command.status().context("failed to run assembler")?;
    if !status.success() {
        return Err(anyhow!("assembler failed"));
    }
    fs::remove_file(asm_file)?;
    debug!("wrote {}", out_file.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("can't read {}", args.input.display()))?;

    let asm_ast = match compile(&source, &args) {
        Ok(Some(asm_ast)) => asm_ast,
        Ok(None) => return Ok(()),
        Err(err) => {
            eprintln!("{}:{err}", args.input.display());
            exit(1);
        }
    };

    let asm_file = asm_path(&args);
    fs::write(&asm_file, asm_ast.to_string())
        .with_context(|| format!("can't write {}", asm_file.display()))?;

    if args.no_assemble {
        return Ok(());
    }
    assemble(&asm_file, &args)
}
