use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rillc")]
#[command(about = "Rill language compiler", long_about = None)]
pub struct Args {
    /// Source file to compile
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file (defaults to a.out; with -S/-c, INPUT with the
    /// extension swapped)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Stop after lexing and dump the tokens
    #[arg(long)]
    pub lex: bool,

    /// Stop after parsing and dump the tree
    #[arg(long)]
    pub parse: bool,

    /// Stop after semantic analysis
    #[arg(long)]
    pub validate: bool,

    /// Stop after lowering and dump the IR
    #[arg(long)]
    pub ir: bool,

    /// Stop after code generation and dump the asm tree
    #[arg(long)]
    pub codegen: bool,

    /// Compile only; do not assemble or link (output assembly file)
    #[arg(short = 'S', long)]
    pub no_assemble: bool,

    /// Compile and assemble, but do not link (output object file)
    #[arg(short = 'c', long)]
    pub no_link: bool,
}
