//! The ccc compiler CLI (spec §6): `ccc [options] <input> -o <output>`.

use std::fs;
use std::process::ExitCode;

use clap::Parser as ClapParser;

use ccc::diagnostics::DiagnosticManager;
use ccc::optimizer::OptLevel;

/// Command-line interface for the ccc compiler.
#[derive(ClapParser)]
#[command(name = "ccc")]
#[command(about = "A compiler for a small C-like language, targeting LLVM IR", long_about = None)]
struct Cli {
    /// The source file to compile.
    input: String,

    /// Output path for the emitted LLVM IR.
    #[arg(short = 'o', long = "output")]
    output: String,

    /// Optimization level (default 1).
    #[arg(short = 'O', value_enum, default_value = "1")]
    opt: OptLevelArg,

    /// Prints the parsed AST to stderr before optimization, for debugging.
    #[arg(long = "emit-ast")]
    emit_ast: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OptLevelArg {
    #[value(name = "0")]
    O0,
    #[value(name = "1")]
    O1,
    #[value(name = "2")]
    O2,
}

impl From<OptLevelArg> for OptLevel {
    fn from(level: OptLevelArg) -> Self {
        match level {
            OptLevelArg::O0 => OptLevel::O0,
            OptLevelArg::O1 => OptLevel::O1,
            OptLevelArg::O2 => OptLevel::O2,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.input) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("ccc: could not read '{}': {err}", cli.input);
            return ExitCode::FAILURE;
        }
    };

    let mut diagnostics = DiagnosticManager::new(cli.input.clone(), source.clone());

    if cli.emit_ast {
        // A throwaway parse just for the debug dump; diagnostics from the
        // real pipeline run below are the ones that get reported.
        if let Some(program) = ccc::parser::Parser::new(&source).parse() {
            eprintln!("{program:#?}");
        }
    }

    let module_name = std::path::Path::new(&cli.input)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(&cli.input);

    let ir = ccc::driver::compile(&source, module_name, cli.opt.into(), &mut diagnostics);

    let errors = diagnostics.report_all();

    match ir {
        Some(ir) if errors == 0 => match fs::write(&cli.output, ir) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("ccc: could not write '{}': {err}", cli.output);
                ExitCode::FAILURE
            }
        },
        _ => ExitCode::FAILURE,
    }
}
