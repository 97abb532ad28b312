//! Parasl layer language - Command Line Driver
//!
//! Reads one layer source file, runs the front end over it and reports
//! whether the layer parsed.

use clap::Parser;
use log::info;
use parasl_common::CompilerError;
use parasl_frontend::{printer, Frontend, Lexer};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "parasl")]
#[command(about = "Parasl layer language front end")]
#[command(version = "0.1.0")]
struct Cli {
    /// Layer source file
    file: PathBuf,

    /// Print the validated tree
    #[arg(long)]
    dump_ast: bool,

    /// Print the token stream as JSON
    #[arg(long)]
    tokens: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    }

    let mut stdout = io::stdout().lock();
    if let Err(err) = run(&cli, &mut stdout) {
        if err.location().is_some() {
            eprintln!("{}", err.to_diagnostic());
        } else {
            eprintln!("{}", err);
        }
        eprintln!("Parsing failed");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<(), CompilerError> {
    let filename = cli.file.display().to_string();
    info!("Parsing {}", filename);

    let source = fs::read_to_string(&cli.file)?;

    if cli.tokens {
        let tokens = Lexer::with_filename(&source, &filename).tokenize()?;
        let json = serde_json::to_string_pretty(&tokens).map_err(|e| CompilerError::InternalError {
            message: format!("Failed to serialize tokens: {}", e),
        })?;
        writeln!(out, "{}", json)?;
    }

    let program = Frontend::parse_named(&source, &filename)?;
    info!(
        "{}: {} expressions, {} statements, {} layer inputs",
        filename,
        program.ast.expr_count(),
        program.ast.stmt_count(),
        program.inputs.len()
    );

    if cli.dump_ast {
        write!(out, "{}", printer::dump(&program))?;
    }

    writeln!(out, "Parsing succeeded")?;
    Ok(())
}
