use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};
use memmap2::Mmap;

use zero_lang as zero;

use zero::ast_printer::AstPrinter;
use zero::parser::Parser;
use zero::scanner::Scanner;
use zero::token::Token;
use zero::vm::Vm;

#[derive(ClapParser, Debug)]
#[command(version, about = "zero language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Emit tokens as JSON objects instead of display form
        #[arg(long)]
        json: bool,
    },

    /// Parses input from a file and prints the program's AST
    Parse { filename: PathBuf },

    /// Runs input from a file as a zero program
    Run { filename: PathBuf },

    /// Interactive prompt; state persists between lines
    Repl,
}

/// Memory-map a source file for zero-copy scanning.
fn map_file(filename: &PathBuf) -> Result<Mmap> {
    info!("Mapping file: {:?}", filename);

    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;

    // SAFETY: the mapping is read-only and lives only for this invocation;
    // concurrent truncation of the script file is not a supported scenario.
    let mmap = unsafe { Mmap::map(&file) }.context(format!("Failed to map file {:?}", filename))?;

    info!("Mapped {} bytes from {:?}", mmap.len(), filename);

    Ok(mmap)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    // Route log output to file with module path and source line.
    Builder::new()
        .format(|buf, record| {
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("zero_lang::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // default Debug, override with RUST_LOG
        .init();

    info!("Logger initialized, writing to app.log");

    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        // minimal logger so log macros have a target
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands {
        Commands::Tokenize { filename, json } => {
            info!("Running Tokenize subcommand");

            let mmap = map_file(&filename)?;
            let mut tokenized = true;

            for item in Scanner::new(&mmap) {
                match item {
                    Ok(token) => {
                        if json {
                            println!("{}", serde_json::to_string(&token)?);
                        } else {
                            println!("{}", token);
                        }
                    }

                    Err(e) => {
                        tokenized = false;

                        debug!("Tokenization error: {}", e);
                        eprintln!("{}", e);
                    }
                }
            }

            if !tokenized {
                std::process::exit(65);
            }

            info!("Tokenization completed successfully");
        }

        Commands::Parse { filename } => {
            info!("Running Parse subcommand");

            let mmap = map_file(&filename)?;

            let mut scan_failed = false;
            let mut tokens: Vec<Token> = Vec::new();

            for item in Scanner::new(&mmap) {
                match item {
                    Ok(token) => tokens.push(token),

                    Err(e) => {
                        scan_failed = true;
                        eprintln!("{}", e);
                    }
                }
            }

            let mut parser = Parser::new(&tokens);
            let statements = parser.parse();

            for e in parser.diagnostics() {
                eprintln!("{}", e);
            }

            if scan_failed || parser.has_error() {
                std::process::exit(65);
            }

            println!("{}", AstPrinter.print_program(&statements));

            info!("Parse subcommand completed");
        }

        Commands::Run { filename } => {
            info!("Running Run subcommand");

            let mmap = map_file(&filename)?;

            let mut vm = Vm::new();
            vm.run(&mmap);

            if vm.had_parse_error() {
                std::process::exit(65);
            }
            if vm.had_runtime_error() {
                std::process::exit(70);
            }
        }

        Commands::Repl => {
            info!("Starting REPL");

            let mut vm = Vm::new();
            let stdin = std::io::stdin();

            loop {
                print!("> ");
                std::io::stdout().flush()?;

                let mut line = String::new();
                let read = stdin.read_line(&mut line)?;

                if read == 0 {
                    println!("EOF reached. Exiting...");
                    break;
                }

                if line.trim().is_empty() {
                    continue;
                }

                vm.run(line.as_bytes());
            }
        }
    }

    Ok(())
}
