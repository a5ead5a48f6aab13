//! jsonast CLI.
//!
//! Thin front-end over the library: reads one document from a file or stdin
//! and reports whether it parses, its token stream, or its tree.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use jsonast::json::{Lexer, Token};
use jsonast::{parse_with_limits, DuplicateKeys, ErrorCode, JsonResult, Limits};

/// Deepest nesting `--max-depth` accepts. The parser recurses once per
/// level, so this also bounds its stack use.
const MAX_DEPTH_FLAG: u64 = 1024;

#[derive(Parser)]
#[command(name = "jsonast")]
#[command(about = "Lex and parse JSON documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a document is valid JSON
    Check(Input),

    /// Print the token stream with byte spans
    Tokens(Input),

    /// Print the parsed tree
    Tree(Input),
}

#[derive(Args)]
struct Input {
    /// File to read; stdin when omitted
    path: Option<PathBuf>,

    /// Use lenient limits and accept content after the root value
    #[arg(long)]
    lenient: bool,

    /// Maximum nesting depth of arrays and objects (at most 1024)
    #[arg(
        long,
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(0..=MAX_DEPTH_FLAG)
    )]
    max_depth: Option<u64>,

    /// Accept content after the root value
    #[arg(long)]
    allow_trailing: bool,

    /// Fail when an object repeats a key
    #[arg(long)]
    reject_duplicate_keys: bool,
}

impl Input {
    fn limits(&self) -> Limits {
        let mut limits = if self.lenient {
            Limits::lenient()
        } else {
            Limits::standard()
        };
        if let Some(depth) = self.max_depth {
            limits.max_nesting_depth = depth;
        }
        if self.allow_trailing {
            limits.allow_trailing_content = true;
        }
        if self.reject_duplicate_keys {
            limits.duplicate_keys = DuplicateKeys::Reject;
        }
        limits
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        match &self.path {
            Some(path) => std::fs::read(path),
            None => {
                let mut buf = Vec::new();
                io::stdin().read_to_end(&mut buf)?;
                Ok(buf)
            }
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init();
}

fn report(err: &ErrorCode) -> ExitCode {
    eprintln!("error[E{}]: {}", err.code(), err);
    ExitCode::FAILURE
}

fn print_tokens(input: &[u8], limits: Limits) -> JsonResult<()> {
    let mut lexer = Lexer::new(input, limits)?;
    loop {
        let span = lexer.span();
        println!("{}..{}\t{:?}", span.start, span.end, lexer.token());
        if lexer.token() == &Token::EndOfFile {
            return Ok(());
        }
        lexer.advance()?;
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let input = match &cli.command {
        Commands::Check(input) | Commands::Tokens(input) | Commands::Tree(input) => input,
    };
    let bytes = match input.read() {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("error: could not read input: {}", e);
            return ExitCode::from(2);
        }
    };
    let limits = input.limits();
    tracing::info!(len = bytes.len(), ?limits, "read input");

    match cli.command {
        Commands::Check(_) => match parse_with_limits(&bytes, limits) {
            Ok(_) => {
                println!("ok");
                ExitCode::SUCCESS
            }
            Err(err) => report(&err),
        },
        Commands::Tokens(_) => match print_tokens(&bytes, limits) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => report(&err),
        },
        Commands::Tree(_) => match parse_with_limits(&bytes, limits) {
            Ok(value) => {
                println!("{:#?}", value);
                ExitCode::SUCCESS
            }
            Err(err) => report(&err),
        },
    }
}
