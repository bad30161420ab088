//! CLI tool to tokenize, parse, and validate JSS and CSS files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use jss_parser::{Dialect, Error, Lexer, LexerConfig, Node, Stylesheet, printer, report};

#[derive(Debug, Parser)]
#[command(name = "jss", version, about = "Inspect and validate JSS stylesheets")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` wins when set.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit one symbol token per run of punctuation instead of per character.
    #[arg(long, global = true)]
    join_symbols: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the token list of a file
    Tokens {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Print the syntax tree of a file
    Parse {
        file: PathBuf,
        #[command(flatten)]
        dialect: DialectArg,
        #[arg(long)]
        json: bool,
    },
    /// Check that files parse
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[command(flatten)]
        dialect: DialectArg,
    },
    /// Parse a file and print it back from the tree
    Print {
        file: PathBuf,
        #[command(flatten)]
        dialect: DialectArg,
    },
}

#[derive(Debug, Args)]
struct DialectArg {
    /// Parse as plain CSS instead of JSS
    #[arg(long)]
    css: bool,
}

impl DialectArg {
    const fn dialect(&self) -> Dialect {
        if self.css { Dialect::Css } else { Dialect::Jss }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = LexerConfig::new().join_symbols(cli.join_symbols);
    let ok = match &cli.command {
        Command::Tokens { file, json } => tokens(file, &config, *json),
        Command::Parse {
            file,
            dialect,
            json,
        } => parse(file, &config, dialect.dialect(), *json),
        Command::Check { files, dialect } => {
            let mut ok = true;
            for file in files {
                ok &= check(file, &config, dialect.dialect());
            }
            ok
        }
        Command::Print { file, dialect } => print(file, &config, dialect.dialect()),
    };

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn read(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => {
            debug!(path = %path.display(), bytes = content.len(), "read source");
            Some(content)
        }
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            None
        }
    }
}

fn report_error(path: &Path, source: &str, err: &Error) {
    eprint!(
        "{}",
        report::render(
            &path.display().to_string(),
            source,
            err.position(),
            &err.message()
        )
    );
}

fn load(path: &Path, config: &LexerConfig, dialect: Dialect) -> Option<(String, Stylesheet)> {
    let source = read(path)?;
    match jss_parser::parse_with(&source, config, dialect) {
        Ok(sheet) => Some((source, sheet)),
        Err(err) => {
            report_error(path, &source, &err);
            None
        }
    }
}

fn tokens(path: &Path, config: &LexerConfig, json: bool) -> bool {
    let Some(source) = read(path) else {
        return false;
    };
    let tokens = match Lexer::new(config).tokenize(&source) {
        Ok(tokens) => tokens,
        Err(err) => {
            report_error(path, &source, &Error::from(err));
            return false;
        }
    };

    if json {
        return print_json(&tokens);
    }
    for token in &tokens {
        println!("{} {:?} {:?}", token.position, token.kind, token.value);
    }
    true
}

fn parse(path: &Path, config: &LexerConfig, dialect: Dialect, json: bool) -> bool {
    let Some((_, sheet)) = load(path, config, dialect) else {
        return false;
    };
    if json {
        return print_json(&sheet);
    }
    print!("{}", printer::dump(&sheet.items));
    true
}

fn check(path: &Path, config: &LexerConfig, dialect: Dialect) -> bool {
    let Some((_, sheet)) = load(path, config, dialect) else {
        return false;
    };
    eprintln!("{}: ok ({} nodes)", path.display(), count_nodes(&sheet.items));
    true
}

fn print(path: &Path, config: &LexerConfig, dialect: Dialect) -> bool {
    let Some((source, sheet)) = load(path, config, dialect) else {
        return false;
    };
    let output = sheet.to_source();
    print!("{output}");
    let expected = source.strip_prefix('\u{FEFF}').unwrap_or(&source);
    if output == expected {
        true
    } else {
        eprintln!("{}: output differs from source", path.display());
        false
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> bool {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            true
        }
        Err(e) => {
            eprintln!("json: {e}");
            false
        }
    }
}

/// Nodes other than whitespace, counted through nested blocks.
fn count_nodes(items: &[Node]) -> usize {
    items
        .iter()
        .filter(|item| !item.is_ignore())
        .map(|item| 1 + item.items().map_or(0, count_nodes))
        .sum()
}
