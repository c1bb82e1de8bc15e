use clap::{Arg, ArgAction};
use owo_colors::OwoColorize;
use std::io::{IsTerminal, Read};
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use modelfile::formatting::{self, Identity, Terminal};
use modelfile::language::{Command, ReadingError};
use modelfile::parsing::{self, ParsingError};
use modelfile::problem;

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = clap::Command::new("modelfile")
        .version(VERSION)
        .propagate_version(true)
        .author("Andrew Cowie")
        .about("Scanner and formatter for Modelfile model configurations.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit debug logging to stderr. Otherwise RUST_LOG is honoured."),
        )
        .arg(
            Arg::new("concise")
                .long("concise")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Report syntax errors on a single line, without the source excerpt."),
        )
        .subcommand(
            clap::Command::new("check")
                .about("Syntax-check the given Modelfile")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The Modelfile you want to check, or '-' to read standard input."),
                ),
        )
        .subcommand(
            clap::Command::new("format")
                .about("Print the given Modelfile in canonical form")
                .arg(
                    Arg::new("raw-control-chars")
                        .short('R')
                        .long("raw-control-chars")
                        .action(ArgAction::SetTrue)
                        .help("Emit ANSI escape codes for syntax highlighting even if output is redirected to a pipe or file."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The Modelfile you want to format, or '-' to read standard input."),
                ),
        )
        .subcommand(
            clap::Command::new("dump")
                .about("Print the directives of the given Modelfile as JSON")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The Modelfile you want to inspect, or '-' to read standard input."),
                ),
        )
        .get_matches();

    let filter = if matches.get_flag("debug") {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let concise = matches.get_flag("concise");

    match matches.subcommand() {
        Some(("check", submatches)) => {
            let filename = submatches
                .get_one::<String>("filename")
                .unwrap();
            let filename = Path::new(filename);

            let commands = scan_or_exit(filename, concise);

            debug!("{} is ok, with {} commands", filename.display(), commands.len());
        }
        Some(("format", submatches)) => {
            let raw_output = submatches.get_flag("raw-control-chars");
            let filename = submatches
                .get_one::<String>("filename")
                .unwrap();
            let filename = Path::new(filename);

            let commands = scan_or_exit(filename, concise);

            let result = if raw_output
                || std::io::stdout()
                    .is_terminal()
            {
                formatting::render(&Terminal, &commands)
            } else {
                formatting::format(&commands)
            };

            print!("{}", result);
        }
        Some(("dump", submatches)) => {
            let filename = submatches
                .get_one::<String>("filename")
                .unwrap();
            let filename = Path::new(filename);

            let commands = scan_or_exit(filename, concise);

            match serde_json::to_string_pretty(&commands) {
                Ok(json) => println!("{}", json),
                Err(error) => {
                    eprintln!("{}: {}", "error".bright_red(), error);
                    std::process::exit(1);
                }
            }
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: modelfile [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

/// Copies every byte read through it, so that a diagnostic can quote the
/// source after the reader has been consumed.
struct Recording<R> {
    inner: R,
    copy: Vec<u8>,
}

impl<R: Read> Read for Recording<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self
            .inner
            .read(buf)?;
        self.copy
            .extend_from_slice(&buf[..n]);
        Ok(n)
    }
}

/// Scan the named file, or standard input if given "-". Exits on failure.
fn scan_or_exit(filename: &Path, concise: bool) -> Vec<Command> {
    if filename.to_str() == Some("-") {
        let mut recording = Recording {
            inner: std::io::stdin().lock(),
            copy: Vec::new(),
        };
        match parsing::parse_reader(&mut recording) {
            Ok(commands) => commands,
            Err(ReadingError::Io(error)) => {
                debug!(?error);
                eprintln!(
                    "{}: Unable to read standard input: {}",
                    "error".bright_red(),
                    error.kind()
                );
                std::process::exit(1);
            }
            Err(ReadingError::Parsing(error)) => {
                let content = String::from_utf8_lossy(&recording.copy);
                report(&error, filename, &content, concise);
                std::process::exit(1);
            }
        }
    } else {
        let content = match parsing::load(filename) {
            Ok(content) => content,
            Err(error) => {
                eprintln!("{}", problem::concise_loading_error(&error));
                std::process::exit(1);
            }
        };
        match parsing::parse(&content) {
            Ok(commands) => commands,
            Err(error) => {
                report(&error, filename, &content, concise);
                std::process::exit(1);
            }
        }
    }
}

fn report(error: &ParsingError, filename: &Path, content: &str, concise: bool) {
    let message = match (concise, std::io::stderr().is_terminal()) {
        (true, true) => problem::concise_parsing_error(error, filename, content, &Terminal),
        (true, false) => problem::concise_parsing_error(error, filename, content, &Identity),
        (false, true) => problem::full_parsing_error(error, filename, content, &Terminal),
        (false, false) => problem::full_parsing_error(error, filename, content, &Identity),
    };
    eprintln!("{}", message);
}
