// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use rjson_settings::{EmacsIndent, ParseOptions, PrettyOptions, parse_file};

const USAGE: &str = "Usage: json-pp <source.json>";

#[derive(Parser, Debug)]
#[command(name = "json-pp")]
#[command(about = "Pretty print a JSON file", long_about = None)]
struct Args {
    /// JSON file to format
    source: PathBuf,

    /// Spaces per nesting level
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// Start the output with the `_` indentation hint for emacs
    #[arg(long)]
    emacs_indent: bool,
}

fn main() -> ExitCode {
    use tracing_subscriber::{EnvFilter, fmt};

    // RUST_LOG overrides, warnings only by default
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_default();

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return match err.print() {
                Ok(()) => ExitCode::SUCCESS,
                Err(io_err) => {
                    eprintln!("> ERROR {io_err}");
                    ExitCode::FAILURE
                }
            };
        }
        Err(err) => {
            tracing::debug!(%err, "invalid arguments");
            eprintln!("{USAGE}");
            return ExitCode::from(1);
        }
    };

    let document = match parse_file(&args.source, ParseOptions::keep_comments()) {
        Ok(document) => document,
        Err(err) => {
            eprintln!("> ERROR {err}");
            return ExitCode::from(2);
        }
    };

    let options = PrettyOptions {
        indent: args.indent,
        emacs_indent: if args.emacs_indent {
            EmacsIndent::Yes
        } else {
            EmacsIndent::No
        },
    };
    println!("{}", document.to_json_pp(&options));
    ExitCode::SUCCESS
}
