//! xmlify - convert hand-written HTML into well-formed XML
//!
//! Usage: xmlify [OPTIONS] [FILE]

use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use xmlify_html::{Normalizer, ParserConfig, Reader, Token, Tokenizer};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Options for one run
struct Options {
    config: ParserConfig,
    /// Dump tokens instead of converting
    tokens: bool,
    /// Input file, stdin when absent or `-`
    input: Option<String>,
}

enum Command {
    Run(Options),
    Help,
    Version,
}

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("xmlify");

    let command = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Try '{} --help' for more information.", program);
            return ExitCode::FAILURE;
        }
    };

    match command {
        Command::Help => {
            print_usage(program);
            ExitCode::SUCCESS
        }
        Command::Version => {
            println!("xmlify {}", VERSION);
            ExitCode::SUCCESS
        }
        Command::Run(options) => {
            if let Err(e) = run(options) {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}

fn print_usage(program: &str) {
    println!(
        r#"xmlify {} - Convert hand-written HTML into well-formed XML

USAGE:
    {} [OPTIONS] [FILE]

Reads FILE, or standard input when FILE is absent or '-', and writes the
XML document to standard output.

OPTIONS:
    -h, --help          Print this help message
    -V, --version       Print version information
    --case-sensitive    Keep tag and attribute names as written
    --max-errors <N>    Give up after N errors and recoveries (default 1000)
    --annotate          Comment every start-tag inserted during repair
    --tokens            Print the token stream as JSON, one token per line

Set RUST_LOG=info for a completion report, RUST_LOG=debug for token traces.
"#,
        VERSION, program
    );
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut config = ParserConfig::new();
    let mut tokens = false;
    let mut input: Option<String> = None;

    let mut args = args.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "--case-sensitive" => config = config.with_case_sensitive(true),
            "--annotate" => config = config.with_annotate_repairs(true),
            "--tokens" => tokens = true,
            "--max-errors" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--max-errors requires a value".to_string())?;
                let max = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid value for --max-errors: {}", value))?;
                config = config.with_max_errors(max);
            }
            option if option.starts_with('-') && option != "-" => {
                return Err(format!("Unknown option: {}", option));
            }
            path => {
                if let Some(previous) = &input {
                    return Err(format!("More than one input given: {} and {}", previous, path));
                }
                input = Some(path.to_string());
            }
        }
    }

    if let Some(path) = input.as_deref().filter(|path| *path != "-") {
        config = config.with_source(path);
    }

    Ok(Command::Run(Options { config, tokens, input }))
}

/// Read the whole input. Invalid UTF-8 is replaced rather than rejected.
fn read_input(input: Option<&str>) -> Result<String, String> {
    let bytes = match input {
        None | Some("-") => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .map_err(|e| format!("Failed to read standard input: {}", e))?;
            bytes
        }
        Some(path) => fs::read(path).map_err(|e| format!("Failed to read {}: {}", path, e))?,
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn run(options: Options) -> Result<(), String> {
    let text = read_input(options.input.as_deref())?;
    log::debug!("Read {} bytes", text.len());

    let mut stdout = io::stdout().lock();
    if options.tokens {
        dump_tokens(&text, &options.config, &mut stdout)
    } else {
        let mut normalizer = Normalizer::with_config(options.config);
        let xml = normalizer.convert(&text).map_err(|e| e.to_string())?;
        stdout
            .write_all(xml.as_bytes())
            .map_err(|e| format!("Failed to write output: {}", e))
    }
}

/// Print each token as a JSON object on its own line
fn dump_tokens(text: &str, config: &ParserConfig, out: &mut impl Write) -> Result<(), String> {
    let mut tokenizer = Tokenizer::with_config(Reader::new(text), config);
    loop {
        let token = tokenizer.next_token().map_err(|e| e.to_string())?;
        if token == Token::Eof {
            break;
        }
        let json = serde_json::to_string(&token).map_err(|e| e.to_string())?;
        writeln!(out, "{}", json).map_err(|e| format!("Failed to write output: {}", e))?;
    }
    log::info!("{}", tokenizer.completion_report());
    Ok(())
}
