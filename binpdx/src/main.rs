//! Command-line tool for parsing Clausewitz-style script files.
//!
//! Usage: pdx [OPTIONS] [FILE|DIR]
//!
//! Options:
//!   -t, --to <FORMAT>      Output format (json, script) [default: json]
//!   -g, --glob <PATTERN>   Filename pattern for directory input [default: *.txt]
//!   -o, --output <FILE>    Write output to specified file
//!   --check                Parse the input and report ok, emit nothing
//!   -h, --help             Print help
//!   -V, --version          Print version

use libpdx::{encode, parse, parse_all_in_directory, parse_file, Format, Value};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process;

/// Check whether a string is a recognized format name for -t.
fn is_format_name(s: &str) -> bool {
    matches!(s, "json" | "script")
}

fn parse_format(s: &str) -> Format {
    match s {
        "json" => Format::Json,
        "script" => Format::Script,
        _ => {
            eprintln!("Error: Unknown format: {}", s);
            process::exit(1);
        }
    }
}

fn main() {
    // Per-file warnings from directory batches surface on stderr;
    // RUST_LOG overrides the default level.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut to_format: Option<&str> = None;
    let mut glob_pattern: Option<&str> = None;
    let mut output_file: Option<&str> = None;
    let mut check_only = false;
    let mut input_path: Option<&str> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-V" | "--version" => {
                println!("pdx {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "-t" | "--to" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: -t requires a format argument");
                    process::exit(1);
                }
                if !is_format_name(&args[i]) {
                    eprintln!("Error: Unknown format: {}", args[i]);
                    process::exit(1);
                }
                to_format = Some(&args[i]);
            }
            "-g" | "--glob" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: -g requires a pattern argument");
                    process::exit(1);
                }
                glob_pattern = Some(&args[i]);
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --output requires an argument");
                    process::exit(1);
                }
                output_file = Some(&args[i]);
            }
            "--check" => {
                check_only = true;
            }
            "-" => {
                // Explicit stdin; input_path stays None.
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                process::exit(1);
            }
            _ => {
                if input_path.is_some() {
                    eprintln!("Error: Multiple input paths not supported");
                    process::exit(1);
                }
                input_path = Some(&args[i]);
            }
        }
        i += 1;
    }

    let format = parse_format(to_format.unwrap_or("json"));
    let pattern = glob_pattern.unwrap_or("*.txt");

    let value: Value = match input_path {
        // Directory mode merges every matching file into one tree.
        Some(path) if Path::new(path).is_dir() => {
            match parse_all_in_directory(path, pattern) {
                Ok(value) => value,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            }
        }
        Some(path) => match parse_file(path) {
            Ok(value) => value,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading stdin: {}", e);
                process::exit(1);
            }
            parse(&buffer)
        }
    };

    if check_only {
        // Reading and decoding succeeded; parsing cannot fail.
        match input_path {
            Some(path) => println!("{}: ok", path),
            None => println!("ok"),
        }
        return;
    }

    let output = encode(&value, format);
    write_output(&output, output_file);
}

fn write_output(output: &str, output_file: Option<&str>) {
    if let Some(path) = output_file {
        if let Err(e) = fs::write(path, output) {
            eprintln!("Error writing {}: {}", path, e);
            process::exit(1);
        }
    } else {
        print!("{}", output);
        if !output.ends_with('\n') {
            println!();
        }
    }
}

fn print_help() {
    println!(
        "pdx - Clausewitz script command-line tool

USAGE:
    pdx [OPTIONS] [FILE|DIR]

ARGS:
    [FILE|DIR]    Input file or directory (reads from stdin if not provided)
                  When a directory is given, every file matching the glob
                  pattern is parsed and merged into one tree, later files
                  overwriting earlier top-level keys

OPTIONS:
    -t, --to <FORMAT>      Output format [default: json]
                           Supported: json, script

    -g, --glob <PATTERN>   Filename pattern for directory input
                           [default: *.txt]

    -o, --output <FILE>    Write output to specified file

    --check                Parse the input and report ok, emit nothing

    -h, --help             Print help

    -V, --version          Print version

EXAMPLES:
    # Convert a script file to JSON
    pdx common/government_reforms/00_default.txt

    # Merge a whole definition directory into one JSON document
    pdx common/religions/

    # Merge only numbered files
    pdx -g '0*.txt' common/advances/

    # Reformat a file to canonical script form
    pdx -t script setup/countries/spain.txt

    # Validate a file
    pdx --check events/disaster_events.txt
"
    );
}
