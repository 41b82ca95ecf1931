//! Parses JSON from a file or stdin and prints it compactly.

use grammar_example::cli::{setup_tracing, CliArgs};
use grammar_example::json::parse_json_with_config;
use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

fn main() {
    setup_tracing();
    let args: Vec<String> = env::args().skip(1).collect();
    let args = CliArgs::parse(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("Usage: json-scan [--config <file.toml>] [file]");
        process::exit(1);
    });
    let config = args.scan_config().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}", e);
        process::exit(1);
    });

    let text = match args.positional.first() {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).map(|_| text)
        }
    };
    let text = text.unwrap_or_else(|e| {
        eprintln!("Failed to read input: {}", e);
        process::exit(1);
    });

    match parse_json_with_config(&text, config) {
        Ok(value) => println!("{}", value),
        Err(e) => {
            eprintln!("Parse error: {}", e);
            process::exit(1);
        }
    }
}
