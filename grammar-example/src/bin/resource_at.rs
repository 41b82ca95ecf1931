//! Prints the file reference found around a cursor position in a text.

use grammar_example::cli::{setup_tracing, CliArgs};
use grammar_example::resource::parse_resource_with_config;
use std::env;
use std::process;

fn usage() -> ! {
    eprintln!("Usage: resource-at [--config <file.toml>] <text> <cursor>");
    process::exit(1);
}

fn main() {
    setup_tracing();
    let args: Vec<String> = env::args().skip(1).collect();
    let args = CliArgs::parse(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        usage();
    });
    let (text, cursor) = match args.positional.as_slice() {
        [text, cursor] => match cursor.parse::<i64>() {
            Ok(cursor) => (text.as_str(), cursor),
            Err(e) => {
                eprintln!("Invalid cursor {:?}: {}", cursor, e);
                usage();
            }
        },
        _ => usage(),
    };
    let config = args.scan_config().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}", e);
        process::exit(1);
    });

    match parse_resource_with_config(text.as_bytes(), 0, cursor, config) {
        Ok(found) => {
            println!("path:   {}", found.path);
            println!("raw:    {}", found.raw);
            println!("span:   [{}..{})", found.span.start, found.span.end);
            if let Some(line) = found.line {
                println!("line:   {}", line);
            }
            if let Some(column) = found.column {
                println!("column: {}", column);
            }
        }
        Err(e) => {
            eprintln!("No resource at {}: {}", cursor, e);
            process::exit(1);
        }
    }
}
