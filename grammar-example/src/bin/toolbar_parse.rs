//! Prints the parts and arguments of a toolbar command line.

use grammar_example::cli::{setup_tracing, CliArgs};
use grammar_example::toolbar::parse_toolbar_with_config;
use grammar_example::VarMap;
use std::env;
use std::process;

fn main() {
    setup_tracing();
    let args: Vec<String> = env::args().skip(1).collect();
    let args = CliArgs::parse(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("Usage: toolbar-parse [--config <file.toml>] <text>");
        process::exit(1);
    });
    let config = args.scan_config().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}", e);
        process::exit(1);
    });
    let text = args.positional.join(" ");

    let data = match parse_toolbar_with_config(&text, config) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            process::exit(1);
        }
    };

    for (i, part) in data.parts.iter().enumerate() {
        println!("part {} [{}..{}): {:?}", i, part.span.start, part.span.end, part.trimmed_str());
        for arg in &part.args {
            println!("    arg [{}..{}): {}", arg.span.start, arg.span.end, arg.text);
        }
    }

    let vars = VarMap::from_toolbar(&data);
    for (name, value) in vars.iter() {
        match value {
            Some(value) => println!("var {} = {}", name, value),
            None => println!("var {}", name),
        }
    }
}
