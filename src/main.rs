use std::{fs::read_to_string, process::exit};

use clap::Parser;

use bfront::{
    ast_as_json, ast_as_string, display_error, errors::errors::Error, parse_as_string,
    symbol_table, symbol_table_as_json,
};

/// B front end: prints the parse tree, the AST or the symbol table of
/// a source file.
#[derive(Parser)]
#[command(name = "bfront", version)]
struct Cli {
    /// Source file to read
    file: String,

    /// Pretty print the parse tree
    #[arg(short, long)]
    pretty: bool,

    /// Print the symbol table instead of the AST
    #[arg(short, long)]
    symbols: bool,

    /// Encode the output as JSON
    #[arg(short, long)]
    json: bool,

    /// Attach position metadata to AST nodes
    #[arg(short, long)]
    meta: bool,

    /// Print the concrete parse tree
    #[arg(long = "pt")]
    parse_tree: bool,
}

fn main() {
    let cli = Cli::parse();

    let source = match read_to_string(&cli.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", cli.file, error);
            exit(1);
        }
    };

    let output = if cli.symbols {
        if cli.json {
            symbol_table_as_json(&source)
        } else {
            symbol_table(&source).map(|table| format!("{:?}", table))
        }
    } else if cli.parse_tree {
        parse_as_string(&source, cli.pretty)
    } else if cli.json {
        ast_as_json(&source, cli.meta)
    } else {
        ast_as_string(&source, cli.meta)
    };

    match output {
        Ok(output) => println!("{}", output),
        Err(error) => {
            report_and_exit(error, &source, &cli.file);
        }
    }
}

fn report_and_exit(error: Error, source: &str, file: &str) -> ! {
    display_error(&error, source, file);
    exit(1);
}
