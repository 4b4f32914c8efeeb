//! Command-line front end for path queries
//!
//! Evaluates a path against an XML or HTML document read from a file or
//! standard input.

use clap::{Args, Parser, Subcommand};
use log::debug;
use std::fs;
use std::io::{self, Read};
use std::process;
use xmlpath::{CompatibilityMode, XmlPath, XmlPathConfig, XmlPathError, parse};

#[derive(Parser)]
#[command(name = "xmlpath")]
#[command(about = "Query XML and HTML documents with GPath-style paths")]
#[command(version)]
#[command(author = "OctoFHIR Team <funyloony@gmail.com>")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a path against a document
    Eval {
        /// Path to evaluate
        path: String,
        #[command(flatten)]
        source: SourceArgs,
        /// Root path prefixed to the query
        #[arg(short, long)]
        root: Option<String>,
        /// Print the result as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Parse a path and print its steps
    Parse {
        /// Path to parse
        path: String,
    },
    /// Print a document with indentation
    Pretty {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Document file (reads from stdin if not provided)
    #[arg(short, long)]
    file: Option<String>,
    /// Markup dialect: xml or html
    #[arg(short, long, value_parser = parse_mode)]
    mode: Option<CompatibilityMode>,
    /// JSON file with acquisition settings
    #[arg(short, long)]
    config: Option<String>,
}

fn parse_mode(value: &str) -> Result<CompatibilityMode, String> {
    value.parse().map_err(|e: XmlPathError| e.to_string())
}

fn main() {
    human_panic::setup_panic!();
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Eval {
            path,
            source,
            root,
            json,
        } => handle_eval(&path, &source, root.as_deref(), json),
        Commands::Parse { path } => handle_parse(&path),
        Commands::Pretty { source } => handle_pretty(&source),
    }
}

fn load_config(source: &SourceArgs) -> XmlPathConfig {
    let config = match &source.config {
        Some(filename) => {
            debug!("reading settings from '{filename}'");
            let parsed = fs::read_to_string(filename)
                .map_err(|e| e.to_string())
                .and_then(|text| {
                    serde_json::from_str::<XmlPathConfig>(&text).map_err(|e| e.to_string())
                });
            match parsed {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error reading settings from '{filename}': {e}");
                    process::exit(1);
                }
            }
        }
        None => XmlPathConfig::default(),
    };
    match source.mode {
        Some(mode) => config.with_mode(mode),
        None => config,
    }
}

fn load_document(source: &SourceArgs) -> XmlPath {
    let config = load_config(source);

    let loaded = match source.file.as_deref() {
        Some(filename) => {
            debug!("reading document from '{filename}'");
            XmlPath::from_file(filename, config)
        }
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading from stdin: {e}");
                process::exit(1);
            }
            XmlPath::with_config(&buffer, config)
        }
    };

    match loaded {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Error loading document: {e}");
            process::exit(1);
        }
    }
}

fn handle_eval(path: &str, source: &SourceArgs, root: Option<&str>, json: bool) {
    let mut document = load_document(source);

    if let Some(root) = root {
        if let Err(e) = document.set_root(root) {
            eprintln!("Error setting root path: {e}");
            process::exit(1);
        }
    }

    match document.get_value(path) {
        Ok(result) => {
            let output = if json {
                match serde_json::to_string_pretty(&result) {
                    Ok(json) => json,
                    Err(_) => result.to_string(),
                }
            } else {
                result.to_string()
            };
            println!("{output}");
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn handle_parse(path: &str) {
    match parse(path) {
        Ok(expression) => {
            println!("Path: {expression}");
            for (i, step) in expression.steps().iter().enumerate() {
                println!("  {i}: {step:?}");
            }
        }
        Err(e) => {
            eprintln!("Parse error: {e}");
            process::exit(1);
        }
    }
}

fn handle_pretty(source: &SourceArgs) {
    let document = load_document(source);
    match document.prettify() {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
