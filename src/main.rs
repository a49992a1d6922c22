use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value, json};
use std::fs;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;

mod engine;
mod error;
mod input;
mod logging;
mod mcp;
mod server;
mod tools;

use mcp::ToolRegistry;
use server::Server;
use tools::ToolContext;

#[derive(Parser)]
#[command(name = "mcp-docs")]
#[command(
    version,
    about = "Document-to-markdown tools served over MCP"
)]
struct Cli {
    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct AddArgs {
    /// First number
    #[arg(long, allow_hyphen_values = true)]
    a: String,
    /// Second number
    #[arg(long, allow_hyphen_values = true)]
    b: String,
}

#[derive(Args, Clone)]
struct DocumentToMarkdownArgs {
    /// Path to a PDF or DOCX file
    #[arg(long)]
    path: String,
    /// Output JSON structuredContent
    #[arg(long)]
    json: bool,
}

#[derive(Args, Clone)]
#[command(
    group(
        clap::ArgGroup::new("source")
            .required(true)
            .multiple(false)
            .args(["input", "base64"])
    )
)]
struct BinaryToMarkdownArgs {
    /// File whose bytes are sent as binary_data
    #[arg(long)]
    input: Option<PathBuf>,
    /// Base64-encoded document bytes
    #[arg(long)]
    base64: Option<String>,
    /// Format hint passed to the converter (e.g. pdf, docx, txt)
    #[arg(long)]
    file_type: String,
    /// Output JSON structuredContent
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP stdio server
    Serve {
        /// Serve MCP over stdio (NDJSON)
        #[arg(long)]
        stdio: bool,
    },
    /// Add two numbers
    Add(AddArgs),
    /// Convert a PDF or DOCX file to markdown
    DocumentToMarkdown(DocumentToMarkdownArgs),
    /// Convert document bytes to markdown
    BinaryToMarkdown(BinaryToMarkdownArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    let registry = ToolRegistry::new();
    let ctx = ToolContext::default();

    match cli.command {
        Commands::Serve { stdio } => {
            if stdio {
                run_stdio_server(registry, ctx)
            } else {
                anyhow::bail!("only --stdio transport is supported")
            }
        }
        Commands::Add(args) => {
            let map = Map::from_iter([
                ("a".to_string(), parse_number(&args.a)),
                ("b".to_string(), parse_number(&args.b)),
            ]);
            let result = registry.call(&ctx, mcp::contracts::TOOL_ADD, &Value::Object(map));
            print_tool_result(result, false)
        }
        Commands::DocumentToMarkdown(args) => {
            let map = Map::from_iter([("file_path".to_string(), json!(args.path))]);
            let result = registry.call(
                &ctx,
                mcp::contracts::TOOL_DOCUMENT_PATH_TO_MARKDOWN,
                &Value::Object(map),
            );
            print_tool_result(result, args.json)
        }
        Commands::BinaryToMarkdown(args) => {
            let encoded = match (&args.input, args.base64) {
                (Some(path), _) => {
                    let bytes = fs::read(path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    STANDARD.encode(bytes)
                }
                (None, Some(encoded)) => encoded,
                (None, None) => anyhow::bail!("either --input or --base64 is required"),
            };
            let map = Map::from_iter([
                ("binary_data".to_string(), json!(encoded)),
                ("file_type".to_string(), json!(args.file_type)),
            ]);
            let result = registry.call(
                &ctx,
                mcp::contracts::TOOL_BINARY_DOCUMENT_TO_MARKDOWN,
                &Value::Object(map),
            );
            print_tool_result(result, args.json)
        }
    }
}

// Non-numeric text is forwarded as a string so the tool reports it.
fn parse_number(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) if value.is_number() => value,
        _ => json!(raw),
    }
}

fn print_tool_result(result: Value, json_output: bool) -> Result<()> {
    let is_error = result
        .get("isError")
        .and_then(|value| value.as_bool())
        .unwrap_or(false);

    if is_error {
        let message = result
            .get("structuredContent")
            .and_then(|value| value.get("error"))
            .and_then(|value| value.get("message"))
            .and_then(|value| value.as_str())
            .unwrap_or("tool error");
        eprintln!("{message}");
        process::exit(1);
    }

    if json_output {
        let structured = result
            .get("structuredContent")
            .cloned()
            .unwrap_or_else(|| json!({}));
        let output = serde_json::to_string_pretty(&structured)?;
        println!("{output}");
        return Ok(());
    }

    let text = result
        .get("content")
        .and_then(|value| value.as_array())
        .and_then(|arr| arr.first())
        .and_then(|value| value.get("text"))
        .and_then(|value| value.as_str())
        .unwrap_or("");
    println!("{text}");
    Ok(())
}

fn run_stdio_server(registry: ToolRegistry, ctx: ToolContext) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let writer = BufWriter::new(stdout.lock());
    Server::new(registry, ctx).run(stdin.lock(), writer)
}
