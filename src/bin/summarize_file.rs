use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde_json::Value;
use textsum::processing::{rank, sanitize};

/// Post a document to a running Textsum server, or preview the extractive pass locally.
#[derive(Parser)]
#[command(
    name = "summarize-file",
    about = "Summarize a text file via a Textsum server"
)]
struct Cli {
    /// File to summarize; reads stdin when omitted.
    input: Option<PathBuf>,
    /// Base URL of the running server.
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server: String,
    /// Print the local extractive preview instead of calling the server.
    #[arg(long)]
    extractive: bool,
    /// Number of sentences in the extractive preview.
    #[arg(long, default_value_t = 3)]
    sentences: usize,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let text = read_input(cli.input.as_deref())?;

    if cli.extractive {
        let sanitized = sanitize::sanitize(&text);
        // Document order reads better on a terminal than score order.
        let preview = rank::extractive_summary(&sanitized, cli.sentences, true);
        println!("{preview}");
        return Ok(());
    }

    let response = reqwest::Client::new()
        .post(format!("{}/api/summarize", cli.server.trim_end_matches('/')))
        .json(&serde_json::json!({ "text": text }))
        .send()
        .await
        .with_context(|| format!("failed to reach server at {}", cli.server))?;

    let status = response.status();
    let body: Value = response
        .json()
        .await
        .context("failed to decode server response")?;

    if !status.is_success() {
        bail!("server returned {status}: {body}");
    }

    let summary = body
        .get("summary")
        .and_then(Value::as_str)
        .context("server response missing 'summary'")?;
    println!("{summary}");
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}
