//! Send a chat message through the Ares relay and print the reply.
//!
//! The relay picks the backend model, so there is no `--model` flag here,
//! just a message and sampling knobs.
//!
//! # Examples
//!
//! ```sh
//! # Basic request
//! ares --user "Explain ownership in Rust"
//!
//! # Pipe content from stdin
//! cat broken.rs | ares --user "Why does this not compile?" --stdin
//!
//! # Unrestricted system prompt, custom relay
//! ares --user "Tell me a story" --disable-safety --relay-url http://127.0.0.1:8080
//! ```

use ares_core::{COMPLETIONS_PATH, CompletionRequest, Message, reply_text};
use clap::Parser;
use std::io::{self, Read};
use std::process;

/// Terminal chat client for the Ares relay.
#[derive(Parser)]
#[command(name = "ares")]
struct Cli {
    // ── Message content ────────────────────────────────────────
    /// User message to send
    #[arg(long)]
    user: Option<String>,

    /// Read user content from stdin
    #[arg(long)]
    stdin: bool,

    // ── Relay selection ────────────────────────────────────────
    /// Base URL of the relay
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    relay_url: String,

    // ── Sampling parameters ────────────────────────────────────
    /// Sampling temperature (0.0 = deterministic, 2.0 = very creative)
    #[arg(long, default_value_t = 0.7)]
    temperature: f32,

    /// Maximum tokens in the response
    #[arg(long, default_value_t = 1024)]
    max_tokens: u32,

    /// Ask the relay for its unrestricted system prompt
    #[arg(long)]
    disable_safety: bool,

    // ── Output mode ────────────────────────────────────────────
    /// Print the full API JSON response
    #[arg(long)]
    raw: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let content = build_user_content(&cli)?;

    let body = CompletionRequest {
        messages: vec![Message::user(content)],
        temperature: cli.temperature,
        max_tokens: cli.max_tokens,
        disable_safety: cli.disable_safety,
    };

    let client = reqwest::Client::new();
    let resp = client
        .post(format!(
            "{}{COMPLETIONS_PATH}",
            cli.relay_url.trim_end_matches('/')
        ))
        .json(&body)
        .send()
        .await
        .map_err(|e| format!("request failed: {e}"))?;

    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| format!("failed to read response: {e}"))?;

    if !status.is_success() {
        return Err(format!("relay HTTP {status}: {text}"));
    }

    if cli.raw {
        println!("{text}");
        return Ok(());
    }

    println!("{}", reply_text(&text)?);
    Ok(())
}

// ── Helpers ────────────────────────────────────────────────────────

fn read_stdin_content() -> Result<String, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {e}"))?;
    Ok(buf)
}

fn build_user_content(cli: &Cli) -> Result<String, String> {
    let stdin_text = if cli.stdin {
        Some(read_stdin_content()?)
    } else {
        None
    };

    match (&cli.user, stdin_text) {
        (Some(msg), Some(piped)) => Ok(format!("{msg}\n\n{piped}")),
        (Some(msg), None) => Ok(msg.clone()),
        (None, Some(piped)) => Ok(piped),
        (None, None) => Err("provide --user, --stdin, or both".to_string()),
    }
}
