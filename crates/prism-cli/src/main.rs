mod app_state;
mod tui;
mod ui;

use std::fs::File;
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use prism_chat::ChatController;
use prism_sdk::{ChatClient, ClientConfig};
use tracing::info;

use crate::app_state::{AppController, ChatLine};
use crate::tui::EventHandler;
use crate::ui::chat::ChatApp;

const LOG_FILE: &str = "prism-chat.log";
const TICK_RATE_MS: u64 = 250;

#[derive(Parser, Debug)]
#[command(name = "prism-chat")]
#[command(about = "Chat with the PRISM water-sample assistant")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Base URL of the message backend (overrides PRISM_BACKEND_URL)
    #[arg(long)]
    pub backend_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive chat window (default)
    Chat,
    /// Send a single message and print the exchange
    Send {
        /// Text to send
        text: String,
    },
}

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = cli
        .backend_url
        .map_or_else(ClientConfig::from_env, ClientConfig::new);
    let client = ChatClient::new(&config).context("invalid backend configuration")?;
    let controller = ChatController::new(client);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => run_tui(controller).await,
        Commands::Send { text } => run_once(controller, &text).await,
    }
}

/// Full-screen chat.  Logs go to a file so they do not tear the screen.
async fn run_tui(controller: ChatController) -> Result<()> {
    let log = File::create(LOG_FILE).with_context(|| format!("cannot create {LOG_FILE}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(log))
        .with_ansi(false)
        .init();

    info!(endpoint = %controller.client().endpoint(), "starting chat window");

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new(TICK_RATE_MS);
    let mut app = ChatApp::new(controller, events.get_sender());

    let result = loop {
        if let Err(e) = terminal.draw(|f| app.render(f)) {
            break Err(e.into());
        }
        match events.next_async().await {
            Some(action) => app.update(action),
            None => break Ok(()),
        }
        if app.should_quit() {
            break Ok(());
        }
    };

    tui::restore()?;
    result
}

/// Submit `text` once and print the transcript.
async fn run_once(mut controller: ChatController, text: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();

    controller.on_input_changed(text);
    if controller.on_submit_requested().await.is_none() {
        bail!("nothing to send: message is blank");
    }

    for message in controller.transcript().messages() {
        let line = ChatLine::from_message(message);
        println!("[{}] {}: {}", line.timestamp, line.label, line.content);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn send_subcommand_parses() {
        let cli = Cli::try_parse_from(["prism-chat", "--backend-url", "http://x:1", "send", "hello"])
            .unwrap();
        assert_eq!(cli.backend_url.as_deref(), Some("http://x:1"));
        assert!(matches!(cli.command, Some(Commands::Send { ref text }) if text == "hello"));
    }

    #[test]
    fn chat_is_default() {
        let cli = Cli::try_parse_from(["prism-chat"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[tokio::test]
    async fn blank_message_is_rejected() {
        let client = ChatClient::new(&ClientConfig::default()).unwrap();
        let mut controller = ChatController::new(client);
        controller.on_input_changed("   ");
        assert!(controller.on_submit_requested().await.is_none());
    }
}
