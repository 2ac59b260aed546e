pub mod chat;
pub mod contract;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tenure")]
#[command(version, about = "Contract tracking with a local-LLM assistant")]
pub struct Cli {
    /// Tenure server address for client commands
    #[arg(
        long,
        global = true,
        env = "TENURE_ADDR",
        default_value = "http://localhost:8088"
    )]
    pub server: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(crate::config::Config),
    /// List all contracts
    List(ListArgs),
    /// Show current expiry alerts
    Alerts,
    /// Ask the assistant a question about the tracked contracts
    Chat(ChatArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print raw JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// The question to ask
    pub message: String,

    /// Continue an existing session instead of starting a new one
    #[arg(long)]
    pub chat_id: Option<String>,
}
