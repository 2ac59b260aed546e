use clap::Parser;
use tenure::cli::{Cli, Commands};
use tenure::{cli, serve};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(config) => {
            config.validate()?;
            serve::run(config).await
        }
        Commands::List(args) => cli::contract::list(args, &cli.server).await,
        Commands::Alerts => cli::contract::alerts(&cli.server).await,
        Commands::Chat(args) => cli::chat::run(args, &cli.server).await,
    }
}
