use anyhow::{Context, Result};
use clap::Parser;
use liburutegia::application::{ServerConfig, serve};
use liburutegia::infrastructure::client::LiburutegiaClient;
use liburutegia::presentation::cli::{
    Cli, Commands, ServeCommand, books, files, genres, stats, suggest,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before clap parses env vars)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(cmd) => run_server(cmd).await,
        command => {
            let user = cli
                .user
                .context("no reader selected: pass --user or set LIBURUTEGIA_USER")?;
            let client = LiburutegiaClient::from_base_url(&cli.api_url, user)?;
            run_client_command(&client, command).await
        }
    }
}

async fn run_client_command(client: &LiburutegiaClient, command: Commands) -> Result<()> {
    match command {
        Commands::Book { command } => books::run(client, command).await,
        Commands::Genre { command } => genres::run(client, command).await,
        Commands::File { command } => files::run(client, command).await,
        Commands::Stats(cmd) => stats::run(client, cmd).await,
        Commands::Suggest(cmd) => suggest::run(client, cmd).await,
        Commands::Serve(_) => anyhow::bail!("serve does not talk to a remote server"),
    }
}

async fn run_server(command: ServeCommand) -> Result<()> {
    if command.insecure_cookies {
        tracing::warn!("insecure cookies enabled - do not use in production");
    }

    let config = ServerConfig {
        bind_address: command.bind_address,
        database_url: command.database_url,
        insecure_cookies: command.insecure_cookies,
        openrouter_api_key: command.openrouter_api_key.unwrap_or_default(),
        openrouter_model: command.openrouter_model,
    };

    serve(config).await
}

#[allow(clippy::expect_used)] // Startup: panicking is appropriate if logging cannot be initialized
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("RUST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    // Logs go to stderr so CLI JSON output on stdout stays parseable.
    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}
