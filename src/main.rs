use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// REST API over Formula 1 constructors, drivers and circuits.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to PostgreSQL and serve the HTTP API.
    Serve(ServeArgs),
    /// Load and validate the settings, then print them without the password.
    CheckConfig,
}

#[derive(Parser)]
struct ServeArgs {
    /// Port to listen on. Overrides the PORT environment variable.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; the variables may come from the real environment.
    dotenvy::dotenv().ok();

    let (writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(writer)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => handle_serve(args).await?,
        Commands::CheckConfig => handle_check_config()?,
    }

    Ok(())
}

async fn handle_serve(args: ServeArgs) -> Result<()> {
    let mut settings = configuration::load_settings().context("Failed to load settings")?;
    if let Some(port) = args.port {
        settings.port = port;
    }

    tracing::info!(
        port = settings.port,
        db_host = %settings.database.host,
        db_name = %settings.database.name,
        "Starting F1 API."
    );
    web_server::run_server(&settings).await
}

fn handle_check_config() -> Result<()> {
    let settings = configuration::load_settings().context("Failed to load settings")?;
    println!("--- Configuration OK ---");
    println!("  Port:     {}", settings.port);
    println!("  DB User:  {}", settings.database.user);
    println!("  DB Host:  {}:{}", settings.database.host, settings.database.port);
    println!("  DB Name:  {}", settings.database.name);
    Ok(())
}
