//! Trolley operator CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use trolley_app::context::AppContext;

#[derive(Debug, Parser)]
#[command(name = "trolley-app", about = "Trolley CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Owner(OwnerCommand),
}

#[derive(Debug, Args)]
struct OwnerCommand {
    #[command(subcommand)]
    command: OwnerSubcommand,
}

#[derive(Debug, Subcommand)]
enum OwnerSubcommand {
    Create(CreateOwnerArgs),
}

#[derive(Debug, Args)]
struct CreateOwnerArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Owner(OwnerCommand {
            command: OwnerSubcommand::Create(args),
        }) => create_owner(args).await,
    }
}

async fn create_owner(args: CreateOwnerArgs) -> Result<(), String> {
    let context = AppContext::from_database_url(&args.database_url)
        .await
        .map_err(|error| format!("failed to initialise application: {error}"))?;

    let credentials = context
        .auth
        .register_owner()
        .await
        .map_err(|error| format!("failed to create owner: {error}"))?;

    println!("owner_uuid: {}", credentials.owner);
    println!("api_token: {}", credentials.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
