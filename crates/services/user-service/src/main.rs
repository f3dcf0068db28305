//! User Service - HTTP server for user management.

use clap::{Parser, Subcommand};

use user_service_lib::config::UserServiceConfig;
use user_service_lib::{logging, MigrateAction};

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User management REST service")]
struct Cli {
    /// Force debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "SERVER_PORT", default_value = "80")]
        port: u16,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = UserServiceConfig::from_env();

    if let Err(err) = logging::init(&config.log, cli.verbose) {
        eprintln!("failed to open log files: {}", err);
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Serve { host, port } => user_service_lib::run_server(&host, port, config).await,
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            user_service_lib::run_migrations(migrate_action, &config).await
        }
    };

    if let Err(err) = result {
        tracing::error!(error = %err, "user-service failed");
        std::process::exit(1);
    }
}
