//! Auth Service - operator tooling for credentials and tokens.

use auth_service_lib::{AuthServiceConfig, Identity, TokenIssuer};
use clap::{Parser, Subcommand};
use domain::Password;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "auth-service")]
#[command(about = "Employee credential and token tooling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the stored form of a plaintext password
    HashPassword {
        plaintext: String,
    },
    /// Sign a bearer token for an employee
    IssueToken {
        #[arg(long)]
        employee_id: i64,
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        role_id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::HashPassword { plaintext } => {
            println!("{}", Password::hash(&plaintext).as_str());
        }
        Commands::IssueToken {
            employee_id,
            email,
            first_name,
            last_name,
            role_id,
        } => {
            let config = AuthServiceConfig::from_env()?;
            let issuer = TokenIssuer::new(config.jwt)?;

            let issued = issuer.issue(&Identity {
                employee_id,
                email: email.trim().to_lowercase(),
                first_name,
                last_name,
                role_id,
            })?;
            println!("{}", issued.access_token);
        }
    }

    Ok(())
}
