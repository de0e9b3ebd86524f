//! Maintenance commands for the store database.
//!
//! ```bash
//! store-cli migrate
//! store-cli admin create --username root --email root@example.com --password 's3cret-pass'
//! store-cli admin promote --email jane@example.com
//! store-cli admin set-password --email jane@example.com --password 'n3w-pass'
//! ```

use clap::{Parser, Subcommand};
use dotenvy::dotenv;

use pushkind_store::config::ServerConfig;
use pushkind_store::db::{establish_connection_pool, run_migrations};
use pushkind_store::repository::DieselRepository;
use pushkind_store::services::auth::{create_admin, promote_admin, reset_password};

#[derive(Parser)]
#[command(name = "store-cli")]
#[command(author, version, about = "Store maintenance tools")]
struct Cli {
    /// SQLite database file, overrides DATABASE_URL
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run pending database migrations
    Migrate,
    /// Manage administrator accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new administrator account
    Create {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Grant admin rights to an existing account
    Promote {
        #[arg(short, long)]
        email: String,
    },
    /// Replace the password of an account
    SetPassword {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
}

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        log::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let database_url = cli
        .database_url
        .unwrap_or_else(|| ServerConfig::from_env().database_url);
    let pool = establish_connection_pool(&database_url)?;

    {
        let mut conn = pool.get()?;
        let applied = run_migrations(&mut conn)?;
        if applied > 0 {
            log::info!("Applied {applied} pending migration(s) to {database_url}");
        }
    }

    let repo = DieselRepository::new(pool);

    match cli.command {
        Commands::Migrate => log::info!("Database {database_url} is up to date"),
        Commands::Admin { action } => match action {
            AdminAction::Create {
                username,
                email,
                password,
            } => {
                let user = create_admin(&repo, &username, &email, &password)?;
                log::info!("Created admin {} <{}>", user.username, user.email);
            }
            AdminAction::Promote { email } => {
                let user = promote_admin(&repo, &email)?;
                log::info!("{} is now an admin", user.email);
            }
            AdminAction::SetPassword { email, password } => {
                let user = reset_password(&repo, &email, &password)?;
                log::info!("Password updated for {}", user.email);
            }
        },
    }

    Ok(())
}
