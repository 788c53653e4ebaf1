//! Operator CLI, modeled on `mqk-cli/src/main.rs`'s `clap` subcommand tree.
//! `db migrate`/`db status` give the daemon and consumer binaries a
//! migrations-already-applied precondition to rely on; `user register`
//! exists so a first account can be created without standing up the HTTP
//! gateway.

use anyhow::Result;
use clap::{Parser, Subcommand};

use tb_config::Config;
use tb_db::TxManager;
use tb_usecases::{AuthUseCases, RegisterInput};

#[derive(Parser)]
#[command(name = "tb")]
#[command(about = "task-board operator CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database commands
    Db {
        #[command(subcommand)]
        cmd: DbCmd,
    },
    /// User account commands
    User {
        #[command(subcommand)]
        cmd: UserCmd,
    },
}

#[derive(Subcommand)]
enum DbCmd {
    /// Apply pending migrations
    Migrate,
    /// Confirm the configured DSN is reachable
    Status,
}

#[derive(Subcommand)]
enum UserCmd {
    /// Register a new account and print its id + access token
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::from_env()?;

    match cli.cmd {
        Commands::Db { cmd } => {
            let pool = tb_db::connect(&cfg.postgres).await?;
            match cmd {
                DbCmd::Migrate => {
                    tb_db::migrate(&pool).await?;
                    println!("migrations_applied=true");
                }
                DbCmd::Status => {
                    sqlx::query("select 1").execute(&pool).await?;
                    println!("db_ok=true");
                }
            }
        }
        Commands::User { cmd } => match cmd {
            UserCmd::Register {
                email,
                username,
                password,
            } => {
                let pool = tb_db::connect(&cfg.postgres).await?;
                let tx = TxManager::new(pool);
                let auth = AuthUseCases::new(tx, cfg.jwt.clone());
                let result = auth
                    .register(RegisterInput {
                        email,
                        username,
                        password,
                    })
                    .await?;
                println!("user_id={}", result.user.id());
                println!("access_token={}", result.access_token);
            }
        },
    }

    Ok(())
}
