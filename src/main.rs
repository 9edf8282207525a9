use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shop_social::{
    config::AppConfig,
    db::create_orm_conn,
    migration::runner::{self, IrreversiblePolicy},
    schema,
};

/// Schema migration tool for the shop-social database.
#[derive(Parser, Debug)]
#[command(name = "shop-social")]
#[command(version, about = "Apply, roll back and inspect schema migrations")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending migrations
    Up {
        /// Apply at most N units
        #[arg(short = 'n', long)]
        steps: Option<u32>,
    },
    /// Roll back applied migrations, newest first
    Down {
        /// Number of units to revert
        #[arg(short = 'n', long, default_value_t = 1, conflicts_with = "all")]
        steps: u32,

        /// Revert every applied unit
        #[arg(long)]
        all: bool,

        /// Proceed past units whose inverse is a no-op on this backend
        #[arg(long)]
        allow_irreversible: bool,
    },
    /// List migrations and whether they are applied
    Status,
    /// Print the declared tables as JSON
    Schema,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,shop_social=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if let Command::Schema = args.command {
        println!("{}", serde_json::to_string_pretty(&schema::registry())?);
        return Ok(());
    }

    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config).await?;

    match args.command {
        Command::Up { steps } => {
            let applied = runner::apply(&orm, steps).await?;
            println!("applied {} migration(s)", applied.len());
            for unit in applied {
                println!("  {unit}");
            }
        }
        Command::Down {
            steps,
            all,
            allow_irreversible,
        } => {
            let policy = if allow_irreversible {
                IrreversiblePolicy::Flag
            } else {
                IrreversiblePolicy::Refuse
            };
            let steps = if all { None } else { Some(steps) };
            let report = runner::rollback(&orm, steps, policy).await?;
            println!("reverted {} migration(s)", report.reverted.len());
            for unit in &report.reverted {
                println!("  {unit}");
            }
            for flagged in &report.flagged {
                println!("  warning: {} left in place: {}", flagged.unit, flagged.reason);
            }
        }
        Command::Status => {
            for unit in runner::status(&orm).await? {
                let mark = if unit.applied { "applied" } else { "pending" };
                println!("{mark:<8} {}", unit.name);
            }
        }
        Command::Schema => {}
    }

    Ok(())
}
