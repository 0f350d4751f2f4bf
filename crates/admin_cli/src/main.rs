use std::error::Error;

use chrono::{Duration, Utc};
use clap::{Args, Parser, Subcommand};
use engine::{BalanceType, Bsk, Engine, NewTransaction};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use serde_json::{Value, json};

#[derive(Parser, Debug)]
#[command(name = "bskledger_admin")]
#[command(about = "Admin utilities for bskledger (record/seed/inspect history)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./bskledger.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a single history entry.
    Record(RecordArgs),
    /// Populate a user's history with one entry per activity kind.
    Seed(SeedArgs),
    /// Print a user's aggregate totals.
    Stats(StatsArgs),
}

#[derive(Args, Debug)]
struct RecordArgs {
    #[arg(long)]
    user_id: String,
    /// Signed decimal BSK amount, e.g. `25.50` or `-120`.
    #[arg(long)]
    amount: String,
    /// `withdrawable` or `holding`.
    #[arg(long, default_value = "withdrawable")]
    balance_type: String,
    #[arg(long)]
    tx_type: String,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    status: Option<String>,
}

#[derive(Args, Debug)]
struct SeedArgs {
    #[arg(long)]
    user_id: String,
}

#[derive(Args, Debug)]
struct StatsArgs {
    #[arg(long)]
    user_id: String,
}

async fn connect_db(database_url: &str) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::Record(args) => {
            let amount: Bsk = args.amount.parse()?;
            let balance_type = BalanceType::try_from(args.balance_type.as_str())?;
            let id = engine
                .record_transaction(NewTransaction {
                    user_id: args.user_id,
                    amount,
                    balance_type,
                    tx_type: args.tx_type,
                    description: args.description,
                    metadata: Value::Null,
                    status: args.status,
                    created_at: Utc::now(),
                })
                .await?;
            println!("recorded: {id}");
        }
        Command::Seed(args) => {
            let count = seed_history(&engine, &args.user_id).await?;
            println!("seeded {count} entries for {}", args.user_id);
        }
        Command::Stats(args) => {
            let stats = engine.statistics(&args.user_id).await?;
            println!("Total earned:  {} BSK", stats.total_earned);
            println!("Total spent:   {} BSK", stats.total_spent);
            println!("Net change:    {}", stats.net_change.format_signed());
            println!("Withdrawable:  {} BSK", stats.withdrawable_total);
            println!("Holding:       {} BSK", stats.holding_total);
        }
    }

    Ok(())
}

/// One entry per activity kind the history view can render, spread over the
/// last weeks so pagination and date grouping have something to show.
async fn seed_history(engine: &Engine, user_id: &str) -> Result<usize, Box<dyn Error + Send + Sync>> {
    let now = Utc::now();
    let entries: Vec<(i64, BalanceType, &str, Option<&str>, Value, Option<&str>)> = vec![
        (
            2550,
            BalanceType::Withdrawable,
            "transfer_in",
            Some("BSK transfer received"),
            json!({
                "sender_display_name": "Maya Rao",
                "sender_username": "maya_r",
                "from_wallet_type": "withdrawable",
                "to_wallet_type": "withdrawable"
            }),
            Some("completed"),
        ),
        (
            -1200,
            BalanceType::Withdrawable,
            "transfer_out",
            Some("BSK transfer sent"),
            json!({
                "recipient_display_name": "Arun Patel",
                "recipient_username": "arun_p",
                "from_wallet_type": "withdrawable",
                "to_wallet_type": "withdrawable"
            }),
            Some("completed"),
        ),
        (
            -50000,
            BalanceType::Withdrawable,
            "withdrawal",
            Some("Bank withdrawal"),
            json!({
                "withdrawal_type": "bank",
                "bank_name": "HDFC",
                "account_holder_name": "A. Sharma"
            }),
            Some("processing"),
        ),
        (
            -25000,
            BalanceType::Withdrawable,
            "withdrawal",
            Some("Crypto withdrawal"),
            json!({
                "withdrawal_type": "crypto",
                "crypto_symbol": "USDT",
                "crypto_address": "0x12345abcde67890fffff"
            }),
            Some("pending"),
        ),
        (
            10000,
            BalanceType::Withdrawable,
            "deposit",
            Some("BSK purchase"),
            Value::Null,
            Some("completed"),
        ),
        (
            5000,
            BalanceType::Withdrawable,
            "holding_to_withdrawable",
            Some("Holding release"),
            Value::Null,
            Some("completed"),
        ),
        (
            -5000,
            BalanceType::Holding,
            "holding_to_withdrawable",
            Some("Holding release"),
            Value::Null,
            Some("completed"),
        ),
        (
            750,
            BalanceType::Holding,
            "referral_commission_l1",
            Some("Level 1 referral"),
            Value::Null,
            Some("completed"),
        ),
        (
            120,
            BalanceType::Withdrawable,
            "ad_reward",
            Some("Daily ad view"),
            Value::Null,
            Some("completed"),
        ),
        (
            2000,
            BalanceType::Holding,
            "badge_purchase_bonus",
            Some("Gold badge bonus"),
            Value::Null,
            Some("completed"),
        ),
        (
            430,
            BalanceType::Holding,
            "staking_reward",
            Some("30-day stake payout"),
            Value::Null,
            Some("completed"),
        ),
        (
            15000,
            BalanceType::Withdrawable,
            "loan_disbursement",
            Some("BSK loan payout"),
            Value::Null,
            Some("completed"),
        ),
        (
            990,
            BalanceType::Holding,
            "quarterly_bonus_v2",
            None,
            Value::Null,
            Some("completed"),
        ),
        (
            -300,
            BalanceType::Withdrawable,
            "transfer_out",
            Some("BSK transfer sent"),
            json!({
                "recipient_username": "dee",
                "from_wallet_type": "withdrawable",
                "to_wallet_type": "holding"
            }),
            Some("failed"),
        ),
    ];

    let count = entries.len();
    for (offset, (amount, balance_type, tx_type, description, metadata, status)) in
        entries.into_iter().enumerate()
    {
        engine
            .record_transaction(NewTransaction {
                user_id: user_id.to_string(),
                amount: Bsk::new(amount),
                balance_type,
                tx_type: tx_type.to_string(),
                description: description.map(str::to_string),
                metadata,
                status: status.map(str::to_string),
                created_at: now - Duration::hours(6 * offset as i64),
            })
            .await?;
    }

    Ok(count)
}
