use std::sync::Arc;

use clap::Parser;
use tracing::info;

use legion_ledger::account::AccountStore;
use legion_ledger::cli::{ops, Cli, Commands};
use legion_ledger::commands::CommandAdapter;
use legion_ledger::config::LedgerConfig;
use legion_ledger::ledger::LedgerFile;
use legion_ledger::maintenance::DailyResetTask;
use legion_ledger::rpc::RpcServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) | None => run_service(&cli.config).await?,
        Some(Commands::Provision {
            user_id,
            starting_credits,
            url,
        }) => {
            ops::handle_provision_command(url, user_id, starting_credits).await;
        }
        Some(Commands::Balance { user_id, url }) => {
            ops::handle_balance_command(url, user_id).await;
        }
        Some(Commands::Show { user_id, url }) => {
            ops::handle_show_command(url, user_id).await;
        }
        Some(Commands::Transact {
            user_id,
            transition,
            url,
        }) => {
            ops::handle_transact_command(url, user_id, transition).await;
        }
        Some(Commands::Chat { user_id, text, url }) => {
            ops::handle_chat_command(url, user_id, text).await;
        }
        Some(Commands::Users { url }) => {
            ops::handle_users_command(url).await;
        }
        Some(Commands::Inspect { file }) => {
            ops::handle_inspect_command(file, &cli.config);
        }
    }

    Ok(())
}

async fn run_service(config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = LedgerConfig::load_or_default(config_path);

    // RUST_LOG wins; the config level is the fallback.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.service.log_level)),
        )
        .init();

    info!("Legion ledger service starting");
    info!("Ledger file: {}", config.ledger.data_file);

    let ledger = LedgerFile::new(config.ledger.data_file.clone());
    let store = Arc::new(AccountStore::open(ledger)?);
    let adapter = Arc::new(CommandAdapter::new(
        Arc::clone(&store),
        config.economy.starting_credits,
    ));

    let reset_task = DailyResetTask::new(Arc::clone(&store), config.economy.daily_battles);
    tokio::spawn(reset_task.start());

    let server = RpcServer::new(
        store,
        adapter,
        config.economy.starting_credits,
        config.service.rpc_port,
    );
    server.start().await;

    Ok(())
}
