pub mod ops;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "legion-ledger")]
#[command(about = "235th Legion economy ledger service", long_about = None)]
pub struct Cli {
    /// Path to the service config file
    #[arg(long, default_value = "ledger.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the ledger service (RPC endpoint + daily maintenance)
    Serve,
    /// Provision an account for a user id
    Provision {
        user_id: String,
        #[arg(long)]
        starting_credits: Option<u64>,
        #[arg(long, default_value = "http://localhost:9000")]
        url: String,
    },
    /// Show both currency balances for a user
    Balance {
        user_id: String,
        #[arg(long, default_value = "http://localhost:9000")]
        url: String,
    },
    /// Dump the full account record for a user
    Show {
        user_id: String,
        #[arg(long, default_value = "http://localhost:9000")]
        url: String,
    },
    /// Apply one transition to an account
    Transact {
        user_id: String,
        /// Transition as JSON, e.g. '{"debit_credits":{"amount":30}}'
        transition: String,
        #[arg(long, default_value = "http://localhost:9000")]
        url: String,
    },
    /// Send a chat line through the command adapter
    Chat {
        user_id: String,
        text: String,
        #[arg(long, default_value = "http://localhost:9000")]
        url: String,
    },
    /// List provisioned user ids
    Users {
        #[arg(long, default_value = "http://localhost:9000")]
        url: String,
    },
    /// Pretty-print the ledger file without going through the service
    Inspect {
        /// Ledger file path; defaults to the configured data file
        #[arg(long)]
        file: Option<String>,
    },
}
