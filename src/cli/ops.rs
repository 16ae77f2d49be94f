use crate::account::{Provisioned, Transition};
use crate::client::LedgerClient;
use crate::config::LedgerConfig;
use crate::ledger::LedgerDocument;

pub async fn handle_provision_command(
    url: String,
    user_id: String,
    starting_credits: Option<u64>,
) {
    let client = LedgerClient::new(url);
    match client.provision(&user_id, starting_credits).await {
        Ok(outcome) => match outcome.status {
            Provisioned::Created => println!(
                "Created account for {} with {} credits",
                user_id, outcome.account.credits
            ),
            Provisioned::AlreadyExists => println!(
                "{} already has an account ({} credits, untouched)",
                user_id, outcome.account.credits
            ),
        },
        Err(e) => println!("Provision failed: {}", e),
    }
}

pub async fn handle_balance_command(url: String, user_id: String) {
    let client = LedgerClient::new(url);
    match client.get_account(&user_id).await {
        Ok(account) => {
            println!("235th Credits:      {}", account.credits);
            println!("Sand Grain Credits: {}", account.sgc);
        }
        Err(e) => println!("Balance check failed: {}", e),
    }
}

pub async fn handle_show_command(url: String, user_id: String) {
    let client = LedgerClient::new(url);
    match client.get_account(&user_id).await {
        Ok(account) => match serde_json::to_string_pretty(&account) {
            Ok(json) => println!("{}", json),
            Err(e) => println!("Failed to render account: {}", e),
        },
        Err(e) => println!("Lookup failed: {}", e),
    }
}

pub async fn handle_transact_command(url: String, user_id: String, transition_json: String) {
    let transition: Transition = match serde_json::from_str(&transition_json) {
        Ok(t) => t,
        Err(e) => {
            println!("Invalid transition JSON: {}", e);
            return;
        }
    };

    let client = LedgerClient::new(url);
    match client.transact(&user_id, &transition).await {
        Ok(account) => println!(
            "Applied. Credits: {}, SGC: {}, battles remaining: {}",
            account.credits, account.sgc, account.battles_remaining
        ),
        Err(e) => println!("Transact failed: {}", e),
    }
}

pub async fn handle_chat_command(url: String, user_id: String, text: String) {
    let client = LedgerClient::new(url);
    match client.command(&user_id, &text).await {
        Ok(Some(reply)) => println!("{}", reply),
        Ok(None) => println!("(no reply)"),
        Err(e) => println!("Chat failed: {}", e),
    }
}

pub async fn handle_users_command(url: String) {
    let client = LedgerClient::new(url);
    match client.list_users().await {
        Ok(users) => {
            println!("{} account(s)", users.len());
            for user in users {
                println!(" - {}", user);
            }
        }
        Err(e) => println!("List failed: {}", e),
    }
}

/// Read-only peek at the ledger file, bypassing the service. Safe while
/// a service is running: saves are atomic renames, so this sees a
/// complete old or new document, never a torn one.
pub fn handle_inspect_command(file: Option<String>, config_path: &str) {
    let path = match file {
        Some(path) => path,
        // Peek at the config without materializing a default one.
        None if std::path::Path::new(config_path).exists() => {
            LedgerConfig::load_or_default(config_path).ledger.data_file
        }
        None => LedgerConfig::default().ledger.data_file,
    };

    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) => {
            println!("Could not read {}: {}", path, e);
            return;
        }
    };

    match serde_json::from_str::<LedgerDocument>(&raw) {
        Ok(document) => {
            println!("{} account(s) in {}", document.len(), path);
            match serde_json::to_string_pretty(&document) {
                Ok(json) => println!("{}", json),
                Err(e) => println!("Failed to render document: {}", e),
            }
        }
        Err(e) => println!("Ledger file does not parse as an account document: {}", e),
    }
}
