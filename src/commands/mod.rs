//! Chat command adapter.
//!
//! Turns one incoming chat line into store calls and a reply string.
//! Strictly request/response: a gateway process (Discord bridge, test
//! harness, CLI) sends the raw line and the author's user id, and gets
//! back either a reply to post or nothing. All user-facing text lives
//! here; the store never formats anything.

pub mod catalog;

use std::sync::Arc;

use crate::account::{AccountStore, Provisioned};
use crate::error::LedgerError;

/// Prefix a line must carry to be treated as a command.
pub const COMMAND_PREFIX: char = '!';

/// The recognized command set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    Ping,
    Enter,
    Balance,
    Packs,
    Commands,
}

impl ChatCommand {
    /// Match a bare keyword (no prefix, no arguments) to a command.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "ping" => Some(ChatCommand::Ping),
            "enter" => Some(ChatCommand::Enter),
            "balance" | "bal" => Some(ChatCommand::Balance),
            "packs" => Some(ChatCommand::Packs),
            "commands" | "cmds" => Some(ChatCommand::Commands),
            _ => None,
        }
    }
}

/// Stateless front door over the store: one `handle` call per chat line.
pub struct CommandAdapter {
    store: Arc<AccountStore>,
    starting_credits: u64,
}

impl CommandAdapter {
    pub fn new(store: Arc<AccountStore>, starting_credits: u64) -> Self {
        Self {
            store,
            starting_credits,
        }
    }

    /// Handle one chat line from a user.
    ///
    /// `Ok(None)` means the line was not addressed to us and deserves no
    /// reply. `NotProvisioned` never escapes here (it becomes the join
    /// prompt); the remaining error kinds propagate for the caller to
    /// report.
    pub async fn handle(
        &self,
        user_id: &str,
        text: &str,
    ) -> Result<Option<String>, LedgerError> {
        let line = text.trim();
        let rest = match line.strip_prefix(COMMAND_PREFIX) {
            Some(rest) => rest,
            None => return Ok(None),
        };
        let keyword = rest.split_whitespace().next().unwrap_or("");

        let reply = match ChatCommand::from_keyword(keyword) {
            Some(ChatCommand::Ping) => "Pong!".to_string(),
            Some(ChatCommand::Enter) => self.enter(user_id).await?,
            Some(ChatCommand::Balance) => self.balance(user_id).await?,
            Some(ChatCommand::Packs) => render_packs(),
            Some(ChatCommand::Commands) => render_help(),
            None => {
                "That command doesn't exist! Use `!commands` to see all available commands."
                    .to_string()
            }
        };
        Ok(Some(reply))
    }

    async fn enter(&self, user_id: &str) -> Result<String, LedgerError> {
        match self
            .store
            .ensure_account(user_id, self.starting_credits)
            .await?
        {
            Provisioned::Created => Ok(format!(
                "Welcome! So you've finally decided to join the leagues.\n\
                 Starter loot: \u{1f4b5} {} big bucks \u{1f4b5} deposited into your account.",
                self.starting_credits
            )),
            Provisioned::AlreadyExists => {
                Ok("You've already joined! Use !balance to check your credits.".to_string())
            }
        }
    }

    async fn balance(&self, user_id: &str) -> Result<String, LedgerError> {
        match self.store.get_account(user_id).await {
            Ok(account) => Ok(format!(
                "235th Credits: \u{1f4b5} {}\nSand Grain Credits: \u{1f31f} {}",
                account.credits, account.sgc
            )),
            Err(LedgerError::NotProvisioned(_)) => {
                Ok("You haven't joined yet! Use !enter to start.".to_string())
            }
            Err(err) => Err(err),
        }
    }
}

/// The pack catalog, both currencies.
pub fn render_packs() -> String {
    let mut out = String::from("Available Card Packs\n\nCredit Packs:\n");
    for (name, price) in catalog::PACK_PRICES {
        out.push_str(&format!("{} Pack: {} Credits\n", title(name), price));
    }
    out.push_str("\nSGC Packs:\n");
    for (name, price) in catalog::PACK_SGC_PRICES {
        out.push_str(&format!("{} Pack: {} SGC\n", title(name), price));
    }
    out.trim_end().to_string()
}

/// Grouped help text.
pub fn render_help() -> String {
    [
        "TCG Bot Help",
        "",
        "Getting Started:",
        "`!enter`: Join the game and receive your starting credits",
        "`!commands` (`!cmds`): Show this help message",
        "",
        "Economy:",
        "`!balance` (`!bal`): Check your credits and SGC balance",
        "`!packs`: View available card packs",
        "",
        "More features coming soon!",
    ]
    .join("\n")
}

fn title(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
