use serde::{Deserialize, Serialize};

use crate::account::types::DAILY_BATTLE_LIMIT;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LedgerConfig {
    pub service: ServiceConfig,
    pub ledger: LedgerFileConfig,
    pub economy: EconomyConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceConfig {
    pub rpc_port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LedgerFileConfig {
    /// Path of the single backing document. The running service owns it
    /// exclusively; nothing else may write it.
    pub data_file: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EconomyConfig {
    /// Credits deposited when a user first enters the game.
    #[serde(default = "default_starting_credits")]
    pub starting_credits: u64,
    /// Value `battles_remaining` is restored to by the daily reset.
    #[serde(default = "default_daily_battles")]
    pub daily_battles: u32,
}

fn default_starting_credits() -> u64 {
    500
}

fn default_daily_battles() -> u32 {
    DAILY_BATTLE_LIMIT
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                rpc_port: 9000,
                log_level: "info".to_string(),
            },
            ledger: LedgerFileConfig {
                data_file: "user_possessions.json".to_string(),
            },
            economy: EconomyConfig {
                starting_credits: 500,
                daily_battles: DAILY_BATTLE_LIMIT,
            },
        }
    }
}

impl LedgerConfig {
    pub fn load_or_default(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            match std::fs::read_to_string(path) {
                Ok(s) => match toml::from_str(&s) {
                    Ok(c) => c,
                    Err(e) => {
                        eprintln!("Error parsing config: {}. Using defaults.", e);
                        Self::default()
                    }
                },
                Err(e) => {
                    eprintln!("Error reading config: {}. Using defaults.", e);
                    Self::default()
                }
            }
        } else {
            let config = Self::default();
            if let Ok(s) = toml::to_string_pretty(&config) {
                let _ = std::fs::write(path, s);
            }
            config
        }
    }
}
