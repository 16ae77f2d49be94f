// JSON-RPC client for a running ledger service
use reqwest::Client;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::account::{Account, Transition, UserId};
use crate::rpc::types::ProvisionResponse;

/// Talks to the service's JSON-RPC endpoint. Used by the CLI and by
/// gateway processes; neither ever touches the ledger file itself.
pub struct LedgerClient {
    url: String,
    client: Client,
    request_id: AtomicU64,
}

impl LedgerClient {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: Client::new(),
            request_id: AtomicU64::new(1),
        }
    }

    // Helper for sending requests
    async fn send_request(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("RPC request failed: {}", e))?;

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))?;

        if let Some(error) = json.get("error") {
            return Err(error["message"].as_str().unwrap_or("Unknown error").to_string());
        }

        Ok(json["result"].clone())
    }

    pub async fn provision(
        &self,
        user_id: &str,
        starting_credits: Option<u64>,
    ) -> Result<ProvisionResponse, String> {
        let res = self
            .send_request(
                "provision",
                json!({ "user_id": user_id, "starting_credits": starting_credits }),
            )
            .await?;
        serde_json::from_value(res).map_err(|e| format!("Failed to parse provision result: {}", e))
    }

    pub async fn get_account(&self, user_id: &str) -> Result<Account, String> {
        let res = self
            .send_request("getAccount", json!({ "user_id": user_id }))
            .await?;
        serde_json::from_value(res).map_err(|e| format!("Failed to parse account: {}", e))
    }

    pub async fn transact(
        &self,
        user_id: &str,
        transition: &Transition,
    ) -> Result<Account, String> {
        let res = self
            .send_request(
                "transact",
                json!({ "user_id": user_id, "transition": transition }),
            )
            .await?;
        serde_json::from_value(res).map_err(|e| format!("Failed to parse account: {}", e))
    }

    pub async fn list_users(&self) -> Result<Vec<UserId>, String> {
        let res = self.send_request("listUsers", json!(null)).await?;
        let users_val = res.get("users").ok_or("No 'users' field in response")?;
        serde_json::from_value(users_val.clone())
            .map_err(|e| format!("Failed to parse users: {}", e))
    }

    /// Forward one chat line; `None` means the service chose not to reply.
    pub async fn command(&self, user_id: &str, text: &str) -> Result<Option<String>, String> {
        let res = self
            .send_request("command", json!({ "user_id": user_id, "text": text }))
            .await?;
        Ok(res["reply"].as_str().map(|s| s.to_string()))
    }

    pub async fn get_version(&self) -> Result<String, String> {
        let res = self.send_request("getVersion", json!(null)).await?;
        Ok(res["version"].as_str().unwrap_or("unknown").to_string())
    }
}
