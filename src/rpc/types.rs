// RPC types for JSON-RPC 2.0 protocol
use serde::{Deserialize, Serialize};

use crate::account::{Account, Provisioned, Transition, UserId};
use crate::error::LedgerError;

#[derive(Deserialize, Debug)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: u64,
}

#[derive(Serialize, Debug)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

/// Wire codes for the ledger error kinds. Parameter and dispatch
/// failures use the reserved JSON-RPC codes (-32601, -32602, -32603).
impl From<LedgerError> for RpcError {
    fn from(err: LedgerError) -> Self {
        let code = match &err {
            LedgerError::NotProvisioned(_) => -32001,
            LedgerError::InvalidTransition(_) => -32002,
            LedgerError::CorruptStore(_) => -32010,
            LedgerError::IOFailure(_) => -32011,
        };
        RpcError {
            code,
            message: err.to_string(),
        }
    }
}

// Method-specific parameter types

#[derive(Deserialize, Debug)]
pub struct ProvisionParams {
    pub user_id: UserId,
    /// Falls back to the configured economy default when omitted.
    #[serde(default)]
    pub starting_credits: Option<u64>,
}

#[derive(Deserialize, Debug)]
pub struct GetAccountParams {
    pub user_id: UserId,
}

#[derive(Deserialize, Debug)]
pub struct TransactParams {
    pub user_id: UserId,
    pub transition: Transition,
}

#[derive(Deserialize, Debug)]
pub struct CommandParams {
    pub user_id: UserId,
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ProvisionResponse {
    pub status: Provisioned,
    pub account: Account,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ListUsersResponse {
    pub users: Vec<UserId>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CommandResponse {
    /// `None` when the line was not a command and gets no reply.
    pub reply: Option<String>,
}
