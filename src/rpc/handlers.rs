use super::types::*;
use crate::rpc::RpcState;
use axum::{debug_handler, extract::State, Json};
use tracing::debug;

/// Main dispatcher: routes incoming JSON-RPC requests to the correct handler.
#[debug_handler]
pub async fn handle_rpc_request(
    State(state): State<RpcState>,
    Json(req): Json<RpcRequest>,
) -> Json<RpcResponse> {
    debug!("RPC Request: method={}, id={}", req.method, req.id);

    let result = match req.method.as_str() {
        "provision" => handle_provision(&state, req.params).await,
        "getAccount" => handle_get_account(&state, req.params).await,
        "transact" => handle_transact(&state, req.params).await,
        "listUsers" => handle_list_users(&state).await,
        "command" => handle_command(&state, req.params).await,
        "getVersion" => handle_get_version().await,
        _ => Err(RpcError {
            code: -32601,
            message: format!("Method not found: {}", req.method),
        }),
    };

    // Build response
    match result {
        Ok(val) => Json(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(val),
            error: None,
            id: req.id,
        }),
        Err(err) => Json(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(err),
            id: req.id,
        }),
    }
}

//
// === Helper Functions ===
//

/// Deserialize method params, mapping failures to -32602.
fn parse_params<T: serde::de::DeserializeOwned>(params: serde_json::Value) -> Result<T, RpcError> {
    serde_json::from_value(params).map_err(|e| RpcError {
        code: -32602,
        message: format!("Invalid params: {}", e),
    })
}

/// Safely serialize to JSON value
fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, RpcError> {
    serde_json::to_value(value).map_err(|e| RpcError {
        code: -32603,
        message: format!("Serialization error: {}", e),
    })
}

//
// === Individual Handlers ===
//

/// Handle provision(user_id, starting_credits?)
async fn handle_provision(
    state: &RpcState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let req: ProvisionParams = parse_params(params)?;
    let starting = req
        .starting_credits
        .unwrap_or(state.default_starting_credits);

    let status = state.store.ensure_account(&req.user_id, starting).await?;
    let account = state.store.get_account(&req.user_id).await?;
    to_json(&ProvisionResponse { status, account })
}

/// Handle getAccount(user_id)
async fn handle_get_account(
    state: &RpcState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let req: GetAccountParams = parse_params(params)?;
    let account = state.store.get_account(&req.user_id).await?;
    to_json(&account)
}

/// Handle transact(user_id, transition)
async fn handle_transact(
    state: &RpcState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let req: TransactParams = parse_params(params)?;
    let account = state.store.apply(&req.user_id, &req.transition).await?;
    to_json(&account)
}

/// Handle listUsers()
async fn handle_list_users(state: &RpcState) -> Result<serde_json::Value, RpcError> {
    let users = state.store.user_ids().await?;
    to_json(&ListUsersResponse { users })
}

/// Handle command(user_id, text): gateway passthrough to the chat adapter.
async fn handle_command(
    state: &RpcState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let req: CommandParams = parse_params(params)?;
    let reply = state.adapter.handle(&req.user_id, &req.text).await?;
    to_json(&CommandResponse { reply })
}

/// Handle getVersion()
async fn handle_get_version() -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::json!({ "version": env!("CARGO_PKG_VERSION") }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AccountStore, Transition};
    use crate::commands::CommandAdapter;
    use crate::ledger::LedgerFile;
    use std::sync::Arc;

    fn state_in(dir: &tempfile::TempDir) -> RpcState {
        let ledger = LedgerFile::new(dir.path().join("possessions.json"));
        let store = Arc::new(AccountStore::open(ledger).unwrap());
        let adapter = Arc::new(CommandAdapter::new(Arc::clone(&store), 500));
        RpcState {
            store,
            adapter,
            default_starting_credits: 500,
        }
    }

    fn request(method: &str, params: serde_json::Value) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: 7,
        }
    }

    async fn call(state: &RpcState, method: &str, params: serde_json::Value) -> RpcResponse {
        handle_rpc_request(State(state.clone()), Json(request(method, params))).await.0
    }

    #[tokio::test]
    async fn provision_reports_created_then_already_exists() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(&dir);

        let params = serde_json::json!({ "user_id": "u1" });
        let first = call(&state, "provision", params.clone()).await;
        let result = first.result.unwrap();
        assert_eq!(result["status"], "created");
        assert_eq!(result["account"]["credits"], 500);

        let second = call(&state, "provision", params).await;
        assert_eq!(second.result.unwrap()["status"], "already_exists");
    }

    #[tokio::test]
    async fn transact_runs_a_transition() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(&dir);
        state.store.ensure_account("u1", 500).await.unwrap();

        let response = call(
            &state,
            "transact",
            serde_json::json!({
                "user_id": "u1",
                "transition": serde_json::to_value(Transition::DebitCredits { amount: 50 }).unwrap(),
            }),
        )
        .await;

        assert_eq!(response.result.unwrap()["credits"], 450);
    }

    #[tokio::test]
    async fn overdraft_maps_to_invalid_transition_code() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(&dir);
        state.store.ensure_account("u1", 100).await.unwrap();

        let response = call(
            &state,
            "transact",
            serde_json::json!({
                "user_id": "u1",
                "transition": { "debit_credits": { "amount": 1000 } },
            }),
        )
        .await;

        assert_eq!(response.error.unwrap().code, -32002);
        assert_eq!(
            state.store.get_account("u1").await.unwrap().credits,
            100
        );
    }

    #[tokio::test]
    async fn unknown_user_maps_to_not_provisioned_code() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(&dir);

        let response = call(
            &state,
            "getAccount",
            serde_json::json!({ "user_id": "ghost" }),
        )
        .await;
        assert_eq!(response.error.unwrap().code, -32001);
    }

    #[tokio::test]
    async fn unknown_method_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(&dir);

        let response = call(&state, "openPack", serde_json::Value::Null).await;
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn malformed_params_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(&dir);

        let response = call(&state, "getAccount", serde_json::json!({ "user": 5 })).await;
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn command_passthrough_replies() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(&dir);

        let response = call(
            &state,
            "command",
            serde_json::json!({ "user_id": "u1", "text": "!ping" }),
        )
        .await;
        assert_eq!(response.result.unwrap()["reply"], "Pong!");

        let silent = call(
            &state,
            "command",
            serde_json::json!({ "user_id": "u1", "text": "just chatting" }),
        )
        .await;
        assert_eq!(silent.result.unwrap()["reply"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn list_users_sees_provisioned_accounts() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(&dir);
        state.store.ensure_account("u1", 500).await.unwrap();
        state.store.ensure_account("u2", 500).await.unwrap();

        let response = call(&state, "listUsers", serde_json::Value::Null).await;
        let mut users: Vec<String> =
            serde_json::from_value(response.result.unwrap()["users"].clone()).unwrap();
        users.sort();
        assert_eq!(users, vec!["u1".to_string(), "u2".to_string()]);
    }
}
