//! The account store.
//!
//! Sole authority over account state. The backing file handle lives
//! inside a single async mutex, so no operation can touch the document
//! without holding the gate. Each operation reloads the document, works
//! on it and persists the result before releasing, which rules out the
//! read-both-then-clobber race between concurrent commands and means a
//! corrupt backing file refuses every further operation until the
//! process is restarted against a valid one.
//!
//! Nothing suspends between reload and persist: the critical section is
//! purely synchronous, so a caller cancelled mid-operation has either
//! not entered it or run it to completion.

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::info;

use crate::account::transition::Transition;
use crate::account::types::{Account, UserId};
use crate::error::LedgerError;
use crate::ledger::LedgerFile;

/// Outcome of [`AccountStore::ensure_account`]. Both arms are normal
/// results to branch on, not errors.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Provisioned {
    Created,
    AlreadyExists,
}

/// Gatekeeper for the ledger document. Clone-free; share it with
/// `Arc<AccountStore>`.
pub struct AccountStore {
    ledger: Mutex<LedgerFile>,
}

impl AccountStore {
    /// Open the store, forcing a first load so a missing backing file is
    /// materialized and a corrupt one is reported at startup instead of
    /// on the first command.
    pub fn open(ledger: LedgerFile) -> Result<Self, LedgerError> {
        let document = ledger.load()?;
        info!(
            "Account store opened: {} accounts in '{}'",
            document.len(),
            ledger.path().display()
        );
        Ok(Self {
            ledger: Mutex::new(ledger),
        })
    }

    /// Provision an account if the user has none.
    ///
    /// Idempotent: an existing account is never overwritten or reshaped,
    /// whatever starting balance is offered the second time.
    pub async fn ensure_account(
        &self,
        user_id: &str,
        starting_credits: u64,
    ) -> Result<Provisioned, LedgerError> {
        let ledger = self.ledger.lock().await;
        let mut document = ledger.load()?;

        if document.contains_key(user_id) {
            return Ok(Provisioned::AlreadyExists);
        }

        document.insert(user_id.to_string(), Account::new(starting_credits));
        ledger.save(&document)?;
        info!(
            "Provisioned account for {} with {} starting credits",
            user_id, starting_credits
        );
        Ok(Provisioned::Created)
    }

    /// Snapshot of one account.
    ///
    /// The returned copy is detached: mutating it changes nothing. All
    /// writes go through [`AccountStore::update`].
    pub async fn get_account(&self, user_id: &str) -> Result<Account, LedgerError> {
        let ledger = self.ledger.lock().await;
        let document = ledger.load()?;
        document
            .get(user_id)
            .cloned()
            .ok_or_else(|| LedgerError::NotProvisioned(user_id.to_string()))
    }

    /// Transactional read-modify-write of one account.
    ///
    /// The transform runs against a working copy under the gate. If it
    /// returns `Err`, nothing is persisted and the stored account is
    /// exactly as before. On `Ok` the candidate replaces the stored
    /// account and the whole document is persisted before the gate is
    /// released. Returns the account as persisted.
    pub async fn update<F>(&self, user_id: &str, transform: F) -> Result<Account, LedgerError>
    where
        F: FnOnce(&mut Account) -> Result<(), LedgerError>,
    {
        let ledger = self.ledger.lock().await;
        let mut document = ledger.load()?;

        let stored = document
            .get_mut(user_id)
            .ok_or_else(|| LedgerError::NotProvisioned(user_id.to_string()))?;

        let mut candidate = stored.clone();
        transform(&mut candidate)?;
        *stored = candidate.clone();

        ledger.save(&document)?;
        Ok(candidate)
    }

    /// Run a described transition through [`AccountStore::update`]. This
    /// is the path the RPC boundary and the maintenance task use.
    pub async fn apply(
        &self,
        user_id: &str,
        transition: &Transition,
    ) -> Result<Account, LedgerError> {
        self.update(user_id, |account| transition.apply(account))
            .await
    }

    /// Every provisioned user id, in document order (unspecified).
    pub async fn user_ids(&self) -> Result<Vec<UserId>, LedgerError> {
        let ledger = self.ledger.lock().await;
        let document = ledger.load()?;
        Ok(document.keys().cloned().collect())
    }
}
