use thiserror::Error;

/// Error vocabulary shared by every ledger operation.
///
/// "Account already exists" is deliberately not in here: provisioning is
/// idempotent and reports it as a normal `Provisioned::AlreadyExists`
/// outcome to branch on (see `account::store`).
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("account not provisioned: {0}")]
    NotProvisioned(String),
    #[error("invalid transition: {0}")]
    InvalidTransition(String),
    #[error("ledger file corrupted: {0}")]
    CorruptStore(String),
    #[error("I/O failure: {0}")]
    IOFailure(#[from] std::io::Error),
}

impl LedgerError {
    /// Transient errors are safe to retry with the same call: no store
    /// operation leaves partial state behind.
    pub fn is_transient(&self) -> bool {
        matches!(self, LedgerError::IOFailure(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_io_failures_are_transient() {
        let io = LedgerError::IOFailure(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk fell over",
        ));
        assert!(io.is_transient());

        assert!(!LedgerError::NotProvisioned("u1".to_string()).is_transient());
        assert!(!LedgerError::InvalidTransition("overdraft".to_string()).is_transient());
        assert!(!LedgerError::CorruptStore("bad json".to_string()).is_transient());
    }
}
