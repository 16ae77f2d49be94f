//! The durable ledger file.
//!
//! All account state lives in one JSON document mapping user id to
//! account record. The file is read and replaced wholesale: `load` parses
//! the entire document, `save` writes a sibling temp file, syncs it and
//! renames it over the original, so a crash mid-write never leaves a
//! half-written document behind. The store owns the only handle to this
//! file; nothing else in the process touches it.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::account::types::{Account, UserId};
use crate::error::LedgerError;

/// The whole persisted mapping, user id to account.
pub type LedgerDocument = HashMap<UserId, Account>;

/// Handle to the backing file. Cheap to construct; owns no open
/// descriptor between operations.
#[derive(Debug, Clone)]
pub struct LedgerFile {
    path: PathBuf,
}

impl LedgerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the full document.
    ///
    /// A missing file is the valid first-use state: it is normalized to an
    /// empty document, which is immediately persisted so the backing file
    /// exists from then on. A file that exists but does not parse as the
    /// expected schema is `CorruptStore`; OS-level read errors are
    /// `IOFailure`.
    pub fn load(&self) -> Result<LedgerDocument, LedgerError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let empty = LedgerDocument::new();
                self.save(&empty)?;
                info!("Created empty ledger file at '{}'", self.path.display());
                return Ok(empty);
            }
            Err(err) => return Err(LedgerError::IOFailure(err)),
        };

        serde_json::from_str(&raw).map_err(|err| {
            LedgerError::CorruptStore(format!("{}: {}", self.path.display(), err))
        })
    }

    /// Serialize the full document and atomically replace the file.
    ///
    /// The document is written to `<path>.tmp`, synced to disk, then
    /// renamed over the live file. Readers either see the old document or
    /// the new one, never a torn write.
    pub fn save(&self, document: &LedgerDocument) -> Result<(), LedgerError> {
        let data =
            serde_json::to_string_pretty(document).map_err(std::io::Error::from)?;

        let tmp = self.tmp_path();
        {
            let mut file = File::create(&tmp)?;
            file.write_all(data.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;

        debug!("Persisted {} accounts to '{}'", document.len(), self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::types::TeamRole;

    fn ledger_in(dir: &tempfile::TempDir) -> LedgerFile {
        LedgerFile::new(dir.path().join("user_possessions.json"))
    }

    #[test]
    fn missing_file_bootstraps_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);
        assert!(!ledger.path().exists());

        let document = ledger.load().unwrap();
        assert!(document.is_empty());

        // The file now exists and holds a valid empty document.
        let raw = fs::read_to_string(ledger.path()).unwrap();
        let reparsed: LedgerDocument = serde_json::from_str(&raw).unwrap();
        assert!(reparsed.is_empty());
    }

    #[test]
    fn round_trip_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);

        let mut account = Account::new(500);
        // 2^53 + 1 is not representable as f64; exact round-trip proves
        // integers never pass through floating point.
        account.credits = 9_007_199_254_740_993;
        account.sgc = 25;
        account.grant_card("ct-7567_rex".to_string());
        account.assign_role(TeamRole::Assault, "ct-7567_rex".to_string()).unwrap();
        account.set_battle_cooldown(1_755_900_000);

        let mut document = LedgerDocument::new();
        document.insert("111222333".to_string(), account);

        ledger.save(&document).unwrap();
        let first = ledger.load().unwrap();
        ledger.save(&first).unwrap();
        let second = ledger.load().unwrap();

        assert_eq!(document, first);
        assert_eq!(first, second);
    }

    #[test]
    fn save_replaces_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);

        let mut first = LedgerDocument::new();
        first.insert("a".to_string(), Account::new(500));
        first.insert("b".to_string(), Account::new(500));
        ledger.save(&first).unwrap();

        let mut second = LedgerDocument::new();
        second.insert("c".to_string(), Account::new(500));
        ledger.save(&second).unwrap();

        let loaded = ledger.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains_key("c"));
    }

    #[test]
    fn no_temp_file_survives_a_save() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);

        ledger.save(&LedgerDocument::new()).unwrap();
        assert!(ledger.path().exists());
        assert!(!ledger.tmp_path().exists());
    }

    #[test]
    fn unparseable_file_is_corrupt_store() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);

        fs::write(ledger.path(), "{ not json").unwrap();
        let err = ledger.load().unwrap_err();
        assert!(matches!(err, LedgerError::CorruptStore(_)));
    }

    #[test]
    fn superseded_schema_is_corrupt_store() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);

        // The old flat money/upgrades shape predates this schema and must
        // be rejected at load rather than half-read.
        fs::write(
            ledger.path(),
            r#"{ "42": { "money": 10, "upgrades": [] } }"#,
        )
        .unwrap();
        let err = ledger.load().unwrap_err();
        assert!(matches!(err, LedgerError::CorruptStore(_)));
    }
}
