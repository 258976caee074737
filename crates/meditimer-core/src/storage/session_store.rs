//! Whole-blob session log persistence.
//!
//! The log is a flat JSON array of completed sessions stored in a single
//! file - one storage key, no schema version, no per-record index.
//! Appends are read-modify-write of the entire collection; an append is
//! not durable until the write succeeds, so callers re-read afterwards
//! to see the new session reflected in statistics.
//!
//! Expected volumes are at most a few thousand records, so every read
//! goes through to the file with no caching layer.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, StoreError, ValidationError};

use super::data_dir;

const SESSIONS_FILE: &str = "sessions.json";

/// One completed meditation session.
///
/// Serialized as `{"date": "YYYY-MM-DD", "durationMinutes": n}`. The date
/// is the local calendar date the session completed on; the duration is
/// the planned length (the engine trusts the configured duration rather
/// than measuring elapsed wall-clock time). Multiple sessions per day are
/// permitted and all contribute to totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub date: NaiveDate,
    pub duration_minutes: u32,
}

/// Append-only session log backed by one JSON file.
///
/// Sessions are never edited or deleted by the application.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Open the store at `~/.config/meditimer/sessions.json`.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn open() -> Result<Self, StoreError> {
        let dir = data_dir().map_err(|source| StoreError::Persistence {
            path: PathBuf::from(SESSIONS_FILE),
            source,
        })?;
        Ok(Self {
            path: dir.join(SESSIONS_FILE),
        })
    }

    /// Open the store at an explicit path (for tests and embedding shells
    /// that manage their own data directory).
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every persisted session. A missing file is an empty log.
    ///
    /// # Errors
    /// `Persistence` on read failure, `CorruptData` if the stored content
    /// does not parse into the expected shape.
    pub fn load_all(&self) -> Result<Vec<Session>, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Persistence {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&raw).map_err(|source| StoreError::CorruptData {
            path: self.path.clone(),
            source,
        })
    }

    /// Append a session dated `date` and persist the full log.
    ///
    /// # Errors
    /// `Validation` if the duration is zero, `Store` if the log cannot
    /// be read back or the write fails. The in-memory append is not
    /// durable until this returns `Ok`.
    pub fn append(&self, date: NaiveDate, duration_minutes: u32) -> Result<Session, CoreError> {
        if duration_minutes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "duration_minutes".into(),
                message: "session length must be at least one minute".into(),
            }
            .into());
        }
        let mut sessions = self.load_all()?;
        let session = Session {
            date,
            duration_minutes,
        };
        sessions.push(session);
        let blob = serde_json::to_string(&sessions)?;
        std::fs::write(&self.path, blob).map_err(|source| StoreError::Persistence {
            path: self.path.clone(),
            source,
        })?;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn temp_store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at_path(dir.path().join("sessions.json"));
        (dir, store)
    }

    #[test]
    fn missing_file_is_empty_log() {
        let (_dir, store) = temp_store();
        assert_eq!(store.load_all().unwrap(), Vec::new());
    }

    #[test]
    fn append_then_read() {
        let (_dir, store) = temp_store();
        let today = d(2024, 3, 1);
        store.append(today, 10).unwrap();
        store.append(today, 25).unwrap();

        let sessions = store.load_all().unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].date, today);
        assert_eq!(sessions[0].duration_minutes, 10);
        assert_eq!(sessions[1].duration_minutes, 25);
    }

    #[test]
    fn zero_duration_is_rejected() {
        let (_dir, store) = temp_store();
        let err = store.append(d(2024, 3, 1), 0).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn wire_format_is_camel_case_with_iso_dates() {
        let (_dir, store) = temp_store();
        store.append(d(2024, 1, 8), 15).unwrap();
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, r#"[{"date":"2024-01-08","durationMinutes":15}]"#);
    }

    #[test]
    fn malformed_blob_is_corrupt_data() {
        let (_dir, store) = temp_store();
        std::fs::write(store.path(), "not json at all").unwrap();
        let err = store.load_all().unwrap_err();
        assert!(matches!(err, StoreError::CorruptData { .. }));
    }

    #[test]
    fn truncated_blob_is_corrupt_data() {
        let (_dir, store) = temp_store();
        std::fs::write(store.path(), r#"[{"date":"2024-01-08","duratio"#).unwrap();
        let err = store.load_all().unwrap_err();
        assert!(matches!(err, StoreError::CorruptData { .. }));
    }

    #[test]
    fn unreadable_path_is_persistence_error() {
        let (dir, _) = temp_store();
        // Point the store at a directory so reads fail with a non-NotFound error.
        let store = SessionStore::at_path(dir.path());
        let err = store.load_all().unwrap_err();
        assert!(matches!(err, StoreError::Persistence { .. }));
    }
}
