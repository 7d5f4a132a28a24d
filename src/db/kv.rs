//! Persistent key-value store: one JSON blob per string key.
//!
//! The session layer only talks to the [`KeyValueStore`] trait; the SQLite
//! `kv` table behind [`DbPool`] is the production backend. Values are
//! validated by typed deserialization when read, and a malformed blob is
//! replaced by the default value instead of leaking into the session.

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use chrono::Local;
use rusqlite::{OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&mut self, key: &str) -> AppResult<()>;

    /// Record an entry in the store's audit trail, if it keeps one.
    fn audit(&self, _operation: &str, _target: &str, _message: &str) -> AppResult<()> {
        Ok(())
    }
}

impl KeyValueStore for DbPool {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Local::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }

    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        ttlog(&self.conn, operation, target, message)
    }
}

/// Write an audit entry without letting a logging failure abort the caller.
pub fn audit_quietly<S: KeyValueStore + ?Sized>(store: &S, operation: &str, target: &str, message: &str) {
    if let Err(e) = store.audit(operation, target, message) {
        warning(format!("Failed to write internal log: {}", e));
    }
}

/// Serialize `value` and store it under `key`.
pub fn save_json<S, T>(store: &mut S, key: &str, value: &T) -> AppResult<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// Load the value under `key`, or `T::default()` when the key is absent.
///
/// A stored blob that does not match `T` is treated as corruption: the
/// default is returned, the user is warned and a `recover` entry is logged.
/// Backend errors are still propagated.
pub fn load_or_default<S, T>(store: &S, key: &str) -> AppResult<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.get(key)? else {
        return Ok(T::default());
    };

    match serde_json::from_str::<T>(&raw) {
        Ok(v) => Ok(v),
        Err(e) => {
            warning(format!(
                "Stored value for '{}' is malformed ({}); using an empty default.",
                key, e
            ));
            audit_quietly(store, "recover", key, &format!("Malformed JSON discarded: {}", e));
            Ok(T::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::log::count_entries;
    use crate::models::record::{AttendanceData, AttendanceRecord};
    use chrono::NaiveDate;

    fn store() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    #[test]
    fn set_overwrites_and_remove_deletes() {
        let mut db = store();
        db.set("a", "1").unwrap();
        db.set("a", "2").unwrap();
        assert_eq!(db.get("a").unwrap().as_deref(), Some("2"));

        db.remove("a").unwrap();
        assert_eq!(db.get("a").unwrap(), None);
    }

    #[test]
    fn typed_values_survive_a_save_and_load() {
        let mut db = store();
        let mut data = AttendanceData::new();
        data.insert(
            "MIN101".into(),
            vec![AttendanceRecord::present(
                NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
            )],
        );

        save_json(&mut db, "attendance:S1", &data).unwrap();
        let loaded: AttendanceData = load_or_default(&db, "attendance:S1").unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn malformed_blob_falls_back_to_default_and_is_logged() {
        let mut db = store();
        db.set(
            "attendance:S1",
            r#"{"MIN101":[{"date":"2024-07-15","status":"maybe"}]}"#,
        )
        .unwrap();

        let loaded: AttendanceData = load_or_default(&db, "attendance:S1").unwrap();
        assert!(loaded.is_empty());

        let recovered = count_entries(&db.conn, "recover", Some("attendance:S1")).unwrap();
        assert_eq!(recovered, 1);
    }

    #[test]
    fn missing_key_yields_default() {
        let db = store();
        let loaded: Vec<String> = load_or_default(&db, "nothing-here").unwrap();
        assert!(loaded.is_empty());
    }
}
