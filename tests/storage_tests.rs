// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, TimeZone, Utc};
use finchronicle::constants::{StorageKey, resolve_key};
use finchronicle::db::SqliteBackend;
use finchronicle::models::{Transaction, TransactionType};
use finchronicle::storage::{KeyValueBackend, MemoryBackend, Storage};
use std::rc::Rc;
use tempfile::tempdir;

fn sample() -> Vec<Transaction> {
    vec![
        Transaction {
            id: 1705312800000,
            r#type: TransactionType::Income,
            amount: "5000".parse().unwrap(),
            category: "Salary".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            notes: Some("January \"bonus\" included".into()),
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
        },
        Transaction {
            id: 1705744800000,
            r#type: TransactionType::Expense,
            amount: "199.99".parse().unwrap(),
            category: "Food".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            notes: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 20, 10, 0, 0).unwrap(),
        },
    ]
}

#[test]
fn symbolic_names_resolve_to_storage_keys() {
    assert_eq!(resolve_key("transactions"), "transactions");
    assert_eq!(resolve_key("TRANSACTIONS"), "transactions");
    assert_eq!(resolve_key("DARK_MODE"), "darkMode");
    assert_eq!(resolve_key("darkMode"), "darkMode");
    assert_eq!(resolve_key("install_prompt_hidden"), "installPromptHidden");
    assert_eq!(resolve_key("app_version"), "app_version");
    assert_eq!(resolve_key("someFutureKey"), "someFutureKey");
}

#[test]
fn transactions_round_trip_through_storage() {
    let storage = Storage::in_memory();
    let saved = sample();
    storage.save(StorageKey::Transactions, &saved);
    let loaded: Vec<Transaction> = storage.load(StorageKey::Transactions).unwrap();
    assert_eq!(loaded, saved);
}

#[test]
fn persisted_json_uses_camel_case_field_names() {
    let backend = Rc::new(MemoryBackend::new());
    let storage = Storage::new(backend.clone());
    storage.save("transactions", &sample()[..1]);

    let raw = backend.raw("transactions").unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value[0];
    assert_eq!(first["type"], "income");
    assert_eq!(first["amount"], 5000.0);
    assert_eq!(first["date"], "2024-01-15");
    assert!(first["createdAt"].is_string());
    assert_eq!(first["id"], 1705312800000u64);
}

#[test]
fn records_written_by_the_browser_app_load() {
    let backend = MemoryBackend::new();
    backend
        .set(
            "transactions",
            r#"[{"type":"expense","amount":42.5,"category":"Transport","date":"2024-03-01","notes":"","id":1709280000000,"createdAt":"2024-03-01T08:00:00.000Z"}]"#,
        )
        .unwrap();
    let storage = Storage::new(backend);
    let loaded: Vec<Transaction> = storage.load(StorageKey::Transactions).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].amount, "42.5".parse().unwrap());
    assert_eq!(loaded[0].notes.as_deref(), Some(""));
}

#[test]
fn missing_empty_and_malformed_values_read_as_absent() {
    let backend = MemoryBackend::new();
    backend.set("empty", "").unwrap();
    backend.set("broken", "{not json").unwrap();
    backend.set("transactions", r#"{"not":"a list"}"#).unwrap();
    let storage = Storage::new(backend);

    assert!(storage.load::<Vec<Transaction>>("missing").is_none());
    assert!(storage.load::<Vec<Transaction>>("empty").is_none());
    assert!(storage.load::<Vec<Transaction>>("broken").is_none());
    assert!(storage.load::<Vec<Transaction>>(StorageKey::Transactions).is_none());
}

#[test]
fn strings_are_stored_raw() {
    let backend = Rc::new(MemoryBackend::new());
    let storage = Storage::new(backend.clone());
    storage.save_string(StorageKey::Currency, "USD");
    assert_eq!(backend.raw("currency").as_deref(), Some("USD"));
    assert_eq!(storage.load_string("CURRENCY").as_deref(), Some("USD"));

    storage.save(StorageKey::Currency, "USD");
    assert_eq!(backend.raw("currency").as_deref(), Some("\"USD\""));
}

#[test]
fn failed_writes_are_swallowed() {
    let backend = Rc::new(MemoryBackend::with_quota(32));
    let storage = Storage::new(backend.clone());
    storage.save_string("currency", "EUR");
    storage.save(StorageKey::Transactions, &sample());
    assert!(backend.raw("transactions").is_none());
    assert_eq!(backend.raw("currency").as_deref(), Some("EUR"));
}

#[test]
fn remove_and_clear() {
    let backend = Rc::new(MemoryBackend::new());
    let storage = Storage::new(backend.clone());
    storage.save_string("currency", "GBP");
    storage.save_string("darkMode", "enabled");
    storage.remove("currency");
    assert!(storage.load_string("currency").is_none());
    assert_eq!(backend.len(), 1);
    storage.clear();
    assert!(backend.is_empty());
}

#[test]
fn sqlite_backend_persists_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("finchronicle.sqlite");
    {
        let storage = Storage::new(SqliteBackend::open(&path).unwrap());
        storage.save(StorageKey::Transactions, &sample());
        storage.save_string(StorageKey::DarkMode, "enabled");
        storage.save_string(StorageKey::DarkMode, "disabled");
    }
    let storage = Storage::new(SqliteBackend::open(&path).unwrap());
    let loaded: Vec<Transaction> = storage.load(StorageKey::Transactions).unwrap();
    assert_eq!(loaded, sample());
    assert_eq!(
        storage.load_string(StorageKey::DarkMode).as_deref(),
        Some("disabled")
    );
    storage.remove(StorageKey::DarkMode);
    assert!(storage.load_string(StorageKey::DarkMode).is_none());
}

#[test]
fn in_memory_sqlite_behaves_like_any_backend() {
    let storage = Storage::new(SqliteBackend::open_in_memory().unwrap());
    assert!(storage.load_string("currency").is_none());
    storage.save_string("currency", "CHF");
    storage.save_string("installPromptHidden", "true");
    storage.clear();
    assert!(storage.load_string("currency").is_none());
    assert!(storage.load_string("installPromptHidden").is_none());
}
