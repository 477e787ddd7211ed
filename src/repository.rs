// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Utc};
use std::cell::Cell;
use std::collections::{BTreeMap, HashSet};

use crate::aggregate;
use crate::constants::StorageKey;
use crate::models::{
    CategoryBucket, Filter, MonthBucket, MonthSummary, NewTransaction, Transaction,
    TransactionPatch,
};
use crate::storage::Storage;
use crate::store::{StateValue, Store};

/// Millisecond-timestamp ids that stay unique when several are minted
/// within the same millisecond.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: Cell<u64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes sure later ids sort after `id`.
    pub fn observe(&self, id: u64) {
        if id > self.last.get() {
            self.last.set(id);
        }
    }

    /// `None` once an observed id leaves no larger id to hand out.
    pub fn next_at(&self, now_millis: u64) -> Option<u64> {
        let id = now_millis.max(self.last.get().checked_add(1)?);
        self.last.set(id);
        Some(id)
    }

    pub fn next(&self) -> Option<u64> {
        self.next_at(now_millis())
    }
}

fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}

/// Smallest id at or after `from` that no record uses.
fn first_free_id(txs: &[Transaction], from: u64) -> u64 {
    let taken: HashSet<u64> = txs.iter().map(|t| t.id).collect();
    let mut id = from;
    while taken.contains(&id) {
        id = id.wrapping_add(1);
    }
    id
}

/// Owns every change to the transaction list. Mutations are written to
/// storage and then pushed into the store; queries read the store.
pub struct TransactionRepository {
    storage: Storage,
    store: Store,
    ids: IdGenerator,
}

impl TransactionRepository {
    pub fn new(storage: Storage, store: Store) -> Self {
        Self {
            storage,
            store,
            ids: IdGenerator::new(),
        }
    }

    /// Loads the persisted list, newest date first. Nothing stored, or
    /// something that is not a list, yields an empty list and leaves the
    /// store as is. Records that fail to decode are skipped one by one.
    pub fn load_all(&self) -> Vec<Transaction> {
        let Some(raw) = self
            .storage
            .load::<Vec<serde_json::Value>>(StorageKey::Transactions)
        else {
            tracing::debug!("no stored transactions");
            return Vec::new();
        };
        let mut stored: Vec<Transaction> = raw
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(t) => Some(t),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping unreadable stored transaction");
                    None
                }
            })
            .collect();
        stored.sort_by(|a, b| b.date.cmp(&a.date));
        for t in &stored {
            self.ids.observe(t.id);
        }
        tracing::info!(count = stored.len(), "loaded transactions");
        self.store.set(StateValue::Transactions(stored.clone()));
        stored
    }

    pub fn add(&self, input: NewTransaction) -> Transaction {
        let mut all = self.store.transactions();
        for t in &all {
            self.ids.observe(t.id);
        }
        let id = self.ids.next().unwrap_or_else(|| {
            tracing::warn!("id counter exhausted, reusing a free id");
            first_free_id(&all, now_millis())
        });
        let created = Transaction {
            id,
            r#type: input.r#type,
            amount: input.amount,
            category: input.category,
            date: input.date,
            notes: input.notes,
            created_at: Utc::now(),
        };
        all.insert(0, created.clone());
        self.persist(all);
        tracing::info!(id = created.id, kind = %created.r#type, amount = %created.amount, "added transaction");
        created
    }

    /// Applies `patch` to the record with `id`. Returns `None`, without
    /// touching storage, if there is no such record.
    pub fn update(&self, id: u64, patch: TransactionPatch) -> Option<Transaction> {
        let mut all = self.store.transactions();
        let Some(existing) = all.iter_mut().find(|t| t.id == id) else {
            tracing::debug!(id, "update of unknown transaction");
            return None;
        };
        patch.apply_to(existing);
        let updated = existing.clone();
        self.persist(all);
        tracing::info!(id, "updated transaction");
        Some(updated)
    }

    pub fn delete(&self, id: u64) -> bool {
        let all = self.store.transactions();
        let before = all.len();
        let kept: Vec<Transaction> = all.into_iter().filter(|t| t.id != id).collect();
        if kept.len() == before {
            tracing::debug!(id, "delete of unknown transaction");
            return false;
        }
        self.persist(kept);
        tracing::info!(id, "deleted transaction");
        true
    }

    pub fn get_by_id(&self, id: u64) -> Option<Transaction> {
        self.store
            .read(|s| s.transactions.iter().find(|t| t.id == id).cloned())
    }

    pub fn filter_by_month(&self, month: &Filter) -> Vec<Transaction> {
        self.store.read(|s| {
            aggregate::filter_by_month(&s.transactions, month)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    pub fn filter_by_category(&self, category: &Filter) -> Vec<Transaction> {
        self.store.read(|s| {
            aggregate::filter_by_category(&s.transactions, category)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    /// Both filters at once, as the list view applies them.
    pub fn filter(&self, month: &Filter, category: &Filter) -> Vec<Transaction> {
        self.store.read(|s| {
            aggregate::filter_by_month(&s.transactions, month)
                .into_iter()
                .filter(|t| match category {
                    Filter::All => true,
                    Filter::Only(c) => &t.category == c,
                })
                .cloned()
                .collect()
        })
    }

    /// Summary for the current UTC month.
    pub fn month_summary(&self) -> MonthSummary {
        self.month_summary_at(Utc::now().date_naive())
    }

    pub fn month_summary_at(&self, today: NaiveDate) -> MonthSummary {
        self.store
            .read(|s| aggregate::month_summary(&s.transactions, today))
    }

    pub fn distinct_months(&self) -> Vec<String> {
        self.store.read(|s| aggregate::distinct_months(&s.transactions))
    }

    pub fn distinct_categories(&self) -> Vec<String> {
        self.store
            .read(|s| aggregate::distinct_categories(&s.transactions))
    }

    pub fn group_by_month(&self) -> BTreeMap<String, MonthBucket> {
        self.store.read(|s| aggregate::group_by_month(&s.transactions))
    }

    pub fn group_by_category(&self) -> BTreeMap<String, CategoryBucket> {
        self.store
            .read(|s| aggregate::group_by_category(&s.transactions))
    }

    fn persist(&self, transactions: Vec<Transaction>) {
        self.storage.save(StorageKey::Transactions, &transactions);
        self.store.set(StateValue::Transactions(transactions));
    }
}
