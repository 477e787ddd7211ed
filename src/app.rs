// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Filter, Grouping, NewTransaction, Tab, Transaction, TransactionPatch};
use crate::preferences::{Preferences, VersionCheck};
use crate::repository::TransactionRepository;
use crate::storage::Storage;
use crate::store::{StateValue, Store};

/// What happened to a submitted form.
#[derive(Debug, Clone, PartialEq)]
pub enum Submitted {
    Added(Transaction),
    Updated(Transaction),
    /// The record being edited disappeared before the form was submitted.
    Missing(u64),
}

/// The wired-up application: one store shared by the repository and
/// preferences, both writing through the same storage.
pub struct App {
    pub store: Store,
    pub storage: Storage,
    pub transactions: TransactionRepository,
    pub preferences: Preferences,
    pub version: VersionCheck,
}

impl App {
    /// Restores preferences, checks the version, then loads transactions.
    pub fn bootstrap(storage: Storage) -> Self {
        let store = Store::new();
        let preferences = Preferences::new(storage.clone(), store.clone());
        let transactions = TransactionRepository::new(storage.clone(), store.clone());

        preferences.init_currency();
        preferences.init_dark_mode();
        let version = preferences.check_app_version();
        transactions.load_all();
        tracing::debug!(?version, "app ready");

        Self {
            store,
            storage,
            transactions,
            preferences,
            version,
        }
    }

    /// Marks `id` as being edited. Returns the record, or `None` (leaving
    /// the state alone) when it does not exist.
    pub fn begin_edit(&self, id: u64) -> Option<Transaction> {
        let tx = self.transactions.get_by_id(id)?;
        self.store.set_many([
            StateValue::EditingId(Some(id)),
            StateValue::CurrentTab(Tab::Add),
        ]);
        Some(tx)
    }

    pub fn cancel_edit(&self) {
        self.store.set(StateValue::EditingId(None));
    }

    /// Saves the form: updates the record being edited, if any, otherwise
    /// adds a new one. Editing mode ends either way.
    pub fn submit(&self, input: NewTransaction) -> Submitted {
        let outcome = match self.store.editing_id() {
            Some(id) => match self.transactions.update(id, TransactionPatch::from(input)) {
                Some(tx) => Submitted::Updated(tx),
                None => Submitted::Missing(id),
            },
            None => Submitted::Added(self.transactions.add(input)),
        };
        self.cancel_edit();
        outcome
    }

    pub fn request_delete(&self, id: u64) {
        self.store.set(StateValue::DeleteId(Some(id)));
    }

    pub fn cancel_delete(&self) {
        self.store.set(StateValue::DeleteId(None));
    }

    /// Deletes the pending record. False when nothing was pending or the
    /// record was already gone.
    pub fn confirm_delete(&self) -> bool {
        let deleted = match self.store.delete_id() {
            Some(id) => self.transactions.delete(id),
            None => false,
        };
        self.cancel_delete();
        deleted
    }

    pub fn select_tab(&self, tab: Tab) {
        self.store.set(StateValue::CurrentTab(tab));
    }

    pub fn select_grouping(&self, grouping: Grouping) {
        self.store.set_many([
            StateValue::CurrentGrouping(grouping),
            StateValue::CurrentTab(Tab::Groups),
        ]);
    }

    pub fn select_month(&self, month: Filter) {
        self.store.set(StateValue::SelectedMonth(month));
    }

    pub fn select_category(&self, category: Filter) {
        self.store.set(StateValue::SelectedCategory(category));
    }

    /// The list view: both selected filters applied.
    pub fn visible_transactions(&self) -> Vec<Transaction> {
        let state = self.store.snapshot();
        self.transactions
            .filter(&state.selected_month, &state.selected_category)
    }
}
