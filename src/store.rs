// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Application state with change notification.
//!
//! A [`Store`] is a handle; clones share the same state and subscribers.
//! Updates go through [`Store::set_many`], which applies only the values that
//! differ from the current ones and then tells every subscriber, once, which
//! fields changed.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::constants::DEFAULT_CURRENCY;
use crate::models::{Filter, Grouping, Tab, Transaction};

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub transactions: Vec<Transaction>,
    pub current_tab: Tab,
    pub current_grouping: Grouping,
    pub selected_month: Filter,
    pub selected_category: Filter,
    pub editing_id: Option<u64>,
    pub delete_id: Option<u64>,
    pub update_available: bool,
    pub dark_mode: bool,
    pub currency: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            current_tab: Tab::Add,
            current_grouping: Grouping::Month,
            selected_month: Filter::All,
            selected_category: Filter::All,
            editing_id: None,
            delete_id: None,
            update_available: false,
            dark_mode: false,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StateKey {
    Transactions,
    CurrentTab,
    CurrentGrouping,
    SelectedMonth,
    SelectedCategory,
    EditingId,
    DeleteId,
    UpdateAvailable,
    DarkMode,
    Currency,
}

/// A value for one state field, tagged with the field it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum StateValue {
    Transactions(Vec<Transaction>),
    CurrentTab(Tab),
    CurrentGrouping(Grouping),
    SelectedMonth(Filter),
    SelectedCategory(Filter),
    EditingId(Option<u64>),
    DeleteId(Option<u64>),
    UpdateAvailable(bool),
    DarkMode(bool),
    Currency(String),
}

impl StateValue {
    pub fn key(&self) -> StateKey {
        match self {
            StateValue::Transactions(_) => StateKey::Transactions,
            StateValue::CurrentTab(_) => StateKey::CurrentTab,
            StateValue::CurrentGrouping(_) => StateKey::CurrentGrouping,
            StateValue::SelectedMonth(_) => StateKey::SelectedMonth,
            StateValue::SelectedCategory(_) => StateKey::SelectedCategory,
            StateValue::EditingId(_) => StateKey::EditingId,
            StateValue::DeleteId(_) => StateKey::DeleteId,
            StateValue::UpdateAvailable(_) => StateKey::UpdateAvailable,
            StateValue::DarkMode(_) => StateKey::DarkMode,
            StateValue::Currency(_) => StateKey::Currency,
        }
    }
}

impl AppState {
    pub fn get(&self, key: StateKey) -> StateValue {
        match key {
            StateKey::Transactions => StateValue::Transactions(self.transactions.clone()),
            StateKey::CurrentTab => StateValue::CurrentTab(self.current_tab),
            StateKey::CurrentGrouping => StateValue::CurrentGrouping(self.current_grouping),
            StateKey::SelectedMonth => StateValue::SelectedMonth(self.selected_month.clone()),
            StateKey::SelectedCategory => {
                StateValue::SelectedCategory(self.selected_category.clone())
            }
            StateKey::EditingId => StateValue::EditingId(self.editing_id),
            StateKey::DeleteId => StateValue::DeleteId(self.delete_id),
            StateKey::UpdateAvailable => StateValue::UpdateAvailable(self.update_available),
            StateKey::DarkMode => StateValue::DarkMode(self.dark_mode),
            StateKey::Currency => StateValue::Currency(self.currency.clone()),
        }
    }

    /// Every field as a value, in declaration order.
    pub fn into_values(self) -> Vec<StateValue> {
        vec![
            StateValue::Transactions(self.transactions),
            StateValue::CurrentTab(self.current_tab),
            StateValue::CurrentGrouping(self.current_grouping),
            StateValue::SelectedMonth(self.selected_month),
            StateValue::SelectedCategory(self.selected_category),
            StateValue::EditingId(self.editing_id),
            StateValue::DeleteId(self.delete_id),
            StateValue::UpdateAvailable(self.update_available),
            StateValue::DarkMode(self.dark_mode),
            StateValue::Currency(self.currency),
        ]
    }

    fn differs(&self, value: &StateValue) -> bool {
        match value {
            StateValue::Transactions(v) => &self.transactions != v,
            StateValue::CurrentTab(v) => &self.current_tab != v,
            StateValue::CurrentGrouping(v) => &self.current_grouping != v,
            StateValue::SelectedMonth(v) => &self.selected_month != v,
            StateValue::SelectedCategory(v) => &self.selected_category != v,
            StateValue::EditingId(v) => &self.editing_id != v,
            StateValue::DeleteId(v) => &self.delete_id != v,
            StateValue::UpdateAvailable(v) => &self.update_available != v,
            StateValue::DarkMode(v) => &self.dark_mode != v,
            StateValue::Currency(v) => &self.currency != v,
        }
    }

    fn assign(&mut self, value: StateValue) {
        match value {
            StateValue::Transactions(v) => self.transactions = v,
            StateValue::CurrentTab(v) => self.current_tab = v,
            StateValue::CurrentGrouping(v) => self.current_grouping = v,
            StateValue::SelectedMonth(v) => self.selected_month = v,
            StateValue::SelectedCategory(v) => self.selected_category = v,
            StateValue::EditingId(v) => self.editing_id = v,
            StateValue::DeleteId(v) => self.delete_id = v,
            StateValue::UpdateAvailable(v) => self.update_available = v,
            StateValue::DarkMode(v) => self.dark_mode = v,
            StateValue::Currency(v) => self.currency = v,
        }
    }
}

/// The fields that changed in one update, with their new values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Changes {
    values: BTreeMap<StateKey, StateValue>,
}

impl Changes {
    pub fn contains(&self, key: StateKey) -> bool {
        self.values.contains_key(&key)
    }

    pub fn get(&self, key: StateKey) -> Option<&StateValue> {
        self.values.get(&key)
    }

    pub fn keys(&self) -> Vec<StateKey> {
        self.values.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateValue> {
        self.values.values()
    }
}

/// Token returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = dyn FnMut(&Changes, &AppState) -> anyhow::Result<()>;

struct Subscriber {
    id: SubscriptionId,
    callback: Rc<RefCell<Box<Callback>>>,
}

#[derive(Default)]
struct Inner {
    state: RefCell<AppState>,
    subscribers: RefCell<Vec<Subscriber>>,
    next_id: Cell<u64>,
}

#[derive(Clone, Default)]
pub struct Store {
    inner: Rc<Inner>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the whole state.
    pub fn snapshot(&self) -> AppState {
        self.inner.state.borrow().clone()
    }

    pub fn get(&self, key: StateKey) -> StateValue {
        self.inner.state.borrow().get(key)
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.inner.state.borrow().transactions.clone()
    }

    pub fn currency(&self) -> String {
        self.inner.state.borrow().currency.clone()
    }

    pub fn dark_mode(&self) -> bool {
        self.inner.state.borrow().dark_mode
    }

    pub fn editing_id(&self) -> Option<u64> {
        self.inner.state.borrow().editing_id
    }

    pub fn delete_id(&self) -> Option<u64> {
        self.inner.state.borrow().delete_id
    }

    /// Runs `f` against the live state without copying it.
    pub(crate) fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    pub fn set(&self, value: StateValue) {
        self.set_many([value]);
    }

    pub fn set_many(&self, updates: impl IntoIterator<Item = StateValue>) {
        let mut changes = Changes::default();
        {
            let mut state = self.inner.state.borrow_mut();
            for value in updates {
                if state.differs(&value) {
                    changes.values.insert(value.key(), value.clone());
                    state.assign(value);
                }
            }
        }
        if !changes.is_empty() {
            self.notify(&changes);
        }
    }

    pub fn reset(&self) {
        self.set_many(AppState::default().into_values());
    }

    pub fn subscribe(
        &self,
        callback: impl FnMut(&Changes, &AppState) -> anyhow::Result<()> + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner.subscribers.borrow_mut().push(Subscriber {
            id,
            callback: Rc::new(RefCell::new(Box::new(callback))),
        });
        id
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.inner.subscribers.borrow_mut();
        let before = subs.len();
        subs.retain(|s| s.id != id);
        subs.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.inner.subscribers.borrow().iter().any(|s| s.id == id)
    }

    fn notify(&self, changes: &Changes) {
        // Callbacks may read or update the store, so nothing stays borrowed
        // while they run.
        let targets: Vec<(SubscriptionId, Rc<RefCell<Box<Callback>>>)> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|s| (s.id, Rc::clone(&s.callback)))
            .collect();
        if targets.is_empty() {
            return;
        }
        tracing::trace!(changed = ?changes.keys(), subscribers = targets.len(), "notifying");
        for (id, callback) in targets {
            if !self.is_subscribed(id) {
                continue;
            }
            let Ok(mut running) = callback.try_borrow_mut() else {
                tracing::debug!(subscription = id.0, "skipping subscriber already running");
                continue;
            };
            // An earlier callback may have updated the store again.
            let state = self.snapshot();
            if let Err(e) = (&mut **running)(changes, &state) {
                tracing::error!(subscription = id.0, error = %e, "error in state subscriber");
            }
        }
    }
}
