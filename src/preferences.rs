// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::constants::{
    APP_VERSION, Currency, DEFAULT_CURRENCY, StorageKey, currency_or_default, find_currency,
};
use crate::error::ValidationError;
use crate::storage::Storage;
use crate::store::{StateValue, Store};

const DARK_MODE_ON: &str = "enabled";
const DARK_MODE_OFF: &str = "disabled";

/// Outcome of comparing the stored app version with this build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionCheck {
    FirstInstall,
    Updated { from: String, to: String },
    Current,
}

/// Currency, theme and install/update flags, kept as raw strings in
/// storage and mirrored into the store.
pub struct Preferences {
    storage: Storage,
    store: Store,
}

impl Preferences {
    pub fn new(storage: Storage, store: Store) -> Self {
        Self { storage, store }
    }

    /// Restores the saved currency, falling back to the default when the
    /// saved code is missing or unknown.
    pub fn init_currency(&self) -> &'static Currency {
        let saved = self.storage.load_string(StorageKey::Currency);
        let code = match saved.as_deref() {
            Some(code) if find_currency(code).is_some() => code,
            Some(code) => {
                tracing::warn!(code, "ignoring unknown saved currency");
                DEFAULT_CURRENCY
            }
            None => DEFAULT_CURRENCY,
        };
        self.store.set(StateValue::Currency(code.to_string()));
        currency_or_default(code)
    }

    pub fn currency(&self) -> &'static Currency {
        currency_or_default(&self.store.currency())
    }

    pub fn select_currency(&self, code: &str) -> Result<&'static Currency, ValidationError> {
        let Some(currency) = find_currency(code) else {
            tracing::error!(code, "invalid currency code");
            return Err(ValidationError::UnknownCurrency(code.to_string()));
        };
        self.storage.save_string(StorageKey::Currency, currency.code);
        self.store.set(StateValue::Currency(currency.code.to_string()));
        tracing::info!(code = currency.code, "currency changed");
        Ok(currency)
    }

    pub fn init_dark_mode(&self) -> bool {
        let enabled =
            self.storage.load_string(StorageKey::DarkMode).as_deref() == Some(DARK_MODE_ON);
        self.store.set(StateValue::DarkMode(enabled));
        enabled
    }

    /// Flips the theme and returns the new setting.
    pub fn toggle_dark_mode(&self) -> bool {
        let enabled = !self.store.dark_mode();
        self.store.set(StateValue::DarkMode(enabled));
        self.storage.save_string(
            StorageKey::DarkMode,
            if enabled { DARK_MODE_ON } else { DARK_MODE_OFF },
        );
        enabled
    }

    pub fn check_app_version(&self) -> VersionCheck {
        let stored = self
            .storage
            .load_string(StorageKey::AppVersion)
            .filter(|v| !v.is_empty());
        match stored {
            None => {
                self.storage.save_string(StorageKey::AppVersion, APP_VERSION);
                tracing::info!(version = APP_VERSION, "first run");
                VersionCheck::FirstInstall
            }
            Some(stored) if stored != APP_VERSION => {
                self.storage.save_string(StorageKey::AppVersion, APP_VERSION);
                tracing::info!(from = %stored, to = APP_VERSION, "updated");
                VersionCheck::Updated {
                    from: stored,
                    to: APP_VERSION.to_string(),
                }
            }
            Some(_) => VersionCheck::Current,
        }
    }

    pub fn mark_update_available(&self) {
        self.store.set(StateValue::UpdateAvailable(true));
    }

    pub fn dismiss_update(&self) {
        self.store.set(StateValue::UpdateAvailable(false));
    }

    pub fn hide_install_prompt(&self) {
        self.storage
            .save_string(StorageKey::InstallPromptHidden, "true");
    }

    pub fn install_prompt_hidden(&self) -> bool {
        self.storage
            .load_string(StorageKey::InstallPromptHidden)
            .is_some_and(|v| !v.is_empty())
    }
}
