// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TransactionType;

/// Version recorded under `app_version` to detect upgrades between runs.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_CURRENCY: &str = "INR";

/// Symbolic names for the values this app keeps in the key-value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Transactions,
    Currency,
    DarkMode,
    AppVersion,
    InstallPromptHidden,
}

impl StorageKey {
    /// The key actually written to the backend.
    pub fn storage_key(self) -> &'static str {
        match self {
            StorageKey::Transactions => "transactions",
            StorageKey::Currency => "currency",
            StorageKey::DarkMode => "darkMode",
            StorageKey::AppVersion => "app_version",
            StorageKey::InstallPromptHidden => "installPromptHidden",
        }
    }

    /// Looks up a symbolic name. Accepts both the stored spelling
    /// (`darkMode`) and the constant spelling (`DARK_MODE`), ignoring case.
    pub fn from_symbol(name: &str) -> Option<Self> {
        let folded: String = name
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match folded.as_str() {
            "transactions" => Some(StorageKey::Transactions),
            "currency" => Some(StorageKey::Currency),
            "darkmode" => Some(StorageKey::DarkMode),
            "appversion" => Some(StorageKey::AppVersion),
            "installprompthidden" => Some(StorageKey::InstallPromptHidden),
            _ => None,
        }
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        self.storage_key()
    }
}

/// Maps a symbolic name to its storage key; unknown names pass through.
pub fn resolve_key(name: &str) -> &str {
    match StorageKey::from_symbol(name) {
        Some(key) => key.storage_key(),
        None => name,
    }
}

pub const INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Freelance",
    "Business",
    "Investment",
    "Other Income",
];

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Health",
    "Education",
    "Other Expense",
];

pub fn categories_for(kind: TransactionType) -> &'static [&'static str] {
    match kind {
        TransactionType::Income => INCOME_CATEGORIES,
        TransactionType::Expense => EXPENSE_CATEGORIES,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
}

const fn ccy(code: &'static str, symbol: &'static str, name: &'static str) -> Currency {
    Currency { code, symbol, name }
}

pub const CURRENCIES: &[Currency] = &[
    ccy("USD", "$", "US Dollar"),
    ccy("EUR", "€", "Euro"),
    ccy("GBP", "£", "British Pound"),
    ccy("INR", "₹", "Indian Rupee"),
    ccy("JPY", "¥", "Japanese Yen"),
    ccy("CNY", "¥", "Chinese Yuan"),
    ccy("AUD", "A$", "Australian Dollar"),
    ccy("CAD", "C$", "Canadian Dollar"),
    ccy("CHF", "Fr", "Swiss Franc"),
    ccy("THB", "฿", "Thai Baht"),
    ccy("SGD", "S$", "Singapore Dollar"),
    ccy("HKD", "HK$", "Hong Kong Dollar"),
    ccy("NZD", "NZ$", "New Zealand Dollar"),
    ccy("KRW", "₩", "South Korean Won"),
    ccy("MYR", "RM", "Malaysian Ringgit"),
    ccy("PHP", "₱", "Philippine Peso"),
    ccy("IDR", "Rp", "Indonesian Rupiah"),
    ccy("VND", "₫", "Vietnamese Dong"),
    ccy("AED", "د.إ", "UAE Dirham"),
    ccy("SAR", "SR", "Saudi Riyal"),
];

pub fn find_currency(code: &str) -> Option<&'static Currency> {
    CURRENCIES.iter().find(|c| c.code == code)
}

/// The currency for `code`, or the default one when `code` is unknown.
pub fn currency_or_default(code: &str) -> &'static Currency {
    find_currency(code)
        .or_else(|| find_currency(DEFAULT_CURRENCY))
        .unwrap_or(&CURRENCIES[0])
}
