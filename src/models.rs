// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::categories_for;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(ValidationError::InvalidType(s.to_string())),
        }
    }
}

/// One income or expense record, in the shape it is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,
    pub r#type: TransactionType,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// `YYYY-MM` bucket this record falls in.
    pub fn month(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

/// Everything needed to record a transaction except its identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub r#type: TransactionType,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewTransaction {
    /// Checks the amount and that the category belongs to the type's list.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_amount(self.amount)?;
        validate_category(self.r#type, &self.category)
    }
}

pub fn validate_amount(amount: Decimal) -> Result<(), ValidationError> {
    if amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::InvalidAmount(amount.to_string()))
    }
}

pub fn validate_category(kind: TransactionType, category: &str) -> Result<(), ValidationError> {
    if categories_for(kind).contains(&category) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCategory {
            category: category.to_string(),
            kind: kind.to_string(),
        })
    }
}

/// Field-by-field update. Identity and creation time are not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub r#type: Option<TransactionType>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    /// `Some(None)` clears the notes.
    pub notes: Option<Option<String>>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self == &TransactionPatch::default()
    }

    pub fn apply_to(self, tx: &mut Transaction) {
        if let Some(kind) = self.r#type {
            tx.r#type = kind;
        }
        if let Some(amount) = self.amount {
            tx.amount = amount;
        }
        if let Some(category) = self.category {
            tx.category = category;
        }
        if let Some(date) = self.date {
            tx.date = date;
        }
        if let Some(notes) = self.notes {
            tx.notes = notes;
        }
    }
}

impl From<NewTransaction> for TransactionPatch {
    fn from(input: NewTransaction) -> Self {
        TransactionPatch {
            r#type: Some(input.r#type),
            amount: Some(input.amount),
            category: Some(input.category),
            date: Some(input.date),
            notes: Some(input.notes),
        }
    }
}

/// Month or category selection; `All` is the identity filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    All,
    Only(String),
}

impl Filter {
    pub fn only(value: impl Into<String>) -> Self {
        Filter::Only(value.into())
    }
}

impl From<&str> for Filter {
    fn from(s: &str) -> Self {
        if s == "all" {
            Filter::All
        } else {
            Filter::Only(s.to_string())
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("all"),
            Filter::Only(v) => f.write_str(v),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    Add,
    List,
    Groups,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Grouping {
    #[default]
    Month,
    Category,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net: Decimal,
    pub total_entries: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthBucket {
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expense: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBucket {
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub count: usize,
    pub r#type: TransactionType,
}
