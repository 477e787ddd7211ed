// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure summaries over a slice of transactions.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{
    CategoryBucket, Filter, MonthBucket, MonthSummary, Transaction, TransactionType,
};

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Records whose ISO date starts with the selected month.
pub fn filter_by_month<'a>(txs: &'a [Transaction], month: &Filter) -> Vec<&'a Transaction> {
    match month {
        Filter::All => txs.iter().collect(),
        Filter::Only(m) => txs
            .iter()
            .filter(|t| t.date.format("%Y-%m-%d").to_string().starts_with(m.as_str()))
            .collect(),
    }
}

pub fn filter_by_category<'a>(txs: &'a [Transaction], category: &Filter) -> Vec<&'a Transaction> {
    match category {
        Filter::All => txs.iter().collect(),
        Filter::Only(c) => txs.iter().filter(|t| &t.category == c).collect(),
    }
}

/// Income and expense for the calendar month containing `today`.
///
/// `total_entries` counts the whole collection, not just that month.
pub fn month_summary(txs: &[Transaction], today: NaiveDate) -> MonthSummary {
    let current = month_key(today);
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for t in txs.iter().filter(|t| t.month() == current) {
        match t.r#type {
            TransactionType::Income => income += t.amount,
            TransactionType::Expense => expense += t.amount,
        }
    }
    MonthSummary {
        income,
        expense,
        net: income - expense,
        total_entries: txs.len(),
    }
}

/// Distinct `YYYY-MM` values, newest first.
pub fn distinct_months(txs: &[Transaction]) -> Vec<String> {
    let months: BTreeSet<String> = txs.iter().map(Transaction::month).collect();
    months.into_iter().rev().collect()
}

pub fn distinct_categories(txs: &[Transaction]) -> Vec<String> {
    let cats: BTreeSet<&str> = txs.iter().map(|t| t.category.as_str()).collect();
    cats.into_iter().map(str::to_string).collect()
}

pub fn group_by_month(txs: &[Transaction]) -> BTreeMap<String, MonthBucket> {
    let mut grouped: BTreeMap<String, MonthBucket> = BTreeMap::new();
    for t in txs {
        let bucket = grouped.entry(t.month()).or_default();
        bucket.count += 1;
        match t.r#type {
            TransactionType::Income => bucket.income += t.amount,
            TransactionType::Expense => bucket.expense += t.amount,
        }
    }
    grouped
}

/// Totals per category. A bucket keeps the type of the first record seen
/// for its category, which for the newest-first collection is the latest.
pub fn group_by_category(txs: &[Transaction]) -> BTreeMap<String, CategoryBucket> {
    let mut grouped: BTreeMap<String, CategoryBucket> = BTreeMap::new();
    for t in txs {
        let bucket = grouped
            .entry(t.category.clone())
            .or_insert_with(|| CategoryBucket {
                total: Decimal::ZERO,
                count: 0,
                r#type: t.r#type,
            });
        bucket.total += t.amount;
        bucket.count += 1;
    }
    grouped
}

/// Month buckets ordered newest first, as the grouped view shows them.
pub fn months_newest_first(grouped: BTreeMap<String, MonthBucket>) -> Vec<(String, MonthBucket)> {
    grouped.into_iter().rev().collect()
}

/// Category buckets ordered by total, largest first. Ties keep name order.
pub fn categories_by_total(
    grouped: BTreeMap<String, CategoryBucket>,
) -> Vec<(String, CategoryBucket)> {
    let mut items: Vec<_> = grouped.into_iter().collect();
    items.sort_by(|a, b| b.1.total.cmp(&a.1.total));
    items
}
