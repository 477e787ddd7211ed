// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, TimeZone, Utc};
use finchronicle::aggregate::{
    categories_by_total, distinct_categories, distinct_months, filter_by_category,
    filter_by_month, group_by_category, group_by_month, month_summary, months_newest_first,
};
use finchronicle::models::{Filter, Transaction, TransactionType};
use rust_decimal::Decimal;

fn tx(id: u64, date: &str, kind: TransactionType, amount: &str, cat: &str) -> Transaction {
    Transaction {
        id,
        r#type: kind,
        amount: amount.parse().unwrap(),
        category: cat.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        notes: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn january() -> Vec<Transaction> {
    vec![
        tx(1, "2024-01-15", TransactionType::Income, "5000", "Salary"),
        tx(2, "2024-01-20", TransactionType::Expense, "200", "Food"),
    ]
}

fn mixed() -> Vec<Transaction> {
    vec![
        tx(6, "2024-03-02", TransactionType::Expense, "12.50", "Food"),
        tx(5, "2024-02-28", TransactionType::Income, "300", "Freelance"),
        tx(4, "2024-02-10", TransactionType::Expense, "80", "Bills"),
        tx(3, "2024-02-01", TransactionType::Expense, "7.25", "Food"),
        tx(2, "2024-01-20", TransactionType::Expense, "200", "Food"),
        tx(1, "2024-01-15", TransactionType::Income, "5000", "Salary"),
    ]
}

#[test]
fn group_by_month_for_january_scenario() {
    let grouped = group_by_month(&january());
    assert_eq!(grouped.len(), 1);
    let jan = &grouped["2024-01"];
    assert_eq!(jan.income, Decimal::from(5000));
    assert_eq!(jan.expense, Decimal::from(200));
    assert_eq!(jan.count, 2);
}

#[test]
fn month_summary_for_january_scenario() {
    let today = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    let s = month_summary(&january(), today);
    assert_eq!(s.income, Decimal::from(5000));
    assert_eq!(s.expense, Decimal::from(200));
    assert_eq!(s.net, Decimal::from(4800));
    assert_eq!(s.total_entries, 2);
}

#[test]
fn month_summary_counts_every_entry_but_sums_only_current_month() {
    let today = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
    let s = month_summary(&mixed(), today);
    assert_eq!(s.income, Decimal::from(300));
    assert_eq!(s.expense, "87.25".parse::<Decimal>().unwrap());
    assert_eq!(s.net, "212.75".parse::<Decimal>().unwrap());
    assert_eq!(s.total_entries, 6);
}

#[test]
fn month_buckets_match_brute_force_sums() {
    let txs = mixed();
    let grouped = group_by_month(&txs);
    let total: usize = grouped.values().map(|b| b.count).sum();
    assert_eq!(total, txs.len());

    for (month, bucket) in &grouped {
        let in_month: Vec<&Transaction> = txs.iter().filter(|t| &t.month() == month).collect();
        let income: Decimal = in_month
            .iter()
            .filter(|t| t.r#type == TransactionType::Income)
            .map(|t| t.amount)
            .sum();
        let expense: Decimal = in_month
            .iter()
            .filter(|t| t.r#type == TransactionType::Expense)
            .map(|t| t.amount)
            .sum();
        assert_eq!(bucket.income, income, "income for {}", month);
        assert_eq!(bucket.expense, expense, "expense for {}", month);
        assert_eq!(bucket.count, in_month.len(), "count for {}", month);
    }
}

#[test]
fn all_filters_are_identity() {
    let txs = mixed();
    let by_month: Vec<u64> = filter_by_month(&txs, &Filter::All).iter().map(|t| t.id).collect();
    let by_cat: Vec<u64> = filter_by_category(&txs, &Filter::All)
        .iter()
        .map(|t| t.id)
        .collect();
    let ids: Vec<u64> = txs.iter().map(|t| t.id).collect();
    assert_eq!(by_month, ids);
    assert_eq!(by_cat, ids);
}

#[test]
fn month_filter_is_a_date_prefix() {
    let txs = mixed();
    assert_eq!(filter_by_month(&txs, &Filter::only("2024-02")).len(), 3);
    assert_eq!(filter_by_month(&txs, &Filter::only("2024")).len(), 6);
    assert!(filter_by_month(&txs, &Filter::only("2023-12")).is_empty());
}

#[test]
fn category_filter_is_exact() {
    let txs = mixed();
    assert_eq!(filter_by_category(&txs, &Filter::only("Food")).len(), 3);
    assert!(filter_by_category(&txs, &Filter::only("food")).is_empty());
}

#[test]
fn distinct_months_newest_first_and_categories_sorted() {
    let txs = mixed();
    assert_eq!(distinct_months(&txs), vec!["2024-03", "2024-02", "2024-01"]);
    assert_eq!(
        distinct_categories(&txs),
        vec!["Bills", "Food", "Freelance", "Salary"]
    );
}

#[test]
fn category_type_comes_from_first_record_seen() {
    let txs = vec![
        tx(2, "2024-02-01", TransactionType::Income, "30", "Other"),
        tx(1, "2024-01-01", TransactionType::Expense, "20", "Other"),
    ];
    let grouped = group_by_category(&txs);
    let other = &grouped["Other"];
    assert_eq!(other.r#type, TransactionType::Income);
    assert_eq!(other.total, Decimal::from(50));
    assert_eq!(other.count, 2);
}

#[test]
fn presentation_orderings() {
    let txs = mixed();
    let months: Vec<String> = months_newest_first(group_by_month(&txs))
        .into_iter()
        .map(|(m, _)| m)
        .collect();
    assert_eq!(months, vec!["2024-03", "2024-02", "2024-01"]);

    let cats: Vec<String> = categories_by_total(group_by_category(&txs))
        .into_iter()
        .map(|(c, _)| c)
        .collect();
    assert_eq!(cats, vec!["Salary", "Freelance", "Food", "Bills"]);
}

#[test]
fn empty_collection_summarises_to_zero() {
    let s = month_summary(&[], NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(s.net, Decimal::ZERO);
    assert_eq!(s.total_entries, 0);
    assert!(group_by_month(&[]).is_empty());
    assert!(group_by_category(&[]).is_empty());
    assert!(distinct_months(&[]).is_empty());
}
