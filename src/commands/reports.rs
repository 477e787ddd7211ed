// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{categories_by_total, months_newest_first};
use crate::app::App;
use crate::models::{CategoryBucket, Grouping, MonthBucket};
use crate::utils::{format_currency, format_month, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct MonthRow<'a> {
    month: &'a str,
    #[serde(flatten)]
    bucket: &'a MonthBucket,
}

#[derive(Serialize)]
struct CategoryRow<'a> {
    category: &'a str,
    #[serde(flatten)]
    bucket: &'a CategoryBucket,
}

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(app, sub)?,
        Some(("by-month", sub)) => by_month(app, sub)?,
        Some(("by-category", sub)) => by_category(app, sub)?,
        Some(("months", sub)) => months(app, sub)?,
        Some(("categories", sub)) => categories(app, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let s = app.transactions.month_summary();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let ccy = app.store.currency();
        let sign = if s.net.is_sign_negative() { "-" } else { "" };
        println!(
            "{}",
            pretty_table(
                &["Income", "Expense", "Net", "Entries"],
                vec![vec![
                    format_currency(&s.income, &ccy),
                    format_currency(&s.expense, &ccy),
                    format!("{}{}", sign, format_currency(&s.net, &ccy)),
                    s.total_entries.to_string(),
                ]],
            )
        );
    }
    Ok(())
}

fn by_month(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    app.select_grouping(Grouping::Month);
    let grouped = months_newest_first(app.transactions.group_by_month());
    let ccy = app.store.currency();

    let items: Vec<_> = grouped
        .iter()
        .map(|(month, bucket)| MonthRow { month, bucket })
        .collect();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        return Ok(());
    }
    if grouped.is_empty() {
        println!("No data to group yet");
        return Ok(());
    }
    let rows = grouped
        .into_iter()
        .map(|(month, b)| {
            vec![
                format_month(&month),
                format_currency(&b.income, &ccy),
                format_currency(&b.expense, &ccy),
                b.count.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expense", "Entries"], rows)
    );
    Ok(())
}

fn by_category(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    app.select_grouping(Grouping::Category);
    let grouped = categories_by_total(app.transactions.group_by_category());
    let ccy = app.store.currency();

    let items: Vec<_> = grouped
        .iter()
        .map(|(category, bucket)| CategoryRow { category, bucket })
        .collect();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        return Ok(());
    }
    if grouped.is_empty() {
        println!("No data to group yet");
        return Ok(());
    }
    let rows = grouped
        .into_iter()
        .map(|(category, b)| {
            vec![
                category,
                b.r#type.to_string(),
                format_currency(&b.total, &ccy),
                b.count.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Type", "Total", "Entries"], rows)
    );
    Ok(())
}

fn months(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let months = app.transactions.distinct_months();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &months)? {
        let rows = months
            .into_iter()
            .map(|m| vec![m.clone(), format_month(&m)])
            .collect();
        println!("{}", pretty_table(&["Month", ""], rows));
    }
    Ok(())
}

fn categories(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let cats = app.transactions.distinct_categories();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
        let rows = cats.into_iter().map(|c| vec![c]).collect();
        println!("{}", pretty_table(&["Category"], rows));
    }
    Ok(())
}
