// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::{App, Submitted};
use crate::models::{Filter, NewTransaction, Tab, Transaction, TransactionType};
use crate::utils::{
    format_currency, format_date, maybe_print_json, parse_date, parse_decimal, parse_id,
    parse_month, pretty_table,
};
use anyhow::{Context, Result, bail};
use chrono::Local;
use serde::Serialize;

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(app, sub)?,
        Some(("list", sub)) => list(app, sub)?,
        Some(("show", sub)) => show(app, sub)?,
        Some(("edit", sub)) => edit(app, sub)?,
        Some(("rm", sub)) => remove(app, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_type(s: &str) -> Result<TransactionType> {
    Ok(s.parse::<TransactionType>()?)
}

/// Reads the add form. Missing date means today; blank notes mean none.
pub fn new_transaction_from(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let kind = parse_type(sub.get_one::<String>("type").context("--type is required")?)?;
    let amount = parse_decimal(sub.get_one::<String>("amount").context("--amount is required")?)?;
    let category = sub
        .get_one::<String>("category")
        .context("--category is required")?
        .trim()
        .to_string();
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => Local::now().date_naive(),
    };
    let notes = sub
        .get_one::<String>("notes")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let input = NewTransaction {
        r#type: kind,
        amount,
        category,
        date,
        notes,
    };
    input.validate()?;
    Ok(input)
}

fn add(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let input = new_transaction_from(sub)?;
    let currency = app.store.currency();
    match app.submit(input) {
        Submitted::Added(tx) => println!(
            "Transaction saved! {} {} in {} on {} (id {})",
            tx.r#type,
            format_currency(&tx.amount, &currency),
            tx.category,
            tx.date,
            tx.id
        ),
        other => bail!("unexpected result while adding: {:?}", other),
    }
    Ok(())
}

/// Builds the edited form: flags given on the command line replace the
/// stored values, everything else is carried over.
pub fn edited_form(existing: &Transaction, sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let kind = match sub.get_one::<String>("type") {
        Some(t) => parse_type(t)?,
        None => existing.r#type,
    };
    let amount = match sub.get_one::<String>("amount") {
        Some(a) => parse_decimal(a)?,
        None => existing.amount,
    };
    let category = sub
        .get_one::<String>("category")
        .map(|c| c.trim().to_string())
        .unwrap_or_else(|| existing.category.clone());
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => existing.date,
    };
    let notes = if sub.get_flag("clear-notes") {
        None
    } else {
        match sub.get_one::<String>("notes") {
            Some(n) => Some(n.trim().to_string()).filter(|s| !s.is_empty()),
            None => existing.notes.clone(),
        }
    };
    let input = NewTransaction {
        r#type: kind,
        amount,
        category,
        date,
        notes,
    };
    input.validate()?;
    Ok(input)
}

fn edit(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").context("id is required")?)?;
    let Some(existing) = app.begin_edit(id) else {
        bail!("Transaction {} not found", id);
    };
    let input = match edited_form(&existing, sub) {
        Ok(input) => input,
        Err(e) => {
            app.cancel_edit();
            return Err(e);
        }
    };
    match app.submit(input) {
        Submitted::Updated(tx) => println!("Transaction updated! (id {})", tx.id),
        Submitted::Missing(id) => bail!("Transaction {} not found", id),
        Submitted::Added(tx) => bail!("edit unexpectedly created transaction {}", tx.id),
    }
    Ok(())
}

fn remove(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").context("id is required")?)?;
    app.request_delete(id);
    if !app.confirm_delete() {
        bail!("Transaction {} not found", id);
    }
    println!("Transaction deleted! (id {})", id);
    Ok(())
}

fn show(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").context("id is required")?)?;
    let Some(tx) = app.transactions.get_by_id(id) else {
        bail!("Transaction {} not found", id);
    };
    let row = TransactionRow::new(&tx, &app.store.currency());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &tx)? {
        println!(
            "{}",
            pretty_table(
                &["Field", "Value"],
                vec![
                    vec!["Id".into(), row.id.to_string()],
                    vec!["Date".into(), row.date],
                    vec!["Type".into(), row.r#type],
                    vec!["Category".into(), row.category],
                    vec!["Amount".into(), row.amount],
                    vec!["Notes".into(), row.notes],
                    vec!["Created".into(), tx.created_at.to_rfc3339()],
                ],
            )
        );
    }
    Ok(())
}

fn list(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(app, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No transactions yet");
            return Ok(());
        }
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.r#type.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.notes.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Type", "Category", "Amount", "Notes"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: u64,
    pub date: String,
    pub r#type: String,
    pub category: String,
    pub amount: String,
    pub notes: String,
}

impl TransactionRow {
    fn new(tx: &Transaction, currency: &str) -> Self {
        Self {
            id: tx.id,
            date: format_date(tx.date),
            r#type: tx.r#type.to_string(),
            category: tx.category.clone(),
            amount: format_currency(&tx.amount, currency),
            notes: tx.notes.clone().unwrap_or_default(),
        }
    }
}

/// Applies the list filters to the store and returns the visible rows.
pub fn query_rows(app: &App, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let month = match sub.get_one::<String>("month").map(|s| s.trim()) {
        None | Some("all") => Filter::All,
        Some(m) => Filter::Only(parse_month(m)?),
    };
    let category = sub
        .get_one::<String>("category")
        .map(|c| Filter::from(c.trim()))
        .unwrap_or_default();

    app.select_tab(Tab::List);
    app.select_month(month);
    app.select_category(category);

    let currency = app.store.currency();
    let mut data: Vec<TransactionRow> = app
        .visible_transactions()
        .iter()
        .map(|t| TransactionRow::new(t, &currency))
        .collect();
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}
