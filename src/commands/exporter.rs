// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::app::App;
use crate::models::Transaction;

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("csv", sub)) => export_csv(app, sub),
        _ => Ok(()),
    }
}

pub fn default_file_name(today: NaiveDate) -> String {
    format!("finchronicle-{}.csv", today.format("%Y-%m-%d"))
}

/// Header row, then one fully quoted row per transaction. Rows are joined
/// by `\n` with no trailing newline.
pub fn to_csv(transactions: &[Transaction], currency: &str) -> Result<String> {
    let header = format!("Date,Type,Category,Amount ({}),Notes\n", currency);
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(header.into_bytes());
    for t in transactions {
        wtr.write_record([
            t.date.to_string(),
            t.r#type.to_string(),
            t.category.clone(),
            t.amount.normalize().to_string(),
            t.notes.clone().unwrap_or_default(),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    let mut out = String::from_utf8(bytes).context("CSV output was not UTF-8")?;
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}

fn export_csv(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let transactions = app.store.transactions();
    if transactions.is_empty() {
        println!("No transactions to export!");
        return Ok(());
    }
    let csv = to_csv(&transactions, &app.store.currency())?;

    let out = sub
        .get_one::<String>("out")
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| default_file_name(Local::now().date_naive()));
    if out == "-" {
        println!("{}", csv);
        return Ok(());
    }
    std::fs::write(&out, csv).with_context(|| format!("Write {}", out))?;
    tracing::info!(path = %out, count = transactions.len(), "exported csv");
    println!("Export successful! {} transactions written to {}", transactions.len(), out);
    Ok(())
}
