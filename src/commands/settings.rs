// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::constants::{APP_VERSION, CURRENCIES};
use crate::preferences::VersionCheck;
use crate::utils::pretty_table;
use anyhow::{Context, Result};

pub fn currency(app: &App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let code = sub
                .get_one::<String>("code")
                .context("currency code is required")?
                .trim()
                .to_uppercase();
            let c = app.preferences.select_currency(&code)?;
            println!("Currency changed to {}", c.name);
        }
        Some(("list", _)) => {
            let current = app.store.currency();
            let rows = CURRENCIES
                .iter()
                .map(|c| {
                    vec![
                        if c.code == current { "*".into() } else { String::new() },
                        c.code.to_string(),
                        c.symbol.to_string(),
                        c.name.to_string(),
                    ]
                })
                .collect();
            println!("{}", pretty_table(&["", "Code", "Symbol", "Name"], rows));
        }
        _ => {
            let c = app.preferences.currency();
            println!("{} ({}) {}", c.code, c.symbol, c.name);
        }
    }
    Ok(())
}

pub fn theme(app: &App, m: &clap::ArgMatches) -> Result<()> {
    let dark = match m.subcommand() {
        Some(("toggle", _)) => app.preferences.toggle_dark_mode(),
        _ => app.store.dark_mode(),
    };
    println!("Dark mode {}", if dark { "on" } else { "off" });
    Ok(())
}

pub fn install_prompt(app: &App, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("hide", _)) = m.subcommand() {
        app.preferences.hide_install_prompt();
    }
    let hidden = app.preferences.install_prompt_hidden();
    println!("Install prompt {}", if hidden { "hidden" } else { "shown" });
    Ok(())
}

pub fn version(app: &App) -> Result<()> {
    match &app.version {
        VersionCheck::FirstInstall => println!("FinChronicle {} installed!", APP_VERSION),
        VersionCheck::Updated { from, to } => println!("Updated from v{} to v{}", from, to),
        VersionCheck::Current => println!("FinChronicle v{}", APP_VERSION),
    }
    Ok(())
}
