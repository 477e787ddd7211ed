// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use finchronicle::app::App;
use finchronicle::preferences::VersionCheck;
use finchronicle::storage::Storage;
use finchronicle::{cli, commands, db};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let db_path = matches.get_one::<String>("db").map(PathBuf::from);
    let backend = db::open_or_init(db_path.as_deref())?;
    let app = App::bootstrap(Storage::new(backend));

    app.store.subscribe(|changes, state| {
        tracing::debug!(
            changed = ?changes.keys(),
            transactions = state.transactions.len(),
            "state changed"
        );
        Ok(())
    });

    if let (VersionCheck::Updated { from, to }, false) =
        (&app.version, matches.subcommand_name() == Some("version"))
    {
        println!("Updated from v{} to v{}! Check out the new features.", from, to);
    }

    match matches.subcommand() {
        Some(("tx", sub)) => commands::transactions::handle(&app, sub)?,
        Some(("report", sub)) => commands::reports::handle(&app, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&app, sub)?,
        Some(("currency", sub)) => commands::settings::currency(&app, sub)?,
        Some(("theme", sub)) => commands::settings::theme(&app, sub)?,
        Some(("install-prompt", sub)) => commands::settings::install_prompt(&app, sub)?,
        Some(("version", _)) => commands::settings::version(&app)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
