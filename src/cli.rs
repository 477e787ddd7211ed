// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Transaction id")
}

fn transaction_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("type")
            .long("type")
            .short('t')
            .required(required)
            .value_parser(["income", "expense"]),
    )
    .arg(Arg::new("amount").long("amount").short('a').required(required))
    .arg(
        Arg::new("category")
            .long("category")
            .short('c')
            .required(required),
    )
    .arg(
        Arg::new("date")
            .long("date")
            .short('d')
            .help("YYYY-MM-DD (defaults to today when adding)"),
    )
    .arg(Arg::new("notes").long("notes").short('n'))
}

pub fn build_cli() -> Command {
    command!()
        .about("FinChronicle: track income and expenses, summarise by month and category")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Path to the data file (defaults to FINCHRONICLE_DB or the platform data dir)"),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(transaction_fields(
                    Command::new("add").about("Record a transaction"),
                    true,
                ))
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("month").long("month").help("YYYY-MM or 'all'"))
                        .arg(Arg::new("category").long("category").help("Category or 'all'"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("show").about("Show one transaction").arg(id_arg()),
                ))
                .subcommand(
                    transaction_fields(
                        Command::new("edit").about("Change a transaction").arg(id_arg()),
                        false,
                    )
                    .arg(
                        Arg::new("clear-notes")
                            .long("clear-notes")
                            .action(ArgAction::SetTrue)
                            .conflicts_with("notes"),
                    ),
                )
                .subcommand(Command::new("rm").about("Delete a transaction").arg(id_arg())),
        )
        .subcommand(
            Command::new("report")
                .about("Summaries")
                .subcommand(json_flags(
                    Command::new("summary").about("This month's income, expense and net"),
                ))
                .subcommand(json_flags(
                    Command::new("by-month").about("Totals per month, newest first"),
                ))
                .subcommand(json_flags(
                    Command::new("by-category").about("Totals per category, largest first"),
                ))
                .subcommand(json_flags(
                    Command::new("months").about("Months that have transactions"),
                ))
                .subcommand(json_flags(
                    Command::new("categories").about("Categories in use"),
                )),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("csv")
                    .about("Write all transactions as CSV")
                    .arg(
                        Arg::new("out")
                            .long("out")
                            .short('o')
                            .help("Output file, '-' for stdout (default finchronicle-YYYY-MM-DD.csv)"),
                    ),
            ),
        )
        .subcommand(
            Command::new("currency")
                .about("Display currency")
                .subcommand(Command::new("show"))
                .subcommand(Command::new("list"))
                .subcommand(Command::new("set").arg(Arg::new("code").required(true))),
        )
        .subcommand(
            Command::new("theme")
                .about("Dark mode")
                .subcommand(Command::new("show"))
                .subcommand(Command::new("toggle")),
        )
        .subcommand(
            Command::new("install-prompt")
                .about("Install prompt visibility")
                .subcommand(Command::new("hide"))
                .subcommand(Command::new("status")),
        )
        .subcommand(Command::new("version").about("Show version and upgrade status"))
}
