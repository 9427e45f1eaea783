// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
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

fn month_arg(required: bool) -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .required(required)
        .help("Calendar month (defaults to the current one when optional)")
}

pub fn build_cli() -> Command {
    Command::new("moneylens")
        .about("Monthly income, spending and running-balance views over a transaction ledger")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the transaction store"))
        .subcommand(
            Command::new("demo").about("Sample data").subcommand(
                Command::new("seed")
                    .about("Fill the store with a generated ledger")
                    .arg(
                        Arg::new("count")
                            .long("count")
                            .value_parser(value_parser!(usize))
                            .default_value("200"),
                    )
                    .arg(
                        Arg::new("seed")
                            .long("seed")
                            .value_parser(value_parser!(u64))
                            .default_value("42"),
                    )
                    .arg(
                        Arg::new("replace")
                            .long("replace")
                            .action(ArgAction::SetTrue)
                            .help("Delete existing transactions first"),
                    ),
            ),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(json_args(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(month_arg(false))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("search")
                                .long("search")
                                .value_name("REGEX")
                                .help("Case-insensitive match on the description"),
                        ),
                ))
                .subcommand(
                    Command::new("export")
                        .about("Write a month's transactions to a file")
                        .arg(month_arg(true))
                        .arg(Arg::new("format").long("format").required(true))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly aggregates")
                .subcommand(json_args(
                    Command::new("overview")
                        .about("Income, expense, net and count")
                        .arg(month_arg(false)),
                ))
                .subcommand(json_args(
                    Command::new("spend-by-category")
                        .about("Expense totals per category")
                        .arg(month_arg(false)),
                ))
                .subcommand(json_args(
                    Command::new("daily")
                        .about("Per-day income, expense and running balance")
                        .arg(month_arg(false)),
                )),
        )
        .subcommand(
            Command::new("budget")
                .about("Category budgets")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(json_args(
                    Command::new("pace")
                        .about("Spend against budget and month-end projection")
                        .arg(month_arg(false))
                        .arg(
                            Arg::new("top")
                                .long("top")
                                .value_parser(value_parser!(usize))
                                .default_value("3"),
                        ),
                )),
        )
        .subcommand(
            Command::new("settings").about("Display settings").subcommand(
                Command::new("currency")
                    .about("Show or set the display currency")
                    .arg(Arg::new("code").value_name("CODE")),
            ),
        )
        .subcommand(Command::new("doctor").about("Check stored transactions for problems"))
}
