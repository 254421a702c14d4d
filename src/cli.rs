// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, Arg, ArgAction, Command};

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
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("billfold")
        .version(crate_version!())
        .about("Personal finance tracker: income/expenses, installment debts, monthly dashboard")
        .subcommand(Command::new("init").about("Initialize the database and print its location"))
        .subcommand(
            Command::new("user")
                .about("Manage users and the active identity")
                .subcommand(
                    Command::new("add")
                        .about("Register a new user")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(
                    Command::new("use")
                        .about("Select the active user")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(Command::new("list").about("List users")),
        )
        .subcommand(
            Command::new("category")
                .about("Manage transaction categories")
                .subcommand(
                    Command::new("add")
                        .about("Add a category")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("icon").long("icon").help("Icon label (default: tag)")),
                )
                .subcommand(Command::new("list").about("List categories"))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(tx_add_cmd("income", "Record an income"))
                .subcommand(tx_add_cmd("expense", "Record an expense"))
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List the active user's transactions")
                        .arg(Arg::new("month").long("month").help("Filter by month (YYYY-MM)"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize))
                                .help("Max rows"),
                        ),
                )),
        )
        .subcommand(
            Command::new("debt")
                .about("Manage installment debts")
                .subcommand(
                    Command::new("add")
                        .about("Register a debt paid in monthly installments")
                        .arg(Arg::new("creditor").required(true))
                        .arg(
                            Arg::new("total")
                                .long("total")
                                .required(true)
                                .help("Total amount owed"),
                        )
                        .arg(
                            Arg::new("installments")
                                .long("installments")
                                .value_parser(clap::value_parser!(i64))
                                .default_value("12")
                                .help("Number of monthly installments"),
                        )
                        .arg(
                            Arg::new("start")
                                .long("start")
                                .help("Date of the first installment (YYYY-MM-DD, default today)"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List the active user's debts"),
                ))
                .subcommand(
                    Command::new("pay")
                        .about("Pay the next installment and record the expense")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(clap::value_parser!(i64)),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a debt")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(clap::value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(json_flags(
            Command::new("dashboard")
                .about("Monthly dashboard: balance, due-payment calendar, expense chart")
                .arg(Arg::new("year").long("year").help("Year to view (default: current)"))
                .arg(Arg::new("month").long("month").help("Month to view, 1-12 (default: current)")),
        ))
        .subcommand(json_flags(
            Command::new("stats").about("Pending installment amounts per creditor"),
        ))
        .subcommand(Command::new("doctor").about("Check debts for inconsistent bookkeeping"))
}

fn tx_add_cmd(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(Arg::new("amount").required(true).help("Amount, decimal"))
        .arg(Arg::new("date").long("date").help("YYYY-MM-DD (default today)"))
        .arg(Arg::new("category").long("category").help("Category name"))
        .arg(Arg::new("description").long("description").help("Free-text description"))
}
