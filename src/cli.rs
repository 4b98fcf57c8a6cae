// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

use crate::db::DEFAULT_USER;

pub const USER_ENV: &str = "WALLETPULSE_USER";

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    ]
}

fn user_cmd() -> Command {
    Command::new("user")
        .about("Manage the people sharing this ledger")
        .subcommand(Command::new("add").arg(Arg::new("name").required(true)))
        .subcommand(Command::new("list"))
}

fn wallet_cmd() -> Command {
    Command::new("wallet")
        .about("Bank accounts, e-wallets and cash")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .required(true)
                        .help("bank | ewallet | cash"),
                )
                .arg(
                    Arg::new("balance")
                        .long("balance")
                        .default_value("0")
                        .help("Opening balance; afterwards only transactions change it"),
                ),
        )
        .subcommand(Command::new("list").args(json_args()))
        .subcommand(
            Command::new("rename")
                .arg(Arg::new("name").required(true))
                .arg(Arg::new("to").long("to"))
                .arg(Arg::new("kind").long("kind")),
        )
        .subcommand(
            Command::new("rm")
                .arg(Arg::new("name").required(true))
                .arg(
                    Arg::new("permanent")
                        .long("permanent")
                        .action(ArgAction::SetTrue)
                        .help("Delete the wallet and its transactions instead of hiding it"),
                ),
        )
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Income and expense categories")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .required(true)
                        .help("income | expense"),
                )
                .arg(
                    Arg::new("fixed")
                        .long("fixed")
                        .action(ArgAction::SetTrue)
                        .help("Recurring cost (rent, instalments); excluded from burn rate"),
                ),
        )
        .subcommand(Command::new("list").args(json_args()))
        .subcommand(Command::new("rm").arg(Arg::new("name").required(true)))
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and list transactions")
        .subcommand(
            Command::new("add")
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD, defaults to today"),
                )
                .arg(Arg::new("wallet").long("wallet").required(true))
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .required(true)
                        .help("income | expense | transfer"),
                )
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("target")
                        .long("target")
                        .help("Destination wallet, transfers only"),
                )
                .arg(Arg::new("description").long("description")),
        )
        .subcommand(
            Command::new("list")
                .arg(Arg::new("month").long("month").help("YYYY-MM"))
                .arg(Arg::new("wallet").long("wallet"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("kind").long("kind"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                )
                .args(json_args()),
        )
}

fn health_cmd() -> Command {
    Command::new("health")
        .about("Project the month-end balance from this month's burn rate")
        .arg(
            Arg::new("date")
                .long("date")
                .help("Evaluate as of YYYY-MM-DD, defaults to today"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue),
        )
}

fn settings_cmd() -> Command {
    Command::new("settings")
        .about("Display currency and health thresholds")
        .subcommand(Command::new("show"))
        .subcommand(Command::new("currency").arg(Arg::new("code").required(true)))
        .subcommand(
            Command::new("warning-ratio").arg(
                Arg::new("ratio").required(true).help(
                    "WARNING when less than this share of the balance is projected to remain",
                ),
            ),
        )
}

pub fn build_cli() -> Command {
    Command::new("walletpulse")
        .version(clap::crate_version!())
        .about("Wallets, transactions and a month-end financial health check")
        .arg(
            Arg::new("user")
                .long("user")
                .short('u')
                .global(true)
                .env(USER_ENV)
                .default_value(DEFAULT_USER),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(user_cmd())
        .subcommand(wallet_cmd())
        .subcommand(category_cmd())
        .subcommand(tx_cmd())
        .subcommand(health_cmd())
        .subcommand(settings_cmd())
        .subcommand(Command::new("doctor").about("Report data-integrity problems"))
}
