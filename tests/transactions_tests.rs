// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal_macros::dec;
use walletpulse::commands::{categories, transactions, wallets};
use walletpulse::models::{CategoryKind, WalletKind};
use walletpulse::session::Session;
use walletpulse::{cli, db};

fn setup() -> (Connection, Session) {
    let conn = db::open_in_memory().unwrap();
    let session = Session::open(&conn, "default").unwrap();
    wallets::create_wallet(&conn, &session, "A1", WalletKind::Bank, dec!(1000)).unwrap();
    wallets::create_wallet(&conn, &session, "A2", WalletKind::Ewallet, dec!(0)).unwrap();
    categories::create_category(&conn, &session, "Cat1", CategoryKind::Expense, false).unwrap();
    (conn, session)
}

fn tx(conn: &mut Connection, session: &Session, args: &[&str]) {
    let mut argv = vec!["walletpulse", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(conn, session, tx_m).unwrap();
    } else {
        panic!("no tx subcommand");
    }
}

fn list(conn: &Connection, session: &Session, args: &[&str]) -> Vec<transactions::TransactionRow> {
    let mut argv = vec!["walletpulse", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", tx_m)) => match tx_m.subcommand() {
            Some(("list", list_m)) => transactions::query_rows(conn, session, list_m).unwrap(),
            _ => panic!("no list subcommand"),
        },
        _ => panic!("no tx subcommand"),
    }
}

#[test]
fn list_limit_respected() {
    let (mut conn, session) = setup();
    for i in 1..=3 {
        let date = format!("2025-01-0{}", i);
        tx(
            &mut conn,
            &session,
            &[
                "add", "--date", &date, "--wallet", "A1", "--kind", "expense", "--amount", "10",
                "--category", "Cat1",
            ],
        );
    }
    let rows = list(&conn, &session, &["--limit", "2"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-01-03");
    assert_eq!(rows[0].category, "Cat1");
}

#[test]
fn add_trims_inputs_and_records_transfer() {
    let (mut conn, session) = setup();
    tx(
        &mut conn,
        &session,
        &[
            "add",
            "--date",
            " 2025-02-10 ",
            "--wallet",
            " A1 ",
            "--kind",
            " Transfer ",
            "--amount",
            " 250.00 ",
            "--target",
            "A2",
            "--description",
            "top up",
        ],
    );
    let rows = list(&conn, &session, &["--wallet", "A2"]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, "TRANSFER");
    assert_eq!(rows[0].wallet, "A1");
    assert_eq!(rows[0].target.as_deref(), Some("A2"));
    assert_eq!(rows[0].amount, "250.00");
    assert_eq!(rows[0].description, "top up");
}

#[test]
fn list_filters_by_month_and_kind() {
    let (mut conn, session) = setup();
    tx(
        &mut conn,
        &session,
        &["add", "--date", "2025-03-31", "--wallet", "A1", "--kind", "income", "--amount", "5"],
    );
    tx(
        &mut conn,
        &session,
        &["add", "--date", "2025-04-01", "--wallet", "A1", "--kind", "income", "--amount", "6"],
    );
    tx(
        &mut conn,
        &session,
        &["add", "--date", "2025-04-02", "--wallet", "A1", "--kind", "expense", "--amount", "7"],
    );

    let april = list(&conn, &session, &["--month", "2025-04"]);
    assert_eq!(april.len(), 2);
    assert_eq!(list(&conn, &session, &["--month", "2025-4"]).len(), 2);
    let april_income = list(&conn, &session, &["--month", "2025-04", "--kind", "income"]);
    assert_eq!(april_income.len(), 1);
    assert_eq!(april_income[0].amount, "6");
}
