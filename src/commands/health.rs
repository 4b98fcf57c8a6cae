// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::health::{evaluate, HealthPolicy};
use crate::ledger::{load_categories, load_wallets, month_to_date};
use crate::models::HealthSnapshot;
use crate::session::Session;
use crate::utils::{fmt_money, optional, parse_date, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;

pub fn handle(conn: &Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    let today = match optional(m, "date") {
        Some(raw) => parse_date(raw)?,
        None => chrono::Local::now().date_naive(),
    };
    let settings = Settings::load(conn)?;
    let snapshot = snapshot_for(conn, session, today, &settings.policy())?;

    if m.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let ccy = settings.currency.as_str();
    let data = vec![
        vec!["Status".into(), snapshot.status.to_string()],
        vec![
            "Total balance".into(),
            fmt_money(&snapshot.total_balance, ccy),
        ],
        vec![
            "Variable spend this month".into(),
            fmt_money(&snapshot.total_variable_expense, ccy),
        ],
        vec![
            "Daily burn rate".into(),
            fmt_money(&snapshot.average_daily_burn_rate, ccy),
        ],
        vec![
            "Projected at month end".into(),
            fmt_money(&snapshot.projected_balance_end_of_month, ccy),
        ],
        vec![
            "Days remaining".into(),
            snapshot.days_remaining_in_month.to_string(),
        ],
    ];
    println!("Health for {} as of {}", session.user_name, today);
    println!("{}", pretty_table(&["", ""], data));
    println!("{}", snapshot.message);
    Ok(())
}

/// Loads the session's wallets, categories and month-to-date transactions
/// and evaluates them as of `today`.
pub fn snapshot_for(
    conn: &Connection,
    session: &Session,
    today: NaiveDate,
    policy: &HealthPolicy,
) -> Result<HealthSnapshot> {
    let wallets = load_wallets(conn, session)?;
    let categories = load_categories(conn, session)?;
    let transactions = month_to_date(conn, session, today)?;
    Ok(evaluate(&wallets, &transactions, &categories, today, policy))
}
