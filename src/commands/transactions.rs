// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{post, TransactionRequest};
use crate::models::TransactionKind;
use crate::session::Session;
use crate::utils::{
    maybe_print_json, optional, parse_date, parse_decimal, parse_month, pretty_table, required,
};
use anyhow::Result;
use rusqlite::types::Value;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &mut Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, session, sub)?,
        Some(("list", sub)) => list(conn, session, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn request_from_args(sub: &clap::ArgMatches) -> Result<TransactionRequest> {
    let date = match optional(sub, "date") {
        Some(raw) => parse_date(raw)?,
        None => chrono::Local::now().date_naive(),
    };
    Ok(TransactionRequest {
        date,
        kind: required(sub, "kind")?.parse()?,
        amount: parse_decimal(required(sub, "amount")?)?,
        wallet: required(sub, "wallet")?.to_string(),
        target_wallet: optional(sub, "target").map(str::to_string),
        category: optional(sub, "category").map(str::to_string),
        description: optional(sub, "description").map(str::to_string),
    })
}

fn add(conn: &mut Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let req = request_from_args(sub)?;
    post(conn, session, &req)?;
    match (&req.kind, &req.target_wallet) {
        (TransactionKind::Transfer, Some(target)) => println!(
            "Transferred {} from '{}' to '{}' on {}",
            req.amount, req.wallet, target, req.date
        ),
        _ => println!(
            "Recorded {} {} on {} (wallet: {})",
            req.kind, req.amount, req.date, req.wallet
        ),
    }
    Ok(())
}

fn list(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, session, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                let wallet = match &r.target {
                    Some(t) => format!("{} -> {}", r.wallet, t),
                    None => r.wallet.clone(),
                };
                vec![
                    r.date.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    wallet,
                    r.category.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Kind", "Amount", "Wallet", "Category", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub wallet: String,
    pub target: Option<String>,
    pub category: String,
    pub description: String,
}

/// Newest first. `--wallet` matches either side of a transfer.
pub fn query_rows(
    conn: &Connection,
    session: &Session,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT t.id, t.date, t.kind, t.amount, w.name, tw.name, c.name, t.description
         FROM transactions t
         JOIN wallets w ON t.wallet_id=w.id
         LEFT JOIN wallets tw ON t.target_wallet_id=tw.id
         LEFT JOIN categories c ON t.category_id=c.id
         WHERE t.user_id=?",
    );
    let mut params_vec: Vec<Value> = vec![Value::Integer(session.user_id)];

    if let Some(month) = optional(sub, "month") {
        sql.push_str(" AND substr(t.date,1,7)=?");
        params_vec.push(Value::Text(parse_month(month)?));
    }
    if let Some(wallet) = optional(sub, "wallet") {
        sql.push_str(" AND (w.name=? OR tw.name=?)");
        params_vec.push(Value::Text(wallet.into()));
        params_vec.push(Value::Text(wallet.into()));
    }
    if let Some(cat) = optional(sub, "category") {
        sql.push_str(" AND c.name=?");
        params_vec.push(Value::Text(cat.into()));
    }
    if let Some(kind) = optional(sub, "kind") {
        let kind: TransactionKind = kind.parse()?;
        sql.push_str(" AND t.kind=?");
        params_vec.push(Value::Text(kind.as_str().into()));
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(Value::Integer(i64::try_from(*limit).unwrap_or(i64::MAX)));
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(params_vec.iter()))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let category: Option<String> = r.get(6)?;
        let description: Option<String> = r.get(7)?;
        data.push(TransactionRow {
            id: r.get(0)?,
            date: r.get(1)?,
            kind: r.get(2)?,
            amount: r.get(3)?,
            wallet: r.get(4)?,
            target: r.get(5)?,
            category: category.unwrap_or_default(),
            description: description.unwrap_or_default(),
        });
    }
    Ok(data)
}
