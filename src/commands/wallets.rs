// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::errors::LedgerError;
use crate::ledger::load_wallets;
use crate::models::WalletKind;
use crate::session::Session;
use crate::utils::{
    fmt_money, id_for_wallet, maybe_print_json, optional, parse_decimal, pretty_table, required,
};
use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?;
            let kind: WalletKind = required(sub, "kind")?.parse()?;
            let opening = parse_decimal(required(sub, "balance")?)?;
            create_wallet(conn, session, name, kind, opening)?;
            println!("Added wallet '{}' ({}, opening {})", name, kind, opening);
        }
        Some(("list", sub)) => list(conn, session, sub)?,
        Some(("rename", sub)) => {
            let name = required(sub, "name")?;
            let to = optional(sub, "to");
            let kind = optional(sub, "kind")
                .map(|k| k.parse::<WalletKind>())
                .transpose()?;
            rename_wallet(conn, session, name, to, kind)?;
            println!("Updated wallet '{}'", to.unwrap_or(name));
        }
        Some(("rm", sub)) => {
            let name = required(sub, "name")?;
            let permanent = sub.get_flag("permanent");
            remove_wallet(conn, session, name, permanent)?;
            if permanent {
                println!("Permanently removed wallet '{}'", name);
            } else {
                println!("Moved wallet '{}' to trash", name);
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn create_wallet(
    conn: &Connection,
    session: &Session,
    name: &str,
    kind: WalletKind,
    opening_balance: Decimal,
) -> Result<i64> {
    if name.is_empty() {
        return Err(anyhow!("Wallet name cannot be empty"));
    }
    if opening_balance < Decimal::ZERO {
        return Err(anyhow!(
            "Opening balance cannot be negative, got {}",
            opening_balance
        ));
    }
    conn.execute(
        "INSERT INTO wallets(user_id, name, kind, balance) VALUES (?1, ?2, ?3, ?4)",
        params![
            session.user_id,
            name,
            kind.as_str(),
            opening_balance.to_string()
        ],
    )
    .with_context(|| format!("Could not add wallet '{}'", name))?;
    let id = conn.last_insert_rowid();
    tracing::info!(id, user = %session.user_name, name, "wallet created");
    Ok(id)
}

/// Name and kind only: the balance belongs to the transactions.
pub fn rename_wallet(
    conn: &Connection,
    session: &Session,
    name: &str,
    new_name: Option<&str>,
    new_kind: Option<WalletKind>,
) -> Result<()> {
    if new_name.is_none() && new_kind.is_none() {
        return Err(anyhow!("Nothing to change, pass --to and/or --kind"));
    }
    let id = id_for_wallet(conn, session.user_id, name)?
        .ok_or_else(|| LedgerError::WalletNotFound(name.to_string()))?;
    if let Some(to) = new_name {
        conn.execute("UPDATE wallets SET name=?1 WHERE id=?2", params![to, id])
            .with_context(|| format!("Could not rename wallet '{}' to '{}'", name, to))?;
    }
    if let Some(kind) = new_kind {
        conn.execute(
            "UPDATE wallets SET kind=?1 WHERE id=?2",
            params![kind.as_str(), id],
        )?;
    }
    Ok(())
}

/// Soft delete hides the wallet from lists, totals and posting. A permanent
/// delete also finds wallets already in the trash and cascades to their
/// transactions.
pub fn remove_wallet(
    conn: &Connection,
    session: &Session,
    name: &str,
    permanent: bool,
) -> Result<()> {
    if permanent {
        // An active wallet wins over a trashed one of the same name
        let id: Option<i64> = conn
            .query_row(
                "SELECT id FROM wallets WHERE user_id=?1 AND name=?2
                 ORDER BY deleted_at IS NOT NULL, deleted_at DESC LIMIT 1",
                params![session.user_id, name],
                |r| r.get(0),
            )
            .optional()?;
        let id = id.ok_or_else(|| LedgerError::WalletNotFound(name.to_string()))?;
        conn.execute("DELETE FROM wallets WHERE id=?1", params![id])?;
        tracing::info!(id, name, "wallet deleted permanently");
    } else {
        let id = id_for_wallet(conn, session.user_id, name)?
            .ok_or_else(|| LedgerError::WalletNotFound(name.to_string()))?;
        conn.execute(
            "UPDATE wallets SET deleted_at=datetime('now') WHERE id=?1",
            params![id],
        )?;
        tracing::info!(id, name, "wallet moved to trash");
    }
    Ok(())
}

fn list(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let wallets = load_wallets(conn, session)?;
    if maybe_print_json(json_flag, jsonl_flag, &wallets)? {
        return Ok(());
    }
    let ccy = Settings::load(conn)?.currency;
    let total = wallets
        .iter()
        .fold(Decimal::ZERO, |acc, w| acc.saturating_add(w.balance));
    let mut data: Vec<Vec<String>> = wallets
        .iter()
        .map(|w| {
            vec![
                w.name.clone(),
                w.kind.to_string(),
                fmt_money(&w.balance, &ccy),
            ]
        })
        .collect();
    data.push(vec!["Total".into(), String::new(), fmt_money(&total, &ccy)]);
    println!("{}", pretty_table(&["Wallet", "Kind", "Balance"], data));
    Ok(())
}
