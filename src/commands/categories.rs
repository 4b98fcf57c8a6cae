// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::LedgerError;
use crate::ledger::load_categories;
use crate::models::CategoryKind;
use crate::session::Session;
use crate::utils::{maybe_print_json, pretty_table, required};
use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?;
            let kind: CategoryKind = required(sub, "kind")?.parse()?;
            let fixed = sub.get_flag("fixed");
            create_category(conn, session, name, kind, fixed)?;
            let label = if fixed { "fixed" } else { "variable" };
            println!("Added category '{}' ({}, {})", name, kind, label);
        }
        Some(("list", sub)) => {
            let categories = load_categories(conn, session)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &categories)? {
                let data = categories
                    .into_iter()
                    .map(|c| {
                        let fixed = if c.is_fixed { "yes" } else { "" };
                        vec![c.name, c.kind.to_string(), fixed.to_string()]
                    })
                    .collect();
                println!("{}", pretty_table(&["Category", "Kind", "Fixed"], data));
            }
        }
        Some(("rm", sub)) => {
            let name = required(sub, "name")?;
            let removed = conn.execute(
                "DELETE FROM categories WHERE user_id=?1 AND name=?2",
                params![session.user_id, name],
            )?;
            if removed == 0 {
                return Err(LedgerError::CategoryNotFound(name.to_string()).into());
            }
            println!("Removed category '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

pub fn create_category(
    conn: &Connection,
    session: &Session,
    name: &str,
    kind: CategoryKind,
    is_fixed: bool,
) -> Result<i64> {
    if name.is_empty() {
        return Err(anyhow!("Category name cannot be empty"));
    }
    if is_fixed && kind != CategoryKind::Expense {
        return Err(LedgerError::FixedIncomeCategory.into());
    }
    conn.execute(
        "INSERT INTO categories(user_id, name, kind, is_fixed) VALUES (?1, ?2, ?3, ?4)",
        params![session.user_id, name, kind.as_str(), is_fixed],
    )
    .with_context(|| format!("Could not add category '{}'", name))?;
    Ok(conn.last_insert_rowid())
}
