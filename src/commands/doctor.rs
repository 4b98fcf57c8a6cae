// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::load_wallets;
use crate::session::Session;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub code: &'static str,
    pub detail: String,
}

const SHAPE_CHECKS: &[(&str, &str)] = &[
    (
        "transfer_missing_target",
        "t.kind='TRANSFER' AND t.target_wallet_id IS NULL",
    ),
    (
        "transfer_same_wallet",
        "t.kind='TRANSFER' AND t.target_wallet_id=t.wallet_id",
    ),
    (
        "target_on_non_transfer",
        "t.kind!='TRANSFER' AND t.target_wallet_id IS NOT NULL",
    ),
    (
        "category_on_transfer",
        "t.kind='TRANSFER' AND t.category_id IS NOT NULL",
    ),
    (
        "category_kind_mismatch",
        "t.kind!='TRANSFER' AND c.kind IS NOT NULL AND c.kind!=t.kind",
    ),
];

pub fn handle(conn: &Connection, session: &Session) -> Result<()> {
    let issues = find_issues(conn, session)?;
    if issues.is_empty() {
        println!("doctor: no issues found");
    } else {
        let rows = issues
            .into_iter()
            .map(|i| vec![i.code.to_string(), i.detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Rows that bypassed validation, e.g. written by another tool.
pub fn find_issues(conn: &Connection, session: &Session) -> Result<Vec<Issue>> {
    let mut issues = Vec::new();

    for &(code, condition) in SHAPE_CHECKS {
        let sql = format!(
            "SELECT t.id, t.date FROM transactions t
             LEFT JOIN categories c ON t.category_id=c.id
             WHERE t.user_id=?1 AND {} ORDER BY t.date, t.id",
            condition
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut cur = stmt.query(params![session.user_id])?;
        while let Some(r) = cur.next()? {
            let id: i64 = r.get(0)?;
            let date: String = r.get(1)?;
            issues.push(Issue {
                code,
                detail: format!("transaction #{} on {}", id, date),
            });
        }
    }

    let mut stmt =
        conn.prepare("SELECT id, amount FROM transactions WHERE user_id=?1 ORDER BY id")?;
    let mut cur = stmt.query(params![session.user_id])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let raw: String = r.get(1)?;
        match raw.parse::<Decimal>() {
            Ok(amount) if amount <= Decimal::ZERO => issues.push(Issue {
                code: "non_positive_amount",
                detail: format!("transaction #{} has amount {}", id, amount),
            }),
            Ok(_) => {}
            Err(_) => issues.push(Issue {
                code: "unreadable_amount",
                detail: format!("transaction #{} has amount '{}'", id, raw),
            }),
        }
    }

    for wallet in load_wallets(conn, session)? {
        if wallet.balance < Decimal::ZERO {
            issues.push(Issue {
                code: "negative_balance",
                detail: format!("wallet '{}' at {}", wallet.name, wallet.balance),
            });
        }
    }

    Ok(issues)
}
