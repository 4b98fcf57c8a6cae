// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Recording transactions and reading back the inputs of a health check.
//!
//! A [`TransactionRequest`] carries names as typed by the user. [`validate`]
//! resolves them against the session's data and enforces the shape rules
//! (positive amount, transfers between two distinct wallets, matching
//! category kind); only a [`ValidatedTransaction`] can be posted.

use crate::errors::LedgerError;
use crate::models::{Category, Transaction, TransactionKind, Wallet, WalletKind};
use crate::session::Session;
use crate::utils::{find_category, id_for_wallet, month_start, parse_stored_decimal};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct TransactionRequest {
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub wallet: String,
    pub target_wallet: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Movement {
    Income { wallet: WalletRef },
    Expense { wallet: WalletRef },
    Transfer { from: WalletRef, to: WalletRef },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTransaction {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub movement: Movement,
    pub category_id: Option<i64>,
    pub description: Option<String>,
}

impl ValidatedTransaction {
    pub fn kind(&self) -> TransactionKind {
        match self.movement {
            Movement::Income { .. } => TransactionKind::Income,
            Movement::Expense { .. } => TransactionKind::Expense,
            Movement::Transfer { .. } => TransactionKind::Transfer,
        }
    }

    fn source(&self) -> &WalletRef {
        match &self.movement {
            Movement::Income { wallet } | Movement::Expense { wallet } => wallet,
            Movement::Transfer { from, .. } => from,
        }
    }

    fn target(&self) -> Option<&WalletRef> {
        match &self.movement {
            Movement::Transfer { to, .. } => Some(to),
            _ => None,
        }
    }
}

fn resolve_wallet(conn: &Connection, session: &Session, name: &str) -> Result<WalletRef> {
    let id = id_for_wallet(conn, session.user_id, name)?
        .ok_or_else(|| LedgerError::WalletNotFound(name.to_string()))?;
    Ok(WalletRef {
        id,
        name: name.to_string(),
    })
}

pub fn validate(
    conn: &Connection,
    session: &Session,
    req: &TransactionRequest,
) -> Result<ValidatedTransaction> {
    if req.amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount(req.amount).into());
    }
    let source = resolve_wallet(conn, session, &req.wallet)?;

    let movement = match req.kind {
        TransactionKind::Transfer => {
            let target = req
                .target_wallet
                .as_deref()
                .ok_or(LedgerError::MissingTargetWallet)?;
            if target == req.wallet {
                return Err(LedgerError::SameWallet(target.to_string()).into());
            }
            if req.category.is_some() {
                return Err(LedgerError::CategoryOnTransfer.into());
            }
            Movement::Transfer {
                from: source,
                to: resolve_wallet(conn, session, target)?,
            }
        }
        kind if req.target_wallet.is_some() => {
            return Err(LedgerError::UnexpectedTargetWallet(kind).into());
        }
        TransactionKind::Income => Movement::Income { wallet: source },
        TransactionKind::Expense => Movement::Expense { wallet: source },
    };

    let category_id = match req.category.as_deref() {
        Some(name) => {
            let (id, category_kind) = find_category(conn, session.user_id, name)?
                .ok_or_else(|| LedgerError::CategoryNotFound(name.to_string()))?;
            if !category_kind.matches(req.kind) {
                return Err(LedgerError::CategoryKindMismatch {
                    name: name.to_string(),
                    category: category_kind,
                    transaction: req.kind,
                }
                .into());
            }
            Some(id)
        }
        None => None,
    };

    Ok(ValidatedTransaction {
        date: req.date,
        amount: req.amount,
        movement,
        category_id,
        description: req.description.clone(),
    })
}

pub fn wallet_balance(conn: &Connection, wallet_id: i64) -> Result<Decimal> {
    let raw: String = conn
        .query_row(
            "SELECT balance FROM wallets WHERE id=?1",
            params![wallet_id],
            |r| r.get(0),
        )
        .with_context(|| format!("Wallet #{} not found", wallet_id))?;
    parse_stored_decimal(&raw, "wallet balance")
}

fn set_balance(conn: &Connection, wallet_id: i64, balance: Decimal) -> Result<()> {
    conn.execute(
        "UPDATE wallets SET balance=?1 WHERE id=?2",
        params![balance.to_string(), wallet_id],
    )?;
    Ok(())
}

fn withdraw(conn: &Connection, wallet: &WalletRef, amount: Decimal) -> Result<()> {
    let balance = wallet_balance(conn, wallet.id)?;
    if balance < amount {
        return Err(LedgerError::InsufficientFunds {
            wallet: wallet.name.clone(),
            balance,
            needed: amount,
        }
        .into());
    }
    let remaining = balance
        .checked_sub(amount)
        .ok_or_else(|| overflow(wallet, amount))?;
    set_balance(conn, wallet.id, remaining)
}

fn deposit(conn: &Connection, wallet: &WalletRef, amount: Decimal) -> Result<()> {
    let balance = wallet_balance(conn, wallet.id)?;
    let updated = balance
        .checked_add(amount)
        .ok_or_else(|| overflow(wallet, amount))?;
    set_balance(conn, wallet.id, updated)
}

fn overflow(wallet: &WalletRef, amount: Decimal) -> LedgerError {
    LedgerError::AmountOverflow {
        wallet: wallet.name.clone(),
        amount,
    }
}

/// Validates, moves the money and records the transaction atomically.
/// Returns the new transaction id.
pub fn post(conn: &mut Connection, session: &Session, req: &TransactionRequest) -> Result<i64> {
    let validated = validate(conn, session, req)?;
    let amount = validated.amount;

    let tx = conn.transaction()?;
    match &validated.movement {
        Movement::Income { wallet } => deposit(&tx, wallet, amount)?,
        Movement::Expense { wallet } => withdraw(&tx, wallet, amount)?,
        Movement::Transfer { from, to } => {
            withdraw(&tx, from, amount)?;
            deposit(&tx, to, amount)?;
        }
    }
    tx.execute(
        "INSERT INTO transactions(
            user_id, date, kind, amount, wallet_id, target_wallet_id, category_id, description
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            session.user_id,
            validated.date.to_string(),
            validated.kind().as_str(),
            amount.to_string(),
            validated.source().id,
            validated.target().map(|w| w.id),
            validated.category_id,
            validated.description,
        ],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;

    tracing::info!(
        id,
        user = %session.user_name,
        kind = validated.kind().as_str(),
        %amount,
        wallet = %validated.source().name,
        "transaction posted"
    );
    Ok(id)
}

pub fn load_wallets(conn: &Connection, session: &Session) -> Result<Vec<Wallet>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, kind, balance FROM wallets
         WHERE user_id=?1 AND deleted_at IS NULL ORDER BY name",
    )?;
    let rows = stmt.query_map(params![session.user_id], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
        ))
    })?;
    let mut wallets = Vec::new();
    for row in rows {
        let (id, name, kind, balance) = row?;
        wallets.push(Wallet {
            id,
            kind: kind.parse::<WalletKind>()?,
            balance: parse_stored_decimal(&balance, "wallet balance")
                .with_context(|| format!("Wallet '{}'", name))?,
            name,
        });
    }
    Ok(wallets)
}

pub fn load_categories(conn: &Connection, session: &Session) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, kind, is_fixed FROM categories WHERE user_id=?1 ORDER BY kind, name",
    )?;
    let rows = stmt.query_map(params![session.user_id], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, bool>(3)?,
        ))
    })?;
    let mut categories = Vec::new();
    for row in rows {
        let (id, name, kind, is_fixed) = row?;
        categories.push(Category {
            id,
            name,
            kind: kind.parse()?,
            is_fixed,
        });
    }
    Ok(categories)
}

/// Transactions dated within `[from, to]`, oldest first.
pub fn load_transactions(
    conn: &Connection,
    session: &Session,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, kind, amount, wallet_id, target_wallet_id, category_id, description
         FROM transactions
         WHERE user_id=?1 AND date>=?2 AND date<=?3
         ORDER BY date, id",
    )?;
    let mut rows = stmt.query(params![session.user_id, from.to_string(), to.to_string()])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let date_raw: String = r.get(1)?;
        let kind_raw: String = r.get(2)?;
        let amount_raw: String = r.get(3)?;
        out.push(Transaction {
            id: r.get(0)?,
            date: NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d")
                .with_context(|| format!("Invalid transaction date '{}'", date_raw))?,
            kind: kind_raw.parse()?,
            amount: parse_stored_decimal(&amount_raw, "amount")?,
            wallet_id: r.get(4)?,
            target_wallet_id: r.get(5)?,
            category_id: r.get(6)?,
            description: r.get(7)?,
        });
    }
    Ok(out)
}

pub fn month_to_date(
    conn: &Connection,
    session: &Session,
    today: NaiveDate,
) -> Result<Vec<Transaction>> {
    load_transactions(conn, session, month_start(today), today)
}
