// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month-end financial health projection.
//!
//! Everything here is pure: the caller loads wallets, categories and the
//! month-to-date transactions and hands them over together with "today".

use crate::models::{
    Category, HealthSnapshot, HealthStatus, Transaction, TransactionKind, Wallet,
};
use crate::utils::{days_in_month, fmt_amount, month_start};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// 0.2: less than a fifth of today's balance expected to survive the month.
pub const DEFAULT_WARNING_RATIO: Decimal = Decimal::from_parts(2, 0, 0, false, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthPolicy {
    pub warning_ratio: Decimal,
}

impl Default for HealthPolicy {
    fn default() -> Self {
        Self {
            warning_ratio: DEFAULT_WARNING_RATIO,
        }
    }
}

/// How a transaction contributes to the burn rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpendClass {
    Income,
    VariableExpense,
    FixedExpense,
    /// Expense without a category, e.g. after its category was removed.
    UncategorizedExpense,
    Transfer,
}

pub fn fixed_category_ids(categories: &[Category]) -> HashSet<i64> {
    categories
        .iter()
        .filter(|c| c.is_fixed)
        .map(|c| c.id)
        .collect()
}

/// Only expenses filed under a non-fixed category burn; uncategorized ones
/// are left out of the burn rate.
pub fn classify(tx: &Transaction, fixed_categories: &HashSet<i64>) -> SpendClass {
    match tx.kind {
        TransactionKind::Income => SpendClass::Income,
        TransactionKind::Transfer => SpendClass::Transfer,
        TransactionKind::Expense => match tx.category_id {
            None => SpendClass::UncategorizedExpense,
            Some(id) if fixed_categories.contains(&id) => SpendClass::FixedExpense,
            Some(_) => SpendClass::VariableExpense,
        },
    }
}

/// First match wins: a negative projection is always DANGER.
pub fn status_for(
    total_balance: Decimal,
    projected: Decimal,
    policy: &HealthPolicy,
) -> HealthStatus {
    if projected < Decimal::ZERO {
        HealthStatus::Danger
    } else if projected < total_balance.saturating_mul(policy.warning_ratio) {
        HealthStatus::Warning
    } else {
        HealthStatus::Safe
    }
}

pub fn evaluate(
    wallets: &[Wallet],
    transactions: &[Transaction],
    categories: &[Category],
    today: NaiveDate,
    policy: &HealthPolicy,
) -> HealthSnapshot {
    // Saturating throughout: evaluation never fails, even at Decimal::MAX.
    let total_balance = wallets
        .iter()
        .fold(Decimal::ZERO, |acc, w| acc.saturating_add(w.balance));

    let window_start = month_start(today);
    let fixed = fixed_category_ids(categories);
    let total_variable_expense: Decimal = transactions
        .iter()
        .filter(|tx| tx.date >= window_start && tx.date <= today)
        .filter(|tx| classify(tx, &fixed) == SpendClass::VariableExpense)
        .fold(Decimal::ZERO, |acc, tx| acc.saturating_add(tx.amount));

    let days_elapsed = today.day().max(1);
    let days_remaining = days_in_month(today).saturating_sub(today.day());

    let burn_rate = total_variable_expense / Decimal::from(days_elapsed);
    let projected =
        total_balance.saturating_sub(burn_rate.saturating_mul(Decimal::from(days_remaining)));
    let status = status_for(total_balance, projected, policy);

    let burn_rate = burn_rate.round_dp(2);
    let projected = projected.round_dp(2);
    let no_data = wallets.is_empty() && transactions.is_empty();

    tracing::debug!(
        %total_balance,
        %total_variable_expense,
        %burn_rate,
        %projected,
        days_remaining,
        status = status.as_str(),
        "evaluated financial health"
    );

    HealthSnapshot {
        total_balance,
        total_variable_expense,
        average_daily_burn_rate: burn_rate,
        projected_balance_end_of_month: projected,
        days_remaining_in_month: days_remaining,
        status,
        message: health_message(status, no_data, burn_rate, projected, days_remaining, policy),
    }
}

fn health_message(
    status: HealthStatus,
    no_data: bool,
    burn_rate: Decimal,
    projected: Decimal,
    days_remaining: u32,
    policy: &HealthPolicy,
) -> String {
    if no_data {
        return "No wallets or transactions yet. Add a wallet to start tracking.".to_string();
    }
    match status {
        HealthStatus::Safe => format!(
            "On track: about {} left at month end, {} days to go.",
            fmt_amount(&projected),
            days_remaining
        ),
        HealthStatus::Warning => format!(
            "Running low: spending {} a day leaves {}, under {}% of what you have now.",
            fmt_amount(&burn_rate),
            fmt_amount(&projected),
            policy
                .warning_ratio
                .saturating_mul(Decimal::ONE_HUNDRED)
                .normalize()
        ),
        HealthStatus::Danger => format!(
            "Danger: at {} a day you run out before month end ({} projected). Cut back now.",
            fmt_amount(&burn_rate),
            fmt_amount(&projected)
        ),
    }
}
