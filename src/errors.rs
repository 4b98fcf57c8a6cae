// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{CategoryKind, TransactionKind};
use rust_decimal::Decimal;
use thiserror::Error;

/// Rejections raised before a transaction touches any balance.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("Wallet '{0}' not found")]
    WalletNotFound(String),

    #[error("Category '{0}' not found")]
    CategoryNotFound(String),

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("A transfer needs a target wallet")]
    MissingTargetWallet,

    #[error("Cannot transfer from '{0}' to itself")]
    SameWallet(String),

    #[error("Only transfers take a target wallet, this is {0}")]
    UnexpectedTargetWallet(TransactionKind),

    #[error("Transfers are not categorized")]
    CategoryOnTransfer,

    #[error("Category '{name}' is {category}, cannot be used for {transaction}")]
    CategoryKindMismatch {
        name: String,
        category: CategoryKind,
        transaction: TransactionKind,
    },

    #[error("Only expense categories can be fixed")]
    FixedIncomeCategory,

    #[error("Amount {amount} would overflow the balance of '{wallet}'")]
    AmountOverflow { wallet: String, amount: Decimal },

    #[error("Insufficient funds in '{wallet}': balance {balance}, needed {needed}")]
    InsufficientFunds {
        wallet: String,
        balance: Decimal,
        needed: Decimal,
    },
}
