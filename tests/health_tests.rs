// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use walletpulse::health::{
    classify, evaluate, fixed_category_ids, status_for, HealthPolicy, SpendClass,
};
use walletpulse::models::{
    Category, CategoryKind, HealthStatus, Transaction, TransactionKind, Wallet, WalletKind,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn wallet(id: i64, balance: Decimal) -> Wallet {
    Wallet {
        id,
        name: format!("W{}", id),
        kind: WalletKind::Bank,
        balance,
    }
}

fn tx(
    id: i64,
    date: NaiveDate,
    kind: TransactionKind,
    amount: Decimal,
    category: Option<i64>,
) -> Transaction {
    Transaction {
        id,
        date,
        kind,
        amount,
        wallet_id: 1,
        target_wallet_id: if kind == TransactionKind::Transfer {
            Some(2)
        } else {
            None
        },
        category_id: category,
        description: None,
    }
}

fn categories() -> Vec<Category> {
    vec![
        Category {
            id: 10,
            name: "Food".into(),
            kind: CategoryKind::Expense,
            is_fixed: false,
        },
        Category {
            id: 11,
            name: "Rent".into(),
            kind: CategoryKind::Expense,
            is_fixed: true,
        },
        Category {
            id: 12,
            name: "Salary".into(),
            kind: CategoryKind::Income,
            is_fixed: false,
        },
    ]
}

#[test]
fn first_day_without_spending_is_safe() {
    // September has 30 days
    let snap = evaluate(
        &[wallet(1, dec!(1000000))],
        &[],
        &categories(),
        day(2025, 9, 1),
        &HealthPolicy::default(),
    );
    assert_eq!(snap.total_balance, dec!(1000000));
    assert_eq!(snap.average_daily_burn_rate, Decimal::ZERO);
    assert_eq!(snap.days_remaining_in_month, 29);
    assert_eq!(snap.projected_balance_end_of_month, dec!(1000000));
    assert_eq!(snap.status, HealthStatus::Safe);
}

#[test]
fn heavy_spending_projects_danger() {
    let today = day(2025, 9, 10);
    let txs = vec![
        tx(1, day(2025, 9, 2), TransactionKind::Expense, dec!(150000), Some(10)),
        tx(2, day(2025, 9, 6), TransactionKind::Expense, dec!(250000), Some(10)),
    ];
    let snap = evaluate(
        &[wallet(1, dec!(500000))],
        &txs,
        &categories(),
        today,
        &HealthPolicy::default(),
    );
    assert_eq!(snap.total_variable_expense, dec!(400000));
    assert_eq!(snap.average_daily_burn_rate, dec!(40000));
    assert_eq!(snap.days_remaining_in_month, 20);
    assert_eq!(snap.projected_balance_end_of_month, dec!(-300000));
    assert_eq!(snap.status, HealthStatus::Danger);
}

#[test]
fn transfers_and_fixed_costs_do_not_burn() {
    let today = day(2025, 9, 10);
    let base = vec![tx(1, day(2025, 9, 3), TransactionKind::Expense, dec!(100000), Some(10))];
    let mut noisy = base.clone();
    noisy.push(tx(2, day(2025, 9, 4), TransactionKind::Transfer, dec!(900000), None));
    noisy.push(tx(3, day(2025, 9, 1), TransactionKind::Expense, dec!(2500000), Some(11)));
    noisy.push(tx(4, day(2025, 9, 5), TransactionKind::Income, dec!(7000000), Some(12)));

    let wallets = [wallet(1, dec!(3000000)), wallet(2, dec!(500000))];
    let plain = evaluate(&wallets, &base, &categories(), today, &HealthPolicy::default());
    let with_noise = evaluate(&wallets, &noisy, &categories(), today, &HealthPolicy::default());

    assert_eq!(plain.total_variable_expense, dec!(100000));
    assert_eq!(with_noise.total_variable_expense, plain.total_variable_expense);
    assert_eq!(with_noise.average_daily_burn_rate, plain.average_daily_burn_rate);
    assert_eq!(with_noise.status, plain.status);
}

#[test]
fn only_categorized_variable_expenses_burn() {
    let fixed = fixed_category_ids(&categories());
    let food = tx(1, day(2025, 9, 3), TransactionKind::Expense, dec!(10), Some(10));
    let loose = tx(2, day(2025, 9, 3), TransactionKind::Expense, dec!(10), None);
    let rent = tx(3, day(2025, 9, 3), TransactionKind::Expense, dec!(10), Some(11));
    let transfer = tx(4, day(2025, 9, 3), TransactionKind::Transfer, dec!(10), None);
    assert_eq!(classify(&food, &fixed), SpendClass::VariableExpense);
    assert_eq!(classify(&loose, &fixed), SpendClass::UncategorizedExpense);
    assert_eq!(classify(&rent, &fixed), SpendClass::FixedExpense);
    assert_eq!(classify(&transfer, &fixed), SpendClass::Transfer);
}

#[test]
fn uncategorized_expense_does_not_burn() {
    let txs = vec![tx(1, day(2025, 9, 4), TransactionKind::Expense, dec!(400000), None)];
    let snap = evaluate(
        &[wallet(1, dec!(500000))],
        &txs,
        &categories(),
        day(2025, 9, 10),
        &HealthPolicy::default(),
    );
    assert_eq!(snap.total_variable_expense, Decimal::ZERO);
    assert_eq!(snap.average_daily_burn_rate, Decimal::ZERO);
    assert_eq!(snap.projected_balance_end_of_month, dec!(500000));
    assert_eq!(snap.status, HealthStatus::Safe);
}

#[test]
fn total_balance_ignores_wallet_order() {
    let wallets = vec![
        wallet(1, dec!(120.50)),
        wallet(2, dec!(0)),
        wallet(3, dec!(99999.49)),
    ];
    let mut reversed = wallets.clone();
    reversed.reverse();
    let today = day(2025, 9, 15);
    let a = evaluate(&wallets, &[], &[], today, &HealthPolicy::default());
    let b = evaluate(&reversed, &[], &[], today, &HealthPolicy::default());
    assert_eq!(a.total_balance, dec!(100119.99));
    assert_eq!(a.total_balance, b.total_balance);
}

#[test]
fn warning_when_less_than_a_fifth_survives() {
    // burn 42,000/day over 20 remaining days leaves 160,000 of 1,000,000
    let txs = vec![tx(1, day(2025, 9, 5), TransactionKind::Expense, dec!(420000), Some(10))];
    let snap = evaluate(
        &[wallet(1, dec!(1000000))],
        &txs,
        &categories(),
        day(2025, 9, 10),
        &HealthPolicy::default(),
    );
    assert_eq!(snap.projected_balance_end_of_month, dec!(160000));
    assert_eq!(snap.status, HealthStatus::Warning);

    let lenient = HealthPolicy {
        warning_ratio: dec!(0.1),
    };
    let snap = evaluate(
        &[wallet(1, dec!(1000000))],
        &txs,
        &categories(),
        day(2025, 9, 10),
        &lenient,
    );
    assert_eq!(snap.status, HealthStatus::Safe);
}

#[test]
fn negative_projection_is_always_danger() {
    let strict = HealthPolicy {
        warning_ratio: Decimal::ZERO,
    };
    assert_eq!(status_for(dec!(100), dec!(-0.01), &strict), HealthStatus::Danger);
    assert_eq!(
        status_for(dec!(-50), dec!(-50), &HealthPolicy::default()),
        HealthStatus::Danger
    );
    assert_eq!(status_for(dec!(100), dec!(0), &strict), HealthStatus::Safe);
}

#[test]
fn no_data_is_safe_with_hint() {
    let snap = evaluate(&[], &[], &[], day(2025, 2, 14), &HealthPolicy::default());
    assert_eq!(snap.total_balance, Decimal::ZERO);
    assert_eq!(snap.status, HealthStatus::Safe);
    assert!(snap.message.contains("No wallets"));
}

#[test]
fn last_day_of_month_has_no_days_left() {
    let txs = vec![tx(1, day(2024, 2, 10), TransactionKind::Expense, dec!(2900), Some(10))];
    // 2024 is a leap year
    let snap = evaluate(
        &[wallet(1, dec!(50))],
        &txs,
        &categories(),
        day(2024, 2, 29),
        &HealthPolicy::default(),
    );
    assert_eq!(snap.days_remaining_in_month, 0);
    assert_eq!(snap.average_daily_burn_rate, dec!(100));
    assert_eq!(snap.projected_balance_end_of_month, dec!(50));
    assert_eq!(snap.status, HealthStatus::Safe);
}

#[test]
fn ignores_transactions_outside_month_to_date() {
    let today = day(2025, 9, 10);
    let txs = vec![
        tx(1, day(2025, 8, 31), TransactionKind::Expense, dec!(1000), Some(10)),
        tx(2, day(2025, 9, 11), TransactionKind::Expense, dec!(1000), Some(10)),
        tx(3, day(2025, 9, 10), TransactionKind::Expense, dec!(100), Some(10)),
    ];
    let snap = evaluate(
        &[wallet(1, dec!(5000))],
        &txs,
        &categories(),
        today,
        &HealthPolicy::default(),
    );
    assert_eq!(snap.total_variable_expense, dec!(100));
    assert_eq!(snap.average_daily_burn_rate, dec!(10));
}

#[test]
fn burn_rate_is_rounded_to_cents() {
    let txs = vec![tx(1, day(2025, 9, 2), TransactionKind::Expense, dec!(10), Some(10))];
    let snap = evaluate(
        &[wallet(1, dec!(100))],
        &txs,
        &categories(),
        day(2025, 9, 3),
        &HealthPolicy::default(),
    );
    assert_eq!(snap.average_daily_burn_rate, dec!(3.33));
    assert_eq!(snap.days_remaining_in_month, 27);
    assert_eq!(snap.projected_balance_end_of_month, dec!(10));
    assert_eq!(snap.status, HealthStatus::Warning);
}

#[test]
fn huge_balances_saturate_instead_of_panicking() {
    let rich = [wallet(1, Decimal::MAX), wallet(2, Decimal::MAX)];
    let snap = evaluate(&rich, &[], &categories(), day(2025, 9, 10), &HealthPolicy::default());
    assert_eq!(snap.total_balance, Decimal::MAX);
    assert_eq!(snap.status, HealthStatus::Safe);

    let spree = vec![
        tx(1, day(2025, 9, 1), TransactionKind::Expense, Decimal::MAX, Some(10)),
        tx(2, day(2025, 9, 1), TransactionKind::Expense, Decimal::MAX, Some(10)),
    ];
    let snap = evaluate(
        &[wallet(1, Decimal::ZERO)],
        &spree,
        &categories(),
        day(2025, 9, 1),
        &HealthPolicy::default(),
    );
    assert_eq!(snap.total_variable_expense, Decimal::MAX);
    assert_eq!(snap.projected_balance_end_of_month, Decimal::MIN);
    assert_eq!(snap.status, HealthStatus::Danger);
}
