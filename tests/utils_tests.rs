// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use walletpulse::utils::{days_in_month, fmt_amount, fmt_money, month_start, parse_month};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn month_lengths() {
    assert_eq!(days_in_month(day(2024, 2, 10)), 29);
    assert_eq!(days_in_month(day(2025, 2, 10)), 28);
    assert_eq!(days_in_month(day(2025, 12, 31)), 31);
    assert_eq!(days_in_month(day(2025, 4, 1)), 30);
    assert_eq!(month_start(day(2025, 12, 31)), day(2025, 12, 1));
}

#[test]
fn amounts_are_grouped() {
    assert_eq!(fmt_amount(&dec!(1000000)), "1,000,000.00");
    assert_eq!(fmt_amount(&dec!(-300000)), "-300,000.00");
    assert_eq!(fmt_amount(&dec!(999.5)), "999.50");
    assert_eq!(fmt_amount(&dec!(0)), "0.00");
    assert_eq!(fmt_money(&dec!(35000.125), "IDR"), "IDR 35,000.12");
}

#[test]
fn month_must_be_yyyy_mm() {
    assert_eq!(parse_month(" 2025-09 ").unwrap(), "2025-09");
    assert_eq!(parse_month("2025-9").unwrap(), "2025-09");
    assert!(parse_month("2025-13").is_err());
}
