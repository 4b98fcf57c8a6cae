// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! User-tunable settings, kept in the `settings` table next to the data.

use crate::health::{HealthPolicy, DEFAULT_WARNING_RATIO};
use crate::utils::parse_stored_decimal;
use anyhow::{anyhow, Result};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use serde::Serialize;

pub const CURRENCY_KEY: &str = "currency";
pub const WARNING_RATIO_KEY: &str = "warning_ratio";
pub const DEFAULT_CURRENCY: &str = "IDR";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub currency: String,
    pub warning_ratio: Decimal,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            warning_ratio: DEFAULT_WARNING_RATIO,
        }
    }
}

impl Settings {
    pub fn load(conn: &Connection) -> Result<Self> {
        let mut settings = Settings::default();
        if let Some(ccy) = get_setting(conn, CURRENCY_KEY)? {
            settings.currency = ccy;
        }
        if let Some(raw) = get_setting(conn, WARNING_RATIO_KEY)? {
            settings.warning_ratio = parse_stored_decimal(&raw, "warning ratio")?;
        }
        Ok(settings)
    }

    pub fn policy(&self) -> HealthPolicy {
        HealthPolicy {
            warning_ratio: self.warning_ratio,
        }
    }
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn set_currency(conn: &Connection, raw: &str) -> Result<String> {
    let ccy = raw.trim().to_uppercase();
    if ccy.len() != 3 || !ccy.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(anyhow!("Invalid currency code '{}', expected e.g. IDR", raw));
    }
    set_setting(conn, CURRENCY_KEY, &ccy)?;
    Ok(ccy)
}

pub fn set_warning_ratio(conn: &Connection, ratio: Decimal) -> Result<()> {
    if ratio < Decimal::ZERO || ratio > Decimal::ONE {
        return Err(anyhow!("Warning ratio must be between 0 and 1, got {}", ratio));
    }
    set_setting(conn, WARNING_RATIO_KEY, &ratio.to_string())
}
