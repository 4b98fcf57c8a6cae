// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{set_currency, set_warning_ratio, Settings};
use crate::utils::{parse_decimal, pretty_table, required};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("currency", sub)) => {
            let ccy = set_currency(conn, required(sub, "code")?)?;
            println!("Currency set to {}", ccy);
        }
        Some(("warning-ratio", sub)) => {
            let ratio = parse_decimal(required(sub, "ratio")?)?;
            set_warning_ratio(conn, ratio)?;
            println!("Warning ratio set to {}", ratio);
        }
        _ => {
            let settings = Settings::load(conn)?;
            let data = vec![
                vec!["currency".to_string(), settings.currency],
                vec!["warning_ratio".to_string(), settings.warning_ratio.to_string()],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], data));
        }
    }
    Ok(())
}
