// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use walletpulse::{cli, commands, db, logging, session::Session};

fn main() -> Result<()> {
    logging::init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = db::open_or_init()?;
    let user = matches
        .get_one::<String>("user")
        .context("No user selected")?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("user", sub)) => commands::users::handle(&conn, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&conn, sub)?,
        Some(("wallet", sub)) => {
            commands::wallets::handle(&conn, &Session::open(&conn, user)?, sub)?
        }
        Some(("category", sub)) => {
            commands::categories::handle(&conn, &Session::open(&conn, user)?, sub)?
        }
        Some(("tx", sub)) => {
            let session = Session::open(&conn, user)?;
            commands::transactions::handle(&mut conn, &session, sub)?
        }
        Some(("health", sub)) => {
            commands::health::handle(&conn, &Session::open(&conn, user)?, sub)?
        }
        Some(("doctor", _)) => commands::doctor::handle(&conn, &Session::open(&conn, user)?)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
