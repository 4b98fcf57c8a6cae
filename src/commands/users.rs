// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::User;
use crate::utils::{pretty_table, required};
use anyhow::{anyhow, Result};
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?;
            add_user(conn, name)?;
            println!("Added user '{}'", name);
        }
        Some(("list", _)) => {
            let data = list_users(conn)?
                .into_iter()
                .map(|u| vec![u.id.to_string(), u.name])
                .collect();
            println!("{}", pretty_table(&["ID", "User"], data));
        }
        _ => {}
    }
    Ok(())
}

pub fn add_user(conn: &Connection, name: &str) -> Result<i64> {
    if name.is_empty() {
        return Err(anyhow!("User name cannot be empty"));
    }
    conn.execute("INSERT INTO users(name) VALUES (?1)", params![name])
        .map_err(|err| anyhow!("Could not add user '{}': {}", name, err))?;
    Ok(conn.last_insert_rowid())
}

pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn.prepare("SELECT id, name FROM users ORDER BY name")?;
    let rows = stmt.query_map([], |r| {
        Ok(User {
            id: r.get(0)?,
            name: r.get(1)?,
        })
    })?;
    let mut users = Vec::new();
    for row in rows {
        users.push(row?);
    }
    Ok(users)
}
