// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::LedgerError;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

/// Whose data a command sees. Resolved once in `main` and handed to every
/// handler; nothing reads the active user from anywhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub user_name: String,
}

impl Session {
    pub fn open(conn: &Connection, user_name: &str) -> Result<Self> {
        let name = user_name.trim();
        let id: Option<i64> = conn
            .query_row(
                "SELECT id FROM users WHERE name=?1",
                params![name],
                |r| r.get(0),
            )
            .optional()?;
        let user_id = id.ok_or_else(|| LedgerError::UserNotFound(name.to_string()))?;
        tracing::debug!(user = name, user_id, "session opened");
        Ok(Session {
            user_id,
            user_name: name.to_string(),
        })
    }
}
