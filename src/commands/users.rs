// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_active_user, id_for_user, pretty_table, set_active_user};
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            conn.execute("INSERT INTO users(name) VALUES (?1)", params![name])?;
            // First user becomes the active identity automatically.
            if get_active_user(conn)?.is_none() {
                set_active_user(conn, name)?;
                println!("Added user '{}' (now active)", name);
            } else {
                println!("Added user '{}'", name);
            }
        }
        Some(("use", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            id_for_user(conn, name)?;
            set_active_user(conn, name)?;
            println!("Active user is now '{}'", name);
        }
        Some(("list", _)) => {
            let active = get_active_user(conn)?;
            let mut stmt = conn.prepare("SELECT name FROM users ORDER BY name")?;
            let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
            let mut data = Vec::new();
            for row in rows {
                let name = row?;
                let mark = if Some(&name) == active.as_ref() { "*" } else { "" };
                data.push(vec![name, mark.to_string()]);
            }
            println!("{}", pretty_table(&["User", "Active"], data));
        }
        _ => {}
    }
    Ok(())
}
