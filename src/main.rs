// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use licensehub::auth::SessionAuth;
use licensehub::{app, cli, commands, db, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;

    // Commands that do not touch a user's records.
    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
            return Ok(());
        }
        Some(("session", sub)) => return commands::session::handle(&conn, sub),
        Some(("theme", sub)) => return commands::theme::handle(&conn, sub),
        Some(("config", sub)) => return commands::config::handle(&conn, sub),
        None => {
            cli::build_cli().print_help()?;
            println!();
            return Ok(());
        }
        _ => {}
    }

    let explicit = matches.get_one::<String>("user").cloned();
    let state = app::open_session(
        &conn,
        &SessionAuth::new(&conn, explicit),
        matches.get_one::<String>("tab").map(String::as_str),
    )?;

    match matches.subcommand() {
        Some(("tab", sub)) => commands::tabs::handle(&conn, &state, sub)?,
        Some(("license", sub)) => commands::licenses::handle(&conn, &state, sub)?,
        Some(("stats", sub)) => commands::stats::handle(&conn, &state, sub)?,
        Some(("income", sub)) => commands::income::handle(&conn, &state, sub)?,
        Some(("savings", sub)) => commands::savings::handle(&conn, &state, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn, &state)?,
        _ => {}
    }
    Ok(())
}
