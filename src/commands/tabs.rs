// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::{self, Action, AppState};
use crate::db::KvStore;
use crate::models::Tab;
use crate::store::Store;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(kv: &dyn KvStore, state: &AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("use", sub)) => {
            let tab: Tab = sub.get_one::<String>("name").unwrap().parse()?;
            let next = app::apply(state, Action::SwitchTab(tab));
            next.persist(kv)?;
            println!("Panel — {}: {}", next.tab.label(), next.tab.subtitle());
        }
        Some(("list", _)) => {
            let counts = Store::new(kv, state.user.as_str()).tab_counts()?;
            let rows: Vec<Vec<String>> = counts
                .into_iter()
                .map(|(tab, n)| {
                    let marker = if tab == state.tab { "*" } else { "" };
                    vec![marker.to_string(), tab.label().to_string(), n.to_string()]
                })
                .collect();
            println!("{}", pretty_table(&["", "Tab", "Records"], rows));
        }
        _ => {}
    }
    Ok(())
}
