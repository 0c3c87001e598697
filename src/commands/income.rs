// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::AppState;
use crate::db::KvStore;
use crate::store::Store;
use crate::utils::{fmt_money, parse_decimal};
use anyhow::Result;

pub fn handle(kv: &dyn KvStore, state: &AppState, m: &clap::ArgMatches) -> Result<()> {
    let store = Store::new(kv, state.user.as_str());
    match m.subcommand() {
        Some(("set", sub)) => {
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            store.set_income(amount)?;
            println!("Monthly income set to {}", fmt_money(&amount));
        }
        Some(("show", _)) => {
            println!("Monthly income: {}", fmt_money(&store.income()?));
        }
        _ => {}
    }
    Ok(())
}
