// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::auth::{self, AuthProvider, SessionAuth};
use crate::db::KvStore;
use crate::models::Tab;
use crate::store::Store;
use crate::utils::today;
use anyhow::Result;

pub fn handle(kv: &dyn KvStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("login", sub)) => {
            let user = auth::login(kv, sub.get_one::<String>("id").unwrap())?;
            let store = Store::new(kv, user.as_str());
            for tab in Tab::ALL {
                if sub.get_flag("no-seed") {
                    store.skip_seed(tab)?;
                } else if store.seed_if_empty(tab, today())? {
                    println!("Loaded demo records into {}", tab.label());
                }
            }
            println!("Signed in as {}", user);
        }
        Some(("logout", _)) => {
            auth::logout(kv)?;
            println!("Signed out");
        }
        Some(("whoami", _)) => match SessionAuth::new(kv, None).current_user()? {
            Some(u) => println!("{}", u),
            None => println!("Not signed in"),
        },
        _ => {}
    }
    Ok(())
}
