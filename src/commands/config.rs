// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::KvStore;
use crate::store::{load_usd_rate, save_usd_rate};
use crate::utils::parse_decimal;
use anyhow::{Result, bail};

/// Device-wide settings. Only `usd_rate` exists so far.
pub fn handle(kv: &dyn KvStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => match sub.get_one::<String>("key").unwrap().trim() {
            "usd_rate" => println!("usd_rate = {}", load_usd_rate(kv)?),
            other => bail!("Unknown setting '{}'", other),
        },
        Some(("set", sub)) => {
            let value = sub.get_one::<String>("value").unwrap();
            match sub.get_one::<String>("key").unwrap().trim() {
                "usd_rate" => {
                    let rate = parse_decimal(value)?;
                    save_usd_rate(kv, rate)?;
                    println!("usd_rate set to {}", rate);
                }
                other => bail!("Unknown setting '{}'", other),
            }
        }
        _ => {}
    }
    Ok(())
}
