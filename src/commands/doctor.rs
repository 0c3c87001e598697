// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::AppState;
use crate::db::KvStore;
use crate::models::{BillingCycle, License, Status, Tab, is_known_category};
use crate::store::{Store, licenses_key};
use crate::utils::pretty_table;
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static CCY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{3}$").expect("currency pattern"));

/// Findings for one tab's records, as (issue, detail) pairs.
pub fn check_records(tab: Tab, records: &[License]) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    let mut seen = HashSet::new();
    for l in records {
        let who = format!("{} {} ({})", tab, l.name, l.id);
        if l.id.is_empty() {
            rows.push(("missing_id".into(), who.clone()));
        } else if !seen.insert(l.id.as_str()) {
            rows.push(("duplicate_id".into(), who.clone()));
        }
        if l.name.trim().is_empty() {
            rows.push(("missing_name".into(), who.clone()));
        }
        if let BillingCycle::Unknown(raw) = &l.billing_cycle {
            rows.push(("unknown_cycle".into(), format!("{} '{}'", who, raw)));
        }
        if let Status::Unknown(raw) = &l.status {
            rows.push(("unknown_status".into(), format!("{} '{}'", who, raw)));
        }
        if let Some(c) = l.category.as_deref().filter(|c| !is_known_category(c)) {
            rows.push(("unknown_category".into(), format!("{} '{}'", who, c)));
        }
        if let Some(c) = l.currency.as_deref().filter(|c| !CCY.is_match(c)) {
            rows.push(("odd_currency".into(), format!("{} '{}'", who, c)));
        }
        if l.cost.is_sign_negative() {
            rows.push(("negative_cost".into(), who.clone()));
        }
        if l.status.is_active() && l.next_renewal.is_none() && l.billing_cycle != BillingCycle::OneTime {
            rows.push(("no_renewal_date".into(), who));
        }
    }
    rows
}

pub fn handle(kv: &dyn KvStore, state: &AppState) -> Result<()> {
    let store = Store::new(kv, state.user.as_str());
    let mut rows = Vec::new();

    for tab in Tab::ALL {
        // Records that did not deserialize are dropped by load; count them here.
        if let Some(raw) = kv.get(&licenses_key(tab, store.user()))? {
            match serde_json::from_str::<serde_json::Value>(&raw) {
                Ok(serde_json::Value::Array(items)) => {
                    let loaded = store.load(tab)?.len();
                    if loaded < items.len() {
                        rows.push((
                            "unreadable_records".to_string(),
                            format!("{}: {} of {}", tab, items.len() - loaded, items.len()),
                        ));
                    }
                }
                _ => rows.push(("unreadable_collection".to_string(), tab.to_string())),
            }
        }
        rows.extend(check_records(tab, &store.load(tab)?));
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        let data = rows.into_iter().map(|(a, b)| vec![a, b]).collect();
        println!("{}", pretty_table(&["Issue", "Detail"], data));
    }
    Ok(())
}
