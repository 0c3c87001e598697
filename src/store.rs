// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-user record collections, income and savings goal on top of a
//! [`KvStore`]. Every mutation reads the whole collection, changes it and
//! writes it back; the last writer wins.

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::cost::USD_TO_LOCAL;
use crate::db::KvStore;
use crate::errors::LicenseError;
use crate::models::{License, MAX_AMOUNT, SavingsGoal, Tab, decimal_from_value};
use crate::schedule;
use crate::seed;

const USD_RATE_KEY: &str = "lh_usd_rate";

pub fn licenses_key(tab: Tab, user: &str) -> String {
    format!("lh_licenses_{}_{}", tab, user)
}

pub fn income_key(user: &str) -> String {
    format!("lh_income_{}", user)
}

pub fn savings_goal_key(user: &str) -> String {
    format!("lh_savings_goal_{}", user)
}

fn seeded_key(tab: Tab, user: &str) -> String {
    format!("lh_seeded_{}_{}", tab, user)
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

pub struct Store<'a> {
    kv: &'a dyn KvStore,
    user: String,
}

impl<'a> Store<'a> {
    pub fn new(kv: &'a dyn KvStore, user: impl Into<String>) -> Self {
        Store {
            kv,
            user: user.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Loads a tab's collection. Absent or unreadable data is an empty list;
    /// individual records that cannot be read are skipped.
    pub fn load(&self, tab: Tab) -> Result<Vec<License>> {
        Ok(self.read(tab)?.0)
    }

    /// Replaces a tab's collection with exactly `records`.
    pub fn save(&self, tab: Tab, records: &[License]) -> Result<()> {
        self.write(tab, records, &[])
    }

    /// Readable records plus the raw items that are not, so a mutation can
    /// write the latter back untouched.
    fn read(&self, tab: Tab) -> Result<(Vec<License>, Vec<Value>)> {
        let key = licenses_key(tab, &self.user);
        let Some(raw) = self.kv.get(&key)? else {
            return Ok((Vec::new(), Vec::new()));
        };
        let items = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => items,
            Ok(_) | Err(_) => {
                tracing::warn!(%key, "stored collection is not a JSON array; treating as empty");
                return Ok((Vec::new(), Vec::new()));
            }
        };
        let mut records = Vec::with_capacity(items.len());
        let mut kept = Vec::new();
        for (idx, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<License>(item.clone()) {
                Ok(l) => records.push(l),
                Err(err) => {
                    tracing::warn!(%key, idx, %err, "skipping unreadable record");
                    kept.push(item);
                }
            }
        }
        Ok((records, kept))
    }

    fn write(&self, tab: Tab, records: &[License], kept: &[Value]) -> Result<()> {
        let mut items = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        items.extend(kept.iter().cloned());
        let raw = serde_json::to_string(&items)?;
        self.kv.set(&licenses_key(tab, &self.user), &raw)?;
        tracing::debug!(%tab, count = records.len(), kept = kept.len(), "saved collection");
        Ok(())
    }

    pub fn get(&self, tab: Tab, id: &str) -> Result<License> {
        self.load(tab)?
            .into_iter()
            .find(|l| l.id == id)
            .ok_or_else(|| LicenseError::NotFound(id.to_string()).into())
    }

    /// Accepts a full id or any prefix that identifies exactly one record.
    pub fn resolve_id(&self, tab: Tab, id_or_prefix: &str) -> Result<String> {
        let needle = id_or_prefix.trim();
        let records = self.load(tab)?;
        if records.iter().any(|l| l.id == needle) {
            return Ok(needle.to_string());
        }
        let mut hits = records.iter().filter(|l| !needle.is_empty() && l.id.starts_with(needle));
        match (hits.next(), hits.next()) {
            (Some(l), None) => Ok(l.id.clone()),
            (Some(_), Some(_)) => Err(LicenseError::AmbiguousId(needle.to_string()).into()),
            _ => Err(LicenseError::NotFound(needle.to_string()).into()),
        }
    }

    /// Appends a record, assigning an id when it has none. Returns the id.
    pub fn create(&self, tab: Tab, mut record: License) -> Result<String> {
        if record.id.is_empty() {
            record.id = new_id();
        }
        let id = record.id.clone();
        let (mut records, kept) = self.read(tab)?;
        records.push(record);
        self.write(tab, &records, &kept)?;
        tracing::info!(%tab, %id, "record created");
        Ok(id)
    }

    /// Replaces the record with the same id, keeping its position.
    pub fn update(&self, tab: Tab, record: License) -> Result<()> {
        let (mut records, kept) = self.read(tab)?;
        let slot = records
            .iter_mut()
            .find(|l| l.id == record.id)
            .ok_or_else(|| LicenseError::NotFound(record.id.clone()))?;
        let id = record.id.clone();
        *slot = record;
        self.write(tab, &records, &kept)?;
        tracing::info!(%tab, %id, "record updated");
        Ok(())
    }

    pub fn delete(&self, tab: Tab, id: &str) -> Result<License> {
        let (mut records, kept) = self.read(tab)?;
        let pos = records
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| LicenseError::NotFound(id.to_string()))?;
        let removed = records.remove(pos);
        self.write(tab, &records, &kept)?;
        tracing::info!(%tab, %id, "record deleted");
        Ok(removed)
    }

    /// Advances the record's renewal date one cycle and persists it.
    /// Without a renewal date nothing is written and `NoRenewalDate` is returned.
    pub fn mark_paid(&self, tab: Tab, id: &str) -> Result<License> {
        let (mut records, kept) = self.read(tab)?;
        let slot = records
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| LicenseError::NotFound(id.to_string()))?;
        let paid = schedule::mark_paid(slot)?;
        *slot = paid.clone();
        self.write(tab, &records, &kept)?;
        tracing::info!(%tab, %id, next = ?paid.next_renewal, "marked paid");
        Ok(paid)
    }

    pub fn tab_counts(&self) -> Result<Vec<(Tab, usize)>> {
        Tab::ALL
            .iter()
            .map(|t| Ok((*t, self.load(*t)?.len())))
            .collect()
    }

    /// Seeds demonstration records the first time a tab is seen empty.
    pub fn seed_if_empty(&self, tab: Tab, today: NaiveDate) -> Result<bool> {
        let marker = seeded_key(tab, &self.user);
        if self.kv.get(&marker)?.is_some() {
            return Ok(false);
        }
        let (records, kept) = self.read(tab)?;
        let seeded = if records.is_empty() {
            let demo = seed::demo_records(tab, today);
            self.write(tab, &demo, &kept)?;
            tracing::info!(%tab, count = demo.len(), "seeded demo records");
            true
        } else {
            false
        };
        self.kv.set(&marker, "1")?;
        Ok(seeded)
    }

    /// Marks a tab as already seen so it is never seeded.
    pub fn skip_seed(&self, tab: Tab) -> Result<()> {
        self.kv.set(&seeded_key(tab, &self.user), "1")
    }

    pub fn income(&self) -> Result<Decimal> {
        let raw = self.kv.get(&income_key(&self.user))?;
        Ok(raw
            .map(|s| parse_scalar(&s))
            .filter(|d| !d.is_sign_negative())
            .unwrap_or(Decimal::ZERO))
    }

    pub fn set_income(&self, amount: Decimal) -> Result<()> {
        if amount.is_sign_negative() {
            return Err(LicenseError::validation("income cannot be negative").into());
        }
        if amount > MAX_AMOUNT {
            return Err(LicenseError::validation("income is too large").into());
        }
        self.kv.set(&income_key(&self.user), &amount.to_string())?;
        tracing::info!(%amount, "income updated");
        Ok(())
    }

    pub fn savings_goal(&self) -> Result<SavingsGoal> {
        let raw = self.kv.get(&savings_goal_key(&self.user))?;
        Ok(raw
            .and_then(|s| serde_json::from_str::<SavingsGoal>(&s).ok())
            .unwrap_or_default())
    }

    pub fn set_savings_goal(&self, goal: SavingsGoal) -> Result<()> {
        let raw = serde_json::to_string(&goal)?;
        self.kv.set(&savings_goal_key(&self.user), &raw)?;
        tracing::info!(goal_target = %goal.target, months = goal.months, "savings goal updated");
        Ok(())
    }

    pub fn usd_rate(&self) -> Result<Decimal> {
        load_usd_rate(self.kv)
    }
}

/// Local units per dollar used for the balance; defaults to 20. Device-wide.
pub fn load_usd_rate(kv: &dyn KvStore) -> Result<Decimal> {
    let raw = kv.get(USD_RATE_KEY)?;
    Ok(raw
        .map(|s| parse_scalar(&s))
        .filter(|d| *d > Decimal::ZERO)
        .unwrap_or(USD_TO_LOCAL))
}

pub fn save_usd_rate(kv: &dyn KvStore, rate: Decimal) -> Result<()> {
    if rate <= Decimal::ZERO {
        return Err(LicenseError::validation("usd_rate must be positive").into());
    }
    kv.set(USD_RATE_KEY, &rate.to_string())?;
    tracing::info!(%rate, "usd_rate updated");
    Ok(())
}

/// Plain numbers or JSON numbers; anything else reads as zero.
fn parse_scalar(s: &str) -> Decimal {
    let t = s.trim();
    t.parse::<Decimal>().unwrap_or_else(|_| {
        serde_json::from_str::<Value>(t)
            .map(|v| decimal_from_value(&v))
            .unwrap_or(Decimal::ZERO)
    })
}
