// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use crate::app::{self, Action, AppState};
use crate::db::KvStore;
use crate::errors::LicenseError;
use crate::models::{License, LicenseDraft, category_icon};
use crate::schedule::days_until;
use crate::store::{Store, new_id};
use crate::utils::{fmt_money, maybe_print_json, opt_str, pretty_table, today};

/// List filter. Empty or unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub search: String,
    pub category: Option<String>,
    pub status: Option<String>,
}

/// Records matching every filter field, in stored order. The search text is
/// used as typed, surrounding spaces included.
pub fn filter_records<'a>(records: &'a [License], f: &Filter) -> Vec<&'a License> {
    let needle = f.search.to_lowercase();
    records
        .iter()
        .filter(|l| {
            needle.is_empty()
                || l.name.to_lowercase().contains(&needle)
                || l.vendor.as_deref().unwrap_or("").to_lowercase().contains(&needle)
                || l.category.as_deref().unwrap_or("").to_lowercase().contains(&needle)
        })
        .filter(|l| match f.category.as_deref() {
            None | Some("") => true,
            Some(c) => l.category.as_deref() == Some(c),
        })
        .filter(|l| match f.status.as_deref() {
            None | Some("") => true,
            Some(s) => l.status.as_str() == s,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Urgency {
    Overdue,
    DueThisWeek,
    Soon,
}

impl Urgency {
    /// Only active records get an urgency.
    pub fn classify(l: &License, today: NaiveDate) -> Option<Urgency> {
        if !l.status.is_active() {
            return None;
        }
        match days_until(l.next_renewal, today)? {
            d if d < 0 => Some(Urgency::Overdue),
            0..=7 => Some(Urgency::DueThisWeek),
            8..=30 => Some(Urgency::Soon),
            _ => None,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Urgency::Overdue => "overdue",
            Urgency::DueThisWeek | Urgency::Soon => "soon",
        }
    }
}

/// A display row: the record plus presentation hints. Nothing here is stored.
#[derive(Debug, Clone, Serialize)]
pub struct LicenseRow {
    pub id: String,
    pub name: String,
    pub vendor: String,
    pub category: String,
    pub icon: String,
    pub cost: String,
    pub currency: String,
    pub cycle: String,
    pub status: String,
    pub badge: String,
    pub days_until: Option<i64>,
    pub urgency: Option<Urgency>,
    pub renewal: String,
}

pub fn project_rows(records: &[&License], today: NaiveDate) -> Vec<LicenseRow> {
    records.iter().map(|l| project_row(l, today)).collect()
}

fn project_row(l: &License, today: NaiveDate) -> LicenseRow {
    let days = days_until(l.next_renewal, today);
    let urgency = Urgency::classify(l, today);
    let renewal = match (urgency, days) {
        (Some(Urgency::Overdue), Some(d)) => format!("overdue {}d", d.abs()),
        (Some(Urgency::DueThisWeek), Some(0)) => "⚡ today".to_string(),
        (Some(Urgency::DueThisWeek), Some(d)) => format!("⚡ in {}d", d),
        (Some(Urgency::Soon), Some(d)) => format!("⏰ in {}d", d),
        _ => format_date(l.next_renewal),
    };
    let category = l.category_or_default().to_string();
    LicenseRow {
        id: l.id.clone(),
        name: l.name.clone(),
        vendor: l.vendor.clone().unwrap_or_else(|| "—".into()),
        icon: category_icon(&category).to_string(),
        category,
        cost: fmt_money(&l.cost),
        currency: l.currency_code(),
        cycle: l.billing_cycle.label().to_string(),
        status: l.status.as_str().to_string(),
        badge: l.status.badge().to_string(),
        days_until: days,
        urgency,
        renewal,
    }
}

fn format_date(d: Option<NaiveDate>) -> String {
    d.map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "—".to_string())
}

pub fn handle(kv: &dyn KvStore, state: &AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(kv, state, sub)?,
        Some(("edit", sub)) => edit(kv, state, sub)?,
        Some(("rm", sub)) => remove(kv, state, sub)?,
        Some(("show", sub)) => show(kv, state, sub)?,
        Some(("list", sub)) => list(kv, state, sub)?,
        Some(("paid", sub)) => paid(kv, state, sub)?,
        _ => {}
    }
    Ok(())
}

/// Overlays whichever editor fields were given on the command line.
fn apply_args(draft: &mut LicenseDraft, sub: &clap::ArgMatches) {
    let fields: [(&str, &mut String); 11] = [
        ("name", &mut draft.name),
        ("vendor", &mut draft.vendor),
        ("category", &mut draft.category),
        ("cost", &mut draft.cost),
        ("currency", &mut draft.currency),
        ("cycle", &mut draft.billing_cycle),
        ("purchase-date", &mut draft.purchase_date),
        ("renewal", &mut draft.next_renewal),
        ("payment", &mut draft.payment_method),
        ("status", &mut draft.status),
        ("notes", &mut draft.notes),
    ];
    for (id, slot) in fields {
        if let Some(v) = sub.get_one::<String>(id) {
            *slot = v.clone();
        }
    }
    if sub.get_flag("daily") {
        draft.is_daily = true;
    }
    if sub.get_flag("not-daily") {
        draft.is_daily = false;
    }
}

fn add(kv: &dyn KvStore, state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let mut draft = LicenseDraft {
        currency: "USD".into(),
        billing_cycle: "monthly".into(),
        status: "active".into(),
        purchase_date: today().to_string(),
        ..LicenseDraft::default()
    };
    apply_args(&mut draft, sub);
    let record = draft.validate(new_id())?;
    let name = record.name.clone();
    let store = Store::new(kv, state.user.as_str());
    let id = store.create(state.tab, record)?;
    println!("Added '{}' to {} ({})", name, state.tab.label(), id);
    Ok(())
}

fn edit(kv: &dyn KvStore, state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let store = Store::new(kv, state.user.as_str());
    let id = store.resolve_id(state.tab, sub.get_one::<String>("id").unwrap())?;
    let existing = store.get(state.tab, &id)?;
    let mut draft = LicenseDraft::from_license(&existing);
    apply_args(&mut draft, sub);
    let record = draft.validate(id)?;
    let name = record.name.clone();
    store.update(state.tab, record)?;
    println!("Updated '{}'", name);
    Ok(())
}

fn remove(kv: &dyn KvStore, state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let store = Store::new(kv, state.user.as_str());
    let id = store.resolve_id(state.tab, sub.get_one::<String>("id").unwrap())?;
    let removed = store.delete(state.tab, &id)?;
    println!("Removed '{}'", removed.name);
    Ok(())
}

fn show(kv: &dyn KvStore, state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let store = Store::new(kv, state.user.as_str());
    let id = store.resolve_id(state.tab, sub.get_one::<String>("id").unwrap())?;
    let l = store.get(state.tab, &id)?;
    if !maybe_print_json(sub.get_flag("json"), false, &l)? {
        let row = project_row(&l, today());
        let rows = vec![
            vec!["Id".into(), l.id.clone()],
            vec!["Name".into(), l.name.clone()],
            vec!["Vendor".into(), row.vendor],
            vec!["Category".into(), format!("{} {}", row.icon, row.category)],
            vec!["Cost".into(), format!("{} {} / {}", row.cost, row.currency, row.cycle)],
            vec!["Purchased".into(), format_date(l.purchase_date)],
            vec!["Next renewal".into(), row.renewal],
            vec!["Payment".into(), l.payment_method.clone().unwrap_or_default()],
            vec!["Status".into(), row.badge],
            vec!["Daily".into(), if l.is_daily { "yes" } else { "no" }.into()],
            vec!["Notes".into(), l.notes.clone().unwrap_or_default()],
        ];
        println!("{}", pretty_table(&["Field", "Value"], rows));
    }
    Ok(())
}

/// Applies the list flags to the session filter.
pub fn filter_from_args(state: &AppState, sub: &clap::ArgMatches) -> AppState {
    let mut next = state.clone();
    if let Some(s) = sub.get_one::<String>("search") {
        next = app::apply(&next, Action::Search(s.clone()));
    }
    if let Some(c) = opt_str(sub, "category") {
        next = app::apply(&next, Action::FilterCategory(Some(c)));
    }
    if let Some(s) = opt_str(sub, "status") {
        next = app::apply(&next, Action::FilterStatus(Some(s)));
    }
    next
}

pub fn query_rows(kv: &dyn KvStore, state: &AppState, sub: &clap::ArgMatches) -> Result<(usize, Vec<LicenseRow>)> {
    let state = filter_from_args(state, sub);
    let records = Store::new(kv, state.user.as_str()).load(state.tab)?;
    let hits = filter_records(&records, &state.filter);
    Ok((records.len(), project_rows(&hits, today())))
}

fn list(kv: &dyn KvStore, state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let (total, rows) = query_rows(kv, state, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    if rows.is_empty() {
        if total == 0 {
            println!("No records yet. Add one with `licensehub license add`.");
        } else {
            println!("No matches. Try other filters or search terms.");
        }
        return Ok(());
    }
    let count = rows.len();
    let data: Vec<Vec<String>> = rows
        .into_iter()
        .map(|r| {
            let short: String = r.id.chars().take(8).collect();
            vec![
                short,
                format!("{}\n{}", r.name, r.vendor),
                format!("{} {}", r.icon, r.category),
                format!("{} {} / {}", r.cost, r.currency, r.cycle),
                r.badge,
                r.renewal,
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Software", "Category", "Cost", "Status", "Next renewal"],
            data,
        )
    );
    println!("{} record{}", count, if count == 1 { "" } else { "s" });
    Ok(())
}

fn paid(kv: &dyn KvStore, state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let store = Store::new(kv, state.user.as_str());
    let id = store.resolve_id(state.tab, sub.get_one::<String>("id").unwrap())?;
    match store.mark_paid(state.tab, &id) {
        Ok(l) => {
            println!(
                "Marked '{}' as paid. Next renewal: {}",
                l.name,
                format_date(l.next_renewal)
            );
            Ok(())
        }
        Err(err) => match err.downcast_ref::<LicenseError>() {
            Some(LicenseError::NoRenewalDate(_)) => {
                println!("Nothing to do: the record has no renewal date.");
                Ok(())
            }
            _ => Err(err),
        },
    }
}
