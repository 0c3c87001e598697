// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::app::AppState;
use crate::commands::savings::{self, SavingsPlan};
use crate::cost::{annual_equivalent, monthly_equivalent, monthly_in_local};
use crate::db::KvStore;
use crate::models::{License, category_icon};
use crate::schedule::days_until;
use crate::store::Store;
use crate::utils::{fmt_money, fmt_money_ccy, maybe_print_json, pretty_table, today};

pub const RENEWAL_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub count: usize,
    pub annual: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingRenewal {
    pub id: String,
    pub name: String,
    pub days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub total_count: usize,
    pub active_count: usize,
    pub annual_by_currency: BTreeMap<String, Decimal>,
    pub monthly_by_currency: BTreeMap<String, Decimal>,
    pub income: Decimal,
    pub total_monthly_out: Decimal,
    pub total_monthly_projectable: Decimal,
    pub balance: Decimal,
    pub daily_expenses: Decimal,
    pub projected_year: Decimal,
    pub renewals: Vec<UpcomingRenewal>,
    pub breakdown: Vec<CategoryTotal>,
}

/// Derives every dashboard figure from a snapshot of one tab. Only active
/// records count.
pub fn compute_stats(
    records: &[License],
    income: Decimal,
    usd_rate: Decimal,
    today: NaiveDate,
) -> StatsSnapshot {
    let active: Vec<&License> = records.iter().filter(|l| l.status.is_active()).collect();

    let mut annual_by_currency: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut monthly_by_currency: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut total_monthly_out = Decimal::ZERO;
    let mut total_monthly_projectable = Decimal::ZERO;
    let mut by_category: BTreeMap<String, (usize, Decimal)> = BTreeMap::new();
    let mut renewals = Vec::new();

    for l in &active {
        let ccy = l.currency_code();
        add_to(annual_by_currency.entry(ccy.clone()).or_insert(Decimal::ZERO), annual_equivalent(l));
        add_to(monthly_by_currency.entry(ccy).or_insert(Decimal::ZERO), monthly_equivalent(l));

        let local = monthly_in_local(l, usd_rate);
        add_to(&mut total_monthly_out, local);
        if !l.is_daily {
            add_to(&mut total_monthly_projectable, local);
        }

        let entry = by_category
            .entry(l.category_or_default().to_string())
            .or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        add_to(&mut entry.1, annual_equivalent(l));

        if let Some(days) = days_until(l.next_renewal, today) {
            if (0..=RENEWAL_WINDOW_DAYS).contains(&days) {
                renewals.push(UpcomingRenewal {
                    id: l.id.clone(),
                    name: l.name.clone(),
                    days,
                });
            }
        }
    }

    let twelve = Decimal::from(12);
    let balance = income.saturating_sub(total_monthly_out);
    let daily_expenses = total_monthly_out.saturating_sub(total_monthly_projectable);
    let projected_year = income
        .saturating_mul(twelve)
        .saturating_sub(total_monthly_projectable.saturating_mul(twelve))
        .saturating_sub(daily_expenses);

    let mut breakdown: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, (count, annual))| CategoryTotal {
            category,
            count,
            annual,
        })
        .collect();
    breakdown.sort_by(|a, b| b.annual.cmp(&a.annual));

    StatsSnapshot {
        total_count: records.len(),
        active_count: active.len(),
        annual_by_currency,
        monthly_by_currency,
        income,
        total_monthly_out,
        total_monthly_projectable,
        balance,
        daily_expenses,
        projected_year,
        renewals,
        breakdown,
    }
}

fn add_to(total: &mut Decimal, amount: Decimal) {
    *total = total.saturating_add(amount);
}

/// Loads the current tab and computes the snapshot together with the
/// savings plan that depends on it.
pub fn snapshot(kv: &dyn KvStore, state: &AppState) -> Result<(StatsSnapshot, SavingsPlan)> {
    let store = Store::new(kv, state.user.as_str());
    let records = store.load(state.tab)?;
    let stats = compute_stats(&records, store.income()?, store.usd_rate()?, today());
    let active: Vec<License> = records.into_iter().filter(|l| l.status.is_active()).collect();
    let plan = savings::plan_savings(&store.savings_goal()?, stats.income, stats.balance, &active);
    Ok((stats, plan))
}

#[derive(Serialize)]
struct StatsReport<'a> {
    tab: &'a str,
    stats: &'a StatsSnapshot,
    savings: &'a SavingsPlan,
}

pub fn handle(kv: &dyn KvStore, state: &AppState, m: &clap::ArgMatches) -> Result<()> {
    let (stats, plan) = snapshot(kv, state)?;
    let report = StatsReport {
        tab: state.tab.as_str(),
        stats: &stats,
        savings: &plan,
    };
    if maybe_print_json(m.get_flag("json"), false, &report)? {
        return Ok(());
    }

    println!("Dashboard — {} ({})", state.tab.label(), state.tab.subtitle());
    let currency_lines = |by: &BTreeMap<String, Decimal>| -> String {
        if by.is_empty() {
            return fmt_money(&Decimal::ZERO);
        }
        let mut entries: Vec<_> = by.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1));
        entries
            .into_iter()
            .map(|(ccy, amt)| fmt_money_ccy(amt, ccy))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let rows = vec![
        vec!["Annual spend".into(), currency_lines(&stats.annual_by_currency)],
        vec!["Monthly spend".into(), currency_lines(&stats.monthly_by_currency)],
        vec![
            "Active".into(),
            format!("{} of {} records", stats.active_count, stats.total_count),
        ],
        vec!["Renewing in 30 days".into(), stats.renewals.len().to_string()],
        vec!["Monthly income".into(), fmt_money(&stats.income)],
        vec!["Balance".into(), fmt_money(&stats.balance)],
        vec!["Projected year".into(), fmt_money(&stats.projected_year)],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));

    if !stats.renewals.is_empty() {
        let names: Vec<&str> = stats.renewals.iter().take(3).map(|r| r.name.as_str()).collect();
        println!(
            "{} record(s) renew in the next 30 days: {}{}",
            stats.renewals.len(),
            names.join(", "),
            if stats.renewals.len() > 3 { " and more..." } else { "" }
        );
    }

    if stats.breakdown.is_empty() {
        println!("No data yet.");
    } else {
        let rows: Vec<Vec<String>> = stats
            .breakdown
            .iter()
            .map(|c| {
                vec![
                    format!("{} {}", category_icon(&c.category), c.category),
                    c.count.to_string(),
                    fmt_money(&c.annual),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Records", "Annual"], rows));
    }

    savings::print_plan(&plan);
    Ok(())
}
