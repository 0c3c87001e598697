// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDate};
use licensehub::commands::stats::compute_stats;
use licensehub::cost::USD_TO_LOCAL;
use licensehub::models::{BillingCycle, License, Status};
use rust_decimal::Decimal;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn lic(name: &str, category: Option<&str>, cost: i64, ccy: Option<&str>) -> License {
    License {
        id: name.to_lowercase(),
        name: name.into(),
        vendor: None,
        category: category.map(String::from),
        cost: Decimal::from(cost),
        currency: ccy.map(String::from),
        billing_cycle: BillingCycle::Monthly,
        purchase_date: None,
        next_renewal: None,
        payment_method: None,
        status: Status::Active,
        notes: None,
        is_daily: false,
    }
}

#[test]
fn totals_per_currency() {
    let records = vec![
        lic("A", Some("Productivity"), 10, Some("USD")),
        lic("B", Some("Productivity"), 20, Some("USD")),
    ];
    let s = compute_stats(&records, Decimal::ZERO, USD_TO_LOCAL, today());
    assert_eq!(s.annual_by_currency["USD"], Decimal::from(360));
    assert_eq!(s.monthly_by_currency["USD"], Decimal::from(30));
    assert_eq!(s.annual_by_currency.len(), 1);
}

#[test]
fn currencies_group_case_insensitively_and_default_to_usd() {
    let mut annual = lic("Annual", None, 120, Some("mxn"));
    annual.billing_cycle = BillingCycle::Annual;
    let records = vec![
        lic("A", None, 10, Some("usd")),
        lic("B", None, 5, None),
        lic("C", None, 100, Some("MXN")),
        annual,
    ];
    let s = compute_stats(&records, Decimal::ZERO, USD_TO_LOCAL, today());
    assert_eq!(s.monthly_by_currency["USD"], Decimal::from(15));
    assert_eq!(s.monthly_by_currency["MXN"], Decimal::from(110));
    assert_eq!(s.annual_by_currency["MXN"], Decimal::from(1320));
    assert!(!s.annual_by_currency.contains_key("usd"));
}

#[test]
fn balance_and_projection_keep_daily_costs_out_of_the_year() {
    let mut daily = lic("Coffee", Some("Daily Spend"), 300, Some("MXN"));
    daily.is_daily = true;
    let mut cancelled = lic("Old", None, 999, Some("USD"));
    cancelled.status = Status::Cancelled;
    let records = vec![
        lic("Tool", Some("Development"), 10, Some("USD")),
        daily,
        lic("Lower", None, 5, Some("usd")),
        cancelled,
    ];
    let s = compute_stats(&records, Decimal::from(1000), USD_TO_LOCAL, today());

    // 10 USD * 20 + 300 + 5 (lowercase is not converted)
    assert_eq!(s.total_monthly_out, Decimal::from(505));
    assert_eq!(s.total_monthly_projectable, Decimal::from(205));
    assert_eq!(s.balance, Decimal::from(495));
    assert_eq!(s.daily_expenses, Decimal::from(300));
    // 1000*12 - 205*12 - 300
    assert_eq!(s.projected_year, Decimal::from(9240));
    assert_eq!(s.active_count, 3);
    assert_eq!(s.total_count, 4);
}

#[test]
fn configured_rate_replaces_the_default() {
    let records = vec![lic("Tool", None, 10, Some("USD"))];
    let s = compute_stats(&records, Decimal::from(500), Decimal::from(17), today());
    assert_eq!(s.total_monthly_out, Decimal::from(170));
    assert_eq!(s.balance, Decimal::from(330));
}

#[test]
fn renewals_cover_today_through_thirty_days() {
    let mut records = Vec::new();
    for (name, offset) in [("Past", -1_i64), ("Today", 0), ("Edge", 30), ("Later", 31)] {
        let mut l = lic(name, None, 1, Some("USD"));
        l.next_renewal = Some(today() + Duration::days(offset));
        records.push(l);
    }
    let mut expired = lic("Expired", None, 1, Some("USD"));
    expired.status = Status::Expired;
    expired.next_renewal = Some(today() + Duration::days(3));
    records.push(expired);

    let s = compute_stats(&records, Decimal::ZERO, USD_TO_LOCAL, today());
    let names: Vec<&str> = s.renewals.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Today", "Edge"]);
    assert_eq!(s.renewals[1].days, 30);
}

#[test]
fn breakdown_sorted_by_annual_cost() {
    let mut yearly = lic("Suite", Some("Productivity"), 600, Some("USD"));
    yearly.billing_cycle = BillingCycle::Annual;
    let records = vec![
        lic("Netflix", Some("Entertainment"), 15, Some("USD")),
        lic("Spotify", Some("Entertainment"), 10, Some("USD")),
        yearly,
        lic("Misc", None, 1, Some("USD")),
    ];
    let s = compute_stats(&records, Decimal::ZERO, USD_TO_LOCAL, today());
    let cats: Vec<(&str, usize)> = s
        .breakdown
        .iter()
        .map(|c| (c.category.as_str(), c.count))
        .collect();
    assert_eq!(cats, vec![("Productivity", 1), ("Entertainment", 2), ("Other", 1)]);
    assert_eq!(s.breakdown[1].annual, Decimal::from(300));
}

#[test]
fn same_input_same_snapshot() {
    let mut records = vec![
        lic("A", Some("Fuel"), 40, Some("MXN")),
        lic("B", Some("AI Tools"), 20, Some("USD")),
    ];
    records[1].next_renewal = Some(today() + Duration::days(4));
    let first = compute_stats(&records, Decimal::from(800), USD_TO_LOCAL, today());
    let second = compute_stats(&records, Decimal::from(800), USD_TO_LOCAL, today());
    assert_eq!(first, second);
}

#[test]
fn empty_collection() {
    let s = compute_stats(&[], Decimal::from(100), USD_TO_LOCAL, today());
    assert!(s.annual_by_currency.is_empty());
    assert!(s.breakdown.is_empty());
    assert_eq!(s.balance, Decimal::from(100));
    assert_eq!(s.projected_year, Decimal::from(1200));
}

#[test]
fn oversized_stored_costs_saturate() {
    let mut huge = lic("Huge", Some("Other"), 0, Some("USD"));
    huge.cost = Decimal::MAX;
    let mut yearly = lic("Yearly", Some("Other"), 0, Some("USD"));
    yearly.cost = Decimal::MAX;
    yearly.billing_cycle = BillingCycle::Annual;
    let records = vec![huge, yearly, lic("Small", Some("Fuel"), 10, Some("USD"))];

    let s = compute_stats(&records, Decimal::from(100), USD_TO_LOCAL, today());
    assert_eq!(s.annual_by_currency["USD"], Decimal::MAX);
    assert_eq!(s.monthly_by_currency["USD"], Decimal::MAX);
    assert_eq!(s.total_monthly_out, Decimal::MAX);
    assert!(s.balance < Decimal::ZERO);
    assert!(s.projected_year < Decimal::ZERO);
    assert_eq!(s.breakdown[0].annual, Decimal::MAX);
}
