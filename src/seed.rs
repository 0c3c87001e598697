// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{BillingCycle, License, Status, Tab};
use crate::store::new_id;

struct Demo {
    name: &'static str,
    vendor: &'static str,
    category: &'static str,
    cost: Decimal,
    currency: &'static str,
    cycle: BillingCycle,
    bought_days_ago: i64,
    renews_in_days: i64,
    payment: &'static str,
    status: Status,
    notes: &'static str,
}

/// Demonstration records for a tab, dated relative to `today`.
pub fn demo_records(tab: Tab, today: NaiveDate) -> Vec<License> {
    let demos = match tab {
        Tab::Work => work_demos(),
        Tab::Personal => personal_demos(),
    };
    demos
        .into_iter()
        .map(|d| License {
            id: new_id(),
            name: d.name.to_string(),
            vendor: Some(d.vendor.to_string()),
            category: Some(d.category.to_string()),
            cost: d.cost,
            currency: Some(d.currency.to_string()),
            billing_cycle: d.cycle,
            purchase_date: Some(today - Duration::days(d.bought_days_ago)),
            next_renewal: Some(today + Duration::days(d.renews_in_days)),
            payment_method: Some(d.payment.to_string()),
            status: d.status,
            notes: if d.notes.is_empty() {
                None
            } else {
                Some(d.notes.to_string())
            },
            is_daily: false,
        })
        .collect()
}

fn work_demos() -> Vec<Demo> {
    vec![
        Demo {
            name: "Microsoft 365",
            vendor: "Microsoft",
            category: "Productivity",
            cost: Decimal::new(9999, 2),
            currency: "USD",
            cycle: BillingCycle::Annual,
            bought_days_ago: 180,
            renews_in_days: 185,
            payment: "Credit card",
            status: Status::Active,
            notes: "5 users included",
        },
        Demo {
            name: "ChatGPT Plus",
            vendor: "OpenAI",
            category: "AI Tools",
            cost: Decimal::new(20, 0),
            currency: "USD",
            cycle: BillingCycle::Monthly,
            bought_days_ago: 60,
            renews_in_days: 15,
            payment: "PayPal",
            status: Status::Active,
            notes: "",
        },
        Demo {
            name: "ESET NOD32",
            vendor: "ESET",
            category: "Security / Antivirus",
            cost: Decimal::new(3999, 2),
            currency: "USD",
            cycle: BillingCycle::Annual,
            bought_days_ago: 300,
            renews_in_days: 65,
            payment: "Credit card",
            status: Status::Active,
            notes: "3 devices",
        },
        Demo {
            name: "GitHub Copilot",
            vendor: "GitHub",
            category: "Development",
            cost: Decimal::new(10, 0),
            currency: "USD",
            cycle: BillingCycle::Monthly,
            bought_days_ago: 90,
            renews_in_days: 5,
            payment: "Debit card",
            status: Status::Active,
            notes: "Individual plan",
        },
        Demo {
            name: "Adobe Creative Cloud",
            vendor: "Adobe",
            category: "Design",
            cost: Decimal::new(59988, 2),
            currency: "USD",
            cycle: BillingCycle::Annual,
            bought_days_ago: 400,
            renews_in_days: -30,
            payment: "Credit card",
            status: Status::Expired,
            notes: "All apps",
        },
        Demo {
            name: "Slack Pro",
            vendor: "Slack",
            category: "Communication",
            cost: Decimal::new(725, 2),
            currency: "USD",
            cycle: BillingCycle::Monthly,
            bought_days_ago: 120,
            renews_in_days: 10,
            payment: "Credit card",
            status: Status::Active,
            notes: "Team of 5",
        },
    ]
}

fn personal_demos() -> Vec<Demo> {
    vec![
        Demo {
            name: "Netflix",
            vendor: "Netflix",
            category: "Entertainment",
            cost: Decimal::new(1599, 2),
            currency: "USD",
            cycle: BillingCycle::Monthly,
            bought_days_ago: 200,
            renews_in_days: 12,
            payment: "Credit card",
            status: Status::Active,
            notes: "Standard HD plan",
        },
        Demo {
            name: "Roku Channel+",
            vendor: "Roku",
            category: "Entertainment",
            cost: Decimal::new(499, 2),
            currency: "USD",
            cycle: BillingCycle::Monthly,
            bought_days_ago: 90,
            renews_in_days: 8,
            payment: "PayPal",
            status: Status::Active,
            notes: "",
        },
        Demo {
            name: "Spotify Premium",
            vendor: "Spotify",
            category: "Entertainment",
            cost: Decimal::new(999, 2),
            currency: "USD",
            cycle: BillingCycle::Monthly,
            bought_days_ago: 365,
            renews_in_days: 20,
            payment: "Debit card",
            status: Status::Active,
            notes: "Individual plan",
        },
        Demo {
            name: "Mobile plan",
            vendor: "Telcel",
            category: "Telecommunications",
            cost: Decimal::new(299, 0),
            currency: "MXN",
            cycle: BillingCycle::Monthly,
            bought_days_ago: 180,
            renews_in_days: 7,
            payment: "Direct debit",
            status: Status::Active,
            notes: "20GB data + unlimited calls",
        },
        Demo {
            name: "Home internet",
            vendor: "Telmex",
            category: "Telecommunications",
            cost: Decimal::new(499, 0),
            currency: "MXN",
            cycle: BillingCycle::Monthly,
            bought_days_ago: 730,
            renews_in_days: 18,
            payment: "Direct debit",
            status: Status::Active,
            notes: "200 Mbps fiber",
        },
        Demo {
            name: "Google One 2TB",
            vendor: "Google",
            category: "Cloud Storage",
            cost: Decimal::new(299, 2),
            currency: "USD",
            cycle: BillingCycle::Monthly,
            bought_days_ago: 200,
            renews_in_days: 25,
            payment: "Google Pay",
            status: Status::Active,
            notes: "Shared family storage",
        },
        Demo {
            name: "Notion Plus",
            vendor: "Notion",
            category: "Productivity",
            cost: Decimal::new(8, 0),
            currency: "USD",
            cycle: BillingCycle::Monthly,
            bought_days_ago: 50,
            renews_in_days: 22,
            payment: "PayPal",
            status: Status::Active,
            notes: "Personal plan",
        },
    ]
}
