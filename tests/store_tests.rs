// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use licensehub::db::{self, KvStore, MemoryStore};
use licensehub::errors::LicenseError;
use licensehub::models::{BillingCycle, License, MAX_AMOUNT, SavingsGoal, Status, Tab};
use licensehub::store::{self, Store, licenses_key};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn sample(id: &str, name: &str) -> License {
    License {
        id: id.into(),
        name: name.into(),
        vendor: Some("Vendor".into()),
        category: Some("Productivity".into()),
        cost: Decimal::new(1599, 2),
        currency: Some("USD".into()),
        billing_cycle: BillingCycle::Monthly,
        purchase_date: Some(d(2024, 1, 5)),
        next_renewal: Some(d(2024, 1, 31)),
        payment_method: Some("Visa".into()),
        status: Status::Active,
        notes: Some("team seat".into()),
        is_daily: true,
    }
}

#[test]
fn collections_round_trip() {
    let conn = setup();
    let store = Store::new(&conn, "alice");
    let mut odd = sample("b2", "Legacy");
    odd.billing_cycle = BillingCycle::Unknown("weekly".into());
    let records = vec![sample("a1", "Notion"), odd];
    store.save(Tab::Work, &records).unwrap();
    assert_eq!(store.load(Tab::Work).unwrap(), records);
    assert!(store.load(Tab::Personal).unwrap().is_empty());
}

#[test]
fn users_and_tabs_are_isolated() {
    let conn = setup();
    Store::new(&conn, "alice").create(Tab::Work, sample("a1", "A")).unwrap();
    assert!(Store::new(&conn, "bob").load(Tab::Work).unwrap().is_empty());
    assert!(Store::new(&conn, "alice").load(Tab::Personal).unwrap().is_empty());
    assert!(conn.get("lh_licenses_work_alice").unwrap().is_some());
}

#[test]
fn malformed_collection_reads_empty() {
    let conn = setup();
    conn.set(&licenses_key(Tab::Work, "alice"), "not json").unwrap();
    assert!(Store::new(&conn, "alice").load(Tab::Work).unwrap().is_empty());

    conn.set(&licenses_key(Tab::Work, "alice"), r#"{"id":"x"}"#).unwrap();
    assert!(Store::new(&conn, "alice").load(Tab::Work).unwrap().is_empty());
}

#[test]
fn lenient_fields_and_unreadable_records() {
    let conn = setup();
    let raw = r#"[
        {"id":"a","name":"X","cost":"abc","billingCycle":"weekly","status":"zombie","nextRenewal":"garbage","isDaily":"true"},
        42,
        {"id":"b","name":"Y","cost":12.5}
    ]"#;
    conn.set(&licenses_key(Tab::Personal, "alice"), raw).unwrap();
    let records = Store::new(&conn, "alice").load(Tab::Personal).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].cost.is_zero());
    assert_eq!(records[0].billing_cycle, BillingCycle::Unknown("weekly".into()));
    assert_eq!(records[0].status, Status::Unknown("zombie".into()));
    assert_eq!(records[0].next_renewal, None);
    assert_eq!(records[1].cost, Decimal::new(125, 1));
    assert!(!records[1].status.is_active());
}

#[test]
fn odd_records_survive_the_next_write() {
    let conn = setup();
    let key = licenses_key(Tab::Work, "alice");
    let raw = r#"[
        {"id":"a","name":"Legacy","cost":5,"billingCycle":null,"status":"active","vendor":7},
        {"id":"b","name":null,"currency":false,"notes":["x"]},
        "junk"
    ]"#;
    conn.set(&key, raw).unwrap();
    let store = Store::new(&conn, "alice");

    let before = store.load(Tab::Work).unwrap();
    assert_eq!(before.len(), 2);
    assert_eq!(before[0].vendor.as_deref(), Some("7"));
    assert_eq!(before[0].billing_cycle, BillingCycle::Unknown(String::new()));
    assert_eq!(before[0].status, Status::Active);
    assert_eq!(before[1].name, "");
    assert_eq!(before[1].currency.as_deref(), Some("false"));

    store.create(Tab::Work, sample("n1", "New")).unwrap();
    let after = store.load(Tab::Work).unwrap();
    let ids: Vec<&str> = after.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "n1"]);

    let stored: serde_json::Value = serde_json::from_str(&conn.get(&key).unwrap().unwrap()).unwrap();
    let items = stored.as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[3], serde_json::json!("junk"));

    store.delete(Tab::Work, "n1").unwrap();
    store.mark_paid(Tab::Work, "a").unwrap_err();
    let stored: serde_json::Value = serde_json::from_str(&conn.get(&key).unwrap().unwrap()).unwrap();
    assert_eq!(stored.as_array().unwrap().len(), 3);
}

#[test]
fn create_update_delete() {
    let conn = setup();
    let store = Store::new(&conn, "alice");
    let mut blank = sample("", "Fresh");
    blank.notes = None;
    let id = store.create(Tab::Work, blank).unwrap();
    assert_eq!(id.len(), 32);
    store.create(Tab::Work, sample("b2", "Second")).unwrap();

    let mut changed = store.get(Tab::Work, &id).unwrap();
    changed.cost = Decimal::from(99);
    store.update(Tab::Work, changed).unwrap();
    let records = store.load(Tab::Work).unwrap();
    assert_eq!(records[0].id, id);
    assert_eq!(records[0].cost, Decimal::from(99));

    let removed = store.delete(Tab::Work, "b2").unwrap();
    assert_eq!(removed.name, "Second");
    assert_eq!(store.load(Tab::Work).unwrap().len(), 1);

    let err = store.delete(Tab::Work, "b2").unwrap_err();
    assert_eq!(
        err.downcast_ref::<LicenseError>(),
        Some(&LicenseError::NotFound("b2".into()))
    );
    assert!(store.update(Tab::Work, sample("nope", "Ghost")).is_err());
}

#[test]
fn ids_resolve_by_unique_prefix() {
    let conn = setup();
    let store = Store::new(&conn, "alice");
    store
        .save(
            Tab::Work,
            &[sample("abc123", "One"), sample("abd456", "Two"), sample("ab", "Short")],
        )
        .unwrap();
    assert_eq!(store.resolve_id(Tab::Work, "abc").unwrap(), "abc123");
    assert_eq!(store.resolve_id(Tab::Work, "ab").unwrap(), "ab");
    let err = store.resolve_id(Tab::Work, "abz").unwrap_err();
    assert!(matches!(err.downcast_ref::<LicenseError>(), Some(LicenseError::NotFound(_))));

    store.save(Tab::Work, &[sample("abc123", "One"), sample("abd456", "Two")]).unwrap();
    let err = store.resolve_id(Tab::Work, "ab").unwrap_err();
    assert!(matches!(err.downcast_ref::<LicenseError>(), Some(LicenseError::AmbiguousId(_))));
}

#[test]
fn mark_paid_persists_the_new_date() {
    let conn = setup();
    let store = Store::new(&conn, "alice");
    let mut undated = sample("n1", "Undated");
    undated.next_renewal = None;
    store.save(Tab::Work, &[sample("a1", "Dated"), undated]).unwrap();

    let paid = store.mark_paid(Tab::Work, "a1").unwrap();
    assert_eq!(paid.next_renewal, Some(d(2024, 3, 2)));
    assert_eq!(store.get(Tab::Work, "a1").unwrap().next_renewal, Some(d(2024, 3, 2)));

    let before = store.load(Tab::Work).unwrap();
    let err = store.mark_paid(Tab::Work, "n1").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LicenseError>(),
        Some(LicenseError::NoRenewalDate(_))
    ));
    assert_eq!(store.load(Tab::Work).unwrap(), before);
}

#[test]
fn income_and_goal_default_when_missing_or_bad() {
    let conn = setup();
    let store = Store::new(&conn, "alice");
    assert!(store.income().unwrap().is_zero());
    assert_eq!(store.savings_goal().unwrap(), SavingsGoal::default());

    conn.set("lh_income_alice", "abc").unwrap();
    assert!(store.income().unwrap().is_zero());
    conn.set("lh_savings_goal_alice", "{broken").unwrap();
    assert_eq!(store.savings_goal().unwrap().months, 12);

    store.set_income(Decimal::from(25000)).unwrap();
    assert_eq!(store.income().unwrap(), Decimal::from(25000));
    assert!(store.set_income(Decimal::from(-1)).is_err());
    assert!(store.set_income(MAX_AMOUNT + Decimal::ONE).is_err());
    assert_eq!(store.income().unwrap(), Decimal::from(25000));

    let goal = SavingsGoal {
        target: Decimal::from(1200),
        months: 6,
    };
    store.set_savings_goal(goal).unwrap();
    assert_eq!(store.savings_goal().unwrap(), goal);
}

#[test]
fn usd_rate_is_configurable_and_positive() {
    let conn = setup();
    assert_eq!(store::load_usd_rate(&conn).unwrap(), Decimal::from(20));
    store::save_usd_rate(&conn, Decimal::new(175, 1)).unwrap();
    assert_eq!(Store::new(&conn, "alice").usd_rate().unwrap(), Decimal::new(175, 1));
    assert!(store::save_usd_rate(&conn, Decimal::ZERO).is_err());
    conn.set("lh_usd_rate", "-3").unwrap();
    assert_eq!(store::load_usd_rate(&conn).unwrap(), Decimal::from(20));
}

#[test]
fn seeding_happens_once_per_tab() {
    let conn = setup();
    let store = Store::new(&conn, "alice");
    let today = d(2025, 6, 1);
    assert!(store.seed_if_empty(Tab::Work, today).unwrap());
    assert_eq!(store.load(Tab::Work).unwrap().len(), 6);
    assert!(!store.seed_if_empty(Tab::Work, today).unwrap());

    store.save(Tab::Work, &[]).unwrap();
    assert!(!store.seed_if_empty(Tab::Work, today).unwrap());
    assert!(store.load(Tab::Work).unwrap().is_empty());

    store.create(Tab::Personal, sample("p1", "Mine")).unwrap();
    assert!(!store.seed_if_empty(Tab::Personal, today).unwrap());
    assert_eq!(store.load(Tab::Personal).unwrap().len(), 1);
}

#[test]
fn tab_counts() {
    let kv = MemoryStore::new();
    let store = Store::new(&kv, "alice");
    store.create(Tab::Personal, sample("p1", "Mine")).unwrap();
    assert_eq!(store.tab_counts().unwrap(), vec![(Tab::Work, 0), (Tab::Personal, 1)]);
}

#[test]
fn data_survives_reopening_the_file() {
    let file = tempfile::NamedTempFile::new().unwrap();
    {
        let conn = db::open_at(file.path()).unwrap();
        Store::new(&conn, "alice").create(Tab::Work, sample("a1", "Kept")).unwrap();
    }
    let conn = db::open_at(file.path()).unwrap();
    let records = Store::new(&conn, "alice").load(Tab::Work).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Kept");
}
