// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use licensehub::app::{self, Action, AppState};
use licensehub::auth::{self, AuthProvider, SessionAuth};
use licensehub::cli;
use licensehub::commands::licenses::Filter;
use licensehub::commands::{doctor, session};
use licensehub::db::{self, KvStore, MemoryStore};
use licensehub::errors::LicenseError;
use licensehub::models::{BillingCycle, License, Status, Tab};
use licensehub::store::Store;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

#[test]
fn data_commands_need_a_user() {
    let kv = MemoryStore::new();
    let err = auth::require_user(&SessionAuth::new(&kv, None)).unwrap_err();
    assert_eq!(err.downcast_ref::<LicenseError>(), Some(&LicenseError::NotSignedIn));

    auth::login(&kv, " alice@example.com ").unwrap();
    assert_eq!(
        auth::require_user(&SessionAuth::new(&kv, None)).unwrap(),
        "alice@example.com"
    );
    assert_eq!(
        SessionAuth::new(&kv, Some("bob".into())).current_user().unwrap(),
        Some("bob".to_string())
    );

    auth::logout(&kv).unwrap();
    assert!(SessionAuth::new(&kv, None).current_user().unwrap().is_none());
}

#[test]
fn user_ids_are_checked() {
    assert!(auth::validate_user_id("has space").is_err());
    assert!(auth::validate_user_id("").is_err());
    assert!(auth::validate_user_id("-dash").is_err());
    assert!(SessionAuth::new(&MemoryStore::new(), Some("a/b".into())).current_user().is_err());
}

#[test]
fn login_seeds_both_tabs_unless_asked_not_to() {
    let conn = setup();
    let m = cli::build_cli().get_matches_from(["licensehub", "session", "login", "alice"]);
    let (_, sub) = m.subcommand().unwrap();
    session::handle(&conn, sub).unwrap();
    let store = Store::new(&conn, "alice");
    assert_eq!(store.load(Tab::Work).unwrap().len(), 6);
    assert_eq!(store.load(Tab::Personal).unwrap().len(), 7);

    let m = cli::build_cli().get_matches_from(["licensehub", "session", "login", "bob", "--no-seed"]);
    let (_, sub) = m.subcommand().unwrap();
    session::handle(&conn, sub).unwrap();
    assert!(Store::new(&conn, "bob").load(Tab::Work).unwrap().is_empty());
    assert_eq!(conn.get("lh_session").unwrap().as_deref(), Some("bob"));
}

#[test]
fn first_data_command_seeds_the_active_tab() {
    let conn = setup();
    let state = app::open_session(&conn, &SessionAuth::new(&conn, Some("carol".into())), None).unwrap();
    assert_eq!(state.user, "carol");
    assert_eq!(state.tab, Tab::Work);
    let store = Store::new(&conn, "carol");
    assert_eq!(store.load(Tab::Work).unwrap().len(), 6);
    assert!(store.load(Tab::Personal).unwrap().is_empty());

    let state = app::open_session(
        &conn,
        &SessionAuth::new(&conn, Some("carol".into())),
        Some("personal"),
    )
    .unwrap();
    assert_eq!(state.tab, Tab::Personal);
    assert_eq!(store.load(Tab::Personal).unwrap().len(), 7);
    assert_eq!(store.load(Tab::Work).unwrap().len(), 6);
}

#[test]
fn no_seed_login_stays_empty() {
    let conn = setup();
    let m = cli::build_cli().get_matches_from(["licensehub", "session", "login", "dana", "--no-seed"]);
    let (_, sub) = m.subcommand().unwrap();
    session::handle(&conn, sub).unwrap();
    let state = app::open_session(&conn, &SessionAuth::new(&conn, None), None).unwrap();
    assert_eq!(state.user, "dana");
    assert!(Store::new(&conn, "dana").load(Tab::Work).unwrap().is_empty());
}

#[test]
fn open_session_without_user_touches_nothing() {
    let conn = setup();
    let err = app::open_session(&conn, &SessionAuth::new(&conn, None), None).unwrap_err();
    assert_eq!(err.downcast_ref::<LicenseError>(), Some(&LicenseError::NotSignedIn));
    assert!(conn.get("lh_seeded_work_").unwrap().is_none());
}

#[test]
fn switching_tabs_resets_filters() {
    let s = AppState::new("alice", Tab::Work);
    let s = app::apply(&s, Action::Search("net".into()));
    let s = app::apply(&s, Action::FilterStatus(Some("active".into())));
    assert_eq!(s.filter.search, "net");

    let switched = app::apply(&s, Action::SwitchTab(Tab::Personal));
    assert_eq!(switched.tab, Tab::Personal);
    assert_eq!(switched.filter, Filter::default());
    assert_eq!(s.tab, Tab::Work);

    let cleared = app::apply(&s, Action::ClearFilters);
    assert_eq!(cleared.filter, Filter::default());
}

#[test]
fn active_tab_is_restored() {
    let kv = MemoryStore::new();
    assert_eq!(AppState::restore(&kv, "alice").unwrap().tab, Tab::Work);
    AppState::new("alice", Tab::Personal).persist(&kv).unwrap();
    assert_eq!(AppState::restore(&kv, "alice").unwrap().tab, Tab::Personal);
    kv.set("lh_tab", "garbage").unwrap();
    assert_eq!(AppState::restore(&kv, "alice").unwrap().tab, Tab::Work);
}

#[test]
fn doctor_flags_suspicious_records() {
    let base = License {
        id: "a1".into(),
        name: "Tool".into(),
        vendor: None,
        category: Some("Productivity".into()),
        cost: Decimal::from(5),
        currency: Some("USD".into()),
        billing_cycle: BillingCycle::Monthly,
        purchase_date: None,
        next_renewal: chrono::NaiveDate::from_ymd_opt(2025, 1, 1),
        payment_method: None,
        status: Status::Active,
        notes: None,
        is_daily: false,
    };
    assert!(doctor::check_records(Tab::Work, &[base.clone()]).is_empty());

    let mut odd = base.clone();
    odd.billing_cycle = BillingCycle::Unknown("weekly".into());
    odd.currency = Some("usd".into());
    odd.category = Some("Gaming".into());
    let issues: Vec<String> = doctor::check_records(Tab::Work, &[base, odd])
        .into_iter()
        .map(|(code, _)| code)
        .collect();
    assert_eq!(
        issues,
        vec!["duplicate_id", "unknown_cycle", "unknown_category", "odd_currency"]
    );
}
