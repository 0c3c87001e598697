// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Session state for one user: the active tab and the list filter.
//! UI actions are pure transitions over [`AppState`]; persisting the result
//! is a separate, explicit step.

use anyhow::Result;

use crate::auth::{self, AuthProvider};
use crate::commands::licenses::Filter;
use crate::db::KvStore;
use crate::models::Tab;
use crate::store::Store;
use crate::utils::today;

const TAB_KEY: &str = "lh_tab";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub user: String,
    pub tab: Tab,
    pub filter: Filter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SwitchTab(Tab),
    Search(String),
    FilterCategory(Option<String>),
    FilterStatus(Option<String>),
    ClearFilters,
}

impl AppState {
    pub fn new(user: impl Into<String>, tab: Tab) -> Self {
        AppState {
            user: user.into(),
            tab,
            filter: Filter::default(),
        }
    }

    /// Restores the last active tab, falling back to work.
    pub fn restore(kv: &dyn KvStore, user: impl Into<String>) -> Result<Self> {
        let tab = kv
            .get(TAB_KEY)?
            .and_then(|s| s.parse::<Tab>().ok())
            .unwrap_or(Tab::Work);
        Ok(AppState::new(user, tab))
    }

    pub fn persist(&self, kv: &dyn KvStore) -> Result<()> {
        kv.set(TAB_KEY, self.tab.as_str())
    }
}

/// Resolves the user and the tab for a data command (`tab` overrides the
/// remembered one) and seeds that tab the first time it is seen empty.
pub fn open_session(
    kv: &dyn KvStore,
    provider: &dyn AuthProvider,
    tab: Option<&str>,
) -> Result<AppState> {
    let user = auth::require_user(provider)?;
    let mut state = AppState::restore(kv, user)?;
    if let Some(t) = tab {
        state.tab = t.parse::<Tab>()?;
    }
    if Store::new(kv, state.user.as_str()).seed_if_empty(state.tab, today())? {
        tracing::info!(user = %state.user, tab = %state.tab, "seeded demo records");
    }
    Ok(state)
}

/// Switching tabs clears every filter, the way the dashboard resets its
/// search box and selects.
pub fn apply(state: &AppState, action: Action) -> AppState {
    let mut next = state.clone();
    match action {
        Action::SwitchTab(tab) => {
            next.tab = tab;
            next.filter = Filter::default();
        }
        Action::Search(s) => next.filter.search = s,
        Action::FilterCategory(c) => next.filter.category = c,
        Action::FilterStatus(s) => next.filter.status = s,
        Action::ClearFilters => next.filter = Filter::default(),
    }
    next
}
