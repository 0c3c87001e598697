// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::db::KvStore;
use crate::errors::LicenseError;

const SESSION_KEY: &str = "lh_session";

static USER_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._@+-]{0,127}$").expect("user id pattern")
});

/// Supplies the identity of the signed-in user, or `None` when nobody is.
pub trait AuthProvider {
    fn current_user(&self) -> Result<Option<String>>;
}

/// Reads the signed-in user from the store. An explicit user given on the
/// command line takes precedence for that invocation.
pub struct SessionAuth<'a> {
    kv: &'a dyn KvStore,
    explicit: Option<String>,
}

impl<'a> SessionAuth<'a> {
    pub fn new(kv: &'a dyn KvStore, explicit: Option<String>) -> Self {
        SessionAuth { kv, explicit }
    }
}

impl AuthProvider for SessionAuth<'_> {
    fn current_user(&self) -> Result<Option<String>> {
        if let Some(u) = &self.explicit {
            return Ok(Some(validate_user_id(u)?));
        }
        Ok(self
            .kv
            .get(SESSION_KEY)?
            .map(|s| s.trim().to_string())
            .filter(|s| USER_ID.is_match(s)))
    }
}

pub fn validate_user_id(raw: &str) -> Result<String> {
    let u = raw.trim();
    if !USER_ID.is_match(u) {
        return Err(LicenseError::validation(format!("invalid user id '{}'", u)).into());
    }
    Ok(u.to_string())
}

pub fn login(kv: &dyn KvStore, user: &str) -> Result<String> {
    let u = validate_user_id(user)?;
    kv.set(SESSION_KEY, &u)?;
    tracing::info!(user = %u, "signed in");
    Ok(u)
}

pub fn logout(kv: &dyn KvStore) -> Result<()> {
    kv.delete(SESSION_KEY)?;
    tracing::info!("signed out");
    Ok(())
}

/// Data commands never run without a known user.
pub fn require_user(auth: &dyn AuthProvider) -> Result<String> {
    auth.current_user()?
        .ok_or_else(|| LicenseError::NotSignedIn.into())
}
