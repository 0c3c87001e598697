// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LicenseError {
    #[error("{0}")]
    Validation(String),
    #[error("record '{0}' has no renewal date")]
    NoRenewalDate(String),
    #[error("record '{0}' not found")]
    NotFound(String),
    #[error("id prefix '{0}' matches more than one record")]
    AmbiguousId(String),
    #[error("not signed in; run `licensehub session login <id>` first")]
    NotSignedIn,
}

impl LicenseError {
    pub fn validation(msg: impl Into<String>) -> Self {
        LicenseError::Validation(msg.into())
    }
}
