// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Duration, NaiveDate};

use crate::errors::LicenseError;
use crate::models::{BillingCycle, License};

/// How far a renewal date moves when a record is marked paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenewalAdvance {
    Month,
    Year,
    /// One-time and unrecognized cycles still move forward one month.
    FallbackMonth,
}

impl RenewalAdvance {
    pub fn for_cycle(cycle: &BillingCycle) -> Self {
        match cycle {
            BillingCycle::Monthly => RenewalAdvance::Month,
            BillingCycle::Annual => RenewalAdvance::Year,
            BillingCycle::OneTime | BillingCycle::Unknown(_) => RenewalAdvance::FallbackMonth,
        }
    }

    pub fn apply(self, from: NaiveDate) -> NaiveDate {
        match self {
            RenewalAdvance::Month | RenewalAdvance::FallbackMonth => add_months_rolling(from, 1),
            RenewalAdvance::Year => add_years_rolling(from, 1),
        }
    }
}

/// Signed whole days from `today` to `date`. Negative means overdue.
pub fn days_until(date: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    date.map(|d| (d - today).num_days())
}

/// Returns the record with `next_renewal` moved forward one billing cycle.
pub fn mark_paid(l: &License) -> Result<License, LicenseError> {
    let current = l
        .next_renewal
        .ok_or_else(|| LicenseError::NoRenewalDate(l.id.clone()))?;
    let mut next = l.clone();
    next.next_renewal = Some(RenewalAdvance::for_cycle(&l.billing_cycle).apply(current));
    Ok(next)
}

/// Adds calendar months keeping the day number; days past the end of the
/// target month spill into the next one (Jan 31 + 1 month = Mar 2 or 3).
pub fn add_months_rolling(from: NaiveDate, months: i32) -> NaiveDate {
    let total = from.year() * 12 + from.month0() as i32 + months;
    let year = total.div_euclid(12);
    let month0 = total.rem_euclid(12) as u32;
    roll_from_first(year, month0 + 1, from.day())
}

/// Adds calendar years with the same spill rule (Feb 29 + 1 year = Mar 1).
pub fn add_years_rolling(from: NaiveDate, years: i32) -> NaiveDate {
    roll_from_first(from.year() + years, from.month(), from.day())
}

fn roll_from_first(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(first) => first + Duration::days(day as i64 - 1),
        None => NaiveDate::MAX,
    }
}
