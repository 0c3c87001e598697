// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::models::{BillingCycle, License};

/// Local units per US dollar used for the single-currency balance.
pub const USD_TO_LOCAL: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Cost per month. One-time purchases do not recur, so they contribute 0.
pub fn monthly_equivalent(l: &License) -> Decimal {
    match l.billing_cycle {
        BillingCycle::Monthly => l.cost,
        BillingCycle::Annual => l.cost / Decimal::from(12),
        _ => Decimal::ZERO,
    }
}

/// Cost per year. One-time purchases count once, at face value.
pub fn annual_equivalent(l: &License) -> Decimal {
    match l.billing_cycle {
        BillingCycle::Monthly => l.cost.saturating_mul(Decimal::from(12)),
        _ => l.cost,
    }
}

/// Monthly cost expressed in local units for the balance figure. Stored
/// costs are unbounded, so products saturate instead of overflowing.
///
/// Only a currency written exactly as `USD` is converted; `usd`, `Usd` and a
/// missing currency pass through unchanged.
pub fn monthly_in_local(l: &License, usd_rate: Decimal) -> Decimal {
    let m = monthly_equivalent(l);
    if l.currency.as_deref() == Some("USD") {
        m.saturating_mul(usd_rate)
    } else {
        m
    }
}
