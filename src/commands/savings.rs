// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::app::AppState;
use crate::commands::stats;
use crate::db::KvStore;
use crate::errors::LicenseError;
use crate::models::{License, MAX_AMOUNT, SavingsGoal};
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

/// Categories a deficit plan suggests trimming first.
pub const DISCRETIONARY: [&str; 3] = ["Entertainment", "Other", "Consumables"];

/// Above this share of income the plan is flagged even when it fits.
pub const MAX_HEALTHY_PERCENT: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "names", rename_all = "kebab-case")]
pub enum Recommendation {
    Cut(Vec<String>),
    ReviewFixedExpenses,
    Healthy,
}

impl Recommendation {
    pub fn message(&self) -> String {
        match self {
            Recommendation::Cut(names) => format!("Suggestion: you could cut {}", names.join(", ")),
            Recommendation::ReviewFixedExpenses => "Review your fixed expenses.".to_string(),
            Recommendation::Healthy => "Your savings plan looks healthy.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsPlan {
    pub target: Decimal,
    pub months: u32,
    pub monthly_needed: Decimal,
    pub save_percent: Decimal,
    pub can_save: bool,
    /// Balance left after saving; negative is the monthly shortfall.
    pub margin: Decimal,
    pub recommendation: Recommendation,
}

/// `active` is the tab's active records; cut candidates come from there.
pub fn plan_savings(
    goal: &SavingsGoal,
    income: Decimal,
    balance: Decimal,
    active: &[License],
) -> SavingsPlan {
    let monthly_needed = if goal.months > 0 {
        goal.target
            .checked_div(Decimal::from(goal.months))
            .unwrap_or(Decimal::MAX)
    } else {
        Decimal::ZERO
    };
    // Overflow here means the goal dwarfs the income.
    let save_percent = if income > Decimal::ZERO {
        monthly_needed
            .checked_div(income)
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::MAX)
    } else {
        Decimal::ZERO
    };
    let can_save = balance >= monthly_needed;

    let recommendation = if !can_save || save_percent > MAX_HEALTHY_PERCENT {
        let names: Vec<String> = active
            .iter()
            .filter(|l| l.status.is_active())
            .filter(|l| {
                l.category
                    .as_deref()
                    .is_some_and(|c| DISCRETIONARY.contains(&c))
            })
            .take(3)
            .map(|l| l.name.clone())
            .collect();
        if names.is_empty() {
            Recommendation::ReviewFixedExpenses
        } else {
            Recommendation::Cut(names)
        }
    } else {
        Recommendation::Healthy
    };

    SavingsPlan {
        target: goal.target,
        months: goal.months,
        monthly_needed,
        save_percent,
        can_save,
        margin: balance.saturating_sub(monthly_needed),
        recommendation,
    }
}

/// Validates raw goal input the way the savings form does.
pub fn parse_goal(target: &str, months: &str) -> Result<SavingsGoal, LicenseError> {
    let target = target
        .trim()
        .parse::<Decimal>()
        .ok()
        .filter(|t| !t.is_sign_negative() && *t <= MAX_AMOUNT)
        .ok_or_else(|| LicenseError::validation("enter a valid target"))?;
    let months = months
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|m| *m > 0)
        .ok_or_else(|| LicenseError::validation("enter a valid number of months"))?;
    Ok(SavingsGoal { target, months })
}

pub fn print_plan(plan: &SavingsPlan) {
    let status = if plan.can_save {
        format!("✅ Reachable (surplus {})", fmt_money(&plan.margin.round_dp(0)))
    } else {
        format!("⚠️ Deficit (short {})", fmt_money(&(-plan.margin).round_dp(0)))
    };
    let rows = vec![
        vec!["Target".into(), fmt_money(&plan.target)],
        vec!["Horizon".into(), format!("{} months", plan.months)],
        vec!["Needed".into(), format!("{}/month", fmt_money(&plan.monthly_needed.round_dp(0)))],
        vec!["Share of income".into(), format!("{:.1}%", plan.save_percent.round_dp(1))],
        vec!["Status".into(), status],
    ];
    println!("{}", pretty_table(&["Savings", ""], rows));
    println!("{}", plan.recommendation.message());
}

pub fn handle(kv: &dyn KvStore, state: &AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let goal = parse_goal(
                sub.get_one::<String>("target").unwrap(),
                sub.get_one::<String>("months").unwrap(),
            )?;
            Store::new(kv, state.user.as_str()).set_savings_goal(goal)?;
            println!("Savings plan updated: {} over {} months", fmt_money(&goal.target), goal.months);
        }
        Some(("plan", sub)) => {
            let (_, plan) = stats::snapshot(kv, state)?;
            if !maybe_print_json(sub.get_flag("json"), false, &plan)? {
                print_plan(&plan);
            }
        }
        _ => {}
    }
    Ok(())
}
