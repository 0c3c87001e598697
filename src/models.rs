// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::errors::LicenseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Work,
    Personal,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Work, Tab::Personal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Work => "work",
            Tab::Personal => "personal",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Work => "Work",
            Tab::Personal => "Personal",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Tab::Work => "Work licenses and subscriptions",
            Tab::Personal => "Personal subscriptions and services",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = LicenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "work" => Ok(Tab::Work),
            "personal" => Ok(Tab::Personal),
            other => Err(LicenseError::validation(format!(
                "unknown tab '{}', expected work or personal",
                other
            ))),
        }
    }
}

/// Billing cycle as stored. Values written by something other than the editor
/// are kept verbatim in `Unknown` so they survive a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum BillingCycle {
    Monthly,
    Annual,
    OneTime,
    Unknown(String),
}

impl BillingCycle {
    pub fn as_str(&self) -> &str {
        match self {
            BillingCycle::Monthly => "monthly",
            BillingCycle::Annual => "annual",
            BillingCycle::OneTime => "one-time",
            BillingCycle::Unknown(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            BillingCycle::Monthly => "Monthly",
            BillingCycle::Annual => "Annual",
            BillingCycle::OneTime => "One-time",
            BillingCycle::Unknown(_) => "unknown",
        }
    }

    pub fn parse_strict(s: &str) -> Result<Self, LicenseError> {
        match BillingCycle::from(s.trim().to_lowercase()) {
            BillingCycle::Unknown(raw) => Err(LicenseError::validation(format!(
                "unknown billing cycle '{}', expected monthly, annual or one-time",
                raw
            ))),
            c => Ok(c),
        }
    }
}

impl Default for BillingCycle {
    fn default() -> Self {
        BillingCycle::Unknown(String::new())
    }
}

impl From<String> for BillingCycle {
    fn from(s: String) -> Self {
        match s.as_str() {
            "monthly" => BillingCycle::Monthly,
            "annual" => BillingCycle::Annual,
            "one-time" => BillingCycle::OneTime,
            _ => BillingCycle::Unknown(s),
        }
    }
}

impl<'de> Deserialize<'de> for BillingCycle {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(BillingCycle::from(text_from_value(Value::deserialize(d)?)))
    }
}

impl From<BillingCycle> for String {
    fn from(c: BillingCycle) -> Self {
        c.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Status {
    Active,
    Expired,
    Cancelled,
    Unknown(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Active => "active",
            Status::Expired => "expired",
            Status::Cancelled => "cancelled",
            Status::Unknown(raw) => raw,
        }
    }

    pub fn badge(&self) -> &str {
        match self {
            Status::Active => "● Active",
            Status::Expired => "● Expired",
            Status::Cancelled => "● Cancelled",
            Status::Unknown(_) => "unknown",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Status::Active)
    }

    pub fn parse_strict(s: &str) -> Result<Self, LicenseError> {
        match Status::from(s.trim().to_lowercase()) {
            Status::Unknown(raw) => Err(LicenseError::validation(format!(
                "unknown status '{}', expected active, expired or cancelled",
                raw
            ))),
            st => Ok(st),
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Unknown(String::new())
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        match s.as_str() {
            "active" => Status::Active,
            "expired" => Status::Expired,
            "cancelled" => Status::Cancelled,
            _ => Status::Unknown(s),
        }
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(Status::from(text_from_value(Value::deserialize(d)?)))
    }
}

impl From<Status> for String {
    fn from(s: Status) -> Self {
        s.as_str().to_string()
    }
}

pub const DEFAULT_CATEGORY: &str = "Other";

/// Upper bound for amounts typed into the editor, the income field and the
/// savings form (one trillion).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// The fixed category set with display icons.
pub const CATEGORIES: [(&str, &str); 14] = [
    ("Salary", "💰"),
    ("Productivity", "💼"),
    ("Security / Antivirus", "🛡️"),
    ("AI Tools", "🤖"),
    ("Development", "💻"),
    ("Cloud Storage", "☁️"),
    ("Design", "🎨"),
    ("Communication", "💬"),
    ("Entertainment", "🎬"),
    ("Telecommunications", "📡"),
    ("Fuel", "⛽"),
    ("Daily Spend", "☕"),
    ("Consumables", "🛒"),
    ("Other", "📦"),
];

pub fn is_known_category(name: &str) -> bool {
    CATEGORIES.iter().any(|(c, _)| *c == name)
}

pub fn category_icon(name: &str) -> &'static str {
    CATEGORIES
        .iter()
        .find(|(c, _)| *c == name)
        .map(|(_, icon)| *icon)
        .unwrap_or("📦")
}

/// A stored record. Every field reads leniently so that a record written by
/// an older or foreign client still loads and survives the next save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub vendor: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub cost: Decimal,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub currency: Option<String>,
    #[serde(default)]
    pub billing_cycle: BillingCycle,
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub purchase_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_renewal: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_daily: bool,
}

impl License {
    pub fn category_or_default(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => DEFAULT_CATEGORY,
        }
    }

    /// Currency code used for grouping: uppercased, `USD` when absent.
    pub fn currency_code(&self) -> String {
        match self.currency.as_deref() {
            Some(c) if !c.is_empty() => c.to_uppercase(),
            _ => "USD".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsGoal {
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub target: Decimal,
    #[serde(default = "default_goal_months")]
    pub months: u32,
}

fn default_goal_months() -> u32 {
    12
}

impl Default for SavingsGoal {
    fn default() -> Self {
        SavingsGoal {
            target: Decimal::ZERO,
            months: default_goal_months(),
        }
    }
}

/// Raw editor input before validation. Every field is as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct LicenseDraft {
    pub name: String,
    pub vendor: String,
    pub category: String,
    pub cost: String,
    pub currency: String,
    pub billing_cycle: String,
    pub purchase_date: String,
    pub next_renewal: String,
    pub payment_method: String,
    pub status: String,
    pub notes: String,
    pub is_daily: bool,
}

impl LicenseDraft {
    /// Validates the draft and builds a record carrying `id`.
    pub fn validate(&self, id: String) -> Result<License, LicenseError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(LicenseError::validation("name is required"));
        }
        let category = self.category.trim();
        if category.is_empty() || !is_known_category(category) {
            return Err(LicenseError::validation("select a category"));
        }
        let cost = self
            .cost
            .trim()
            .parse::<Decimal>()
            .ok()
            .filter(|c| !c.is_sign_negative() && *c <= MAX_AMOUNT)
            .ok_or_else(|| LicenseError::validation("enter a valid cost"))?;

        let currency = match self.currency.trim() {
            "" => "USD".to_string(),
            c => c.to_string(),
        };
        let billing_cycle = match self.billing_cycle.trim() {
            "" => BillingCycle::Monthly,
            c => BillingCycle::parse_strict(c)?,
        };
        let status = match self.status.trim() {
            "" => Status::Active,
            s => Status::parse_strict(s)?,
        };

        Ok(License {
            id,
            name: name.to_string(),
            vendor: non_empty(&self.vendor),
            category: Some(category.to_string()),
            cost,
            currency: Some(currency),
            billing_cycle,
            purchase_date: parse_optional_date(&self.purchase_date, "purchase date")?,
            next_renewal: parse_optional_date(&self.next_renewal, "renewal date")?,
            payment_method: non_empty(&self.payment_method),
            status,
            notes: non_empty(&self.notes),
            is_daily: self.is_daily,
        })
    }

    /// Pre-fills a draft from an existing record, as the edit form does.
    pub fn from_license(l: &License) -> Self {
        LicenseDraft {
            name: l.name.clone(),
            vendor: l.vendor.clone().unwrap_or_default(),
            category: l.category.clone().unwrap_or_default(),
            cost: l.cost.to_string(),
            currency: l.currency.clone().unwrap_or_else(|| "USD".into()),
            billing_cycle: l.billing_cycle.as_str().to_string(),
            purchase_date: l.purchase_date.map(|d| d.to_string()).unwrap_or_default(),
            next_renewal: l.next_renewal.map(|d| d.to_string()).unwrap_or_default(),
            payment_method: l.payment_method.clone().unwrap_or_default(),
            status: l.status.as_str().to_string(),
            notes: l.notes.clone().unwrap_or_default(),
            is_daily: l.is_daily,
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}

fn parse_optional_date(s: &str, what: &str) -> Result<Option<NaiveDate>, LicenseError> {
    let t = s.trim();
    if t.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(t, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| LicenseError::validation(format!("invalid {} '{}', expected YYYY-MM-DD", what, t)))
}

/// Numbers or numeric strings become a decimal; anything else is zero.
fn lenient_decimal<'de, D>(d: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(decimal_from_value(&v))
}

pub(crate) fn decimal_from_value(v: &Value) -> Decimal {
    match v {
        Value::Number(n) => {
            let s = n.to_string();
            s.parse::<Decimal>()
                .or_else(|_| Decimal::from_scientific(&s))
                .unwrap_or(Decimal::ZERO)
        }
        Value::String(s) => s.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

fn lenient_date<'de, D>(d: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::String(s) => {
            let s = s.trim();
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .or_else(|| s.get(..10).and_then(|p| NaiveDate::parse_from_str(p, "%Y-%m-%d").ok()))
        }
        _ => None,
    })
}

/// Strings as-is, null as empty, any other value as its JSON text.
fn text_from_value(v: Value) -> String {
    match v {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn lenient_text<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_from_value(Value::deserialize(d)?))
}

fn lenient_opt_text<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Null => None,
        v => Some(text_from_value(v)),
    })
}

fn lenient_bool<'de, D>(d: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        _ => false,
    })
}
