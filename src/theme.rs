// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::KvStore;
use crate::errors::LicenseError;

pub const THEME_KEY: &str = "lh_theme";
pub const MODE_KEY: &str = "lh_color_mode";
pub const MAX_COLORS: usize = 5;

static HEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("hex pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub accent_colors: Vec<String>,
    pub accent_angle: u32,
    pub bg_colors: Vec<String>,
    pub bg_angle: u32,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            accent_colors: vec!["#6366f1".into(), "#8b5cf6".into()],
            accent_angle: 135,
            bg_colors: vec!["#6366f1".into(), "#8b5cf6".into(), "#06b6d4".into()],
            bg_angle: 135,
        }
    }
}

pub struct Preset {
    pub label: &'static str,
    pub accent: [&'static str; 2],
    pub bg: [&'static str; 3],
    pub bg_angle: u32,
}

pub const PRESETS: [Preset; 8] = [
    Preset { label: "Indigo", accent: ["#6366f1", "#8b5cf6"], bg: ["#6366f1", "#8b5cf6", "#06b6d4"], bg_angle: 135 },
    Preset { label: "Aurora", accent: ["#06b6d4", "#6366f1"], bg: ["#06b6d4", "#6366f1", "#8b5cf6"], bg_angle: 120 },
    Preset { label: "Sunset", accent: ["#f59e0b", "#ef4444"], bg: ["#f59e0b", "#ef4444", "#8b5cf6"], bg_angle: 150 },
    Preset { label: "Emerald", accent: ["#10b981", "#06b6d4"], bg: ["#10b981", "#06b6d4", "#6366f1"], bg_angle: 120 },
    Preset { label: "Rose", accent: ["#ec4899", "#8b5cf6"], bg: ["#ec4899", "#8b5cf6", "#6366f1"], bg_angle: 135 },
    Preset { label: "Fire", accent: ["#ef4444", "#f59e0b"], bg: ["#ef4444", "#f59e0b", "#8b5cf6"], bg_angle: 160 },
    Preset { label: "Ocean", accent: ["#0ea5e9", "#06b6d4"], bg: ["#0ea5e9", "#06b6d4", "#6366f1"], bg_angle: 120 },
    Preset { label: "Night", accent: ["#475569", "#334155"], bg: ["#475569", "#334155", "#1e293b"], bg_angle: 135 },
];

impl Preset {
    pub fn theme(&self) -> Theme {
        Theme {
            accent_colors: self.accent.iter().map(|c| c.to_string()).collect(),
            accent_angle: 135,
            bg_colors: self.bg.iter().map(|c| c.to_string()).collect(),
            bg_angle: self.bg_angle,
        }
    }
}

pub fn find_preset(name: &str) -> Option<&'static Preset> {
    PRESETS
        .iter()
        .find(|p| p.label.eq_ignore_ascii_case(name.trim()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Dark,
    Light,
}

impl ColorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Dark => "dark",
            ColorMode::Light => "light",
        }
    }

    pub fn navbar_background(&self) -> &'static str {
        match self {
            ColorMode::Dark => "rgba(8,12,20,0.8)",
            ColorMode::Light => "rgba(240,244,255,0.9)",
        }
    }

    pub fn parse(s: &str) -> Result<Self, LicenseError> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(ColorMode::Dark),
            "light" => Ok(ColorMode::Light),
            other => Err(LicenseError::validation(format!(
                "unknown color mode '{}', expected dark or light",
                other
            ))),
        }
    }
}

/// Checks a gradient's color list: 1 to 5 entries, each `#rrggbb`.
pub fn validate_colors(colors: &[String]) -> Result<(), LicenseError> {
    if colors.is_empty() || colors.len() > MAX_COLORS {
        return Err(LicenseError::validation(format!(
            "a gradient needs between 1 and {} colors",
            MAX_COLORS
        )));
    }
    if let Some(bad) = colors.iter().find(|c| !HEX.is_match(c)) {
        return Err(LicenseError::validation(format!(
            "invalid color '{}', expected #rrggbb",
            bad
        )));
    }
    Ok(())
}

fn channels(hex: &str) -> (u8, u8, u8) {
    let ch = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(0)
    };
    (ch(1..3), ch(3..5), ch(5..7))
}

pub fn hex_to_rgba(hex: &str, alpha: f32) -> String {
    let (r, g, b) = channels(hex);
    format!("rgba({},{},{},{})", r, g, b, alpha)
}

/// Adds `amount` to every channel, clamping at 255.
pub fn lighten_hex(hex: &str, amount: u8) -> String {
    let (r, g, b) = channels(hex);
    format!(
        "#{:02x}{:02x}{:02x}",
        r.saturating_add(amount),
        g.saturating_add(amount),
        b.saturating_add(amount)
    )
}

pub fn linear_gradient(colors: &[String], angle: u32) -> String {
    match colors {
        [] => format!("linear-gradient({}deg, transparent, transparent)", angle),
        [only] => format!("linear-gradient({}deg, {}, {})", angle, only, only),
        _ => format!("linear-gradient({}deg, {})", angle, colors.join(", ")),
    }
}

const ORBS: [(&str, &str, &str, &str); 4] = [
    ("20%", "10%", "80%", "50%"),
    ("80%", "80%", "60%", "40%"),
    ("60%", "30%", "50%", "60%"),
    ("10%", "70%", "40%", "50%"),
];

/// One faint radial orb per background color, cycling through four anchors.
pub fn mesh_background(colors: &[String]) -> String {
    colors
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let (x, y, w, h) = ORBS[i % ORBS.len()];
            format!(
                "radial-gradient(ellipse {} {} at {} {}, {} 0%, transparent 60%)",
                w,
                h,
                x,
                y,
                hex_to_rgba(c, 0.12)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// CSS custom properties the stylesheet reads.
pub fn css_variables(t: &Theme) -> Vec<(&'static str, String)> {
    let main = t
        .accent_colors
        .first()
        .cloned()
        .unwrap_or_else(|| "#6366f1".to_string());
    vec![
        ("--accent", main.clone()),
        ("--accent-light", lighten_hex(&main, 40)),
        ("--accent-glow", hex_to_rgba(&main, 0.25)),
        ("--accent-gradient", linear_gradient(&t.accent_colors, t.accent_angle)),
        ("--mesh-bg", mesh_background(&t.bg_colors)),
    ]
}

/// Stored fields override the defaults one by one; anything unreadable is
/// ignored.
pub fn load_theme(kv: &dyn KvStore) -> Result<Theme> {
    let mut theme = Theme::default();
    let Some(raw) = kv.get(THEME_KEY)? else {
        return Ok(theme);
    };
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&raw) else {
        tracing::warn!("stored theme is unreadable; using default");
        return Ok(theme);
    };
    if let Some(c) = map.get("accentColors").and_then(string_list) {
        theme.accent_colors = c;
    }
    if let Some(a) = map.get("accentAngle").and_then(Value::as_u64) {
        theme.accent_angle = (a % 360) as u32;
    }
    if let Some(c) = map.get("bgColors").and_then(string_list) {
        theme.bg_colors = c;
    }
    if let Some(a) = map.get("bgAngle").and_then(Value::as_u64) {
        theme.bg_angle = (a % 360) as u32;
    }
    Ok(theme)
}

fn string_list(v: &Value) -> Option<Vec<String>> {
    let list: Vec<String> = v
        .as_array()?
        .iter()
        .filter_map(|c| c.as_str().map(str::to_string))
        .collect();
    validate_colors(&list).ok().map(|_| list)
}

pub fn save_theme(kv: &dyn KvStore, theme: &Theme) -> Result<()> {
    validate_colors(&theme.accent_colors)?;
    validate_colors(&theme.bg_colors)?;
    kv.set(THEME_KEY, &serde_json::to_string(theme)?)?;
    tracing::info!("theme saved");
    Ok(())
}

pub fn reset_theme(kv: &dyn KvStore) -> Result<Theme> {
    kv.delete(THEME_KEY)?;
    Ok(Theme::default())
}

pub fn load_color_mode(kv: &dyn KvStore) -> Result<ColorMode> {
    Ok(kv
        .get(MODE_KEY)?
        .and_then(|s| ColorMode::parse(&s).ok())
        .unwrap_or_default())
}

pub fn save_color_mode(kv: &dyn KvStore, mode: ColorMode) -> Result<()> {
    kv.set(MODE_KEY, mode.as_str())
}
