// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::KvStore;
use crate::theme::{
    self, ColorMode, PRESETS, Theme, css_variables, find_preset, linear_gradient,
};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};

pub fn handle(kv: &dyn KvStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(kv, sub.get_flag("json"))?,
        Some(("css", _)) => print!("{}", render_css(&theme::load_theme(kv)?, theme::load_color_mode(kv)?)),
        Some(("presets", _)) => {
            let rows: Vec<Vec<String>> = PRESETS
                .iter()
                .map(|p| {
                    let t = p.theme();
                    vec![p.label.to_string(), linear_gradient(&t.accent_colors, t.accent_angle)]
                })
                .collect();
            println!("{}", pretty_table(&["Preset", "Accent"], rows));
        }
        Some(("preset", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let preset = find_preset(name).ok_or_else(|| anyhow!("Unknown preset '{}'", name.trim()))?;
            theme::save_theme(kv, &preset.theme())?;
            println!("Theme '{}' applied", preset.label);
        }
        Some(("accent", sub)) => {
            let mut t = theme::load_theme(kv)?;
            edit_gradient(sub, &mut t.accent_colors, &mut t.accent_angle);
            theme::save_theme(kv, &t)?;
            println!("Theme applied");
        }
        Some(("bg", sub)) => {
            let mut t = theme::load_theme(kv)?;
            edit_gradient(sub, &mut t.bg_colors, &mut t.bg_angle);
            theme::save_theme(kv, &t)?;
            println!("Theme applied");
        }
        Some(("reset", _)) => {
            theme::reset_theme(kv)?;
            println!("Theme restored");
        }
        Some(("mode", sub)) => {
            let mode = ColorMode::parse(sub.get_one::<String>("mode").unwrap())?;
            theme::save_color_mode(kv, mode)?;
            println!("Color mode set to {}", mode.as_str());
        }
        _ => {}
    }
    Ok(())
}

fn edit_gradient(sub: &clap::ArgMatches, colors: &mut Vec<String>, angle: &mut u32) {
    if let Some(list) = sub.get_many::<String>("colors") {
        *colors = list.map(|c| c.trim().to_lowercase()).collect();
    }
    if let Some(a) = sub.get_one::<u32>("angle") {
        *angle = a % 360;
    }
}

fn show(kv: &dyn KvStore, json: bool) -> Result<()> {
    let t = theme::load_theme(kv)?;
    let mode = theme::load_color_mode(kv)?;
    if maybe_print_json(json, false, &serde_json::json!({ "theme": t, "mode": mode }))? {
        return Ok(());
    }
    let rows = vec![
        vec!["Mode".into(), mode.as_str().into()],
        vec!["Accent".into(), format!("{} @ {}°", t.accent_colors.join(" "), t.accent_angle)],
        vec!["Background".into(), format!("{} @ {}°", t.bg_colors.join(" "), t.bg_angle)],
    ];
    println!("{}", pretty_table(&["Theme", ""], rows));
    Ok(())
}

/// A stylesheet fragment a page can include as-is.
pub fn render_css(t: &Theme, mode: ColorMode) -> String {
    let mut out = format!(":root[data-theme=\"{}\"] {{\n", mode.as_str());
    for (name, value) in css_variables(t) {
        out.push_str(&format!("  {}: {};\n", name, value));
    }
    out.push_str("}\n");
    out.push_str(&format!(".navbar {{ background: {}; }}\n", mode.navbar_background()));
    out
}
