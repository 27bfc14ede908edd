//! Interactive prompts for the menu-driven mode.

use crate::error::Result;
use crate::models::{StationOverride, StationProfile};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use std::io::{self, BufRead};
use std::path::PathBuf;

/// Line that ends a pasted report.
pub const PASTE_TERMINATOR: &str = "END";

/// Reads pasted lines until the terminator line or end of input.
pub fn read_pasted<R: BufRead>(reader: R) -> Result<String> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim() == PASTE_TERMINATOR {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

pub fn prompt_report_text() -> Result<String> {
    println!(
        "Paste the daily report, then type {} on its own line:",
        PASTE_TERMINATOR
    );
    read_pasted(io::stdin().lock())
}

pub fn prompt_report_path() -> Result<PathBuf> {
    let path: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Report file")
        .interact_text()?;
    Ok(PathBuf::from(path.trim()))
}

/// Asks whether to enter the primary station by hand and, if so, its values.
pub fn prompt_override(primary: &StationProfile) -> Result<Option<StationOverride>> {
    let theme = ColorfulTheme::default();
    let wanted = Confirm::with_theme(&theme)
        .with_prompt(format!("Enter {} reading by hand?", primary.label))
        .default(false)
        .interact()?;
    if !wanted {
        return Ok(None);
    }

    let level: f64 = Input::with_theme(&theme)
        .with_prompt("ระดับน้ำ (ม.รทก.)")
        .interact_text()?;
    let diff: f64 = Input::with_theme(&theme)
        .with_prompt("เทียบเมื่อวาน (+/-)")
        .default(0.0)
        .interact_text()?;
    let flow: String = Input::with_theme(&theme)
        .with_prompt("ปริมาณน้ำ (ลบ.ม./วิ)")
        .default("-".to_string())
        .interact_text()?;

    Ok(Some(StationOverride::new(level, diff, flow.trim())))
}

/// `None` keeps the value read from the report.
pub fn prompt_flag(label: &str) -> Result<Option<bool>> {
    let options = &["From report", "Alert", "No alert"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(label)
        .items(options)
        .default(0)
        .interact_opt()?
        .unwrap_or(0);

    Ok(match selection {
        1 => Some(true),
        2 => Some(false),
        _ => None,
    })
}
