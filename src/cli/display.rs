//! Terminal rendering of records and station tables.

use crate::gauge::{GaugeView, Trend};
use crate::models::{FieldSource, ReportRecord, StationTable, NO_VALUE};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};

const HEADER: &str = "RID ANG THONG UNITED | รายงานสถานการณ์น้ำรายวัน";

fn source_mark(source: FieldSource) -> &'static str {
    match source {
        FieldSource::Matched => "",
        FieldSource::Defaulted => " ?",
        FieldSource::Override => " *",
    }
}

fn trend_color(trend: Trend) -> Color {
    match trend {
        Trend::Rising => Color::Red,
        Trend::Falling => Color::Blue,
        Trend::Steady => Color::DarkGrey,
    }
}

/// One row per station in record order, with gauge figures next to the reading.
/// Readings whose id is not in `table` have no gauge and are skipped.
pub fn stations_readings_table(record: &ReportRecord, table: &StationTable) -> Table {
    let mut out = Table::new();
    out.load_preset(UTF8_FULL).set_header(vec![
        "สถานี",
        "ระดับน้ำ",
        "เทียบเมื่อวาน",
        "ปริมาณน้ำ (ลบ.ม./วิ)",
        "ระดับตลิ่ง",
        "ระยะพ้นตลิ่ง",
        "% เต็ม",
    ]);

    for (id, reading) in record.stations.iter() {
        let Some(profile) = table.find(id) else {
            continue;
        };
        let view = GaugeView::new(profile, reading);

        let level = Cell::new(format!("{}{}", view.level_text, source_mark(reading.level_source)));
        let freeboard = Cell::new(format!("{:+.2}", view.freeboard));
        let (level, freeboard) = if view.above_bank {
            (level.fg(Color::Red), freeboard.fg(Color::Red))
        } else {
            (level, freeboard)
        };

        out.add_row(vec![
            Cell::new(&view.label),
            level,
            Cell::new(&view.diff_text).fg(trend_color(view.trend)),
            Cell::new(format!("{}{}", reading.flow, source_mark(reading.flow_source))),
            Cell::new(format!("{:.2} ({:.0}%)", profile.bank, view.bank_ratio * 100.0)),
            freeboard,
            Cell::new(format!("{:.0}%", view.fill_ratio * 100.0)),
        ]);
    }

    out
}

fn alert_line(label: &str, alert: bool, text: &str) -> String {
    let icon = if alert {
        "⚠".red().bold()
    } else {
        "✔".green().bold()
    };
    format!("{} {}: {}", icon, label, text)
}

/// Full human-readable summary of a record.
pub fn record_summary(record: &ReportRecord, table: &StationTable) -> String {
    let rain = if record.rainfall.present {
        if record.rainfall.amount == NO_VALUE {
            "มีฝน (ไม่ระบุปริมาณ)".to_string()
        } else {
            record.rainfall.amount.clone()
        }
    } else {
        "ไม่มีฝน".to_string()
    };

    let mut lines = vec![
        HEADER.cyan().bold().to_string(),
        format!("ณ วันที่ {}{}", record.date, source_mark(record.date_source)),
        format!("ปริมาณฝนสะสม: {}{}", rain, source_mark(record.rainfall.source)),
        stations_readings_table(record, table).to_string(),
        alert_line(
            "อ่างเก็บน้ำ",
            record.reservoir_alert,
            &record.reservoir_status.text,
        ),
        alert_line(
            "สถานการณ์อุทกภัย",
            record.flood_alert,
            &record.flood_status.text,
        ),
    ];

    let defaulted = record.defaulted_field_count();
    if defaulted > 0 {
        lines.push(
            format!("{} field(s) not found in the report (marked ?), * = entered by hand", defaulted)
                .yellow()
                .to_string(),
        );
    }

    lines.join("\n")
}

/// The active station table.
pub fn stations_table(table: &StationTable) -> Table {
    let mut out = Table::new();
    out.load_preset(UTF8_FULL)
        .set_header(vec!["id", "label", "keywords", "bank", "max", "primary"]);

    for s in table.stations() {
        out.add_row(vec![
            Cell::new(&s.id),
            Cell::new(&s.label),
            Cell::new(s.keywords.join(", ")),
            Cell::new(format!("{:.2}", s.bank)),
            Cell::new(format!("{:.2}", s.max)),
            Cell::new(if s.primary { "yes" } else { "" }),
        ]);
    }

    out
}
