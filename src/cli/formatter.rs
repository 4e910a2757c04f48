//! Console output for the `convert` and `stats` commands
//!
//! Results go to stdout, diagnostics to stderr. Colors follow `NO_COLOR`
//! and `CLICOLOR=0`.
use colored::*;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color as TableColor, ContentArrangement, Table};

/// Turn colors off when the environment asks for plain output
pub fn init() {
    let no_color = std::env::var_os("NO_COLOR").is_some();
    let clicolor_off = std::env::var("CLICOLOR").is_ok_and(|v| v == "0");
    if no_color || clicolor_off {
        colored::control::set_override(false);
    }
}

pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green().bold(), message);
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), format!("Warning: {}", message).yellow());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), format!("Error: {}", message).red());
}

/// Key/value lines under a heading, keys padded to a common width
pub fn print_summary(title: &str, fields: &[(&str, String)]) {
    let width = fields.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    println!("{}", title.bold());
    for (key, value) in fields {
        println!("  {:<width$}  {}", format!("{}:", key).dimmed(), value, width = width + 1);
    }
}

/// Two-column table of input metrics; numeric values are right-aligned
pub fn print_metrics_table(title: &str, rows: &[(&str, String)]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new(title).add_attribute(Attribute::Bold).fg(TableColor::Cyan),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

    for (metric, value) in rows {
        let numeric = value.chars().next().is_some_and(|c| c.is_ascii_digit());
        let cell = Cell::new(value).fg(TableColor::Green);
        let cell = if numeric {
            cell.set_alignment(CellAlignment::Right)
        } else {
            cell
        };
        table.add_row(vec![Cell::new(metric), cell]);
    }

    println!("{}", table);
}

/// Count with comma thousands separators (`12,345`)
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let head = digits.len() % 3;
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && i % 3 == head {
            out.push(',');
        }
        out.push(digit);
    }
    out
}
