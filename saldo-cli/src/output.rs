//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use saldo_core::Line;

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Print rendered dashboard lines
///
/// Consecutive label/value lines are grouped into one table; headers,
/// info lines, and separators are printed between the groups.
pub fn print_lines(lines: &[Line]) {
    let mut pending: Vec<&Line> = Vec::new();

    for line in lines {
        match line {
            Line::Account { .. } | Line::Warning { .. } => pending.push(line),
            Line::Header(text) => {
                flush_table(&mut pending);
                println!("{}", text.bold());
            }
            Line::Info(text) => {
                flush_table(&mut pending);
                println!("{}", text);
            }
            Line::Separator => {
                flush_table(&mut pending);
                println!("{}", "─".repeat(32).dimmed());
            }
        }
    }

    flush_table(&mut pending);
}

fn flush_table(pending: &mut Vec<&Line>) {
    if pending.is_empty() {
        return;
    }

    let mut table = create_table();
    for line in pending.drain(..) {
        match line {
            Line::Account { label, value } => {
                table.add_row(vec![label.clone(), value.clone()]);
            }
            Line::Warning { label, value } => {
                table.add_row(vec![label.red().to_string(), value.clone()]);
            }
            _ => {}
        }
    }
    println!("{}", table);
}
