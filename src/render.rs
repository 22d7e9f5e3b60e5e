//! xbar output.
//!
//! xbar runs the plugin and reads stdout: the first line is the menu bar
//! title, `---` separates menu sections, `--` prefixes submenu items and
//! everything after ` | ` is a parameter list for that line.

use std::fmt::Display;
use std::io::{self, Write};

use chrono::NaiveDate;

use whatsup_types::{Overview, Severity, SharedDetails};

const RESET: &str = "\x1b[0m";
const DATE_COLOR: &str = "\x1b[30m";
const ERROR_COLOR: &str = "\x1b[31;1m";
const DATE_FORMAT: &str = "%Y %b %d";

/// Menu bar icon for an overall status.
pub fn icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Major => "🔴",
        Severity::Minor => "🟠",
        Severity::None => "🟢",
    }
}

/// ANSI color for rows in a severity section.
pub fn color(severity: Severity) -> &'static str {
    match severity {
        Severity::Major => "\x1b[31;1m",
        Severity::Minor => "\x1b[38;5;208m",
        Severity::None => "\x1b[32;1m",
    }
}

/// Write the overview in xbar format.
///
/// `today` is printed next to failing sites, which have no update time of
/// their own.
pub fn write_overview<W: Write>(w: &mut W, overview: &Overview, today: NaiveDate) -> io::Result<()> {
    writeln!(w, "{}", icon(overview.overall_status))?;

    for severity in Severity::DESCENDING {
        write_section(
            w,
            overview.largest_name_length,
            overview.bucket(severity),
            color(severity),
        )?;
    }

    if overview.has_errors() {
        writeln!(w, "---")?;
        let width = overview.largest_name_length + 2;
        for e in &overview.errors {
            writeln!(
                w,
                "⁉️ {}{:<width$}{}{} {} | font=Monaco href={}",
                ERROR_COLOR,
                e.site_name,
                RESET,
                DATE_COLOR,
                today.format(DATE_FORMAT),
                e.site_url,
                width = width
            )?;
            writeln!(w, "-- Error fetching site status.")?;
            writeln!(w, "-- {}: {}", e.error.code, menu_text(&e.error.message))?;
        }
    }

    Ok(())
}

fn write_section<W: Write>(
    w: &mut W,
    largest_name_length: usize,
    details: &[SharedDetails],
    color: &str,
) -> io::Result<()> {
    if details.is_empty() {
        return Ok(());
    }

    writeln!(w, "---")?;
    let width = largest_name_length + 5;
    for d in details {
        writeln!(
            w,
            "{}{:<width$}{}{} {} | font=Monaco href={}",
            color,
            d.name(),
            RESET,
            DATE_COLOR,
            d.updated_at().format(DATE_FORMAT),
            d.url(),
            width = width
        )?;
    }
    Ok(())
}

/// Write a fatal error that stopped the run before any site was checked.
pub fn write_fatal<W: Write>(w: &mut W, err: &dyn Display) -> io::Result<()> {
    writeln!(w, "What's Up Error")?;
    writeln!(w, "---")?;
    writeln!(w, "{}", menu_text(err))
}

// xbar treats ` | ` as the start of the parameter list and splits on newlines.
fn menu_text(text: &dyn Display) -> String {
    text.to_string().replace('|', "¦").replace('\n', " ")
}
