/// Output formatting for person records: bordered table or tab-aligned plain text.
use std::io::{self, Write};

use comfy_table::{presets::ASCII_FULL, ContentArrangement, Table};
use tabwriter::TabWriter;

use crate::api::PersonRecord;
use crate::config::DisplayType;

/// Column headers, in display order.
pub const HEADERS: [&str; 8] = [
    "Name",
    "Email",
    "Mobile",
    "Alt Mobile",
    "Father",
    "Circle",
    "ID Number",
    "Address",
];

const EMPTY_NOTICE: &str = "No records to display.";
const PLAIN_PADDING: usize = 2;

fn row(p: &PersonRecord) -> [&str; 8] {
    [
        &p.name,
        &p.email,
        &p.mobile,
        &p.alt_mobile,
        &p.father_name,
        &p.circle,
        &p.id_number,
        &p.address,
    ]
}

/// Write `records` to stdout in the style selected by `display`.
pub fn print_records(records: &[PersonRecord], display: DisplayType) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match display {
        DisplayType::Plain => render_plain(records, &mut out),
        DisplayType::Table => render_table(records, &mut out),
    }
}

/// Bordered table with a separator line between every row. Cells are never
/// wrapped or truncated.
pub fn render_table<W: Write>(records: &[PersonRecord], out: &mut W) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "{EMPTY_NOTICE}");
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(HEADERS);
    for p in records {
        table.add_row(row(p));
    }

    writeln!(out, "{table}")
}

/// Logical lines of the plain listing, cells joined by tabs: header, a dashed
/// rule per header, then one line per record.
pub fn plain_lines(records: &[PersonRecord]) -> Vec<String> {
    let mut lines = Vec::with_capacity(records.len() + 2);
    lines.push(HEADERS.join("\t"));
    lines.push(
        HEADERS
            .iter()
            .map(|h| "-".repeat(h.chars().count()))
            .collect::<Vec<_>>()
            .join("\t"),
    );
    lines.extend(records.iter().map(|p| row(p).join("\t")));
    lines
}

/// Plain listing with tab-separated cells expanded to aligned columns.
pub fn render_plain<W: Write>(records: &[PersonRecord], out: &mut W) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "{EMPTY_NOTICE}");
    }
    let mut tw = TabWriter::new(out).minwidth(0).padding(PLAIN_PADDING);
    for line in plain_lines(records) {
        writeln!(tw, "{line}")?;
    }
    tw.flush()
}
