use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use lcsforge::charts::stats::SpeedupSummary;
use lcsforge::comparator::Variant;
use lcsforge::harness::na_marker::NA;
use lcsforge::harness::TrialRecord;
use lcsforge::recorder::StepRecord;

pub fn fmt_seconds(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.6}s", v),
        None => NA.to_string(),
    }
}

fn fmt_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_infinite() => "inf".to_string(),
        Some(v) => format!("{:.2}x", v),
        None => NA.to_string(),
    }
}

/// The grid layout of the step view: S2 across the top, S1 down the side,
/// the written cell bold and traceback cells in yellow.
pub fn print_dp_table(str1: &[char], str2: &[char], step: &StepRecord) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let mut header = vec![Cell::new(""), Cell::new("")];
    header.extend(
        str2.iter()
            .map(|c| Cell::new(c).add_attribute(Attribute::Italic)),
    );
    table.set_header(header);

    for i in 0..step.table.rows() {
        let label = if i == 0 {
            String::new()
        } else {
            str1[i - 1].to_string()
        };
        let mut row = vec![Cell::new(label).add_attribute(Attribute::Italic)];
        for j in 0..step.table.cols() {
            let mut cell =
                Cell::new(step.table.get(i, j)).set_alignment(CellAlignment::Center);
            if step.cell == Some((i, j)) {
                cell = cell.fg(Color::Red).add_attribute(Attribute::Bold);
            } else if step.path.contains(&(i, j)) {
                cell = cell.fg(Color::Yellow);
            }
            row.push(cell);
        }
        table.add_row(row);
    }
    println!("{}", table);
}

pub fn print_results(records: &[TrialRecord]) {
    if records.is_empty() {
        println!("(no results)");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Case").add_attribute(Attribute::Bold),
            Cell::new("Len1"),
            Cell::new("Len2"),
            Cell::new("Product"),
            Cell::new("Brute Force").fg(Color::Red),
            Cell::new("DP").fg(Color::Green),
            Cell::new("Speedup").fg(Color::Cyan),
        ]);

    for r in records {
        table.add_row(vec![
            Cell::new(r.case_id),
            Cell::new(r.str1_length),
            Cell::new(r.str2_length),
            Cell::new(r.product_length),
            Cell::new(fmt_seconds(r.brute_force_time)),
            Cell::new(fmt_seconds(r.dp_time)),
            Cell::new(fmt_ratio(r.speedup)),
        ]);
    }

    for i in 0..7 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("{}", table);
}

pub fn print_speedup_summary(summary: Option<&SpeedupSummary>) {
    let Some(s) = summary else {
        println!("No trial has both timings, so there is no speedup to summarize.");
        return;
    };

    let mut table = Table::new();
    table.load_preset(ASCII_FULL).set_header(vec![
        Cell::new("Trials").add_attribute(Attribute::Bold),
        Cell::new("Mean"),
        Cell::new("Median"),
        Cell::new("Min"),
        Cell::new("Max"),
    ]);
    table.add_row(vec![
        Cell::new(s.count),
        Cell::new(format!("{:.2}x", s.mean)).fg(Color::Cyan),
        Cell::new(format!("{:.2}x", s.median)),
        Cell::new(format!("{:.2}x", s.min)),
        Cell::new(format!("{:.2}x", s.max)),
    ]);
    println!("\n📊 Speedup of DP over brute force");
    println!("{}", table);
}

pub struct ComparisonRow {
    pub variant: Variant,
    pub algorithm: &'static str,
    pub result: String,
    pub length: Option<usize>,
    pub seconds: Option<f64>,
}

pub fn print_comparison(rows: &[ComparisonRow]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Variant").add_attribute(Attribute::Bold),
            Cell::new("Algorithm"),
            Cell::new("Result"),
            Cell::new("Length"),
            Cell::new("Time"),
        ]);

    for r in rows {
        table.add_row(vec![
            Cell::new(r.variant),
            Cell::new(r.algorithm),
            Cell::new(&r.result),
            Cell::new(r.length.map_or_else(|| NA.to_string(), |l| l.to_string())),
            Cell::new(fmt_seconds(r.seconds)),
        ]);
    }
    println!("{}", table);
}
