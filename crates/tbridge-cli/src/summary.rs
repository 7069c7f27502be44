use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tbridge_convert::{CodeMap, ConversionContext, TargetCodec};

use crate::commands::{ConvertSummary, InspectReport};

pub fn print_inspect(report: &InspectReport) {
    let schema = report.dataset.schema();
    println!("Relation: {}", schema.name());
    println!("Instances: {}", report.dataset.len());
    println!("Target: {}", target_summary(&report.context));
    println!("{}", layout_table(&report.context));
    if let Some(table) = skipped_table(&report.context) {
        println!("Skipped attributes:");
        println!("{table}");
    }
    if let Some(preview) = &report.preview {
        println!("{preview}");
    }
}

/// Print the conversion summary to stderr; stdout may carry the data.
pub fn print_convert_summary(summary: &ConvertSummary) {
    let layout = summary.context.layout();
    eprintln!("Input: {}", summary.input.display());
    if let Some(path) = &summary.output {
        eprintln!("Output: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Relation"),
        header_cell("Records"),
        header_cell("Numeric"),
        header_cell("Categorical"),
        header_cell("Skipped"),
        header_cell("Target"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(&summary.relation),
        Cell::new(summary.records),
        Cell::new(layout.numeric_count()),
        Cell::new(layout.categorical_count()),
        count_cell(summary.context.partition().skipped.len(), Color::Yellow),
        Cell::new(target_summary(&summary.context)),
    ]);
    eprintln!("{table}");
    if let Some(roundtrip) = &summary.roundtrip {
        if roundtrip.is_exact() {
            eprintln!("Round trip: {} record(s) unchanged", roundtrip.records);
        } else {
            eprintln!(
                "Round trip: {} of {} record(s) changed (first at row {})",
                roundtrip.mismatched.len(),
                roundtrip.records,
                roundtrip.mismatched[0]
            );
        }
    }
}

fn target_summary(context: &ConversionContext) -> String {
    match context.target_codec() {
        Some(TargetCodec::Regression { name }) => format!("{name} (regression)"),
        Some(TargetCodec::Classification(codec)) => {
            format!("{} (classification, {} labels)", codec.attribute(), codec.len())
        }
        None => "none".to_string(),
    }
}

fn layout_table(context: &ConversionContext) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Attribute"),
        header_cell("Role"),
        header_cell("Source"),
        header_cell("Codes"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    let partition = context.partition();
    let attributes = context.schema().attributes();
    let mut position = 0;
    let mut add_row = |table: &mut Table, source: usize, role: &str, codes: Option<&CodeMap>| {
        position += 1;
        table.add_row(vec![
            Cell::new(position),
            Cell::new(&attributes[source].name),
            Cell::new(role),
            Cell::new(source + 1),
            codes.map_or_else(|| dim_cell("-"), |codec| Cell::new(code_list(codec))),
        ]);
    };
    for &source in &partition.numeric_indices {
        add_row(&mut table, source, "numeric", None);
    }
    for (&source, codec) in partition.categorical_indices.iter().zip(context.codecs()) {
        add_row(&mut table, source, "categorical", Some(codec));
    }
    if let Some(target) = &partition.target {
        let codec = match context.target_codec() {
            Some(TargetCodec::Classification(codec)) => Some(codec),
            _ => None,
        };
        add_row(&mut table, target.index, "target", codec);
    }
    table
}

fn skipped_table(context: &ConversionContext) -> Option<Table> {
    let skipped = &context.partition().skipped;
    if skipped.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Attribute"),
        header_cell("Kind"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    for attribute in skipped {
        table.add_row(vec![
            Cell::new(&attribute.name),
            Cell::new(&attribute.kind),
            Cell::new(attribute.reason).fg(Color::Yellow),
        ]);
    }
    Some(table)
}

fn code_list(codec: &CodeMap) -> String {
    codec
        .labels()
        .iter()
        .enumerate()
        .map(|(code, label)| format!("{code}={label}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(color)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
