use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{ConvertResult, InspectResult};

/// Unparsed cells listed before the rest are summarized as a count.
const MAX_LISTED_CELLS: usize = 10;

pub fn print_convert_summary(result: &ConvertResult) {
    println!("Output: {}", result.output.display());
    println!("Time strategy: {}", result.strategy.description());

    let mut table = Table::new();
    table.set_header(vec![header_cell("Item"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Rows"), Cell::new(result.rows)]);
    table.add_row(vec![Cell::new("Columns written"), Cell::new(result.columns.len())]);
    table.add_row(vec![Cell::new("Derived columns"), Cell::new(result.derived_columns.len())]);
    table.add_row(vec![
        Cell::new("Dropped columns"),
        count_cell(result.dropped_columns.len(), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Unparsed cells"),
        count_cell(result.unparsed_cells.len(), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Coverage fields filled"),
        Cell::new(result.coverage_filled.len()),
    ]);
    println!("{table}");

    if !result.dropped_columns.is_empty() {
        println!("Dropped: {}", result.dropped_columns.join(", "));
    }
    if !result.unparsed_cells.is_empty() {
        let mut issues = Table::new();
        issues.set_header(vec![
            header_cell("Row"),
            header_cell("Column"),
            header_cell("Value"),
        ]);
        apply_table_style(&mut issues);
        align_column(&mut issues, 0, CellAlignment::Right);
        for issue in result.unparsed_cells.iter().take(MAX_LISTED_CELLS) {
            issues.add_row(vec![
                Cell::new(issue.row),
                Cell::new(&issue.column),
                Cell::new(&issue.value).fg(Color::Yellow),
            ]);
        }
        println!();
        println!("Unparsed cells:");
        println!("{issues}");
        let rest = result.unparsed_cells.len().saturating_sub(MAX_LISTED_CELLS);
        if rest > 0 {
            println!("... and {rest} more");
        }
    }
}

pub fn print_inspect(result: &InspectResult) {
    println!("File: {}", result.path.display());
    println!("Rows: {}", result.rows);

    let mut metadata = Table::new();
    metadata.set_header(vec![
        header_cell("Metadata"),
        header_cell("Kind"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut metadata);
    for entry in &result.metadata {
        let value = match &entry.value {
            Some(value) => Cell::new(value),
            None => dim_cell("-"),
        };
        metadata.add_row(vec![
            Cell::new(&entry.name),
            Cell::new(entry.kind),
            value,
        ]);
    }
    println!("{metadata}");

    let mut columns = Table::new();
    columns.set_header(vec![
        header_cell("Column"),
        header_cell("Kind"),
        header_cell("Units"),
        header_cell("Values"),
    ]);
    apply_table_style(&mut columns);
    align_column(&mut columns, 3, CellAlignment::Right);
    for column in &result.columns {
        columns.add_row(vec![
            Cell::new(&column.name).fg(Color::Blue),
            Cell::new(column.kind),
            column
                .units
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(column.present),
        ]);
    }
    println!("{columns}");

    if !result.absent_metadata.is_empty() {
        println!("Absent metadata: {}", result.absent_metadata.join(", "));
    }
    println!("Absent columns: {}", result.absent_columns.len());
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
