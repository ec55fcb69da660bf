use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use csv2rdf_model::{Diagnostic, DiagnosticScope};

use csv2rdf_cli::types::RunResult;

pub fn print_summary(result: &RunResult) {
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
    }
    if let Some(path) = &result.report {
        println!("Report: {}", path.display());
    }
    println!("{}", file_table(result));
    println!("{}", entity_table(result));
    if !result.diagnostics.is_empty() {
        println!();
        println!("Diagnostics:");
        println!("{}", diagnostic_table(result));
    }
}

fn file_table(result: &RunResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Encoding"),
        header_cell("Rows"),
        header_cell("Committed"),
        header_cell("Skipped"),
    ]);
    apply_table_style(&mut table);
    for index in 2..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for file in &result.files {
        table.add_row(vec![
            Cell::new(&file.source),
            dim_cell(file.encoding.name()),
            Cell::new(file.rows_seen),
            Cell::new(file.rows_committed),
            count_cell(file.rows_skipped, Color::Yellow),
        ]);
    }
    for diagnostic in result
        .diagnostics
        .iter()
        .filter(|d| d.kind.scope() == DiagnosticScope::File)
    {
        table.add_row(vec![
            Cell::new(&diagnostic.source).fg(Color::Red),
            Cell::new(diagnostic.kind.label()).fg(Color::Red),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
        ]);
    }
    let stats = &result.stats;
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell(format!("{} read, {} failed", stats.files_read, stats.files_failed)),
        Cell::new(stats.rows_seen).add_attribute(Attribute::Bold),
        Cell::new(stats.rows_committed).add_attribute(Attribute::Bold),
        count_cell(stats.rows_skipped, Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    table
}

fn entity_table(result: &RunResult) -> Table {
    let stats = &result.stats;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Entity"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (label, count) in [
        ("EnhancementRequest", stats.enhancement_requests),
        ("IncidentReport", stats.incident_reports),
        ("Customer", stats.customers),
        ("Module", stats.modules),
    ] {
        table.add_row(vec![
            Cell::new(label).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(count),
        ]);
    }
    table.add_row(vec![
        Cell::new("Triples")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(stats.triples).add_attribute(Attribute::Bold),
    ]);
    table
}

fn diagnostic_table(result: &RunResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Source"),
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for diagnostic in &result.diagnostics {
        table.add_row(vec![
            kind_cell(diagnostic),
            Cell::new(&diagnostic.source),
            diagnostic.row.map_or_else(|| dim_cell("-"), Cell::new),
            diagnostic
                .field
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(&diagnostic.message),
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn kind_cell(diagnostic: &Diagnostic) -> Cell {
    let color = match diagnostic.kind.scope() {
        DiagnosticScope::File => Color::Red,
        DiagnosticScope::Row => Color::Yellow,
        DiagnosticScope::Field => Color::DarkYellow,
    };
    Cell::new(diagnostic.kind.label()).fg(color)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
