use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use scoredeck_cli::types::{FileOutcome, RunResult};

pub fn print_summary(result: &RunResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Source"),
        header_cell("Strategy"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Warnings"),
        header_cell("Output"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);

    for file in &result.files {
        let name = file
            .input
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("?")
            .to_string();
        match &file.outcome {
            FileOutcome::Converted(report) => {
                table.add_row(vec![
                    Cell::new(name),
                    Cell::new(file.source.clone()),
                    Cell::new(report.strategy.clone()),
                    Cell::new(report.rows),
                    Cell::new(report.columns),
                    warning_cell(report.diagnostics.len()),
                    Cell::new(report.output.display().to_string()).fg(Color::Green),
                ]);
            }
            FileOutcome::Failed(_) => {
                table.add_row(vec![
                    Cell::new(name),
                    Cell::new(file.source.clone()),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    Cell::new("FAILED")
                        .fg(Color::Red)
                        .add_attribute(Attribute::Bold),
                ]);
            }
        }
    }
    println!("{table}");
    println!(
        "Converted {}/{} file(s)",
        result.converted_count(),
        result.files.len()
    );

    let failures: Vec<_> = result
        .files
        .iter()
        .filter_map(|file| match &file.outcome {
            FileOutcome::Failed(message) => Some((&file.input, message)),
            FileOutcome::Converted(_) => None,
        })
        .collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for (path, message) in failures {
            eprintln!("- {}: {message}", path.display());
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
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

fn warning_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
