//! Terminal tables for evaluation output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use fuelgeo_eval::{ApproachStats, PatternInsight};
use fuelgeo_model::VariantSummary;

pub fn print_variant_summaries(summaries: &[VariantSummary]) {
    if summaries.is_empty() {
        println!("No variant produced a comparable distance.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Variant"),
        header_cell("Evaluated"),
        header_cell("Geocoded"),
        header_cell("Mean (m)"),
        header_cell("Median (m)"),
        header_cell("Success"),
        header_cell("<=100m"),
        header_cell("<=500m"),
        header_cell("Best"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=8 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (rank, summary) in summaries.iter().enumerate() {
        let name_cell = if rank == 0 {
            Cell::new(&summary.variant)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(&summary.variant)
        };
        table.add_row(vec![
            name_cell,
            Cell::new(summary.evaluated),
            Cell::new(summary.geocoded),
            Cell::new(format!("{:.1}", summary.mean_distance_m)),
            Cell::new(format!("{:.1}", summary.median_distance_m)),
            Cell::new(format!("{:.1}%", summary.success_rate * 100.0)),
            Cell::new(format!("{:.1}%", summary.within_100m * 100.0)),
            Cell::new(format!("{:.1}%", summary.within_500m * 100.0)),
            Cell::new(summary.times_best),
        ]);
    }
    println!("{table}");
}

pub fn print_approach_comparison(comparison: &[ApproachStats]) {
    if comparison.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Approach"),
        header_cell("Mean (m)"),
        header_cell("Median (m)"),
        header_cell("Success"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for approach in comparison {
        table.add_row(vec![
            Cell::new(&approach.approach),
            Cell::new(format!("{:.1}", approach.mean_m)),
            Cell::new(format!("{:.1}", approach.median_m)),
            Cell::new(format!("{:.1}%", approach.success_rate * 100.0)),
        ]);
    }
    println!();
    println!("Approach comparison:");
    println!("{table}");
}

pub fn print_pattern_insights(insights: &[PatternInsight]) {
    if insights.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Pattern"),
        header_cell("Records"),
        header_cell("Share"),
        header_cell("Best variant"),
        header_cell("Mean (m)"),
        header_cell("vs baseline"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for insight in insights {
        let improvement = insight
            .improvement_m
            .map(|m| format!("{m:+.1} m"))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(insight.pattern),
            Cell::new(insight.count),
            Cell::new(format!("{:.1}%", insight.share * 100.0)),
            Cell::new(&insight.best_variant),
            Cell::new(format!("{:.1}", insight.best_mean_m)),
            Cell::new(improvement),
        ]);
    }
    println!();
    println!("Pattern analysis:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
