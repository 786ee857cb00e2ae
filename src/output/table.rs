use comfy_table::{Cell, Color};
use image_tokens::{Model, ModelFamily, PricingDb};

use crate::output::format::{
    NumberFormat, create_styled_table, format_cost, format_dimensions, format_number,
    format_tokens, header_cell, right_cell,
};
use crate::report::EstimateReport;

#[derive(Debug, Clone, Copy)]
pub(crate) struct TableOptions {
    pub(crate) use_color: bool,
    pub(crate) show_cost: bool,
    pub(crate) number_format: NumberFormat,
}

fn cost_color(use_color: bool) -> Option<Color> {
    use_color.then_some(Color::Green)
}

pub(crate) fn print_estimate_table(report: &EstimateReport, opts: TableOptions) {
    let c = opts.use_color;
    let nf = opts.number_format;

    let mut table = create_styled_table();
    let mut header = vec![
        header_cell("#", c),
        header_cell("Dimensions", c),
        header_cell("Scaled", c),
        header_cell("Detail", c),
        header_cell("Base", c),
        header_cell("Tile", c),
        header_cell("Total", c),
    ];
    if opts.show_cost {
        header.push(header_cell("Base Cost", c));
        header.push(header_cell("Tile Cost", c));
        header.push(header_cell("Total Cost", c));
    }
    table.set_header(header);

    for (i, image) in report.images.iter().enumerate() {
        let scaled = image
            .scaled
            .map_or_else(|| "-".to_string(), format_dimensions);
        let mut row = vec![
            Cell::new(i + 1),
            Cell::new(format_dimensions(image.dimensions)),
            Cell::new(scaled),
            Cell::new(image.detail),
            right_cell(&format_tokens(image.tokens.base, nf), None, false),
            right_cell(&format_tokens(image.tokens.tile, nf), None, false),
            right_cell(&format_tokens(image.tokens.total, nf), None, true),
        ];
        if opts.show_cost {
            for cost in [image.cost.base, image.cost.tile, image.cost.total] {
                row.push(right_cell(&format_cost(cost, nf), cost_color(c), false));
            }
        }
        table.add_row(row);
    }

    println!("\n  Image Tokens ({})\n", report.model.display_name());
    println!("{table}");
    print_summary(report, opts);
}

fn print_summary(report: &EstimateReport, opts: TableOptions) {
    let c = opts.use_color;
    let nf = opts.number_format;

    let mut table = create_styled_table();
    let mut header = vec![header_cell("Summary", c), header_cell("Tokens", c)];
    if opts.show_cost {
        header.push(header_cell("Cost", c));
    }
    table.set_header(header);

    let rows = [
        ("Base Tokens", report.total.base, report.total_cost.base),
        ("Tile Tokens", report.total.tile, report.total_cost.tile),
        ("Total Tokens", report.total.total, report.total_cost.total),
    ];
    for (label, tokens, cost) in rows {
        let mut row = vec![
            Cell::new(label),
            right_cell(&format_tokens(tokens, nf), None, true),
        ];
        if opts.show_cost {
            row.push(right_cell(&format_cost(cost, nf), cost_color(c), false));
        }
        table.add_row(row);
    }

    println!("{table}");
    let count = report.images.len();
    println!(
        "\n  {} image{} • {}\n",
        format_number(count as u64, nf),
        if count == 1 { "" } else { "s" },
        report.model
    );
}

pub(crate) fn print_models_table(pricing_db: &PricingDb, opts: TableOptions) {
    let c = opts.use_color;

    let mut table = create_styled_table();
    let mut header = vec![
        header_cell("Model", c),
        header_cell("Name", c),
        header_cell("Family", c),
        header_cell("Base", c),
        header_cell("Tile", c),
        header_cell("Multiplier", c),
        header_cell("Pricing Key", c),
    ];
    if opts.show_cost {
        header.push(header_cell("$/1M Input", c));
    }
    table.set_header(header);

    for model in Model::ALL {
        let (family, base, tile, multiplier) = match model.family() {
            ModelFamily::Patch { multiplier } => {
                ("patch", "-".to_string(), "-".to_string(), format!("{multiplier}"))
            }
            ModelFamily::Tile {
                base_tokens,
                tile_tokens,
            } => (
                "tile",
                base_tokens.to_string(),
                tile_tokens.to_string(),
                "-".to_string(),
            ),
        };
        let mut row = vec![
            Cell::new(model),
            Cell::new(model.display_name()),
            Cell::new(family),
            right_cell(&base, None, false),
            right_cell(&tile, None, false),
            right_cell(&multiplier, None, false),
            Cell::new(pricing_db.mapping().key_for(model)),
        ];
        if opts.show_cost {
            let price = pricing_db.entry(model).map_or_else(
                || "N/A".to_string(),
                |entry| format!("${:.2}", entry.input_cost_per_token * 1_000_000.0),
            );
            row.push(right_cell(&price, cost_color(c), false));
        }
        table.add_row(row);
    }

    println!("{table}");
}
