use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::core::snapshot::PriceSnapshot;

pub fn build_prices_table(snapshot: &PriceSnapshot) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Time",
        "Electricity",
        "Transmission",
        "Renewable",
        "Excise",
        "Supply security",
        "Total",
    ]);
    for entry in snapshot.prices() {
        let time = Cell::new(entry.time_label());
        table.add_row(vec![
            if entry.minute() == 0 { time.add_attribute(Attribute::Bold) } else { time },
            Cell::new(entry.tariff.electricity).set_alignment(CellAlignment::Right),
            Cell::new(entry.tariff.transmission)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(entry.tariff.renewable)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(entry.tariff.excise)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(entry.tariff.supply_security)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(entry.total).set_alignment(CellAlignment::Right).fg(
                if entry.total >= snapshot.average() { Color::Red } else { Color::Green },
            ),
        ]);
    }
    table
}

pub fn build_summary_table(snapshot: &PriceSnapshot) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Current", "Average", "Min", "Max", "Fetched at"]);
    table.add_row(vec![
        Cell::new(snapshot.current().total).add_attribute(Attribute::Bold),
        Cell::new(snapshot.average()),
        Cell::new(snapshot.min()).fg(Color::Green),
        Cell::new(snapshot.max()).fg(Color::Red),
        Cell::new(snapshot.fetched_at().format("%Y-%m-%d %H:%M:%S")).add_attribute(Attribute::Dim),
    ]);
    table
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}
