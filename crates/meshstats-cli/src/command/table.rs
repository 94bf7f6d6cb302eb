//! Console display of computed statistics.

use meshstats_engine::{ResultStore, StatisticRecord};

const MODEL_WIDTH: usize = 20;
const VALUE_WIDTH: usize = 10;

fn print_header() {
    let mut line = format!("  {:<MODEL_WIDTH$}", "Model");
    for name in StatisticRecord::COLUMN_NAMES {
        line.push_str(&format!(" {name:>VALUE_WIDTH$}"));
    }
    println!("{line}");
}

fn print_separator() {
    let total_width = MODEL_WIDTH + (VALUE_WIDTH + 1) * StatisticRecord::LEN;
    println!("  {}", "-".repeat(total_width));
}

fn print_row(model: &str, record: &StatisticRecord, decimals: usize) {
    let mut line = format!("  {model:<MODEL_WIDTH$}");
    for value in record.values() {
        line.push_str(&format!(" {value:>VALUE_WIDTH$.decimals$}"));
    }
    println!("{line}");
}

/// Print every record, grouped by region and field
pub(super) fn print_results(store: &ResultStore, decimals: u8) {
    let decimals = usize::from(decimals);
    for (region, fields) in store.regions() {
        println!("{region}");
        println!("{}", "=".repeat(region.chars().count()));
        for (field, models) in fields {
            println!();
            println!("  {field}");
            print_header();
            print_separator();
            for (model, record) in models {
                print_row(model, record, decimals);
            }
        }
        println!();
    }
}
