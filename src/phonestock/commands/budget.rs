use crate::commands::{CmdMessage, CmdResult};
use crate::model::Record;
use crate::store::Inventory;
use std::cmp::Reverse;

/// Phones of `brand` (any case) priced at or under `ceiling`, most expensive
/// first. Phones with the same price keep their file order.
pub fn filter_by_budget(records: &[Record], ceiling: u32, brand: &str) -> Vec<Record> {
    let brand = brand.trim().to_lowercase();
    let mut matching: Vec<Record> = records
        .iter()
        .filter(|r| r.price <= ceiling && r.brand.to_lowercase() == brand)
        .cloned()
        .collect();
    matching.sort_by_key(|r| Reverse(r.price));
    matching
}

pub fn run(inventory: &Inventory, ceiling: u32, brand: &str) -> CmdResult {
    let matching = filter_by_budget(&inventory.records, ceiling, brand);
    let mut result = CmdResult::default();
    if matching.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No {} phones within a budget of {}",
            brand.trim(),
            ceiling
        )));
    }
    result.with_listed_records(&inventory.header, matching)
}
