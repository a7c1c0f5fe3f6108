use crate::commands::{CmdMessage, CmdResult};
use crate::store::Inventory;

/// Every record of `brand` with `storage`, in file order.
pub fn run(inventory: &Inventory, brand: &str, storage: &str) -> CmdResult {
    let matching: Vec<_> = inventory
        .records
        .iter()
        .filter(|r| r.brand == brand && r.storage == storage)
        .cloned()
        .collect();

    let mut result = CmdResult::default();
    if matching.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No {} models with {}GB in stock",
            brand, storage
        )));
    }
    result.with_listed_records(&inventory.header, matching)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn lists_matching_models_in_file_order() {
        let inventory = StoreFixture::shop()
            .with_phone("Samsung", "Galaxy S24", 3, 1100, "256")
            .inventory();
        let result = run(&inventory, "Samsung", "256");
        let models: Vec<_> = result
            .listed_records
            .iter()
            .map(|r| r.model.as_str())
            .collect();
        assert_eq!(models, vec!["Galaxy S23", "Galaxy S24"]);
        assert_eq!(result.header, inventory.header);
    }

    #[test]
    fn reports_when_nothing_matches() {
        let inventory = StoreFixture::shop().inventory();
        let result = run(&inventory, "Motorola", "64");
        assert!(result.listed_records.is_empty());
        assert_eq!(result.messages[0].level, crate::commands::MessageLevel::Info);
    }
}
