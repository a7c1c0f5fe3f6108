use crate::commands::{CmdMessage, CmdResult};
use crate::store::Inventory;

pub fn run(inventory: &Inventory) -> CmdResult {
    let mut result = CmdResult::default();
    if inventory.is_empty() {
        result.add_message(CmdMessage::info("No phones in stock."));
    }
    result.with_listed_records(&inventory.header, inventory.records.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn lists_every_record() {
        let inventory = StoreFixture::shop().inventory();
        let result = run(&inventory);
        assert_eq!(result.listed_records, inventory.records);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn empty_inventory_says_so() {
        let result = run(&Inventory::missing());
        assert!(result.listed_records.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
