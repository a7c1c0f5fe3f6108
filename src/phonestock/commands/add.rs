use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{DataStore, Inventory};
use crate::validation::NewRecord;

use super::helpers::locate;

/// Appends a validated record to the datastore and to the loaded inventory.
pub fn run<S: DataStore>(
    store: &mut S,
    inventory: &mut Inventory,
    new_record: NewRecord,
) -> Result<CmdResult> {
    let record = new_record.into_record();
    let key = record.key();
    let duplicate = locate(&inventory.records, &key).is_ok();

    store.append(&record)?;
    inventory.records.push(record.clone());
    inventory.missing = false;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Added {} x{} at {}",
        key, record.quantity, record.price
    )));
    if duplicate {
        result.add_message(CmdMessage::warning(format!(
            "{} was already listed; changes will keep applying to the first entry",
            key
        )));
    }
    Ok(result.with_affected_records(vec![record]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn pixel() -> NewRecord {
        NewRecord::parse("google", "Pixel 8", "6", "699", "128", "2023").unwrap()
    }

    #[test]
    fn appends_after_existing_records() {
        let mut store = StoreFixture::new()
            .with_phone("Samsung", "Galaxy S23", 10, 900, "256")
            .with_phone("Apple", "iPhone 13", 4, 750, "128")
            .with_phone("Motorola", "Moto G84", 7, 320, "256")
            .build();
        let before = store.load().unwrap();
        let mut inventory = before.clone();

        run(&mut store, &mut inventory, pixel()).unwrap();

        let after = store.load().unwrap();
        assert_eq!(after.records.len(), 4);
        assert_eq!(after.records[..3], before.records[..]);
        assert_eq!(&after.records[3], pixel().record());
        assert_eq!(inventory, after);
    }

    #[test]
    fn existing_bytes_are_preserved() {
        let fixture = StoreFixture::shop();
        let original = fixture.text();
        let mut store = fixture.build();
        let mut inventory = store.load().unwrap();

        run(&mut store, &mut inventory, pixel()).unwrap();

        let content = store.content().unwrap();
        assert!(content.starts_with(&original));
        assert!(content.ends_with("Google;Pixel 8;6;699;128;2023\n"));
    }

    #[test]
    fn appending_to_missing_store_creates_it() {
        let mut store = InMemoryStore::new();
        let mut inventory = store.load().unwrap();
        run(&mut store, &mut inventory, pixel()).unwrap();

        let loaded = store.load().unwrap();
        assert!(!loaded.missing);
        assert_eq!(loaded.records.len(), 1);
    }

    #[test]
    fn warns_about_duplicate_key() {
        let mut store = StoreFixture::new()
            .with_phone("Google", "Pixel 8", 1, 650, "128")
            .build();
        let mut inventory = store.load().unwrap();
        let result = run(&mut store, &mut inventory, pixel()).unwrap();

        assert!(result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning));
        assert_eq!(store.load().unwrap().records.len(), 2);
    }
}
