use crate::error::{Result, StockError};
use crate::model::{Record, StockKey};
use crate::store::{DataStore, Inventory};

/// Position of the first record matching `key`.
///
/// Duplicate keys are possible in the data file; only the first one is ever
/// selected.
pub fn locate(records: &[Record], key: &StockKey) -> Result<usize> {
    records
        .iter()
        .position(|r| r.matches(key))
        .ok_or_else(|| StockError::NotFound(key.clone()))
}

pub fn find<'a>(records: &'a [Record], key: &StockKey) -> Result<&'a Record> {
    locate(records, key).map(|i| &records[i])
}

/// Applies `change` to the record at `position` and rewrites the datastore.
///
/// If the rewrite fails the record is restored, so memory never runs ahead of
/// the file.
pub fn apply_and_rewrite<S, F>(
    store: &mut S,
    inventory: &mut Inventory,
    position: usize,
    change: F,
) -> Result<Record>
where
    S: DataStore,
    F: FnOnce(&mut Record),
{
    let previous = inventory.records[position].clone();
    change(&mut inventory.records[position]);

    if let Err(e) = store.rewrite(inventory) {
        inventory.records[position] = previous;
        return Err(e);
    }
    Ok(inventory.records[position].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn locates_first_of_duplicate_keys() {
        let inventory = StoreFixture::new()
            .with_phone("Nokia", "G21", 3, 150, "64")
            .with_phone("Nokia", "G21", 9, 175, "64")
            .inventory();
        let key = StockKey::new("Nokia", "G21", "64");
        assert_eq!(locate(&inventory.records, &key).unwrap(), 0);
        assert_eq!(find(&inventory.records, &key).unwrap().quantity, 3);
    }

    #[test]
    fn all_three_key_fields_must_match() {
        let inventory = StoreFixture::shop().inventory();
        let wrong_storage = StockKey::new("Apple", "iPhone 13", "256");
        assert!(matches!(
            locate(&inventory.records, &wrong_storage),
            Err(StockError::NotFound(_))
        ));
        let wrong_case = StockKey::new("apple", "iPhone 13", "128");
        assert!(locate(&inventory.records, &wrong_case).is_err());
    }

    #[test]
    fn zero_quantity_record_is_still_found() {
        let inventory = StoreFixture::new()
            .with_phone("Nokia", "G21", 0, 150, "64")
            .inventory();
        let key = StockKey::new("Nokia", "G21", "64");
        assert_eq!(find(&inventory.records, &key).unwrap().quantity, 0);
    }

    #[test]
    fn failed_rewrite_restores_record() {
        let mut store = StoreFixture::shop().build().failing_writes();
        let mut inventory = store.load().unwrap();
        let result = apply_and_rewrite(&mut store, &mut inventory, 0, |r| r.quantity = 1);
        assert!(result.is_err());
        assert_eq!(inventory.records[0].quantity, 10);
    }
}
