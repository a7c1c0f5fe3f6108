use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StockError};
use crate::model::{StockKey, MAX_PRICE};
use crate::store::{DataStore, Inventory};

use super::helpers::{apply_and_rewrite, locate};

/// Accepts prices in `0..=MAX_PRICE`.
pub fn validate_new_price(price: i64) -> Result<u32> {
    if (0..=i64::from(MAX_PRICE)).contains(&price) {
        Ok(price as u32)
    } else {
        Err(StockError::OutOfBounds(format!(
            "Price must be between 0 and {}, got {}",
            MAX_PRICE, price
        )))
    }
}

pub fn run<S: DataStore>(
    store: &mut S,
    inventory: &mut Inventory,
    key: &StockKey,
    new_price: i64,
) -> Result<CmdResult> {
    let position = locate(&inventory.records, key)?;
    let price = validate_new_price(new_price)?;
    let previous = inventory.records[position].price;

    let record = apply_and_rewrite(store, inventory, position, |r| r.price = price)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Price for {} changed from {} to {}",
        key, previous, price
    )));
    Ok(result.with_affected_records(vec![record]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    fn iphone() -> StockKey {
        StockKey::new("Apple", "iPhone 13", "128")
    }

    #[test]
    fn replaces_price() {
        let mut store = StoreFixture::shop().build();
        let mut inventory = store.load().unwrap();
        run(&mut store, &mut inventory, &iphone(), 699).unwrap();

        assert_eq!(inventory.records[1].price, 699);
        assert_eq!(store.load().unwrap().records[1].price, 699);
    }

    #[test]
    fn accepts_both_bounds() {
        let mut store = StoreFixture::shop().build();
        let mut inventory = store.load().unwrap();
        run(&mut store, &mut inventory, &iphone(), 0).unwrap();
        run(&mut store, &mut inventory, &iphone(), i64::from(MAX_PRICE)).unwrap();
        assert_eq!(store.load().unwrap().records[1].price, MAX_PRICE);
    }

    #[test]
    fn rejects_out_of_range_prices() {
        let mut store = StoreFixture::shop().build();
        let mut inventory = store.load().unwrap();
        for bad in [-1, 10_001, i64::MAX] {
            let err = run(&mut store, &mut inventory, &iphone(), bad).unwrap_err();
            assert!(matches!(err, StockError::OutOfBounds(_)));
        }
        assert_eq!(inventory.records[1].price, 750);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn unknown_key_writes_nothing() {
        let mut store = StoreFixture::shop().build();
        let mut inventory = store.load().unwrap();
        let key = StockKey::new("Apple", "iPhone 13", "64");
        assert!(matches!(
            run(&mut store, &mut inventory, &key, 500),
            Err(StockError::NotFound(_))
        ));
        assert_eq!(store.write_count(), 0);
    }
}
