use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StockError};
use crate::model::StockKey;
use crate::payment::{Approval, Quote};
use crate::store::{DataStore, Inventory};

use super::helpers::{apply_and_rewrite, find, locate};

/// Prices the phone behind `key` for payment. Sold-out phones get no quote.
pub fn quote(inventory: &Inventory, key: &StockKey) -> Result<Quote> {
    let record = find(&inventory.records, key)?;
    if record.quantity <= 0 {
        return Err(StockError::OutOfStock(key.clone()));
    }
    Ok(Quote::new(record.key(), record.price))
}

/// Takes one unit of the paid phone out of stock and issues the invoice.
pub fn run<S: DataStore>(
    store: &mut S,
    inventory: &mut Inventory,
    approval: Approval,
) -> Result<CmdResult> {
    let key = approval.quote().key().clone();
    let position = locate(&inventory.records, &key)?;
    let current = inventory.records[position].quantity;
    if current <= 0 {
        return Err(StockError::OutOfStock(key));
    }

    let record = apply_and_rewrite(store, inventory, position, |r| r.quantity -= 1)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Sold {}: {} left in stock",
        key, record.quantity
    )));
    Ok(result
        .with_affected_records(vec![record])
        .with_invoice(approval.into_invoice()))
}
