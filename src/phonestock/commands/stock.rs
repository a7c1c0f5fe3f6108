use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StockError};
use crate::model::{Direction, StockKey, MAX_QUANTITY};
use crate::store::{DataStore, Inventory};

use super::helpers::{apply_and_rewrite, locate};

/// Quantity after moving `amount` units in `direction`, or the reason it is refused.
pub fn adjusted_quantity(current: i32, direction: Direction, amount: u32) -> Result<i32> {
    let current_wide = i64::from(current);
    let amount_wide = i64::from(amount);

    let updated = match direction {
        Direction::Decrease if amount_wide > current_wide => {
            return Err(StockError::OutOfBounds(format!(
                "Cannot remove {} units: only {} in stock",
                amount, current
            )));
        }
        Direction::Decrease => current_wide - amount_wide,
        Direction::Increase => current_wide + amount_wide,
    };

    if updated > i64::from(MAX_QUANTITY) {
        return Err(StockError::OutOfBounds(format!(
            "Cannot hold more than {} units: {} {} {} would make {}",
            MAX_QUANTITY, current, direction, amount, updated
        )));
    }
    if updated < 0 {
        return Err(StockError::OutOfBounds(format!(
            "Stock cannot be negative: {} {} {} would make {}",
            current, direction, amount, updated
        )));
    }
    Ok(updated as i32)
}

pub fn run<S: DataStore>(
    store: &mut S,
    inventory: &mut Inventory,
    key: &StockKey,
    direction: Direction,
    amount: u32,
) -> Result<CmdResult> {
    let position = locate(&inventory.records, key)?;
    let current = inventory.records[position].quantity;
    let updated = adjusted_quantity(current, direction, amount)?;

    let record = apply_and_rewrite(store, inventory, position, |r| r.quantity = updated)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Stock for {} changed from {} to {}",
        key, current, updated
    )));
    Ok(result.with_affected_records(vec![record]))
}
