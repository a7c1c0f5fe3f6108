//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for every stock operation, whatever UI drives it.
//!
//! ## Session State
//!
//! `StockApi` owns the store and the [`Inventory`] loaded from it. The inventory
//! is read once per session by [`StockApi::load`]; queries run against it, and
//! mutations update it and rewrite (or append to) the store in the same call, so
//! the two never drift apart.
//!
//! ## Writes Need a Good Load
//!
//! Rewrites replace the whole datastore with the in-memory inventory, so
//! until [`StockApi::load`] has succeeded every mutation is refused with
//! [`StockError::NotLoaded`]. A failed load revokes the permission again.
//!
//! ## Generic Over DataStore
//!
//! `StockApi<S: DataStore>` is generic over the storage backend:
//! - Production: `StockApi<FileStore>`
//! - Testing: `StockApi<InMemoryStore>`
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **I/O with the operator**: no prompts, no stdout
//! - **Presentation**: returns data structures, not strings

use crate::commands;
use crate::error::{Result, StockError};
use crate::index::{self, SelectionMenu};
use crate::model::{Direction, Field, Record, StockKey};
use crate::payment::{Approval, Quote};
use crate::store::{DataStore, Inventory};
use crate::validation::NewRecord;
use tracing::{debug, warn};

pub struct StockApi<S: DataStore> {
    store: S,
    inventory: Inventory,
    loaded: bool,
}

impl<S: DataStore> StockApi<S> {
    /// Wraps `store` with an empty inventory. Call [`StockApi::load`] next.
    pub fn new(store: S) -> Self {
        Self {
            store,
            inventory: Inventory::default(),
            loaded: false,
        }
    }

    /// Reads the datastore into memory, replacing the current inventory.
    ///
    /// A missing file loads as an empty inventory and yields a warning. On
    /// error the previous inventory is kept.
    pub fn load(&mut self) -> Result<commands::CmdResult> {
        self.loaded = false;
        let inventory = self.store.load()?;
        let mut result = commands::CmdResult::default();

        if inventory.missing {
            result.add_message(commands::CmdMessage::warning(format!(
                "Data file {} not found; starting with empty stock",
                self.store.describe()
            )));
        }
        for key in inventory.duplicate_keys() {
            warn!(%key, "duplicate composite key");
            result.add_message(commands::CmdMessage::warning(format!(
                "{} is listed more than once; only the first entry is used",
                key
            )));
        }

        debug!(records = inventory.records.len(), "inventory loaded");
        self.inventory = inventory;
        self.loaded = true;
        Ok(result)
    }

    /// Fails unless the inventory mirrors the datastore.
    pub fn ensure_writable(&self) -> Result<()> {
        if self.loaded {
            Ok(())
        } else {
            Err(StockError::NotLoaded(self.store.describe()))
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn index_by(&self, field: Field) -> SelectionMenu {
        index::index_by(&self.inventory.records, field)
    }

    /// Distinct models of `brand` with `storage`, in file order.
    pub fn models_for(&self, brand: &str, storage: &str) -> SelectionMenu {
        let mut models: Vec<String> = Vec::new();
        for record in &self.inventory.records {
            if record.brand == brand && record.storage == storage && !models.contains(&record.model)
            {
                models.push(record.model.clone());
            }
        }
        SelectionMenu::new(models)
    }

    pub fn find(&self, key: &StockKey) -> Result<&Record> {
        commands::helpers::find(&self.inventory.records, key)
    }

    pub fn list(&self) -> commands::CmdResult {
        commands::list::run(&self.inventory)
    }

    pub fn browse(&self, brand: &str, storage: &str) -> commands::CmdResult {
        commands::browse::run(&self.inventory, brand, storage)
    }

    pub fn filter_by_budget(&self, ceiling: u32, brand: &str) -> commands::CmdResult {
        commands::budget::run(&self.inventory, ceiling, brand)
    }

    pub fn append_record(&mut self, record: NewRecord) -> Result<commands::CmdResult> {
        self.ensure_writable()?;
        commands::add::run(&mut self.store, &mut self.inventory, record)
    }

    pub fn adjust_stock(
        &mut self,
        key: &StockKey,
        direction: Direction,
        amount: u32,
    ) -> Result<commands::CmdResult> {
        self.ensure_writable()?;
        commands::stock::run(&mut self.store, &mut self.inventory, key, direction, amount)
    }

    pub fn adjust_price(&mut self, key: &StockKey, new_price: i64) -> Result<commands::CmdResult> {
        self.ensure_writable()?;
        commands::price::run(&mut self.store, &mut self.inventory, key, new_price)
    }

    pub fn quote(&self, key: &StockKey) -> Result<Quote> {
        commands::purchase::quote(&self.inventory, key)
    }

    pub fn purchase(&mut self, approval: Approval) -> Result<commands::CmdResult> {
        self.ensure_writable()?;
        commands::purchase::run(&mut self.store, &mut self.inventory, approval)
    }
}

pub use commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fs::FileStore;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn shop_api() -> StockApi<InMemoryStore> {
        let mut api = StockApi::new(StoreFixture::shop().build());
        api.load().unwrap();
        api
    }

    #[test]
    fn load_warns_on_missing_file() {
        let mut api = StockApi::new(InMemoryStore::new());
        let result = api.load().unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(api.inventory().is_empty());
    }

    #[test]
    fn load_warns_on_duplicate_keys() {
        let store = StoreFixture::new()
            .with_phone("Nokia", "G21", 3, 150, "64")
            .with_phone("Nokia", "G21", 1, 140, "64")
            .build();
        let mut api = StockApi::new(store);
        let result = api.load().unwrap();
        assert_eq!(result.messages.len(), 1);
        assert!(result.messages[0].content.contains("Nokia G21"));
    }

    #[test]
    fn load_error_keeps_previous_inventory() {
        let mut api = StockApi::new(InMemoryStore::with_content("h\nonly;three;fields\n"));
        assert!(matches!(api.load(), Err(StockError::MalformedRow { .. })));
        assert!(api.inventory().is_empty());
    }

    #[test]
    fn failed_load_blocks_every_write() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("stock.csv");
        let content = "brand;model;quantity;price;storage_gb;release_year\n\
                       Samsung;Galaxy S23;10;900;256;2023\n\
                       Apple;iPhone 13;4;750;128;2021\n\
                       Nokia;G21;3;150;64\n";
        std::fs::write(&path, content).unwrap();

        let mut api = StockApi::new(FileStore::new(&path));
        assert!(matches!(api.load(), Err(StockError::MalformedRow { line: 4, .. })));

        let record = NewRecord::parse("nokia", "G42", "5", "250", "128", "2023").unwrap();
        assert!(matches!(api.append_record(record), Err(StockError::NotLoaded(_))));
        let key = StockKey::new("Nokia", "G42", "128");
        assert!(matches!(
            api.adjust_stock(&key, Direction::Increase, 1),
            Err(StockError::NotLoaded(_))
        ));
        assert!(matches!(api.adjust_price(&key, 100), Err(StockError::NotLoaded(_))));

        assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn writes_wait_for_first_load() {
        let mut api = StockApi::new(StoreFixture::shop().build());
        let key = StockKey::new("Apple", "iPhone 13", "128");
        assert!(matches!(api.adjust_price(&key, 700), Err(StockError::NotLoaded(_))));

        api.load().unwrap();
        assert!(api.adjust_price(&key, 700).is_ok());
    }

    #[test]
    fn models_for_dedupes_in_file_order() {
        let store = StoreFixture::new()
            .with_phone("Apple", "iPhone 15", 1, 1000, "128")
            .with_phone("Apple", "iPhone 13", 1, 700, "128")
            .with_phone("Apple", "iPhone 15", 1, 1000, "128")
            .with_phone("Apple", "iPhone 14", 1, 900, "256")
            .build();
        let mut api = StockApi::new(store);
        api.load().unwrap();

        let menu = api.models_for("Apple", "128");
        assert_eq!(menu.values(), ["iPhone 15", "iPhone 13"]);
    }

    #[test]
    fn mutations_keep_memory_and_store_in_sync() {
        let mut api = shop_api();
        let key = StockKey::new("Apple", "iPhone 13", "128");
        api.adjust_stock(&key, Direction::Increase, 6).unwrap();
        api.adjust_price(&key, 720).unwrap();
        api.append_record(
            NewRecord::parse("nokia", "G42", "2", "200", "128", "2023").unwrap(),
        )
        .unwrap();
        let approval = api.quote(&key).unwrap().pay_cash(720.0).unwrap();
        api.purchase(approval).unwrap();

        let on_store = api.store().load().unwrap();
        assert_eq!(&on_store, api.inventory());
        let iphone = api.find(&key).unwrap();
        assert_eq!((iphone.quantity, iphone.price), (9, 720));
    }

    #[test]
    fn menus_come_from_loaded_inventory() {
        let api = shop_api();
        assert_eq!(api.index_by(Field::Brand).len(), 3);
        assert_eq!(api.browse("Apple", "1024").listed_records.len(), 1);
        assert_eq!(api.filter_by_budget(1000, "apple").listed_records.len(), 1);
    }
}
