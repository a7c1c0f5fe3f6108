use super::{codec, default_header, DataStore, Inventory};
use crate::error::{Result, StockError};
use crate::model::Record;

/// In-memory storage for testing.
///
/// Holds the text a [`super::fs::FileStore`] would hold on disk (`None` plays
/// the part of a missing file) and counts successful writes.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    content: Option<String>,
    writes: usize,
    fail_writes: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Makes every subsequent write fail, as a full disk would.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn write_count(&self) -> usize {
        self.writes
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes {
            return Err(StockError::Io(std::io::Error::other("simulated write failure")));
        }
        Ok(())
    }
}

impl DataStore for InMemoryStore {
    fn load(&self) -> Result<Inventory> {
        match &self.content {
            Some(content) => codec::parse(content),
            None => Ok(Inventory::missing()),
        }
    }

    fn rewrite(&mut self, inventory: &Inventory) -> Result<()> {
        self.check_writable()?;
        self.content = Some(codec::to_text(inventory)?);
        self.writes += 1;
        Ok(())
    }

    fn append(&mut self, record: &Record) -> Result<()> {
        self.check_writable()?;
        let fresh = self.content.as_deref().map_or(true, str::is_empty);
        let header = default_header();
        let header = if fresh { Some(header.as_slice()) } else { None };

        let mut buf = Vec::new();
        codec::write_lines(&mut buf, header, std::slice::from_ref(record))?;

        let mut content = self.content.take().unwrap_or_default();
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(&String::from_utf8_lossy(&buf));

        self.content = Some(content);
        self.writes += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::store::codec;

    pub const HEADER_LINE: &str = "brand;model;quantity;price;storage_gb;release_year";

    /// Builds a store line by line, the way the data file would look.
    pub struct StoreFixture {
        lines: Vec<String>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                lines: vec![HEADER_LINE.to_string()],
            }
        }

        pub fn with_phone(
            mut self,
            brand: &str,
            model: &str,
            quantity: i32,
            price: u32,
            storage: &str,
        ) -> Self {
            self.lines.push(format!(
                "{};{};{};{};{};2023",
                brand, model, quantity, price, storage
            ));
            self
        }

        /// A small shop: three brands, mixed storage sizes.
        pub fn shop() -> Self {
            Self::new()
                .with_phone("Samsung", "Galaxy S23", 10, 900, "256")
                .with_phone("Apple", "iPhone 13", 4, 750, "128")
                .with_phone("Samsung", "Galaxy A14", 20, 200, "64")
                .with_phone("Motorola", "Moto G84", 7, 320, "256")
                .with_phone("Apple", "iPhone 15", 2, 1200, "1024")
        }

        pub fn text(&self) -> String {
            let mut text = self.lines.join("\n");
            text.push('\n');
            text
        }

        pub fn build(self) -> InMemoryStore {
            InMemoryStore::with_content(self.text())
        }

        pub fn inventory(&self) -> Inventory {
            codec::parse(&self.text()).expect("fixture text parses")
        }
    }
}
