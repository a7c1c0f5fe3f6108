use crate::config::StockConfig;
use crate::model::Record;
use crate::payment::Invoice;

pub mod add;
pub mod browse;
pub mod budget;
pub mod config;
pub mod helpers;
pub mod list;
pub mod price;
pub mod purchase;
pub mod stock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Records written by the command, in their new state.
    pub affected_records: Vec<Record>,
    /// Records to display, in display order.
    pub listed_records: Vec<Record>,
    pub header: Vec<String>,
    pub invoice: Option<Invoice>,
    pub config: Option<StockConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<Record>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, header: &[String], records: Vec<Record>) -> Self {
        self.header = header.to_vec();
        self.listed_records = records;
        self
    }

    pub fn with_invoice(mut self, invoice: Invoice) -> Self {
        self.invoice = Some(invoice);
        self
    }

    pub fn with_config(mut self, config: StockConfig) -> Self {
        self.config = Some(config);
        self
    }
}
