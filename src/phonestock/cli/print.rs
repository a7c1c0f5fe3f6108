use colored::Colorize;
use phonestock::api::{CmdMessage, CmdResult, MessageLevel};
use phonestock::config::StockConfig;
use phonestock::index::SelectionMenu;
use phonestock::model::Record;
use phonestock::payment::{Invoice, PaymentMethod};
use unicode_width::UnicodeWidthStr;

const COLUMN_GAP: &str = " | ";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        println!("{}", style_message(message));
    }
}

pub(super) fn style_message(message: &CmdMessage) -> String {
    match message.level {
        MessageLevel::Info => message.content.dimmed().to_string(),
        MessageLevel::Success => message.content.green().to_string(),
        MessageLevel::Warning => message.content.yellow().to_string(),
        MessageLevel::Error => message.content.red().to_string(),
    }
}

/// Everything a command produced: its table, then messages, then any invoice.
pub(super) fn render_result(result: &CmdResult, config: &StockConfig) -> String {
    let mut output = String::new();
    if !result.listed_records.is_empty() {
        output.push_str(&render_records(&result.header, &result.listed_records, config));
    }
    for message in &result.messages {
        output.push_str(&style_message(message));
        output.push('\n');
    }
    if let Some(invoice) = &result.invoice {
        output.push_str(&render_invoice(invoice, config));
    }
    output
}

/// Renders records as a table under `header`, columns padded to their widest cell.
pub(super) fn render_records(header: &[String], records: &[Record], config: &StockConfig) -> String {
    if records.is_empty() {
        return "No phones found.\n".to_string();
    }

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            let mut cells = record.to_fields().to_vec();
            cells[3] = config.price(record.price);
            cells
        })
        .collect();

    let columns = rows[0].len();
    let mut titles: Vec<String> = header.iter().take(columns).cloned().collect();
    titles.resize(columns, String::new());

    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            rows.iter()
                .map(|row| row[col].width())
                .chain(std::iter::once(titles[col].width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut output = String::new();
    output.push_str(&join_padded(&titles, &widths).bold().to_string());
    output.push('\n');
    for row in &rows {
        output.push_str(&join_padded(row, &widths));
        output.push('\n');
    }
    output
}

fn join_padded(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad_to_width(cell, *width))
        .collect();
    padded.join(COLUMN_GAP).trim_end().to_string()
}

fn pad_to_width(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

/// One numbered option per line: `  1 - Apple`.
pub(super) fn render_menu(menu: &SelectionMenu) -> String {
    let mut output = String::new();
    for (number, value) in menu.entries() {
        output.push_str(&format!("  {} - {}\n", number.to_string().yellow(), value));
    }
    output
}

pub(super) fn render_invoice(invoice: &Invoice, config: &StockConfig) -> String {
    let payment = match &invoice.method {
        PaymentMethod::Cash { tendered, change } => format!(
            "cash, tendered {}{:.2}, change {}{:.2}",
            config.currency, tendered, config.currency, change
        ),
        PaymentMethod::Card { last_digits } => format!("card ending in {}", last_digits),
    };

    let lines = [
        ("Brand", invoice.brand.clone()),
        ("Model", invoice.model.clone()),
        ("Storage", format!("{}GB", invoice.storage)),
        ("Price", config.price(invoice.price)),
        ("Payment", payment),
        ("Date", invoice.issued_at.format("%Y-%m-%d %H:%M").to_string()),
    ];

    let mut output = format!("{}\n", "Invoice".bold());
    for (label, value) in lines {
        output.push_str(&format!("  {:<8} {}\n", format!("{}:", label), value));
    }
    output
}

pub(super) fn render_config(config: &StockConfig) -> String {
    let mut output = String::new();
    for key in phonestock::config::KEYS {
        if let Some(value) = config.get(key) {
            output.push_str(&format!("{} = {}\n", key, value));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use phonestock::index::index_by;
    use phonestock::model::Field;

    fn phone(brand: &str, model: &str, price: u32) -> Record {
        Record {
            brand: brand.into(),
            model: model.into(),
            quantity: 3,
            price,
            storage: "128".into(),
            release_year: 2023,
        }
    }

    fn header() -> Vec<String> {
        phonestock::store::default_header()
    }

    #[test]
    fn table_lists_every_record() {
        let records = vec![phone("Apple", "iPhone 13", 750), phone("Xiaomi", "Redmi 12", 180)];
        let output = render_records(&header(), &records, &StockConfig::default());

        assert_eq!(output.lines().count(), 3);
        assert!(output.contains("iPhone 13"));
        assert!(output.contains("$180"));
    }

    #[test]
    fn columns_align_on_wide_characters() {
        assert_eq!(pad_to_width("Été", 5), "Été  ");
        assert_eq!(pad_to_width("手机", 5), "手机 ");
        assert_eq!(
            join_padded(&["ab".into(), "c".into()], &[4, 1]),
            "ab   | c"
        );
    }

    #[test]
    fn empty_table_says_so() {
        let output = render_records(&header(), &[], &StockConfig::default());
        assert_eq!(output, "No phones found.\n");
    }

    #[test]
    fn menu_is_numbered_from_one() {
        let records = vec![phone("Xiaomi", "Redmi 12", 180), phone("Apple", "iPhone 13", 750)];
        let output = render_menu(&index_by(&records, Field::Brand));
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].contains("1") && lines[0].ends_with("Apple"));
        assert!(lines[1].contains("2") && lines[1].ends_with("Xiaomi"));
    }

    #[test]
    fn invoice_shows_change_with_currency() {
        let invoice = Invoice {
            brand: "Apple".into(),
            model: "iPhone 13".into(),
            storage: "128".into(),
            price: 750,
            method: PaymentMethod::Cash {
                tendered: 800.0,
                change: 50.0,
            },
            issued_at: Local::now(),
        };
        let config = StockConfig {
            currency: "€".into(),
            ..StockConfig::default()
        };
        let output = render_invoice(&invoice, &config);
        assert!(output.contains("128GB"));
        assert!(output.contains("change €50.00"));
    }

    #[test]
    fn result_puts_table_before_messages() {
        let mut result = CmdResult::default()
            .with_listed_records(&header(), vec![phone("Apple", "iPhone 13", 750)]);
        result.add_message(CmdMessage::success("Sold Apple iPhone 13 (128GB): 2 left in stock"));

        let output = render_result(&result, &StockConfig::default());
        let table_at = output.find("iPhone 13").unwrap();
        let message_at = output.find("Sold").unwrap();
        assert!(table_at < message_at);
    }

    #[test]
    fn config_lists_known_keys() {
        let output = render_config(&StockConfig::default());
        assert!(output.contains("data-file = stock_celulares.csv"));
        assert!(output.contains("currency = $"));
    }
}
