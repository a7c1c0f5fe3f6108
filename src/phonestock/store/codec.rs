//! Reading and writing the `;`-delimited line format.
//!
//! Fields are never quoted or escaped. A leading UTF-8 byte-order mark is
//! dropped on read and never written. Lines end in `\n` on write; `\r\n` is
//! accepted on read and blank lines are skipped.

use super::{default_header, Inventory};
use crate::error::{Result, StockError};
use crate::model::{Record, RESERVED_CHARS};
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use std::io::Write;

pub const DELIMITER: u8 = b';';
const BOM: char = '\u{feff}';

/// Parses the full text of a data file. The first row becomes the header.
pub fn parse(content: &str) -> Result<Inventory> {
    let content = content.strip_prefix(BOM).unwrap_or(content);
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(content.as_bytes());

    let mut rows = reader.records();
    let header = match rows.next() {
        Some(row) => row?.iter().map(str::to_string).collect(),
        None => default_header(),
    };

    let mut records = Vec::new();
    for row in rows {
        let row = row?;
        let line = row.position().map(|p| p.line() as usize).unwrap_or(0);
        let fields: Vec<&str> = row.iter().collect();
        records.push(Record::from_fields(&fields, line)?);
    }

    Ok(Inventory::new(header, records))
}

fn writer_builder() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder
        .delimiter(DELIMITER)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true);
    builder
}

/// Refuses a record whose text fields would split or add lines on disk.
pub fn ensure_storable(record: &Record) -> Result<()> {
    for field in [&record.brand, &record.model, &record.storage] {
        if field.contains(RESERVED_CHARS) {
            return Err(StockError::Store(format!(
                "{:?} cannot be stored: fields may not contain ';' or line breaks",
                field
            )));
        }
    }
    Ok(())
}

/// Writes an optional header line followed by one line per record.
///
/// Every record is checked before anything is written.
pub fn write_lines<W: Write>(out: W, header: Option<&[String]>, records: &[Record]) -> Result<()> {
    for record in records {
        ensure_storable(record)?;
    }
    let mut writer = writer_builder().from_writer(out);
    if let Some(header) = header {
        writer.write_record(header)?;
    }
    for record in records {
        writer.write_record(record.to_fields())?;
    }
    writer.flush()?;
    Ok(())
}

/// Serializes a whole inventory to the text that would be stored on disk.
pub fn to_text(inventory: &Inventory) -> Result<String> {
    let mut buf = Vec::new();
    write_lines(&mut buf, Some(&inventory.header), &inventory.records)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StockError;

    const SAMPLE: &str = "Marca;Modelo;Cantidad;Precio;Almacenamiento;Lanzamiento\n\
                          Samsung;Galaxy S23;10;900;256;2023\n\
                          Apple;iPhone 13;4;750;128;2021\n\
                          Motorola;Moto G84;0;320;256;2023\n";

    #[test]
    fn round_trips_records_and_header() {
        let inventory = parse(SAMPLE).unwrap();
        assert_eq!(inventory.header[0], "Marca");
        assert_eq!(inventory.records.len(), 3);
        assert_eq!(inventory.records[1].model, "iPhone 13");

        let text = to_text(&inventory).unwrap();
        assert_eq!(text, SAMPLE);
        assert_eq!(parse(&text).unwrap(), inventory);
    }

    #[test]
    fn drops_byte_order_mark() {
        let with_bom = format!("\u{feff}{}", SAMPLE);
        let inventory = parse(&with_bom).unwrap();
        assert_eq!(inventory.header[0], "Marca");
        assert!(!to_text(&inventory).unwrap().starts_with('\u{feff}'));
    }

    #[test]
    fn accepts_crlf_and_blank_lines() {
        let text = "brand;model;quantity;price;storage_gb;release_year\r\n\
                    Nokia;G21;3;150;64;2022\r\n\
                    \r\n\
                    Nokia;G42;2;200;128;2023\r\n";
        let inventory = parse(text).unwrap();
        assert_eq!(inventory.records.len(), 2);
        assert_eq!(inventory.records[1].model, "G42");
    }

    #[test]
    fn empty_text_yields_default_header() {
        let inventory = parse("").unwrap();
        assert!(inventory.records.is_empty());
        assert_eq!(inventory.header, default_header());
    }

    #[test]
    fn reports_line_of_malformed_row() {
        let text = "h1;h2;h3;h4;h5;h6\nSamsung;A14;3;200;64;2023\nbroken;row\n";
        match parse(text) {
            Err(StockError::MalformedRow { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed row, got {:?}", other),
        }
    }

    #[test]
    fn never_quotes_fields() {
        let inventory = parse("a;b;c;d;e;f\nXiaomi;Redmi \"Note\" 12;2;300;128;2023\n").unwrap();
        let text = to_text(&inventory).unwrap();
        assert!(text.contains("Xiaomi;Redmi \"Note\" 12;2;300;128;2023\n"));
    }

    #[test]
    fn refuses_fields_that_would_split_the_line() {
        let mut inventory = parse(SAMPLE).unwrap();
        inventory.records[1].model = "iPhone 13;Pro".into();

        let mut buf = Vec::new();
        let result = write_lines(&mut buf, Some(&inventory.header), &inventory.records);
        assert!(matches!(result, Err(StockError::Store(_))));
        assert!(buf.is_empty());

        inventory.records[1].model = "iPhone 13\nApple;Fake;1;1;64;2020".into();
        assert!(to_text(&inventory).is_err());
    }
}
