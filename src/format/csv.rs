//! CSV codec: byte-buffer parsing with encoding detection, and serialization
//! back to plain comma-separated text (header first, no index column).

use crate::error::DataSweeperError;
use crate::table::Table;
use crate::table::Value;
use csv::ReaderBuilder;
use csv::Writer;
use encoding_rs::Encoding;
use encoding_rs::UTF_8;
use std::borrow::Cow;

/// Parses CSV bytes into a table, first record as the header.
///
/// Every record is normalized to the header width: narrower records are padded
/// with missing cells, wider records lose their extra trailing fields.
pub(crate) fn read(bytes: &[u8]) -> Result<Table, DataSweeperError> {
    let text = decode(bytes);
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(index, name)| {
            if name.is_empty() {
                crate::table::default_column_name(index)
            } else {
                name.to_owned()
            }
        })
        .collect();

    let mut rows = Vec::<Vec<Value>>::new();
    for result in reader.records() {
        let record = result?;
        let mut row: Vec<Value> = record.iter().map(Value::parse).collect();
        // Flexible parsing tolerates ragged records; normalize to the header width
        row.resize(columns.len(), Value::Missing);
        rows.push(row);
    }

    Ok(Table::new(columns, rows)?)
}

/// Serializes a table to CSV bytes.
pub(crate) fn write(table: &Table) -> Result<Vec<u8>, DataSweeperError> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(Value::to_string))?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|error| std::io::Error::other(error.to_string()).into())
}

/// Decodes CSV bytes to text: honor a BOM when present, otherwise assume
/// UTF-8 with lossy replacement of invalid sequences.
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _bom_length)| encoding)
        .unwrap_or(UTF_8);
    let (text, _encoding, _malformed) = encoding.decode(bytes);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_infers_cell_types() {
        let table = read(b"a,b,c\n1,x,true\n2,y,false\n").unwrap();
        assert_eq!(table.columns(), ["a", "b", "c"]);
        assert_eq!(
            table.rows(),
            [
                vec![
                    Value::Number(1.0),
                    Value::Text("x".to_owned()),
                    Value::Bool(true),
                ],
                vec![
                    Value::Number(2.0),
                    Value::Text("y".to_owned()),
                    Value::Bool(false),
                ],
            ]
        );
    }

    #[test]
    fn read_treats_empty_fields_as_missing() {
        let table = read(b"a,b\n1,\n2,5\n1,\n").unwrap();
        assert_eq!(table.columns(), ["a", "b"]);
        assert_eq!(
            table.rows(),
            [
                vec![Value::Number(1.0), Value::Missing],
                vec![Value::Number(2.0), Value::Number(5.0)],
                vec![Value::Number(1.0), Value::Missing],
            ]
        );
    }

    #[test]
    fn read_pads_short_records_and_names_blank_headers() {
        let table = read(b"a,\n1\n").unwrap();
        assert_eq!(table.columns(), ["a", "column2"]);
        assert_eq!(table.rows(), [vec![Value::Number(1.0), Value::Missing]]);
    }

    #[test]
    fn read_truncates_records_wider_than_the_header() {
        let table = read(b"a,b\n1,2,3\n").unwrap();
        assert_eq!(table.columns(), ["a", "b"]);
        assert_eq!(table.rows(), [vec![Value::Number(1.0), Value::Number(2.0)]]);
    }

    #[test]
    fn read_skips_utf8_bom() {
        let table = read(b"\xef\xbb\xbfa,b\n1,2\n").unwrap();
        assert_eq!(table.columns(), ["a", "b"]);
    }

    #[test]
    fn round_trip_preserves_columns_and_values() {
        let original = read(b"name,score\nalice,5\nbob,\n").unwrap();
        let bytes = write(&original).unwrap();
        let reparsed = read(&bytes).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn write_renders_missing_as_empty_field() {
        let table = read(b"a,b\n1,\n").unwrap();
        let bytes = write(&table).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "a,b\n1,\n");
    }
}
