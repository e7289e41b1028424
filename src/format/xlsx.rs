//! XLSX codec for the OOXML workbook container.
//!
//! Parsing streams quick-xml events over the workbook parts inside the ZIP
//! archive: relationships, workbook metadata (sheet list, 1900/1904 date
//! epoch), styles (date-format detection), shared strings, and the first
//! worksheet. Serialization emits a minimal workbook with a single sheet:
//! numbers as numeric cells, booleans as `t="b"`, text and datetimes as
//! inline strings, missing cells omitted.

use crate::error::DataSweeperError;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::xml::XmlReader;
use crate::helpers::xml::XmlTextContextHelper;
use crate::helpers::zip::ZipHelper;
use crate::helpers::zip::ZipWriterHelper;
use crate::match_xml_events;
use crate::table::Table;
use crate::table::Value;
use chrono::Duration;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use quick_xml::events::BytesDecl;
use quick_xml::events::BytesEnd;
use quick_xml::events::BytesStart;
use quick_xml::events::BytesText;
use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::Writer;
use std::borrow::Cow;
use std::collections::HashMap;
use std::io::BufRead;
use std::io::Cursor;
use thiserror::Error;
use zip::ZipArchive;
use zip::ZipWriter;

// XML tag names used while parsing workbook parts
const TAG_RELATIONSHIP: &[u8] = b"Relationship"; // Part relationship
const TAG_SHEET: QName = QName(b"sheet"); // Worksheet definition
const TAG_WORKBOOK_PROPERTIES: QName = QName(b"workbookPr"); // Workbook properties
const TAG_CUSTOM_FORMATS: QName = QName(b"numFmts"); // Custom number formats container
const TAG_CUSTOM_FORMAT: QName = QName(b"numFmt"); // Individual custom number format
const TAG_FORMAT_INDEXES: QName = QName(b"cellXfs"); // Cell format indexes container
const TAG_FORMAT_INDEX: QName = QName(b"xf"); // Individual cell format index
const TAG_SHARED_STRING_ITEM: QName = QName(b"si"); // Shared string table item
const TAG_PHONETIC_TEXT: QName = QName(b"rPh"); // Phonetic text annotation
const TAG_TEXT: QName = QName(b"t"); // Text content within strings
const TAG_ROW: QName = QName(b"row"); // Row in worksheet
const TAG_CELL: QName = QName(b"c"); // Cell in worksheet
const TAG_INLINE_STRING: QName = QName(b"is"); // Inline string value
const TAG_VALUE: QName = QName(b"v"); // Cell value content

const XMLNS_SPREADSHEET: &str =
    "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const XMLNS_DOCUMENT_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Errors specific to the XLSX container format.
#[derive(Error, Debug)]
pub enum XlsxError {
    #[error("Missing part '{0}' in workbook archive")]
    MissingPart(String),

    #[error("Workbook has no worksheets")]
    NoWorksheets,
}

/// How a cell's raw value is to be interpreted, from its `t` attribute and
/// number-format style.
#[derive(Copy, Clone, Debug, PartialEq)]
enum CellKind {
    Number,
    DateSerial,
    Boolean,
    SharedString,
    InlineString,
    IsoDateTime,
    Error,
}

/// Parses XLSX bytes into a table; first worksheet only, first row as header.
pub(crate) fn read(bytes: &[u8]) -> Result<Table, DataSweeperError> {
    let mut zip = ZipArchive::new(Cursor::new(bytes))?;
    let (sheets, is_1904) = load_workbook(&mut zip)?;
    let (_sheet_name, sheet_path) = sheets.into_iter().next().ok_or(XlsxError::NoWorksheets)?;
    let date_styles = load_date_styles(&mut zip)?;
    let shared_strings = load_shared_strings(&mut zip)?;

    let mut grid = read_worksheet(&mut zip, &sheet_path, &date_styles, &shared_strings, is_1904)?;
    while grid.first().map(|record| is_blank(record)).unwrap_or(false) {
        grid.remove(0);
    }
    while grid.last().map(|record| is_blank(record)).unwrap_or(false) {
        grid.pop();
    }
    Ok(Table::from_records(grid))
}

fn is_blank(record: &[Value]) -> bool {
    record.iter().all(Value::is_missing)
}

/// Loads the worksheet list (name, zip path) and the date epoch in use.
fn load_workbook<RS: std::io::Read + std::io::Seek>(
    zip: &mut ZipArchive<RS>,
) -> Result<(Vec<(String, String)>, bool), DataSweeperError> {
    let relationships = load_relationships(zip, "xl/_rels/workbook.xml.rels")?;
    let mut reader = zip
        .xml_reader("xl/workbook.xml")?
        .ok_or_else(|| XlsxError::MissingPart("xl/workbook.xml".to_owned()))?;
    let mut sheets: Vec<(String, String)> = Vec::new();
    let mut is_1904 = false;
    match_xml_events!(reader => {
        Event::Start(event) if event.name() == TAG_SHEET => {
            let mut name = None::<Cow<str>>;
            let mut id = None::<Cow<str>>;
            for result in event.attributes() {
                let attribute = result?;
                let key = attribute.key.local_name();
                if key.as_ref() == b"name" {
                    name = Some(attribute.unescape_value()?);
                } else if key.as_ref() == b"id" {
                    id = Some(attribute.unescape_value()?);
                }
            }
            if let Some((name, id)) = name.zip(id) {
                if let Some(path) = relationships.get(&id.to_string()) {
                    sheets.push((name.to_string(), path.to_owned()));
                }
            }
        }
        Event::Start(event) if event.name() == TAG_WORKBOOK_PROPERTIES => {
            is_1904 = event.get_attribute_value("date1904")?
                .map(|value| value.eq("1") || value.eq("true"))
                .unwrap_or(false);
        }
    });
    Ok((sheets, is_1904))
}

/// Loads worksheet relationships: relationship id to zip path.
fn load_relationships<RS: std::io::Read + std::io::Seek>(
    zip: &mut ZipArchive<RS>,
    path: &str,
) -> Result<HashMap<String, String>, DataSweeperError> {
    let mut reader = zip
        .xml_reader(path)?
        .ok_or_else(|| XlsxError::MissingPart(path.to_owned()))?;
    let mut relationships: HashMap<String, String> = HashMap::new();
    match_xml_events!(reader => {
        Event::Start(event) if event.local_name().as_ref() == TAG_RELATIONSHIP => {
            let id = event.get_attribute_value("Id")?;
            let kind = event.get_attribute_value("Type")?;
            let target = event.get_attribute_value("Target")?;
            // Only worksheet relationships matter here
            if kind.map(|it| it.ends_with("/worksheet")).unwrap_or(true) {
                if let Some((id, target)) = id.zip(target) {
                    relationships.insert(id.to_string(), to_zip_path(target));
                }
            }
        }
    });
    Ok(relationships)
}

/// Normalizes a relationship target to a path inside the workbook archive.
fn to_zip_path(path: Cow<'_, str>) -> String {
    if path.starts_with("/xl/") {
        path[1..].to_string()
    } else if path.starts_with("xl/") {
        path.to_string()
    } else {
        format!("xl/{path}")
    }
}

/// Built-in number format ids that render as dates or times.
fn is_builtin_date_format(id: &str) -> bool {
    matches!(
        id,
        "14" | "15" | "16" | "17" | "18" | "19" | "20" | "21" | "22" | "45" | "46" | "47"
    )
}

/// Scans a custom number format code for date/time placeholders, skipping
/// escaped characters, quoted literals, and color/condition brackets.
fn is_date_format_code(format: &str) -> bool {
    let mut is_escaped = false;
    let mut is_literal = false;
    let mut is_color = false;
    for character in format.chars() {
        match character {
            _ if is_escaped => is_escaped = false,
            '_' | '\\' if !is_escaped => is_escaped = true,

            '"' if is_literal => is_literal = false,
            '"' if !is_literal && !is_color => is_literal = true,

            ']' if is_color => is_color = false,
            '[' if !is_color && !is_literal => is_color = true,
            _ if is_literal || is_color => (),

            'Y' | 'y' | 'D' | 'd' | 'H' | 'h' | 'S' | 's' => return true,
            _ => (),
        }
    }
    false
}

/// Loads per-style date flags from styles.xml, indexed by cell `s` attribute.
fn load_date_styles<RS: std::io::Read + std::io::Seek>(
    zip: &mut ZipArchive<RS>,
) -> Result<Vec<bool>, DataSweeperError> {
    let mut reader = match zip.xml_reader("xl/styles.xml")? {
        Some(reader) => reader,
        None => return Ok(Vec::new()),
    };

    let mut custom_formats_context = false;
    let mut custom_formats = HashMap::<String, bool>::new();

    let mut format_indexes_context = false;
    let mut format_indexes = Vec::<String>::new();

    match_xml_events!(reader => {
        Event::Start(event) if !custom_formats_context && event.name() == TAG_CUSTOM_FORMATS => {
            custom_formats_context = true;
        }
        Event::End(event) if custom_formats_context && event.name() == TAG_CUSTOM_FORMATS => {
            custom_formats_context = false;
        }
        Event::Start(event) if custom_formats_context && event.name() == TAG_CUSTOM_FORMAT => {
            let id = event.get_attribute_value("numFmtId")?;
            let format = event.get_attribute_value("formatCode")?;
            if let Some((id, format)) = id.zip(format) {
                custom_formats.insert(id.to_string(), is_date_format_code(&format));
            }
        }

        Event::Start(event) if !format_indexes_context && event.name() == TAG_FORMAT_INDEXES => {
            format_indexes_context = true;
        }
        Event::End(event) if format_indexes_context && event.name() == TAG_FORMAT_INDEXES => {
            format_indexes_context = false;
        }
        Event::Start(event) if format_indexes_context && event.name() == TAG_FORMAT_INDEX => {
            if let Some(id) = event.get_attribute_value("numFmtId")? {
                format_indexes.push(id.to_string());
            }
        }
    });

    Ok(format_indexes
        .iter()
        .map(|id| {
            custom_formats
                .get(id)
                .copied()
                .unwrap_or_else(|| is_builtin_date_format(id))
        })
        .collect())
}

/// Loads the shared string table; an absent part means an empty table.
fn load_shared_strings<RS: std::io::Read + std::io::Seek>(
    zip: &mut ZipArchive<RS>,
) -> Result<Vec<String>, DataSweeperError> {
    let mut shared_strings = Vec::<String>::new();
    let mut reader = match zip.xml_reader("xl/sharedStrings.xml")? {
        Some(reader) => reader,
        None => return Ok(shared_strings),
    };
    match_xml_events!(reader => {
        Event::Start(event) if event.name() == TAG_SHARED_STRING_ITEM => {
            let string = read_string_value(&mut reader, TAG_SHARED_STRING_ITEM, false)?;
            shared_strings.push(string);
        }
    });
    Ok(shared_strings)
}

/// Streams one worksheet into a dense row/column grid of values.
fn read_worksheet<RS: std::io::Read + std::io::Seek>(
    zip: &mut ZipArchive<RS>,
    path: &str,
    date_styles: &[bool],
    shared_strings: &[String],
    is_1904: bool,
) -> Result<Vec<Vec<Value>>, DataSweeperError> {
    let mut reader = zip
        .xml_reader(path)?
        .ok_or_else(|| XlsxError::MissingPart(path.to_owned()))?;

    let mut grid = Vec::<Vec<Value>>::new();
    let mut row_count = 0usize;
    let mut col_count = 0usize;
    let mut row = 0usize;
    let mut col = 0usize;
    let mut kind = CellKind::Number;
    let mut value = String::new();
    match_xml_events!(reader => {
        Event::End(event) if event.name() == TAG_ROW => {
            row_count += 1;
            col_count = 0;
        }
        Event::Start(event) if event.name() == TAG_CELL => {
            (row, col) = event.get_attribute_value("r")?
                .and_then(|reference| reference_to_index(&reference))
                .unwrap_or((row_count, col_count));
            col_count += 1;
            kind = event.get_attribute_value("t")?.map(|t| {
                match t.as_ref() {
                    "inlineStr" | "str" => CellKind::InlineString,
                    "s" => CellKind::SharedString,
                    "d" => CellKind::IsoDateTime,
                    "b" => CellKind::Boolean,
                    "e" => CellKind::Error,
                    _ => CellKind::Number,
                }
            }).unwrap_or(CellKind::Number);
            if kind == CellKind::Number {
                if let Some(style) = event.get_attribute_value("s")? {
                    let is_date = style
                        .parse::<usize>()
                        .ok()
                        .and_then(|index| date_styles.get(index).copied())
                        .unwrap_or(false);
                    if is_date {
                        kind = CellKind::DateSerial;
                    }
                }
            }
            value.clear();
        }
        Event::Start(event) if event.name() == TAG_INLINE_STRING => {
            value = read_string_value(&mut reader, TAG_INLINE_STRING, false)?;
        }
        Event::Start(event) if event.name() == TAG_VALUE => {
            value = read_string_value(&mut reader, TAG_VALUE, true)?;
        }
        Event::End(event) if event.name() == TAG_CELL => {
            if !value.is_empty() && kind != CellKind::Error {
                let cell = decode_cell(kind, &value, shared_strings, is_1904);
                place(&mut grid, row, col, cell);
            }
            value.clear();
        }
    });
    Ok(grid)
}

/// Writes a value into the grid, growing rows and records with missing cells.
fn place(grid: &mut Vec<Vec<Value>>, row: usize, col: usize, value: Value) {
    while grid.len() <= row {
        grid.push(Vec::new());
    }
    let record = &mut grid[row];
    if record.len() <= col {
        record.resize(col + 1, Value::Missing);
    }
    record[col] = value;
}

/// Interprets a cell's raw text according to its kind.
fn decode_cell(kind: CellKind, raw: &str, shared_strings: &[String], is_1904: bool) -> Value {
    match kind {
        CellKind::SharedString => raw
            .parse::<usize>()
            .ok()
            .and_then(|index| shared_strings.get(index))
            .cloned()
            .map(Value::Text)
            .unwrap_or(Value::Missing),
        CellKind::InlineString => Value::Text(raw.to_owned()),
        CellKind::Boolean => Value::Bool(raw == "1" || raw.eq_ignore_ascii_case("true")),
        CellKind::IsoDateTime => parse_iso_datetime(raw)
            .map(Value::DateTime)
            .unwrap_or_else(|| Value::Text(raw.to_owned())),
        CellKind::DateSerial => raw
            .parse::<f64>()
            .ok()
            .and_then(|serial| serial_to_datetime(serial, is_1904))
            .map(Value::DateTime)
            .unwrap_or_else(|| Value::Text(raw.to_owned())),
        CellKind::Error => Value::Missing,
        CellKind::Number => raw
            .parse::<f64>()
            .map(Value::Number)
            .unwrap_or_else(|_| Value::Text(raw.to_owned())),
    }
}

/// Parses `t="d"` cell content: an ISO date with an optional time part.
fn parse_iso_datetime(raw: &str) -> Option<NaiveDateTime> {
    if raw.contains('T') {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
    } else {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    }
}

/// Converts an Excel serial date to a datetime. The 1900 epoch carries the
/// Lotus 1-2-3 leap year bug: serials below 60 are shifted by one day.
fn serial_to_datetime(serial: f64, is_1904: bool) -> Option<NaiveDateTime> {
    let days = serial.trunc() as i64;
    let days = if is_1904 {
        days + 1462
    } else if days < 60 {
        days + 1
    } else {
        days
    };
    let date = NaiveDate::from_ymd_opt(1899, 12, 30)? + Duration::days(days);
    let microseconds = (serial.fract() * 86_400_000_000f64).round() as i64;
    Some(date.and_hms_opt(0, 0, 0)? + Duration::microseconds(microseconds))
}

/// Reads string content from XML events, skipping phonetic annotations and
/// handling text, CDATA, and entity references.
fn read_string_value<R: BufRead>(
    reader: &mut XmlReader<R>,
    end_tag: QName,
    is_text_content: bool,
) -> Result<String, DataSweeperError> {
    let mut is_phonetic_text = false;
    let mut is_text = is_text_content;
    let mut text = String::new();
    match_xml_events!(reader => {
        Event::End(event) if event.name() == end_tag => break,
        Event::Start(event) if event.name() == TAG_PHONETIC_TEXT => is_phonetic_text = true,
        Event::End(event) if event.name() == TAG_PHONETIC_TEXT => is_phonetic_text = false,
        Event::Start(event) if !is_phonetic_text && event.name() == TAG_TEXT => is_text = true,
        Event::End(event) if is_text && event.name() == TAG_TEXT => is_text = false,
        Event::Text(event) if is_text => text.push_str(&event.xml_content()?),
        Event::CData(event) if is_text => text.push_str(&event.xml_content()?),
        Event::GeneralRef(event) if is_text => text.push_bytes_ref(&event)?,
    });
    Ok(text)
}

/// Converts 0-based row and column indexes to an `A1`-style cell reference.
fn index_to_reference(row: usize, col: usize) -> String {
    let mut column = col as u32 + 1;
    let mut reference = String::new();
    while column > 0 {
        column -= 1;
        let digit = (b'A' + (column % 26) as u8) as char;
        column /= 26;
        reference.insert(0, digit);
    }
    reference.push_str(&(row + 1).to_string());
    reference
}

/// Parses an `A1`-style cell reference into 0-based row and column indexes.
fn reference_to_index(reference: &str) -> Option<(usize, usize)> {
    let digits = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, numbers) = reference.split_at(digits);
    if letters.is_empty() {
        return None;
    }
    let mut col = 0usize;
    for character in letters.chars() {
        let letter = character.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() {
            return None;
        }
        col = col * 26 + (letter as usize - 'A' as usize + 1);
    }
    let row = numbers.parse::<usize>().ok()?;
    if row == 0 {
        return None;
    }
    Some((row - 1, col - 1))
}

// Static workbook parts; only the worksheet itself is generated per export.
const CONTENT_TYPES_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
    r#"<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
    r#"<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
    r#"</Types>"#,
);

const ROOT_RELATIONSHIPS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#,
    r#"</Relationships>"#,
);

const WORKBOOK_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    r#"<sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets>"#,
    r#"</workbook>"#,
);

const WORKBOOK_RELATIONSHIPS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>"#,
    r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
    r#"</Relationships>"#,
);

const STYLES_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    r#"<fonts count="1"><font/></fonts>"#,
    r#"<fills count="1"><fill><patternFill patternType="none"/></fill></fills>"#,
    r#"<borders count="1"><border/></borders>"#,
    r#"<cellStyleXfs count="1"><xf numFmtId="0"/></cellStyleXfs>"#,
    r#"<cellXfs count="1"><xf numFmtId="0" xfId="0"/></cellXfs>"#,
    r#"</styleSheet>"#,
);

/// Serializes a table into XLSX bytes: a single-sheet workbook named `Sheet1`.
pub(crate) fn write(table: &Table) -> Result<Vec<u8>, DataSweeperError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.add_xml_part("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes())?;
    zip.add_xml_part("_rels/.rels", ROOT_RELATIONSHIPS_XML.as_bytes())?;
    zip.add_xml_part("xl/workbook.xml", WORKBOOK_XML.as_bytes())?;
    zip.add_xml_part("xl/_rels/workbook.xml.rels", WORKBOOK_RELATIONSHIPS_XML.as_bytes())?;
    zip.add_xml_part("xl/styles.xml", STYLES_XML.as_bytes())?;
    zip.add_xml_part("xl/worksheets/sheet1.xml", &write_worksheet(table)?)?;
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Generates the worksheet part: header row first, then the data rows.
fn write_worksheet(table: &Table) -> Result<Vec<u8>, DataSweeperError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut worksheet = BytesStart::new("worksheet");
    worksheet.push_attribute(("xmlns", XMLNS_SPREADSHEET));
    worksheet.push_attribute(("xmlns:r", XMLNS_DOCUMENT_RELATIONSHIPS));
    writer.write_event(Event::Start(worksheet))?;
    writer.write_event(Event::Start(BytesStart::new("sheetData")))?;

    let header: Vec<Value> = table
        .columns()
        .iter()
        .map(|name| Value::Text(name.to_owned()))
        .collect();
    write_row(&mut writer, 0, &header)?;
    for (index, row) in table.rows().iter().enumerate() {
        write_row(&mut writer, index + 1, row)?;
    }

    writer.write_event(Event::End(BytesEnd::new("sheetData")))?;
    writer.write_event(Event::End(BytesEnd::new("worksheet")))?;
    Ok(writer.into_inner().into_inner())
}

fn write_row(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    row_index: usize,
    row: &[Value],
) -> Result<(), DataSweeperError> {
    let mut element = BytesStart::new("row");
    element.push_attribute(("r", (row_index + 1).to_string().as_str()));
    writer.write_event(Event::Start(element))?;
    for (col_index, value) in row.iter().enumerate() {
        write_cell(writer, row_index, col_index, value)?;
    }
    writer.write_event(Event::End(BytesEnd::new("row")))?;
    Ok(())
}

fn write_cell(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    row_index: usize,
    col_index: usize,
    value: &Value,
) -> Result<(), DataSweeperError> {
    if value.is_missing() {
        return Ok(());
    }

    let reference = index_to_reference(row_index, col_index);
    let mut cell = BytesStart::new("c");
    cell.push_attribute(("r", reference.as_str()));
    match value {
        Value::Missing => return Ok(()),
        Value::Number(number) => {
            writer.write_event(Event::Start(cell))?;
            writer.write_event(Event::Start(BytesStart::new("v")))?;
            writer.write_event(Event::Text(BytesText::new(&number.to_string())))?;
            writer.write_event(Event::End(BytesEnd::new("v")))?;
        }
        Value::Bool(boolean) => {
            cell.push_attribute(("t", "b"));
            writer.write_event(Event::Start(cell))?;
            writer.write_event(Event::Start(BytesStart::new("v")))?;
            writer.write_event(Event::Text(BytesText::new(if *boolean { "1" } else { "0" })))?;
            writer.write_event(Event::End(BytesEnd::new("v")))?;
        }
        Value::Text(_) | Value::DateTime(_) => {
            cell.push_attribute(("t", "inlineStr"));
            writer.write_event(Event::Start(cell))?;
            writer.write_event(Event::Start(BytesStart::new("is")))?;
            writer.write_event(Event::Start(BytesStart::new("t")))?;
            writer.write_event(Event::Text(BytesText::new(&value.to_string())))?;
            writer.write_event(Event::End(BytesEnd::new("t")))?;
            writer.write_event(Event::End(BytesEnd::new("is")))?;
        }
    }
    writer.write_event(Event::End(BytesEnd::new("c")))?;
    Ok(())
}
