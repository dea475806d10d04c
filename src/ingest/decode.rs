use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Reader};

use crate::error::InviteError;

/// Input encodings the decoder accepts, declared by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Xlsx,
    Xls,
}

impl FileKind {
    /// Classify a file by the extension after its last dot (the whole
    /// name when there is none), case-insensitively.
    pub fn from_file_name(name: &str) -> Result<FileKind, InviteError> {
        let extension = name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match extension.as_str() {
            "csv" => Ok(FileKind::Csv),
            "xlsx" => Ok(FileKind::Xlsx),
            "xls" => Ok(FileKind::Xls),
            _ => Err(InviteError::UnsupportedFormat(extension)),
        }
    }
}

/// One decoded row: column label → raw string value, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    columns: Vec<(String, String)>,
}

impl RawRow {
    pub fn new(columns: Vec<(String, String)>) -> Self {
        Self { columns }
    }

    /// Values in source column order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(_, value)| value.as_str())
    }

    /// Value under a column label, if the header declared one.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(header, _)| header == label)
            .map(|(_, value)| value.as_str())
    }
}

/// Decode a raw payload into header-keyed rows.
///
/// Spreadsheet payloads are normalized onto the CSV rule set: the first
/// sheet (by position) is converted to CSV text and re-enters the CSV
/// path. Rows whose every field is empty are skipped.
pub fn decode(bytes: &[u8], kind: FileKind) -> Result<Vec<RawRow>, InviteError> {
    match kind {
        FileKind::Csv => {
            let text = std::str::from_utf8(bytes)
                .map_err(|err| InviteError::ParseFailure(err.to_string()))?;
            parse_csv(text)
        }
        FileKind::Xlsx | FileKind::Xls => {
            let csv_text = workbook_to_csv(bytes)?;
            parse_csv(&csv_text)
        }
    }
}

fn parse_csv(text: &str) -> Result<Vec<RawRow>, InviteError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .map_err(|err| InviteError::ParseFailure(err.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| InviteError::ParseFailure(err.to_string()))?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        let columns = headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();
        rows.push(RawRow::new(columns));
    }
    Ok(rows)
}

/// Load the workbook and render its first sheet as CSV text. Conversion
/// goes through a CSV writer so embedded commas survive quoting.
fn workbook_to_csv(bytes: &[u8]) -> Result<String, InviteError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|err| InviteError::ParseFailure(err.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| InviteError::ParseFailure("workbook has no sheets".to_string()))?
        .map_err(|err| InviteError::ParseFailure(err.to_string()))?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in range.rows() {
        let record: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
        writer
            .write_record(&record)
            .map_err(|err| InviteError::ParseFailure(err.to_string()))?;
    }
    let buffer = writer
        .into_inner()
        .map_err(|err| InviteError::ParseFailure(err.to_string()))?;
    String::from_utf8(buffer).map_err(|err| InviteError::ParseFailure(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_supported_extensions() {
        assert_eq!(FileKind::from_file_name("guests.csv").unwrap(), FileKind::Csv);
        assert_eq!(FileKind::from_file_name("Guests.XLSX").unwrap(), FileKind::Xlsx);
        assert_eq!(FileKind::from_file_name("old.xls").unwrap(), FileKind::Xls);
    }

    #[test]
    fn rejects_unknown_extensions() {
        let err = FileKind::from_file_name("guests.pdf").unwrap_err();
        assert!(matches!(err, InviteError::UnsupportedFormat(ext) if ext == "pdf"));
        assert!(FileKind::from_file_name("noextension").is_err());
    }

    #[test]
    fn skips_rows_with_only_empty_fields() {
        let rows = decode(b"a,b\n1,2\n,\n3,4", FileKind::Csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("a"), Some("1"));
        assert_eq!(rows[1].values().collect::<Vec<_>>(), vec!["3", "4"]);
    }

    #[test]
    fn keeps_values_in_column_order() {
        let rows = decode(b"last,first\nAliyev,Ali", FileKind::Csv).unwrap();
        assert_eq!(rows[0].values().collect::<Vec<_>>(), vec!["Aliyev", "Ali"]);
        assert_eq!(rows[0].get("first"), Some("Ali"));
    }

    #[test]
    fn quoted_fields_carry_embedded_commas() {
        let rows = decode(b"first,last\n\"Ali, Jr\",Aliyev", FileKind::Csv).unwrap();
        assert_eq!(rows[0].get("first"), Some("Ali, Jr"));
    }

    #[test]
    fn non_utf8_csv_is_a_parse_failure() {
        let err = decode(&[0xff, 0xfe, 0x00], FileKind::Csv).unwrap_err();
        assert!(matches!(err, InviteError::ParseFailure(_)));
    }

    #[test]
    fn garbage_workbook_is_a_parse_failure() {
        let err = decode(b"definitely not a workbook", FileKind::Xlsx).unwrap_err();
        assert!(matches!(err, InviteError::ParseFailure(_)));
    }
}
