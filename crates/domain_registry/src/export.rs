//! Registry CSV export
//!
//! One header line followed by one row per file. Text fields are always
//! wrapped in double quotes (embedded quotes are doubled); the three money
//! columns are bare integers. Lines are joined with `\n` and the document has
//! no trailing newline.
//!
//! Line breaks inside any text column become a single space, so every file
//! occupies exactly one line. Address is the column operators fill with
//! multi-line text, but imported records can carry breaks in names too.

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;

use core_kernel::format_iso_date;

use crate::error::RegistryError;
use crate::property_file::PropertyFile;

/// Column headers, in output order
pub const REGISTRY_HEADERS: [&str; 16] = [
    "File Number",
    "Owner Name",
    "Father Name",
    "CNIC",
    "Cell No",
    "Plot Size",
    "Plot",
    "Block",
    "Park",
    "Corner",
    "MB",
    "Total Value",
    "Paid",
    "Balance",
    "Reg Date",
    "Address",
];

/// File name prefix of registry exports
pub const DEFAULT_EXPORT_PREFIX: &str = "DIN_Property_Registry";

/// A generated export, ready to hand to a download
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportDocument {
    pub file_name: String,
    pub content: String,
}

/// `<prefix>_<YYYY-MM-DD>.csv`
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}.csv", prefix, format_iso_date(date))
}

/// Flattens the registry to CSV
///
/// Returns `Ok(None)` for an empty registry: there is nothing to export and
/// no document is produced.
///
/// # Errors
///
/// Returns [`RegistryError::Export`] if the CSV writer fails
pub fn export_registry(files: &[PropertyFile]) -> Result<Option<String>, RegistryError> {
    if files.is_empty() {
        return Ok(None);
    }

    // Quoting is done per column below, so the writer must not add its own.
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(REGISTRY_HEADERS).map_err(export_error)?;
    for file in files {
        writer.write_record(row(file)).map_err(export_error)?;
    }

    let bytes = writer.into_inner().map_err(export_error)?;
    let mut content = String::from_utf8(bytes).map_err(export_error)?;
    if content.ends_with('\n') {
        content.pop();
    }

    Ok(Some(content))
}

fn row(file: &PropertyFile) -> [String; 16] {
    [
        quoted(file.file_no.as_str()),
        quoted(&file.owner_name),
        quoted(&file.father_name),
        quoted(&file.owner_cnic),
        quoted(&file.cell_no),
        quoted(file.plot_size.as_str()),
        quoted(file.plot_no.as_str()),
        quoted(file.block.as_str()),
        quoted(file.park.as_str()),
        quoted(file.corner.as_str()),
        quoted(file.main_boulevard.as_str()),
        file.plot_value.amount().to_string(),
        file.payment_received().amount().to_string(),
        file.balance().amount().to_string(),
        quoted(&file.reg_date),
        quoted(&file.address),
    ]
}

fn quoted(text: &str) -> String {
    let flat = text.replace("\r\n", " ").replace(['\n', '\r'], " ");
    format!("\"{}\"", flat.replace('"', "\"\""))
}

fn export_error(err: impl std::fmt::Display) -> RegistryError {
    RegistryError::Export(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Money;

    fn sample() -> PropertyFile {
        let mut file = PropertyFile::new("DIN-001", "Ayesha Khan", "35202-1234567-1");
        file.father_name = "Tariq Khan".to_string();
        file.cell_no = "0300-1234567".to_string();
        file.plot_no = "14".into();
        file.block = "C".into();
        file.plot_value = Money::new(2_500_000);
        file.reg_date = "05 Mar 2024".to_string();
        file.address = "House 5\nStreet 9\nLahore".to_string();
        file
    }

    #[test]
    fn test_empty_registry_exports_nothing() {
        assert_eq!(export_registry(&[]).unwrap(), None);
    }

    #[test]
    fn test_header_line() {
        let csv = export_registry(&[sample()]).unwrap().unwrap();
        let header = csv.lines().next().unwrap();
        assert_eq!(
            header,
            "File Number,Owner Name,Father Name,CNIC,Cell No,Plot Size,Plot,Block,Park,Corner,MB,Total Value,Paid,Balance,Reg Date,Address"
        );
    }

    #[test]
    fn test_row_layout() {
        let csv = export_registry(&[sample()]).unwrap().unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "\"DIN-001\",\"Ayesha Khan\",\"Tariq Khan\",\"35202-1234567-1\",\"0300-1234567\",\"5 Marla-Residential\",\"14\",\"C\",\"-\",\"-\",\"-\",2500000,0,0,\"05 Mar 2024\",\"House 5 Street 9 Lahore\""
        );
    }

    #[test]
    fn test_line_count_and_no_trailing_newline() {
        let files = vec![sample(), PropertyFile::new("DIN-002", "Bilal", "2")];
        let csv = export_registry(&files).unwrap().unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let mut file = sample();
        file.owner_name = "Ali \"Bhai\" Raza".to_string();
        let csv = export_registry(&[file]).unwrap().unwrap();
        assert!(csv.contains("\"Ali \"\"Bhai\"\" Raza\""));
    }

    #[test]
    fn test_line_breaks_flattened_in_every_text_column() {
        let mut file = sample();
        file.owner_name = "Ayesha\nKhan".to_string();
        file.father_name = "Tariq\r\nKhan".to_string();
        file.cell_no = "0300\r1234567".to_string();

        let csv = export_registry(&[file]).unwrap().unwrap();
        assert_eq!(csv.lines().count(), 2);

        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("\"DIN-001\",\"Ayesha Khan\",\"Tariq Khan\",\"35202-1234567-1\",\"0300 1234567\","));
        assert!(!row.contains('\r'));
    }

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(
            export_file_name(DEFAULT_EXPORT_PREFIX, date),
            "DIN_Property_Registry_2026-10-19.csv"
        );
    }
}
