use crate::model::attendance::AttendanceRecord;

pub const CSV_HEADER: [&str; 6] = [
    "Name",
    "Email",
    "Roll Number",
    "Branch",
    "IP Address",
    "Submitted At",
];

/// Turns a roster into a downloadable file.
pub trait RosterExporter: Send + Sync {
    fn content_type(&self) -> &'static str;

    fn file_extension(&self) -> &'static str;

    fn render(&self, records: &[AttendanceRecord]) -> Result<Vec<u8>, csv::Error>;
}

/// Spreadsheet-friendly roster. Photos are left out.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvExporter;

impl RosterExporter for CsvExporter {
    fn content_type(&self) -> &'static str {
        "text/csv; charset=utf-8"
    }

    fn file_extension(&self) -> &'static str {
        "csv"
    }

    fn render(&self, records: &[AttendanceRecord]) -> Result<Vec<u8>, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADER)?;

        for r in records {
            writer.write_record([
                r.name.as_str(),
                r.email.as_str(),
                r.roll_number.as_str(),
                r.branch.as_str(),
                r.ip_address.as_str(),
                r.created_at.to_rfc3339().as_str(),
            ])?;
        }

        writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))
    }
}

/// `<company>_attendance.<ext>` with anything outside `[A-Za-z0-9-]` replaced by `_`.
pub fn export_file_name(company: &str, extension: &str) -> String {
    let stem: String = company
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("{stem}_attendance.{extension}")
}
