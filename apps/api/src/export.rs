//! Tabular export of batch results: CSV and XLSX, rendered fully in memory.

use anyhow::Result;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::models::candidate::ParsedRow;

/// Output column order. Fixed; consumers diff exports across runs.
pub const COLUMNS: [&str; 9] = [
    "Sno",
    "Date",
    "name",
    "email",
    "phone",
    "experience_in_years",
    "experience",
    "skills",
    "filename",
];

fn years_label(years: f64) -> String {
    format!("{years:.2} years")
}

pub fn rows_to_csv(rows: &[ParsedRow]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for row in rows {
        writer.write_record(&[
            row.sno.to_string(),
            row.date.clone(),
            row.name.clone(),
            row.email.clone(),
            row.phone.clone(),
            years_label(row.experience_in_years),
            row.experience.clone(),
            row.skills.clone(),
            row.filename.clone(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("CSV buffer flush failed: {e}"))
}

pub fn rows_to_xlsx(rows: &[ParsedRow]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, name) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let r = (index + 1) as u32;
        worksheet.write_number(r, 0, row.sno as f64)?;
        worksheet.write_string(r, 1, row.date.as_str())?;
        worksheet.write_string(r, 2, row.name.as_str())?;
        worksheet.write_string(r, 3, row.email.as_str())?;
        worksheet.write_string(r, 4, row.phone.as_str())?;
        worksheet.write_string(r, 5, years_label(row.experience_in_years))?;
        worksheet.write_string(r, 6, row.experience.as_str())?;
        worksheet.write_string(r, 7, row.skills.as_str())?;
        worksheet.write_string(r, 8, row.filename.as_str())?;
    }

    worksheet.autofit();
    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> ParsedRow {
        ParsedRow {
            sno: 1,
            date: "2023-01-01".to_string(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            experience_in_years: 3.0,
            experience: "Analyst (01/2020 - Present)".to_string(),
            skills: "Mathematics, Programming".to_string(),
            filename: "ada.pdf".to_string(),
        }
    }

    #[test]
    fn test_csv_header_order_and_year_label() {
        let bytes = rows_to_csv(&[sample_row()]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Sno,Date,name,email,phone,experience_in_years,experience,skills,filename"
        );
        let row = lines.next().unwrap();
        assert!(row.contains("3.00 years"));
        assert!(row.contains("Ada Lovelace"));
        assert!(row.starts_with("1,2023-01-01"));
    }

    #[test]
    fn test_csv_of_no_rows_is_header_only() {
        let bytes = rows_to_csv(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_xlsx_produces_nonempty_workbook() {
        let bytes = rows_to_xlsx(&[sample_row()]).unwrap();
        // XLSX is a zip container.
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_years_label_keeps_two_decimals() {
        assert_eq!(years_label(0.0), "0.00 years");
        assert_eq!(years_label(1.5), "1.50 years");
        assert_eq!(years_label(10.25), "10.25 years");
    }
}
