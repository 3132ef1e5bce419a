//! CSV rendering for the crime export endpoint

use anyhow::Result;

use crate::db::CrimeSummary;

pub const CSV_HEADER: &str = "Crime ID,Date,Description,Type,Status,Address,Officer";

/// Render the filtered crime listing as CSV: the fixed header row followed
/// by one fully-quoted row per record, embedded quotes doubled.
pub fn crimes_to_csv(rows: &[CrimeSummary]) -> Result<Vec<u8>> {
    let mut out = format!("{CSV_HEADER}\n").into_bytes();

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(&mut out);

    for row in rows {
        writer.write_record([
            row.id.as_str(),
            &row.date.to_string(),
            &row.description,
            &row.type_of_crime,
            &row.arrest_status,
            row.address.as_deref().unwrap_or(""),
            row.officer_name.as_deref().unwrap_or(""),
        ])?;
    }
    writer.flush()?;
    drop(writer);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(description: &str, officer: Option<&str>) -> CrimeSummary {
        CrimeSummary {
            id: "C01".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
            description: description.to_string(),
            type_of_crime: "Theft".to_string(),
            arrest_status: "No Arrest".to_string(),
            address: Some("123 Main St".to_string()),
            location_id: Some("L01".to_string()),
            officer_name: officer.map(str::to_string),
        }
    }

    #[test]
    fn header_row_is_fixed() {
        let csv = String::from_utf8(crimes_to_csv(&[]).unwrap()).unwrap();
        assert_eq!(csv, "Crime ID,Date,Description,Type,Status,Address,Officer\n");
    }

    #[test]
    fn records_are_fully_quoted() {
        let csv =
            String::from_utf8(crimes_to_csv(&[row("Wallet stolen", Some("John Smith"))]).unwrap())
                .unwrap();
        let data_row = csv.lines().nth(1).unwrap();
        assert_eq!(
            data_row,
            r#""C01","2023-01-05","Wallet stolen","Theft","No Arrest","123 Main St","John Smith""#
        );
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let csv = String::from_utf8(
            crimes_to_csv(&[row(r#"Tagged "wash me" on van"#, None)]).unwrap(),
        )
        .unwrap();
        assert!(csv.contains(r#""Tagged ""wash me"" on van""#));
    }

    #[test]
    fn missing_officer_renders_empty_field() {
        let csv = String::from_utf8(crimes_to_csv(&[row("Wallet stolen", None)]).unwrap()).unwrap();
        assert!(csv.lines().nth(1).unwrap().ends_with(r#","""#));
    }
}
