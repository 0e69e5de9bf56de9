//! Reads the blood bank CSV into typed records.
//!
//! The source file is windows-1252 encoded. Header names are trimmed before
//! the schema check. Rows that cannot be coerced into a [`BloodBank`] are
//! dropped with a warning; the surviving rows keep their original order.

use std::path::Path;

use bloodbank_core::BloodBank;
use csv::StringRecord;
use encoding_rs::WINDOWS_1252;

use crate::error::{DatasetError, RowError};

const COL_ID: &str = "Sr No";
const COL_NAME: &str = "Blood Bank Name";
const COL_ADDRESS: &str = "Address";
const COL_CITY: &str = "City";
const COL_STATE: &str = "State";
const COL_LATITUDE: &str = "latitude";
const COL_LONGITUDE: &str = "longitude";

/// Header names that must be present (after trimming) for a load to proceed.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_ID,
    COL_NAME,
    COL_ADDRESS,
    COL_CITY,
    COL_STATE,
    COL_LATITUDE,
    COL_LONGITUDE,
];

/// Outcome of a successful load.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub banks: Vec<BloodBank>,
    /// Data rows dropped because they could not be coerced.
    pub skipped: usize,
}

/// Positions of the required columns within the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    id: usize,
    name: usize,
    address: usize,
    city: usize,
    state: usize,
    latitude: usize,
    longitude: usize,
}

/// Load every blood bank from the CSV file at `path`.
///
/// # Errors
///
/// - [`DatasetError::NotFound`] / [`DatasetError::Unreadable`] if the file
///   cannot be read.
/// - [`DatasetError::MissingColumns`] if any of [`REQUIRED_COLUMNS`] is absent.
/// - [`DatasetError::Header`] if the header row itself cannot be parsed.
pub fn load_blood_banks(path: &Path) -> Result<LoadReport, DatasetError> {
    tracing::info!(path = %path.display(), "loading blood bank dataset");

    let bytes = std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            DatasetError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            DatasetError::Unreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let report = parse_blood_banks(&bytes)?;
    tracing::info!(
        path = %path.display(),
        loaded = report.banks.len(),
        skipped = report.skipped,
        "blood bank dataset loaded"
    );
    Ok(report)
}

/// Parse raw windows-1252 CSV bytes into blood bank records.
///
/// # Errors
///
/// Returns [`DatasetError::MissingColumns`] or [`DatasetError::Header`] when
/// the header row is unusable. Individual bad rows never fail the parse.
pub fn parse_blood_banks(bytes: &[u8]) -> Result<LoadReport, DatasetError> {
    // No BOM sniffing: the file is always treated as windows-1252.
    let text = WINDOWS_1252.decode_without_bom_handling(bytes).0;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(DatasetError::Header)?.clone();
    let columns = resolve_columns(&headers)?;

    let mut report = LoadReport::default();
    for (idx, result) in reader.records().enumerate() {
        let row = idx + 1;
        let coerced = result
            .map_err(|e| RowError::Malformed(e.to_string()))
            .and_then(|record| coerce_row(&record, columns));

        match coerced {
            Ok(bank) => report.banks.push(bank),
            Err(e) => {
                tracing::warn!(row, error = %e, "skipping dataset row");
                report.skipped += 1;
            }
        }
    }

    Ok(report)
}

fn resolve_columns(headers: &StringRecord) -> Result<ColumnIndex, DatasetError> {
    let position = |name: &str| headers.iter().position(|h| h == name);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| position(name).is_none())
        .map(|name| (*name).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DatasetError::MissingColumns(missing));
    }

    let index = |name: &str| {
        position(name).ok_or_else(|| DatasetError::MissingColumns(vec![name.to_string()]))
    };
    Ok(ColumnIndex {
        id: index(COL_ID)?,
        name: index(COL_NAME)?,
        address: index(COL_ADDRESS)?,
        city: index(COL_CITY)?,
        state: index(COL_STATE)?,
        latitude: index(COL_LATITUDE)?,
        longitude: index(COL_LONGITUDE)?,
    })
}

fn coerce_row(record: &StringRecord, columns: ColumnIndex) -> Result<BloodBank, RowError> {
    Ok(BloodBank {
        id: required_text(record, columns.id, COL_ID)?,
        name: required_text(record, columns.name, COL_NAME)?,
        address: optional_text(record, columns.address),
        city: optional_text(record, columns.city),
        state: required_text(record, columns.state, COL_STATE)?,
        latitude: coordinate(record, columns.latitude, COL_LATITUDE)?,
        longitude: coordinate(record, columns.longitude, COL_LONGITUDE)?,
        distance: None,
    })
}

fn required_text(
    record: &StringRecord,
    col: usize,
    column: &'static str,
) -> Result<String, RowError> {
    let value = record.get(col).ok_or(RowError::MissingCell(column))?;
    if value.is_empty() {
        return Err(RowError::EmptyCell(column));
    }
    Ok(value.to_string())
}

fn optional_text(record: &StringRecord, col: usize) -> String {
    record.get(col).unwrap_or_default().to_string()
}

fn coordinate(record: &StringRecord, col: usize, column: &'static str) -> Result<f64, RowError> {
    let raw = record.get(col).ok_or(RowError::MissingCell(column))?;
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RowError::InvalidCoordinate {
            column,
            value: trimmed.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Sr No,Blood Bank Name,Address,City,State,latitude,longitude\n";

    fn parse(body: &str) -> LoadReport {
        parse_blood_banks(format!("{HEADER}{body}").as_bytes()).expect("parse should succeed")
    }

    #[test]
    fn parses_valid_rows_in_order() {
        let report = parse(
            "1,AIIMS Blood Bank,Ansari Nagar,New Delhi,Delhi,28.5672,77.2100\n\
             2,KEM Blood Bank,Parel,Mumbai,Maharashtra,19.0025,72.8417\n",
        );

        assert_eq!(report.skipped, 0);
        assert_eq!(report.banks.len(), 2);
        let first = &report.banks[0];
        assert_eq!(first.id, "1");
        assert_eq!(first.name, "AIIMS Blood Bank");
        assert_eq!(first.city, "New Delhi");
        assert!((first.latitude - 28.5672).abs() < 1e-9);
        assert!(first.distance.is_none());
        assert_eq!(report.banks[1].id, "2");
    }

    #[test]
    fn skips_rows_with_unparseable_coordinates() {
        let report = parse(
            "1,Good,Addr,City,State,10.0,20.0\n\
             2,Bad Lat,Addr,City,State,north,20.0\n\
             3,Empty Lon,Addr,City,State,10.0,\n\
             4,Also Good,Addr,City,State,11.0,21.0\n",
        );

        let ids: Vec<&str> = report.banks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        let report = parse(
            "1,Nan Bank,Addr,City,State,NaN,20.0\n\
             2,Inf,Addr,City,State,10.0,inf\n",
        );
        assert!(report.banks.is_empty());
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn empty_address_and_city_default_to_empty_string() {
        let report = parse("9,Lone Bank,,,Goa,15.49,73.82\n");
        assert_eq!(report.banks.len(), 1);
        assert_eq!(report.banks[0].address, "");
        assert_eq!(report.banks[0].city, "");
    }

    #[test]
    fn empty_name_or_state_skips_row() {
        let report = parse("1,,Addr,City,State,10.0,20.0\n2,Name,Addr,City,,10.0,20.0\n");
        assert!(report.banks.is_empty());
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn whitespace_only_text_is_kept() {
        let report = parse("7, ,Addr,City, ,10.0,20.0\n");
        assert_eq!(report.skipped, 0);
        assert_eq!(report.banks[0].name, " ");
        assert_eq!(report.banks[0].state, " ");
    }

    #[test]
    fn short_rows_are_skipped_not_fatal() {
        let report = parse("1,Short Row,Addr\n2,Full,Addr,City,State,1.0,2.0\n");
        assert_eq!(report.banks.len(), 1);
        assert_eq!(report.banks[0].id, "2");
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn header_whitespace_is_trimmed() {
        let csv = " Sr No , Blood Bank Name ,Address,City, State,latitude ,longitude\n\
                   1,Trimmed,Addr,City,State,1.5,2.5\n";
        let report = parse_blood_banks(csv.as_bytes()).expect("trimmed headers should match");
        assert_eq!(report.banks.len(), 1);
    }

    #[test]
    fn extra_columns_and_reordering_are_tolerated() {
        let csv = "longitude,Phone,latitude,State,City,Address,Blood Bank Name,Sr No\n\
                   77.1,011-555,28.6,Delhi,New Delhi,Road 1,Reordered,42\n";
        let report = parse_blood_banks(csv.as_bytes()).expect("parse");
        let bank = &report.banks[0];
        assert_eq!(bank.id, "42");
        assert_eq!(bank.name, "Reordered");
        assert!((bank.latitude - 28.6).abs() < 1e-9);
        assert!((bank.longitude - 77.1).abs() < 1e-9);
    }

    #[test]
    fn missing_columns_are_reported_in_required_order() {
        let csv = "Sr No,Blood Bank Name,City,State\n1,X,Y,Z\n";
        let err = parse_blood_banks(csv.as_bytes()).expect_err("schema error expected");
        match err {
            DatasetError::MissingColumns(cols) => {
                assert_eq!(cols, vec!["Address", "latitude", "longitude"]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn decodes_windows_1252_bytes() {
        let mut bytes = HEADER.as_bytes().to_vec();
        // "Caf\xe9" is "Café" in windows-1252 and invalid as UTF-8.
        bytes.extend_from_slice(
            b"1,Caf\xe9 Blood Bank,Rua \x93A\x94,S\xe3o Paulo,SP,-23.55,-46.63\n",
        );

        let report = parse_blood_banks(&bytes).expect("parse");

        assert_eq!(report.banks[0].name, "Café Blood Bank");
        assert_eq!(report.banks[0].address, "Rua \u{201c}A\u{201d}");
        assert_eq!(report.banks[0].city, "São Paulo");
    }

    #[test]
    fn coordinate_whitespace_is_ignored() {
        let report = parse("1,Spaced,Addr,City,State, 12.25 , 77.5 \n");
        assert!((report.banks[0].latitude - 12.25).abs() < 1e-9);
        assert!((report.banks[0].longitude - 77.5).abs() < 1e-9);
    }

    #[test]
    fn header_only_file_yields_no_records() {
        let report = parse("");
        assert!(report.banks.is_empty());
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn coerce_row_reports_invalid_coordinate() {
        let headers = StringRecord::from(HEADER.trim_end().split(',').collect::<Vec<_>>());
        let columns = resolve_columns(&headers).expect("columns");
        let record = StringRecord::from(vec!["1", "N", "A", "C", "S", "abc", "2"]);
        assert_eq!(
            coerce_row(&record, columns).unwrap_err(),
            RowError::InvalidCoordinate {
                column: "latitude",
                value: "abc".to_string()
            }
        );
    }
}
