//! Tabular input adapter and augmented-table presenter.
//!
//! Accepts delimited text with a header row, validates that all required
//! feature columns are present (order-independent, extra columns pass
//! through untouched), parses every row into a sample, and serializes the
//! original table back out with an appended `prediction` column.

use crate::error::ScreeningError;
use crate::features::FeatureMatrix;
use crate::types::sample::{BARE_NUCLEI_INDEX, FEATURE_COLUMNS, FEATURE_COUNT};
use crate::types::{CytologySample, Diagnosis};

/// Name of the column appended to the downloaded table.
pub const PREDICTION_COLUMN: &str = "prediction";

/// A validated upload: original header and rows plus the parsed samples.
///
/// Construction is all-or-nothing; a table with any invalid cell or missing
/// column never exists as a value of this type.
#[derive(Debug, Clone)]
pub struct ScreeningTable {
    headers: csv::StringRecord,
    records: Vec<csv::StringRecord>,
    samples: Vec<CytologySample>,
}

impl ScreeningTable {
    /// Parse and validate delimited text.
    ///
    /// Rejects uploads with missing required columns before looking at any
    /// data row, and rejects the whole upload on the first unparseable cell.
    pub fn parse(data: &[u8]) -> Result<Self, ScreeningError> {
        let mut reader = csv::Reader::from_reader(data);
        let headers = reader.headers()?.clone();

        let mut indices = [0usize; FEATURE_COUNT];
        let mut missing = Vec::new();
        for (i, column) in FEATURE_COLUMNS.iter().enumerate() {
            match headers.iter().position(|h| h.trim() == *column) {
                Some(idx) => indices[i] = idx,
                None => missing.push((*column).to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(ScreeningError::MissingColumns(missing));
        }

        let mut records = Vec::new();
        let mut samples = Vec::new();
        for (row, result) in reader.records().enumerate() {
            let record = result?;
            samples.push(parse_row(row, &record, &indices)?);
            records.push(record);
        }

        if records.is_empty() {
            return Err(ScreeningError::EmptyTable);
        }

        Ok(Self {
            headers,
            records,
            samples,
        })
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no data rows. Unreachable after `parse`, which
    /// rejects empty tables, but kept for the usual pairing with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Parsed samples in row order.
    pub fn samples(&self) -> &[CytologySample] {
        &self.samples
    }

    /// Build the model input matrix for all rows.
    pub fn to_matrix(&self) -> FeatureMatrix {
        FeatureMatrix::from_samples(&self.samples)
    }

    /// Serialize the original table with one appended `prediction` column,
    /// one raw model label per row, UTF-8 encoded.
    pub fn into_augmented_csv(self, labels: &[i64]) -> Result<Vec<u8>, ScreeningError> {
        if labels.len() != self.records.len() {
            return Err(ScreeningError::Inference(format!(
                "got {} labels for {} rows",
                labels.len(),
                self.records.len(),
            )));
        }

        let mut writer = csv::Writer::from_writer(Vec::new());

        let mut header = self.headers.clone();
        header.push_field(PREDICTION_COLUMN);
        writer.write_record(&header)?;

        for (record, &label) in self.records.iter().zip(labels) {
            let mut row = record.clone();
            row.push_field(Diagnosis::from_label(label).report_str());
            writer.write_record(&row)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        Ok(bytes)
    }
}

/// Parse one data row into a sample using the resolved column indices.
fn parse_row(
    row: usize,
    record: &csv::StringRecord,
    indices: &[usize; FEATURE_COUNT],
) -> Result<CytologySample, ScreeningError> {
    let mut values = [0.0f32; FEATURE_COUNT];
    let mut bare_nuclei = 0i64;

    for (i, &idx) in indices.iter().enumerate() {
        let cell = record.get(idx).unwrap_or("").trim();
        let invalid = || ScreeningError::InvalidCell {
            row: row + 1,
            column: FEATURE_COLUMNS[i].to_string(),
            value: cell.to_string(),
        };

        if i == BARE_NUCLEI_INDEX {
            bare_nuclei = cell.parse::<i64>().map_err(|_| invalid())?;
            values[i] = bare_nuclei as f32;
        } else {
            values[i] = cell.parse::<f32>().map_err(|_| invalid())?;
        }
    }

    Ok(CytologySample::new(
        values[0],
        values[1],
        values[2],
        values[3],
        values[4],
        bare_nuclei,
        values[6],
        values[7],
        values[8],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CSV: &str = "\
sample_id,clump_thickness,uniformity_of_cell_size,uniformity_of_cell_shape,marginal_adhesion,single_epithelial_cell_size,bare_nuclei,bland_chromatin,normal_nucleoli,mitosis
p-001,5,1,1,1,2,1,3,1,1
p-002,8,10,10,8,7,10,9,7,1
";

    #[test]
    fn test_parse_valid_table() {
        let table = ScreeningTable::parse(VALID_CSV.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.samples()[0].clump_thickness, 5.0);
        assert_eq!(table.samples()[1].bare_nuclei, 10);

        let matrix = table.to_matrix();
        assert_eq!(matrix.rows(), 2);
    }

    #[test]
    fn test_extra_columns_ignored_for_validation() {
        // sample_id is not a feature column and must not interfere
        let table = ScreeningTable::parse(VALID_CSV.as_bytes()).unwrap();
        assert_eq!(table.samples()[0].mitosis, 1.0);
    }

    #[test]
    fn test_column_order_is_irrelevant() {
        let csv = "\
mitosis,normal_nucleoli,bland_chromatin,bare_nuclei,single_epithelial_cell_size,marginal_adhesion,uniformity_of_cell_shape,uniformity_of_cell_size,clump_thickness
1,1,3,1,2,1,1,1,5
";
        let table = ScreeningTable::parse(csv.as_bytes()).unwrap();
        assert_eq!(table.samples()[0].clump_thickness, 5.0);
        assert_eq!(table.samples()[0].mitosis, 1.0);
    }

    #[test]
    fn test_missing_columns_reported_by_name() {
        let csv = "\
clump_thickness,uniformity_of_cell_size
5,1
";
        let err = ScreeningTable::parse(csv.as_bytes()).unwrap_err();
        match err {
            ScreeningError::MissingColumns(columns) => {
                assert_eq!(columns.len(), 7);
                assert!(columns.contains(&"bare_nuclei".to_string()));
                assert!(columns.contains(&"mitosis".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_cell_names_row_and_column() {
        let csv = "\
clump_thickness,uniformity_of_cell_size,uniformity_of_cell_shape,marginal_adhesion,single_epithelial_cell_size,bare_nuclei,bland_chromatin,normal_nucleoli,mitosis
5,1,1,1,2,abc,3,1,1
";
        let err = ScreeningTable::parse(csv.as_bytes()).unwrap_err();
        match err {
            ScreeningError::InvalidCell { row, column, value } => {
                assert_eq!(row, 1);
                assert_eq!(column, "bare_nuclei");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_partial_acceptance() {
        // second row is broken, so the whole upload is rejected
        let csv = "\
clump_thickness,uniformity_of_cell_size,uniformity_of_cell_shape,marginal_adhesion,single_epithelial_cell_size,bare_nuclei,bland_chromatin,normal_nucleoli,mitosis
5,1,1,1,2,1,3,1,1
5,1,1,1,2,1,3,1,oops
";
        let err = ScreeningTable::parse(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ScreeningError::InvalidCell { row: 2, .. }));
    }

    #[test]
    fn test_empty_table_rejected() {
        let csv = "\
clump_thickness,uniformity_of_cell_size,uniformity_of_cell_shape,marginal_adhesion,single_epithelial_cell_size,bare_nuclei,bland_chromatin,normal_nucleoli,mitosis
";
        let err = ScreeningTable::parse(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ScreeningError::EmptyTable));
    }

    #[test]
    fn test_augmented_csv_appends_prediction_column() {
        let table = ScreeningTable::parse(VALID_CSV.as_bytes()).unwrap();
        let out = table.into_augmented_csv(&[2, 4]).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("sample_id,clump_thickness"));
        assert!(header.ends_with(",prediction"));

        let first = lines.next().unwrap();
        assert!(first.starts_with("p-001,"));
        assert!(first.ends_with(",Negative for Cancer"));

        let second = lines.next().unwrap();
        assert!(second.ends_with(",Positive for Cancer"));

        assert_eq!(lines.next(), None); // row count preserved
    }

    #[test]
    fn test_augmented_csv_label_count_mismatch() {
        let table = ScreeningTable::parse(VALID_CSV.as_bytes()).unwrap();
        let err = table.into_augmented_csv(&[4]).unwrap_err();
        assert!(matches!(err, ScreeningError::Inference(_)));
    }
}
