use crate::utils::{ensure_utf8, find_data_file, normalize_name};
use rustc_hash::FxHashMap;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("data file not found: {0}")]
    FileNotFound(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{0}")]
    Encoding(String),
    #[error("row {row}: expected {expected} fields, got {got}")]
    RaggedRow { row: usize, expected: usize, got: usize },
    #[error("row {row}, column '{column}': cannot parse '{value}' as a number")]
    BadCell { row: usize, column: String, value: String },
    #[error("missing column: {0}")]
    MissingColumn(String),
    #[error("'{0}': no data rows")]
    Empty(String),
}

/// In-memory column store for the model-ready dataset. Column order follows
/// the header row and is preserved, the feature schema is derived from it.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    columns: Vec<Vec<f64>>,
    index: FxHashMap<String, usize>,
}

impl Table {
    pub fn from_columns(headers: Vec<String>, columns: Vec<Vec<f64>>) -> Self {
        assert_eq!(headers.len(), columns.len(), "one column per header");
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (normalize_name(h), i))
            .collect::<FxHashMap<String, usize>>();
        Self { headers, columns, index }
    }

    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Table, DataError> {
        let path = find_data_file(&path)
            .ok_or_else(|| DataError::FileNotFound(path.as_ref().display().to_string()))?;
        let content = ensure_utf8(&path).map_err(|e| DataError::Encoding(e.to_string()))?;

        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(content.as_bytes());
        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();

        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
        for (i, result) in rdr.records().enumerate() {
            let record = result?;
            if record.len() != headers.len() {
                return Err(DataError::RaggedRow {
                    row: i + 1,
                    expected: headers.len(),
                    got: record.len(),
                });
            }
            for (col, field) in record.iter().enumerate() {
                let value: f64 = field.trim().parse().map_err(|_| DataError::BadCell {
                    row: i + 1,
                    column: headers[col].clone(),
                    value: field.to_string(),
                })?;
                columns[col].push(value);
            }
        }

        if columns.first().map_or(true, |c| c.is_empty()) {
            return Err(DataError::Empty(path.display().to_string()));
        }

        Ok(Table::from_columns(headers, columns))
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.len())
    }

    pub fn n_cols(&self) -> usize {
        self.headers.len()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Look up a column by header name. Matching is tolerant of units and
    /// punctuation in the header.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.index.get(&normalize_name(name)).map(|&i| self.columns[i].as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reads_headered_csv() {
        let path = write_temp(
            "demandrs_table_ok.csv",
            "Hour,Temperature(C),Rented Bike Count\n0,-5.2,254\n1,-5.5,204\n",
        );
        let table = Table::read_csv(&path).unwrap();
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.n_cols(), 3);
        assert_eq!(table.column("Hour").unwrap(), &[0.0, 1.0]);
        assert_eq!(table.column("temperature c").unwrap(), &[-5.2, -5.5]);
        assert!(table.column("Visibility").is_none());
    }

    #[test]
    fn missing_file_is_reported() {
        let err = Table::read_csv("no_such_dataset_anywhere.csv").unwrap_err();
        assert!(matches!(err, DataError::FileNotFound(_)));
    }

    #[test]
    fn bad_cell_is_reported_with_context() {
        let path = write_temp("demandrs_table_bad.csv", "Hour,Count\n0,100\n1,n/a\n");
        let err = Table::read_csv(&path).unwrap_err();
        match err {
            DataError::BadCell { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, "Count");
                assert_eq!(value, "n/a");
            },
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn empty_table_is_an_error() {
        let path = write_temp("demandrs_table_empty.csv", "Hour,Count\n");
        let err = Table::read_csv(&path).unwrap_err();
        assert!(matches!(err, DataError::Empty(_)));
    }
}
