//! CSV Data Loader Module
//! Handles CSV file loading and column coercion using Polars.

use chrono::NaiveDate;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Date layouts accepted for the `Date` column, tried in order.
const DATE_FORMATS: [&str; 4] = ["%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d", "%Y/%m/%d"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV {}: {source}", .path.display())]
    CsvError {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("Column `{column}` is missing or unreadable: {source}")]
    ColumnError {
        column: String,
        #[source]
        source: PolarsError,
    },
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    df: DataFrame,
}

impl DataLoader {
    /// Load a CSV file using Polars.
    pub fn load_csv(file_path: &Path) -> Result<Self, LoaderError> {
        let csv_error = |source| LoaderError::CsvError {
            path: file_path.to_path_buf(),
            source,
        };

        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()
            .map_err(csv_error)?
            .collect()
            .map_err(csv_error)?;

        debug!(
            path = %file_path.display(),
            rows = df.height(),
            columns = df.width(),
            "loaded csv"
        );

        Ok(Self { df })
    }

    /// Category column as strings. Nulls become the empty string.
    pub fn string_column(&self, column: &str) -> Result<Vec<String>, LoaderError> {
        let col_error = |source| LoaderError::ColumnError {
            column: column.to_string(),
            source,
        };

        let casted = self
            .df
            .column(column)
            .and_then(|col| col.cast(&DataType::String))
            .map_err(col_error)?;
        let ca = casted.str().map_err(col_error)?;

        Ok(ca
            .into_iter()
            .map(|v| v.map(|s| s.trim().to_string()).unwrap_or_default())
            .collect())
    }

    /// Numeric column as `f64`. Empty, non-numeric or infinite cells become NaN.
    pub fn f64_column(&self, column: &str) -> Result<Vec<f64>, LoaderError> {
        let col_error = |source| LoaderError::ColumnError {
            column: column.to_string(),
            source,
        };

        let col = self.df.column(column).map_err(col_error)?;

        // String columns hold at least one malformed cell; parse cell by cell
        // so the well-formed ones survive.
        if col.dtype() == &DataType::String {
            let ca = col.str().map_err(col_error)?;
            return Ok(ca
                .into_iter()
                .map(|v| {
                    v.and_then(|s| s.trim().parse::<f64>().ok())
                        .map_or(f64::NAN, finite_or_nan)
                })
                .collect());
        }

        let value_f64 = col.cast(&DataType::Float64).map_err(col_error)?;
        let ca = value_f64.f64().map_err(col_error)?;
        Ok(ca
            .into_iter()
            .map(|v| v.map_or(f64::NAN, finite_or_nan))
            .collect())
    }

    /// Date column. Cells matching none of the accepted layouts become `None`.
    pub fn date_column(&self, column: &str) -> Result<Vec<Option<NaiveDate>>, LoaderError> {
        Ok(self
            .string_column(column)?
            .iter()
            .map(|s| parse_date(s))
            .collect())
    }
}

// `f64::from_str` accepts "inf" and "NaN"; scales need finite domains.
fn finite_or_nan(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        f64::NAN
    }
}

/// Parse a calendar date using the first matching accepted layout.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_numeric_and_category_columns() {
        let file = write_csv("Platform,Likes\nInstagram,120\nTwitter,45\nInstagram,300\n");
        let loader = DataLoader::load_csv(file.path()).unwrap();

        assert_eq!(
            loader.string_column("Platform").unwrap(),
            vec!["Instagram", "Twitter", "Instagram"]
        );
        assert_eq!(loader.f64_column("Likes").unwrap(), vec![120.0, 45.0, 300.0]);
    }

    #[test]
    fn malformed_numbers_become_nan() {
        let file = write_csv("Platform,Likes\nA,10\nB,oops\nC,\n");
        let loader = DataLoader::load_csv(file.path()).unwrap();
        let likes = loader.f64_column("Likes").unwrap();

        assert_eq!(likes.len(), 3);
        assert_eq!(likes[0], 10.0);
        assert!(likes[1].is_nan());
        assert!(likes[2].is_nan());
    }

    #[test]
    fn infinite_numbers_become_nan() {
        let file = write_csv("Platform,Likes\nA,inf\nB,-inf\nC,infinity\nD,250\n");
        let loader = DataLoader::load_csv(file.path()).unwrap();
        let likes = loader.f64_column("Likes").unwrap();

        assert_eq!(likes.len(), 4);
        assert!(likes[..3].iter().all(|v| v.is_nan()));
        assert_eq!(likes[3], 250.0);
    }

    #[test]
    fn infinity_beside_malformed_cells_becomes_nan() {
        let file = write_csv("Platform,Likes\nA,inf\nB,oops\nC,12.5\n");
        let loader = DataLoader::load_csv(file.path()).unwrap();
        let likes = loader.f64_column("Likes").unwrap();

        assert!(likes[0].is_nan());
        assert!(likes[1].is_nan());
        assert_eq!(likes[2], 12.5);
    }

    #[test]
    fn missing_column_is_an_error() {
        let file = write_csv("Platform,Likes\nA,1\n");
        let loader = DataLoader::load_csv(file.path()).unwrap();

        assert!(matches!(
            loader.f64_column("AvgLikes"),
            Err(LoaderError::ColumnError { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = DataLoader::load_csv(Path::new("/nonexistent/socialMedia.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn parses_accepted_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1);
        assert_eq!(parse_date("3/1/2024"), expected);
        assert_eq!(parse_date("2024-03-01"), expected);
        assert_eq!(parse_date(" 03/01/24 "), expected);
        assert_eq!(parse_date("2024/03/01"), expected);
        assert_eq!(parse_date("March first"), None);
    }
}
