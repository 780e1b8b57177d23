//! Raw series tables and their loaders.
//!
//! A series file is a whitespace-separated table of numbers: one row per
//! timestep, one column per scenario.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use gems_core::{Real, ensure_finite};

use crate::error::{DataError, DataResult};

/// Rectangular table of values, rows = timesteps and columns = scenarios.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesTable {
    rows: usize,
    columns: usize,
    values: Vec<Real>,
}

impl SeriesTable {
    /// Build a table from its rows; every row must have the same length.
    pub fn from_rows(name: &str, rows: Vec<Vec<Real>>) -> DataResult<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != columns) {
            return Err(DataError::SeriesLoad {
                name: name.to_string(),
                message: format!(
                    "rows must have the same length, got {} and {}",
                    columns,
                    bad.len()
                ),
            });
        }
        let n_rows = rows.len();
        Ok(Self {
            rows: n_rows,
            columns,
            values: rows.into_iter().flatten().collect(),
        })
    }

    /// Parse the whitespace-separated text format. Blank lines are skipped.
    pub fn parse_txt(name: &str, text: &str) -> DataResult<Self> {
        let mut rows = Vec::new();
        for (line_num, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .enumerate()
                .map(|(col, token)| {
                    let value: Real = token.parse().map_err(|_| DataError::SeriesLoad {
                        name: name.to_string(),
                        message: format!("invalid number '{token}' at line {}", line_num + 1),
                    })?;
                    Ok(ensure_finite(
                        value,
                        format!("series '{name}' line {} column {}", line_num + 1, col + 1),
                    )?)
                })
                .collect::<DataResult<Vec<_>>>()?;
            rows.push(row);
        }
        Self::from_rows(name, rows)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn get(&self, row: usize, column: usize) -> Option<Real> {
        if row < self.rows && column < self.columns {
            Some(self.values[row * self.columns + column])
        } else {
            None
        }
    }

    /// Values of a time-only series: the single column of the table.
    pub fn into_time_series(self, name: &str) -> DataResult<Vec<Real>> {
        if self.columns != 1 {
            return Err(self.shape_error(name, "time series data (exactly one column)"));
        }
        Ok(self.values)
    }

    /// Values of a scenario-only series: the single row of the table.
    pub fn into_scenario_series(self, name: &str) -> DataResult<Vec<Real>> {
        if self.rows != 1 {
            return Err(self.shape_error(name, "scenario series data (exactly one row)"));
        }
        Ok(self.values)
    }

    fn shape_error(&self, name: &str, expected: &'static str) -> DataError {
        DataError::SeriesShape {
            name: name.to_string(),
            expected,
            rows: self.rows,
            columns: self.columns,
        }
    }
}

/// Source of named series tables.
pub trait SeriesLoader {
    fn load(&self, name: &str) -> DataResult<SeriesTable>;
}

/// Loads `<dir>/<name>.txt`.
#[derive(Debug, Clone)]
pub struct TxtSeriesLoader {
    dir: PathBuf,
}

impl TxtSeriesLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SeriesLoader for TxtSeriesLoader {
    fn load(&self, name: &str) -> DataResult<SeriesTable> {
        let path = self.dir.join(format!("{name}.txt"));
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DataError::SeriesLoad {
                    name: name.to_string(),
                    message: format!("file '{}' does not exist", path.display()),
                });
            }
            Err(e) => return Err(e.into()),
        };
        tracing::trace!(series = name, path = %path.display(), "loading series");
        SeriesTable::parse_txt(name, &text)
    }
}

/// In-memory series, keyed by name.
impl SeriesLoader for BTreeMap<String, SeriesTable> {
    fn load(&self, name: &str) -> DataResult<SeriesTable> {
        self.get(name).cloned().ok_or_else(|| DataError::SeriesLoad {
            name: name.to_string(),
            message: "unknown series".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_whitespace_table() {
        let table = SeriesTable::parse_txt("load", "1 2 3\n4\t5  6\n\n").unwrap();
        assert_eq!(table.rows(), 2);
        assert_eq!(table.columns(), 3);
        assert_eq!(table.get(1, 2), Some(6.0));
        assert_eq!(table.get(2, 0), None);
        assert_eq!(table.get(0, 3), None);
    }

    #[test]
    fn ragged_table_is_rejected() {
        let err = SeriesTable::parse_txt("load", "1 2\n3").unwrap_err();
        assert!(matches!(err, DataError::SeriesLoad { .. }));
    }

    #[test]
    fn invalid_number_is_rejected() {
        let err = SeriesTable::parse_txt("load", "1 x").unwrap_err();
        assert!(err.to_string().contains("invalid number 'x'"));
    }

    #[test]
    fn non_finite_value_is_rejected() {
        let err = SeriesTable::parse_txt("load", "1 NaN").unwrap_err();
        assert!(matches!(err, DataError::NonFinite(_)));
    }

    #[test]
    fn shape_conversions() {
        let column = SeriesTable::parse_txt("t", "1\n2\n3").unwrap();
        assert_eq!(column.clone().into_time_series("t").unwrap(), [1.0, 2.0, 3.0]);
        assert!(matches!(
            column.into_scenario_series("t"),
            Err(DataError::SeriesShape { rows: 3, columns: 1, .. })
        ));

        let row = SeriesTable::parse_txt("s", "1 2").unwrap();
        assert_eq!(row.clone().into_scenario_series("s").unwrap(), [1.0, 2.0]);
        assert!(matches!(
            row.into_time_series("s"),
            Err(DataError::SeriesShape { rows: 1, columns: 2, .. })
        ));
    }

    #[test]
    fn txt_loader_reports_missing_file() {
        let loader = TxtSeriesLoader::new(std::env::temp_dir().join("gems_missing_series_dir"));
        let err = loader.load("nothing").unwrap_err();
        assert!(matches!(err, DataError::SeriesLoad { name, .. } if name == "nothing"));
    }

    #[test]
    fn txt_loader_reads_file() {
        let dir = std::env::temp_dir().join("gems_txt_loader_test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("demand.txt"), "10 20\n30 40\n").unwrap();

        let table = TxtSeriesLoader::new(&dir).load("demand").unwrap();
        assert_eq!(table.get(1, 0), Some(30.0));

        std::fs::remove_file(dir.join("demand.txt")).ok();
    }
}
