//! Column-oriented status table for timeline grids.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::numeric::Scalar;

/// Name of the structural year column.
pub const YEAR_COLUMN: &str = "Year";

/// A table of per-year status labels.
///
/// Deserialized from a list of row records; the column set is the union of
/// all row keys and absent cells are missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "Vec<BTreeMap<String, Scalar>>",
    into = "Vec<BTreeMap<String, Scalar>>"
)]
pub struct StatusTable {
    columns: BTreeMap<String, Vec<Scalar>>,
    rows: usize,
}

impl StatusTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a column. Shorter columns are padded with missing cells.
    pub fn with_column<I, S>(mut self, name: impl Into<String>, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        let cells: Vec<Scalar> = cells.into_iter().map(Into::into).collect();
        self.rows = self.rows.max(cells.len());
        self.columns.insert(name.into(), cells);
        for column in self.columns.values_mut() {
            column.resize(self.rows, Scalar::Null);
        }
        self
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Whether a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// The year of every row. Fails if the table has no year column.
    pub fn years(&self) -> Result<Vec<Option<i32>>> {
        let column = self
            .columns
            .get(YEAR_COLUMN)
            .ok_or_else(|| Error::missing_column(YEAR_COLUMN))?;
        Ok(column.iter().map(Scalar::as_i32).collect())
    }

    /// Labels of a column by row, or `None` if the column is absent.
    pub fn labels(&self, name: &str) -> Option<Vec<Option<String>>> {
        self.columns
            .get(name)
            .map(|column| column.iter().map(Scalar::as_label).collect())
    }
}

impl From<Vec<BTreeMap<String, Scalar>>> for StatusTable {
    fn from(records: Vec<BTreeMap<String, Scalar>>) -> Self {
        let rows = records.len();
        let mut columns: BTreeMap<String, Vec<Scalar>> = BTreeMap::new();

        for (index, record) in records.into_iter().enumerate() {
            for (name, cell) in record {
                let column = columns
                    .entry(name)
                    .or_insert_with(|| vec![Scalar::Null; rows]);
                column[index] = cell;
            }
        }

        Self { columns, rows }
    }
}

impl From<StatusTable> for Vec<BTreeMap<String, Scalar>> {
    fn from(table: StatusTable) -> Self {
        (0..table.rows)
            .map(|row| {
                table
                    .columns
                    .iter()
                    .filter(|(_, cells)| !matches!(cells[row], Scalar::Null))
                    .map(|(name, cells)| (name.clone(), cells[row].clone()))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_records_union_of_columns() {
        let json = r#"[
            {"Year": 2001, "RelAbd": "Red"},
            {"Year": "2002", "AbsAbd": "Green"},
            {"Year": 2003, "RelAbd": "NA"}
        ]"#;
        let table: StatusTable = serde_json::from_str(json).unwrap();

        assert_eq!(table.row_count(), 3);
        assert!(table.has_column("RelAbd"));
        assert!(table.has_column("AbsAbd"));
        assert_eq!(
            table.years().unwrap(),
            vec![Some(2001), Some(2002), Some(2003)]
        );
        assert_eq!(
            table.labels("RelAbd").unwrap(),
            vec![Some("Red".to_string()), None, None]
        );
        assert!(table.labels("Missing").is_none());
    }

    #[test]
    fn test_missing_year_column() {
        let table = StatusTable::new().with_column("RelAbd", ["Red", "Amber"]);
        let err = table.years().unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("Year"));
    }

    #[test]
    fn test_with_column_pads() {
        let table = StatusTable::new()
            .with_column(YEAR_COLUMN, [2000.0, 2001.0, 2002.0])
            .with_column("Status", ["Green"]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(
            table.labels("Status").unwrap(),
            vec![Some("Green".to_string()), None, None]
        );
    }
}
