use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The five columns every loaded table is expected to expose.
pub const CANONICAL_COLUMNS: [&str; 5] = ["Code", "Product", "Quantity", "Price", "EAN"];

/// The subset that is synthesized as empty columns when the remote header
/// omits them.
pub const ESSENTIAL_COLUMNS: [&str; 3] = ["Code", "Product", "Quantity"];

/// An ordered set of inventory rows sharing one header.
///
/// This is the in-memory shape the browser editor works on and the unit of
/// exchange with the remote sheet: loading builds a fresh one on every call
/// (nothing is cached) and saving replaces the remote content with it
/// wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// A zero-row table shaped with the five canonical columns. This is
    /// both the "remote sheet is blank" result and the fail-soft default.
    pub fn empty() -> Table {
        Table {
            columns: CANONICAL_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a table from a raw grid, header row first. Data rows shorter
    /// than the header are padded with empty cells; longer ones are
    /// truncated to the header width.
    pub fn from_grid(grid: Vec<Vec<Value>>) -> Table {
        let mut iter = grid.into_iter();
        let columns: Vec<String> = match iter.next() {
            Some(header) => header.into_iter().map(|cell| cell_to_string(&cell)).collect(),
            None => return Table::empty(),
        };

        let width = columns.len();
        let rows = iter
            .map(|mut row| {
                row.truncate(width);
                while row.len() < width {
                    row.push(Value::String(String::new()));
                }
                row
            })
            .collect();

        Table { columns, rows }
    }

    /// The inverse of `from_grid`: header row first, then the data rows,
    /// cells as-is.
    pub fn to_grid(&self) -> Vec<Vec<Value>> {
        let mut grid = Vec::with_capacity(self.rows.len() + 1);
        grid.push(
            self.columns
                .iter()
                .map(|c| Value::String(c.clone()))
                .collect(),
        );
        grid.extend(self.rows.iter().cloned());
        grid
    }

    /// Repair the table into its guaranteed shape:
    ///
    /// * a table with no data rows gets exactly the canonical header;
    /// * missing essential columns are appended as empty columns;
    /// * `Quantity` cells become numbers, non-coercible values become 0;
    /// * `Code` cells become trimmed strings with a trailing `".0"`
    ///   formatting artifact stripped.
    ///
    /// Never fails; bad cells are repaired in place, not reported.
    pub fn normalize(&mut self) {
        if self.rows.is_empty() {
            self.columns = CANONICAL_COLUMNS.iter().map(|c| c.to_string()).collect();
            return;
        }

        for name in ESSENTIAL_COLUMNS {
            if !self.columns.iter().any(|c| c == name) {
                self.columns.push(name.to_string());
                for row in &mut self.rows {
                    row.push(Value::String(String::new()));
                }
            }
        }

        if let Some(idx) = self.column_index("Quantity") {
            for row in &mut self.rows {
                let repaired = coerce_quantity(&row[idx]);
                row[idx] = repaired;
            }
        }

        if let Some(idx) = self.column_index("Code") {
            for row in &mut self.rows {
                let repaired = coerce_code(&row[idx]);
                row[idx] = Value::String(repaired);
            }
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Display form of a cell, used for header names and the Code column.
fn cell_to_string(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Numeric coercion with a zero default. Integral floats are stored as
/// integers so a count of 7 does not render as 7.0 in the editor.
fn coerce_quantity(cell: &Value) -> Value {
    let parsed = match cell {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(q) if q.is_finite() => {
            if q.fract() == 0.0 && q.abs() < i64::MAX as f64 {
                Value::from(q as i64)
            } else {
                Value::from(q)
            }
        }
        _ => Value::from(0),
    }
}

/// String coercion for product codes. Upstream numeric auto-formatting
/// turns "1023" into 1023.0; the trailing ".0" is stripped back off.
fn coerce_code(cell: &Value) -> String {
    let text = cell_to_string(cell);
    let trimmed = text.trim();
    trimmed.strip_suffix(".0").unwrap_or(trimmed).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_table_has_canonical_columns() {
        let table = Table::empty();
        assert_eq!(table.columns, CANONICAL_COLUMNS);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn empty_grid_becomes_canonical_empty_table() {
        assert_eq!(Table::from_grid(Vec::new()), Table::empty());
    }

    #[test]
    fn header_only_grid_normalizes_to_canonical_columns() {
        // A sheet with a header but no data rows: the remote header is
        // discarded in favor of the canonical shape.
        let mut table = Table::from_grid(vec![vec![json!("Code"), json!("Stray")]]);
        table.normalize();
        assert_eq!(table.columns, CANONICAL_COLUMNS);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn short_rows_are_padded_and_long_rows_truncated() {
        let table = Table::from_grid(vec![
            vec![json!("Code"), json!("Product"), json!("Quantity")],
            vec![json!("001")],
            vec![json!("002"), json!("Soap"), json!(3), json!("extra")],
        ]);
        assert_eq!(table.rows[0], vec![json!("001"), json!(""), json!("")]);
        assert_eq!(table.rows[1], vec![json!("002"), json!("Soap"), json!(3)]);
    }

    #[test]
    fn missing_essential_columns_are_synthesized() {
        let mut table = Table::from_grid(vec![
            vec![json!("Product"), json!("Price")],
            vec![json!("Soap"), json!("9.99")],
        ]);
        table.normalize();

        assert_eq!(table.columns, vec!["Product", "Price", "Code", "Quantity"]);
        // Synthesized Quantity coerces to 0, synthesized Code to "".
        assert_eq!(
            table.rows[0],
            vec![json!("Soap"), json!("9.99"), json!(""), json!(0)]
        );
    }

    #[test]
    fn quantity_is_coerced_to_numbers() {
        let mut table = Table::from_grid(vec![
            vec![json!("Code"), json!("Product"), json!("Quantity")],
            vec![json!("1"), json!("a"), json!("12")],
            vec![json!("2"), json!("b"), json!("abc")],
            vec![json!("3"), json!("c"), json!("")],
            vec![json!("4"), json!("d"), json!(7.0)],
            vec![json!("5"), json!("e"), json!(2.5)],
            vec![json!("6"), json!("f"), json!(null)],
            vec![json!("7"), json!("g"), json!(-4)],
        ]);
        table.normalize();

        let idx = table.column_index("Quantity").unwrap();
        let quantities: Vec<&Value> = table.rows.iter().map(|r| &r[idx]).collect();
        assert_eq!(
            quantities,
            vec![
                &json!(12),
                &json!(0),
                &json!(0),
                &json!(7),
                &json!(2.5),
                &json!(0),
                // Coercion, not clamping: negatives survive.
                &json!(-4),
            ]
        );
    }

    #[test]
    fn code_is_coerced_to_trimmed_strings_without_float_artifact() {
        let mut table = Table::from_grid(vec![
            vec![json!("Code"), json!("Product"), json!("Quantity")],
            vec![json!("1023.0"), json!("a"), json!(1)],
            vec![json!(1023.0), json!("b"), json!(1)],
            vec![json!("  007  "), json!("c"), json!(1)],
            vec![json!(42), json!("d"), json!(1)],
            vec![json!(null), json!("e"), json!(1)],
        ]);
        table.normalize();

        let idx = table.column_index("Code").unwrap();
        let codes: Vec<&Value> = table.rows.iter().map(|r| &r[idx]).collect();
        assert_eq!(
            codes,
            vec![
                &json!("1023"),
                &json!("1023"),
                &json!("007"),
                &json!("42"),
                &json!(""),
            ]
        );
    }

    #[test]
    fn grid_round_trip_preserves_header_and_cells() {
        let mut table = Table::from_grid(vec![
            vec![json!("Code"), json!("Product"), json!("Quantity"), json!("Price"), json!("EAN")],
            vec![json!("007"), json!("Widget"), json!("abc"), json!("9.99"), json!("")],
        ]);
        table.normalize();

        let grid = table.to_grid();
        assert_eq!(grid.len(), 2);
        assert_eq!(
            grid[0],
            vec![json!("Code"), json!("Product"), json!("Quantity"), json!("Price"), json!("EAN")]
        );
        // The concrete scenario from the edit flow: Quantity "abc" saves as 0.
        assert_eq!(
            grid[1],
            vec![json!("007"), json!("Widget"), json!(0), json!("9.99"), json!("")]
        );

        // Loading the saved grid again changes nothing further.
        let mut reloaded = Table::from_grid(grid);
        reloaded.normalize();
        assert_eq!(reloaded, table);
    }

    #[test]
    fn table_serializes_with_named_fields() {
        let table = Table::empty();
        let v = serde_json::to_value(&table).unwrap();
        assert_eq!(v["columns"][0], "Code");
        assert_eq!(v["rows"], json!([]));
    }
}
