use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Column vocabulary
// ---------------------------------------------------------------------------

/// Columns the pipeline keys on, as basketball-reference names them.
pub const PLAYER_COLUMN: &str = "Player";
pub const TEAM_COLUMN: &str = "Team";
pub const POS_COLUMN: &str = "Pos";
pub const AGE_COLUMN: &str = "Age";
pub const RANK_COLUMN: &str = "Rk";

/// Display sentinel for a missing cell. Presentation only: the typed core
/// stores [`Cell::Missing`], never this string.
pub const NA: &str = "N/A";

// ---------------------------------------------------------------------------
// Cell – a single table cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell of the scraped stats table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Missing,
}

impl Cell {
    /// Classify one raw scraped value. Empty cells and the literal `"N/A"`
    /// become [`Cell::Missing`], so re-reading an exported CSV round-trips.
    pub fn parse(raw: &str) -> Cell {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == NA {
            return Cell::Missing;
        }
        if let Ok(v) = trimmed.parse::<f64>() {
            // "NaN"/"inf" parse as f64; keep those textual.
            if v.is_finite() {
                return Cell::Number(v);
            }
        }
        Cell::Text(trimmed.to_string())
    }

    /// Numeric view of the cell for the correlation step; anything that is
    /// not (or does not parse as) a finite number is treated as missing.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            Cell::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Missing => write!(f, "{NA}"),
        }
    }
}

// ---------------------------------------------------------------------------
// StatsTable – one season of per-player rows
// ---------------------------------------------------------------------------

/// The cleaned per-player stats table for one season. Column order follows
/// the source page; every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl StatsTable {
    /// Build a typed table from raw string cells. Ragged source rows are
    /// squared off against the header.
    pub fn from_raw(columns: Vec<String>, raw_rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = raw_rows
            .into_iter()
            .map(|raw| {
                let mut row: Vec<Cell> = raw.iter().map(|c| Cell::parse(c)).collect();
                row.resize(width, Cell::Missing);
                row
            })
            .collect();
        StatsTable { columns, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Remove a column by name from the header and every row.
    /// Returns false (and leaves the table untouched) if it is absent.
    pub fn remove_column(&mut self, name: &str) -> bool {
        let Some(ix) = self.column_index(name) else {
            return false;
        };
        self.columns.remove(ix);
        for row in &mut self.rows {
            if ix < row.len() {
                row.remove(ix);
            }
        }
        true
    }

    /// Sorted set of distinct display values in one column; empty if the
    /// column does not exist. Drives the Team/Pos selectors.
    pub fn distinct_strings(&self, column: &str) -> BTreeSet<String> {
        let Some(ix) = self.column_index(column) else {
            return BTreeSet::new();
        };
        self.rows
            .iter()
            .filter_map(|row| row.get(ix))
            .map(|cell| cell.to_string())
            .collect()
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_classifies_cells() {
        assert_eq!(Cell::parse(""), Cell::Missing);
        assert_eq!(Cell::parse("  "), Cell::Missing);
        assert_eq!(Cell::parse("N/A"), Cell::Missing);
        assert_eq!(Cell::parse("24"), Cell::Number(24.0));
        assert_eq!(Cell::parse(".485"), Cell::Number(0.485));
        assert_eq!(Cell::parse("BOS"), Cell::Text("BOS".into()));
        // f64 accepts these spellings; the table should not.
        assert_eq!(Cell::parse("NaN"), Cell::Text("NaN".into()));
        assert_eq!(Cell::parse("inf"), Cell::Text("inf".into()));
    }

    #[test]
    fn missing_displays_as_sentinel() {
        assert_eq!(Cell::Missing.to_string(), "N/A");
        assert_eq!(Cell::Number(36.0).to_string(), "36");
        assert_eq!(Cell::Number(28.1).to_string(), "28.1");
    }

    #[test]
    fn as_number_coerces_text_but_not_missing() {
        assert_eq!(Cell::Number(2.5).as_number(), Some(2.5));
        assert_eq!(Cell::Text("3.5".into()).as_number(), Some(3.5));
        assert_eq!(Cell::Text("PG".into()).as_number(), None);
        assert_eq!(Cell::Missing.as_number(), None);
    }

    #[test]
    fn from_raw_squares_ragged_rows() {
        let table = StatsTable::from_raw(
            vec!["A".into(), "B".into(), "C".into()],
            vec![
                vec!["1".into(), "2".into()],
                vec!["3".into(), "4".into(), "5".into(), "6".into()],
            ],
        );
        assert_eq!(
            table.rows[0],
            vec![Cell::Number(1.0), Cell::Number(2.0), Cell::Missing]
        );
        assert_eq!(
            table.rows[1],
            vec![Cell::Number(3.0), Cell::Number(4.0), Cell::Number(5.0)]
        );
    }

    #[test]
    fn remove_column_shifts_rows() {
        let mut table = StatsTable::from_raw(
            vec!["Rk".into(), "Player".into()],
            vec![vec!["1".into(), "Jayson Tatum".into()]],
        );
        assert!(table.remove_column("Rk"));
        assert_eq!(table.columns, vec!["Player".to_string()]);
        assert_eq!(table.rows[0], vec![Cell::Text("Jayson Tatum".into())]);
        assert!(!table.remove_column("Rk"));
    }

    #[test]
    fn distinct_strings_is_sorted_and_deduped() {
        let table = StatsTable::from_raw(
            vec!["Team".into()],
            vec![
                vec!["LAL".into()],
                vec!["BOS".into()],
                vec!["LAL".into()],
                vec!["".into()],
            ],
        );
        let teams: Vec<String> = table.distinct_strings("Team").into_iter().collect();
        assert_eq!(teams, vec!["BOS", "LAL", "N/A"]);
        assert!(table.distinct_strings("Nope").is_empty());
    }
}
