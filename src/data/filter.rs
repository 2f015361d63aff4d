use std::collections::BTreeSet;

use super::model::{StatsTable, POS_COLUMN, TEAM_COLUMN};

/// Which teams and positions stay visible. A row must match on both axes,
/// so deselecting everything on either one empties the view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub teams: BTreeSet<String>,
    pub positions: BTreeSet<String>,
}

impl Selection {
    /// Everything-selected state for a freshly loaded table.
    pub fn all_from(table: &StatsTable) -> Self {
        Self {
            teams: table.distinct_strings(TEAM_COLUMN),
            positions: table.distinct_strings(POS_COLUMN),
        }
    }
}

/// Indices of the rows passing the selection, in table order. Membership is
/// tested against the display string of each cell, so missing values line up
/// with the "N/A" entries offered by the pickers.
pub fn filtered_indices(table: &StatsTable, selection: &Selection) -> Vec<usize> {
    let (Some(team), Some(pos)) =
        (table.column_index(TEAM_COLUMN), table.column_index(POS_COLUMN))
    else {
        return Vec::new();
    };

    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            selection.teams.contains(&row[team].to_string())
                && selection.positions.contains(&row[pos].to_string())
        })
        .map(|(i, _)| i)
        .collect()
}

/// Materialize the selection as a standalone table for export and
/// correlation. The source table is left untouched.
pub fn apply(table: &StatsTable, selection: &Selection) -> StatsTable {
    StatsTable {
        columns: table.columns.clone(),
        rows: filtered_indices(table, selection)
            .into_iter()
            .map(|i| table.rows[i].clone())
            .collect(),
    }
}
