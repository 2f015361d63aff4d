use std::collections::BTreeSet;

use eframe::egui::TextureHandle;

use crate::data::correlate::{self, CorrelationMatrix};
use crate::data::filter::{self, Selection};
use crate::data::loader::MAX_YEAR;
use crate::data::model::{StatsTable, POS_COLUMN, TEAM_COLUMN};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which categorical axis a picker operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterAxis {
    Team,
    Position,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Season shown in the selector.
    pub year: u16,

    /// Season whose load has been requested but not yet performed.
    pub pending_load: Option<u16>,

    /// Loaded season table (None until the first load finishes).
    pub dataset: Option<StatsTable>,

    /// Distinct values offered by the team picker, sorted.
    pub teams: Vec<String>,

    /// Distinct values offered by the position picker, sorted.
    pub positions: Vec<String>,

    /// Current picker state.
    pub selection: Selection,

    /// Indices of rows passing the current selection (cached).
    pub visible_rows: Vec<usize>,

    /// Whether the heatmap panel is open.
    pub show_heatmap: bool,

    /// Whether coefficient labels are drawn on the heatmap cells.
    pub show_annotations: bool,

    /// Correlation over the visible rows, computed on demand.
    pub correlation: Option<CorrelationMatrix>,

    /// Why the correlation could not be computed, when it could not.
    pub correlation_error: Option<String>,

    /// Cell-colour texture backing the heatmap image.
    pub heatmap_texture: Option<TextureHandle>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            year: MAX_YEAR,
            // Load the newest season on startup without waiting for input.
            pending_load: Some(MAX_YEAR),
            dataset: None,
            teams: Vec::new(),
            positions: Vec::new(),
            selection: Selection::default(),
            visible_rows: Vec::new(),
            show_heatmap: false,
            show_annotations: true,
            correlation: None,
            correlation_error: None,
            heatmap_texture: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Switch the selector to `year` and queue a load for it.
    pub fn request_year(&mut self, year: u16) {
        self.year = year;
        self.pending_load = Some(year);
    }

    /// Ingest a freshly loaded season: pickers repopulated, everything
    /// selected, caches dropped.
    pub fn set_dataset(&mut self, table: StatsTable) {
        self.teams = table.distinct_strings(TEAM_COLUMN).into_iter().collect();
        self.positions = table.distinct_strings(POS_COLUMN).into_iter().collect();
        self.selection = Selection::all_from(&table);
        self.visible_rows = (0..table.n_rows()).collect();
        self.invalidate_correlation();
        self.dataset = Some(table);
        self.status_message = None;
    }

    /// Drop the current season after a failed load; the caller sets the
    /// status message.
    pub fn clear_dataset(&mut self) {
        self.dataset = None;
        self.teams.clear();
        self.positions.clear();
        self.selection = Selection::default();
        self.visible_rows.clear();
        self.invalidate_correlation();
    }

    /// Recompute `visible_rows` after a selection change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.dataset {
            self.visible_rows = filter::filtered_indices(table, &self.selection);
            log::debug!("{} of {} rows visible", self.visible_rows.len(), table.n_rows());
        }
        self.invalidate_correlation();
    }

    /// The filtered rows as a standalone table, for export and correlation.
    pub fn visible_table(&self) -> Option<StatsTable> {
        self.dataset
            .as_ref()
            .map(|table| filter::apply(table, &self.selection))
    }

    pub fn axis_values(&self, axis: FilterAxis) -> &[String] {
        match axis {
            FilterAxis::Team => &self.teams,
            FilterAxis::Position => &self.positions,
        }
    }

    pub fn axis_selected(&self, axis: FilterAxis) -> &BTreeSet<String> {
        match axis {
            FilterAxis::Team => &self.selection.teams,
            FilterAxis::Position => &self.selection.positions,
        }
    }

    fn axis_selected_mut(&mut self, axis: FilterAxis) -> &mut BTreeSet<String> {
        match axis {
            FilterAxis::Team => &mut self.selection.teams,
            FilterAxis::Position => &mut self.selection.positions,
        }
    }

    /// Toggle a single value in one picker.
    pub fn toggle_value(&mut self, axis: FilterAxis, value: &str) {
        let selected = self.axis_selected_mut(axis);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    /// Select every value in one picker.
    pub fn select_all(&mut self, axis: FilterAxis) {
        let all: BTreeSet<String> = self.axis_values(axis).iter().cloned().collect();
        *self.axis_selected_mut(axis) = all;
        self.refilter();
    }

    /// Deselect every value in one picker.
    pub fn select_none(&mut self, axis: FilterAxis) {
        self.axis_selected_mut(axis).clear();
        self.refilter();
    }

    /// Compute the correlation for the visible rows unless a result (or a
    /// failure) is already cached. Called every frame the heatmap is open.
    pub fn ensure_correlation(&mut self) {
        if self.correlation.is_some() || self.correlation_error.is_some() {
            return;
        }
        let Some(visible) = self.visible_table() else {
            return;
        };
        match correlate::correlate(&visible) {
            Ok(matrix) => self.correlation = Some(matrix),
            Err(err) => self.correlation_error = Some(err.to_string()),
        }
    }

    fn invalidate_correlation(&mut self) {
        self.correlation = None;
        self.correlation_error = None;
        self.heatmap_texture = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn season() -> StatsTable {
        StatsTable::from_raw(
            vec!["Player".into(), "Team".into(), "Pos".into(), "PTS".into(), "AST".into()],
            vec![
                vec!["Tatum".into(), "BOS".into(), "PF".into(), "26.9".into(), "4.9".into()],
                vec!["Brown".into(), "BOS".into(), "SG".into(), "23.0".into(), "3.6".into()],
                vec!["Jokic".into(), "DEN".into(), "C".into(), "26.4".into(), "9.0".into()],
            ],
        )
    }

    #[test]
    fn ingest_selects_everything() {
        let mut state = AppState::default();
        state.set_dataset(season());
        assert_eq!(state.teams, vec!["BOS", "DEN"]);
        assert_eq!(state.positions, vec!["C", "PF", "SG"]);
        assert_eq!(state.visible_rows, vec![0, 1, 2]);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn toggling_a_team_refilters() {
        let mut state = AppState::default();
        state.set_dataset(season());
        state.toggle_value(FilterAxis::Team, "BOS");
        assert_eq!(state.visible_rows, vec![2]);
        state.toggle_value(FilterAxis::Team, "BOS");
        assert_eq!(state.visible_rows, vec![0, 1, 2]);
    }

    #[test]
    fn selection_changes_drop_the_cached_correlation() {
        let mut state = AppState::default();
        state.set_dataset(season());
        state.ensure_correlation();
        assert!(state.correlation.is_some());
        state.select_none(FilterAxis::Position);
        assert!(state.correlation.is_none());
        assert!(state.visible_rows.is_empty());
    }

    #[test]
    fn empty_selection_reports_a_correlation_error() {
        let mut state = AppState::default();
        state.set_dataset(season());
        state.select_none(FilterAxis::Team);
        state.ensure_correlation();
        assert!(state.correlation.is_none());
        let message = state.correlation_error.as_deref().unwrap();
        assert!(message.contains("No numeric data"), "got {message:?}");
    }

    #[test]
    fn failed_loads_clear_the_season() {
        let mut state = AppState::default();
        state.set_dataset(season());
        state.clear_dataset();
        assert!(state.dataset.is_none());
        assert!(state.teams.is_empty() && state.positions.is_empty());
        assert!(state.visible_table().is_none());
    }
}
