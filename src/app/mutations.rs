//! Store mutations - synchronous, total updates to one state slice each
//!
//! Every method here is a pure update of the state record: no I/O, no
//! failure path, idempotent under re-application of the same payload.
//! Validation happens in the action layer before anything is committed.

use std::time::Duration;

use crate::app::AppState;
use crate::models::{DateRange, DbTable, ExportOptions, Notice, NoticeKind};

/// Sentinel payload expanding a column selection to the full universe
pub const ALL_COLUMNS: &str = "All";

impl AppState {
    // ========================
    // Project tree
    // ========================

    pub fn set_databases(&mut self, databases: Vec<crate::models::ProjectEntry>) {
        self.databases = databases;
        self.entry_row = 0;
    }

    pub fn set_tables(&mut self, tables: Vec<String>) {
        self.tables = tables;
        self.table_row = 0;
    }

    /// Add a (db, table) pair; duplicates are ignored
    pub fn add_selected_db_table(&mut self, pair: DbTable) {
        if !self.selected_dbs_tables.contains(&pair) {
            self.selected_dbs_tables.push(pair);
        }
    }

    /// Remove a (db, table) pair; removing an absent pair is a no-op
    pub fn remove_selected_db_table(&mut self, pair: &DbTable) {
        self.selected_dbs_tables.retain(|p| p != pair);
    }

    pub fn add_geo_folder(&mut self, folder: String) {
        if !self.selected_geo_folders.contains(&folder) {
            self.selected_geo_folders.push(folder);
        }
    }

    pub fn remove_geo_folder(&mut self, folder: &str) {
        self.selected_geo_folders.retain(|f| f != folder);
    }

    // ========================
    // Column universe and selections
    // ========================

    /// Replace the column universe and prune stale selections.
    ///
    /// Prior selections are intersected with the new universe, then the
    /// active date/identifier column is prepended when the universe carries
    /// it. Preserves user intent across table switches without leaving
    /// references to now-nonexistent columns.
    pub fn set_columns(&mut self, columns: Vec<String>) {
        let identifier = self.date_type.clone();
        let selected = reconcile(&self.selected_columns, &columns, identifier.as_deref());
        let export = reconcile(&self.export_columns, &columns, identifier.as_deref());
        self.columns = columns;
        self.selected_columns = selected;
        self.export_columns = export;
        self.column_row = 0;
    }

    /// Verbatim pass-through, mirrored into the export selection.
    ///
    /// The `"All"` sentinel expands both selections to the full universe.
    pub fn set_selected_columns(&mut self, columns: Vec<String>) {
        if columns.len() == 1 && columns[0] == ALL_COLUMNS {
            self.selected_columns = self.columns.clone();
            self.export_columns = self.columns.clone();
        } else {
            self.selected_columns = columns.clone();
            self.export_columns = columns;
        }
    }

    pub fn set_export_columns(&mut self, columns: Vec<String>) {
        self.export_columns = columns;
    }

    pub fn set_selected_ids(&mut self, ids: Vec<String>) {
        self.selected_ids = ids;
    }

    pub fn set_export_ids(&mut self, ids: Vec<String>) {
        self.export_ids = ids;
    }

    // ========================
    // Selection metadata
    // ========================

    /// Commit the id list and temporal metadata of a freshly loaded
    /// selection; the export mirrors start out equal to the live values.
    pub fn set_options(
        &mut self,
        ids: Vec<String>,
        date_range: DateRange,
        date_type: Option<String>,
        interval: Option<String>,
    ) {
        self.ids = ids;
        self.date_range = date_range.clone();
        self.export_date = date_range;
        self.date_type = date_type.clone();
        self.export_date_type = date_type;
        if let Some(interval) = interval {
            self.selected_interval = interval.clone();
            self.export_interval = interval;
        }
        self.id_row = 0;
    }

    pub fn set_default_selections(
        &mut self,
        interval: String,
        start_date: String,
        end_date: String,
    ) {
        self.default_interval = interval;
        self.default_start_date = start_date;
        self.default_end_date = end_date;
    }

    // ========================
    // Dates
    // ========================

    /// Update either bound of the live date range without clobbering the other
    pub fn set_selected_date(&mut self, start: Option<String>, end: Option<String>) {
        if let Some(start) = start {
            self.date_range.start = Some(start);
        }
        if let Some(end) = end {
            self.date_range.end = Some(end);
        }
    }

    /// Update either bound of the export date range without clobbering the other
    pub fn set_export_date(&mut self, start: Option<String>, end: Option<String>) {
        if let Some(start) = start {
            self.export_date.start = Some(start);
        }
        if let Some(end) = end {
            self.export_date.end = Some(end);
        }
    }

    pub fn set_date_type(&mut self, date_type: Option<String>) {
        self.date_type = date_type;
    }

    pub fn set_export_date_type(&mut self, date_type: Option<String>) {
        self.export_date_type = date_type;
    }

    pub fn set_selected_interval(&mut self, interval: String) {
        self.selected_interval = interval;
    }

    pub fn set_export_interval(&mut self, interval: String) {
        self.export_interval = interval;
    }

    // ========================
    // Plot axes
    // ========================

    pub fn set_x_axis(&mut self, column: String) {
        self.x_axis = column;
    }

    /// Bind the y axes and recompute both column selections as the union of
    /// the x-axis column and all y-axis columns, identifier column first.
    pub fn set_y_axis(&mut self, columns: Vec<String>) {
        self.y_axis = columns;

        let mut selected = Vec::new();
        if let Some(identifier) = &self.date_type {
            if self.columns.contains(identifier) {
                selected.push(identifier.clone());
            }
        }
        if !self.x_axis.is_empty() && !selected.contains(&self.x_axis) {
            selected.push(self.x_axis.clone());
        }
        for column in &self.y_axis {
            if !selected.contains(column) {
                selected.push(column.clone());
            }
        }
        self.selected_columns = selected.clone();
        self.export_columns = selected;
    }

    pub fn set_graph_type(&mut self, graph_type: String) {
        self.graph_type = graph_type;
    }

    pub fn set_current_zoom(&mut self, start: f64, end: f64) {
        self.current_zoom_start = start;
        self.current_zoom_end = end;
    }

    // ========================
    // Aggregation
    // ========================

    pub fn set_selected_method(&mut self, method: Vec<String>) {
        self.selected_method = method;
    }

    pub fn set_selected_statistics(&mut self, statistics: Vec<String>) {
        self.selected_statistics = statistics;
    }

    // ========================
    // Export job
    // ========================

    pub fn set_export_path(&mut self, path: String) {
        self.export.path = path;
    }

    pub fn set_export_filename(&mut self, filename: String) {
        self.export.filename = filename;
    }

    pub fn set_export_format(&mut self, format: String) {
        self.export.format = format;
    }

    pub fn set_export_options(&mut self, options: ExportOptions) {
        self.export.options = options;
    }

    // ========================
    // View
    // ========================

    pub fn set_theme(&mut self, theme: crate::models::Theme) {
        self.theme = theme;
    }

    pub fn set_page_title(&mut self, title: String) {
        self.page_title = title;
    }

    // ========================
    // Notices
    // ========================

    /// Append a notice; it is removed again once `duration` has elapsed
    pub fn push_message(&mut self, text: impl Into<String>, kind: NoticeKind, duration: Duration) {
        self.messages.push(Notice::new(text, kind, duration));
    }

    /// Remove one notice by position; out-of-range indices are ignored
    pub fn slice_message(&mut self, index: usize) {
        if index < self.messages.len() {
            self.messages.remove(index);
        }
    }

    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    /// Advance notice clocks by `elapsed` and drop expired entries
    pub fn tick_messages(&mut self, elapsed: Duration) {
        for message in &mut self.messages {
            message.time_left = message.time_left.saturating_sub(elapsed);
        }
        self.messages.retain(|m| !m.time_left.is_zero());
    }
}

/// Intersect a prior selection with a new universe, keeping prior order,
/// then prepend the identifier column when the universe contains it.
fn reconcile(prior: &[String], universe: &[String], identifier: Option<&str>) -> Vec<String> {
    let mut kept: Vec<String> = prior
        .iter()
        .filter(|c| universe.iter().any(|u| u == *c))
        .cloned()
        .collect();
    if let Some(identifier) = identifier {
        if universe.iter().any(|u| u == identifier) && !kept.iter().any(|c| c == identifier) {
            kept.insert(0, identifier.to_string());
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NOTICE_DURATION;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn selected_columns_pass_through_verbatim_and_mirror_export() {
        let mut state = AppState::new();
        state.set_columns(cols(&["Flow", "Sediment", "Nitrogen"]));
        state.set_selected_columns(cols(&["Sediment", "Flow"]));
        assert_eq!(state.selected_columns, cols(&["Sediment", "Flow"]));
        assert_eq!(state.export_columns, cols(&["Sediment", "Flow"]));
    }

    #[test]
    fn all_sentinel_expands_to_full_universe() {
        let mut state = AppState::new();
        state.set_columns(cols(&["Flow", "Sediment"]));
        state.set_selected_columns(cols(&["All"]));
        assert_eq!(state.selected_columns, cols(&["Flow", "Sediment"]));
        assert_eq!(state.export_columns, cols(&["Flow", "Sediment"]));
    }

    #[test]
    fn set_selected_columns_is_idempotent() {
        let mut state = AppState::new();
        state.set_columns(cols(&["Flow", "Sediment"]));
        state.set_selected_columns(cols(&["Flow"]));
        let first = state.selected_columns.clone();
        state.set_selected_columns(cols(&["Flow"]));
        assert_eq!(state.selected_columns, first);
        assert_eq!(state.export_columns, first);
    }

    #[test]
    fn new_universe_prunes_stale_selections() {
        let mut state = AppState::new();
        state.set_columns(cols(&["Flow", "Sediment", "Nitrogen"]));
        state.set_selected_columns(cols(&["Flow", "Nitrogen"]));

        state.set_columns(cols(&["Flow", "Phosphorus"]));

        assert!(state.selected_columns.iter().all(|c| state.columns.contains(c)));
        assert!(state.export_columns.iter().all(|c| state.columns.contains(c)));
        assert_eq!(state.selected_columns, cols(&["Flow"]));
    }

    #[test]
    fn reconciliation_prepends_identifier_column() {
        let mut state = AppState::new();
        state.set_date_type(Some("Time".to_string()));
        state.set_columns(cols(&["Flow", "Sediment"]));
        state.set_selected_columns(cols(&["Sediment"]));

        state.set_columns(cols(&["Time", "Sediment", "Flow"]));

        assert_eq!(state.selected_columns, cols(&["Time", "Sediment"]));
        assert_eq!(state.export_columns, cols(&["Time", "Sediment"]));
    }

    #[test]
    fn identifier_not_duplicated_when_already_selected() {
        let mut state = AppState::new();
        state.set_date_type(Some("Time".to_string()));
        state.set_columns(cols(&["Time", "Flow"]));
        state.set_selected_columns(cols(&["Time", "Flow"]));

        state.set_columns(cols(&["Time", "Flow", "Sediment"]));

        assert_eq!(state.selected_columns, cols(&["Time", "Flow"]));
    }

    #[test]
    fn y_axis_recomputes_selection_in_order() {
        let mut state = AppState::new();
        state.set_columns(cols(&["Flow", "Sediment", "Nitrogen"]));
        state.set_x_axis("Flow".to_string());
        state.set_y_axis(cols(&["Sediment", "Nitrogen"]));
        assert_eq!(
            state.selected_columns,
            cols(&["Flow", "Sediment", "Nitrogen"])
        );
        assert_eq!(state.export_columns, state.selected_columns);
    }

    #[test]
    fn y_axis_prepends_identifier_when_universe_carries_it() {
        let mut state = AppState::new();
        state.set_date_type(Some("Time".to_string()));
        state.set_columns(cols(&["Time", "Flow", "Sediment"]));
        state.set_x_axis("Flow".to_string());
        state.set_y_axis(cols(&["Sediment"]));
        assert_eq!(state.selected_columns, cols(&["Time", "Flow", "Sediment"]));
    }

    #[test]
    fn date_bounds_update_independently() {
        let mut state = AppState::new();
        state.set_selected_date(Some("2001-01-01".to_string()), Some("2001-12-31".to_string()));
        state.set_selected_date(Some("2002-01-01".to_string()), None);
        assert_eq!(state.date_range.start.as_deref(), Some("2002-01-01"));
        assert_eq!(state.date_range.end.as_deref(), Some("2001-12-31"));

        state.set_export_date(None, Some("2003-06-30".to_string()));
        assert_eq!(state.export_date.end.as_deref(), Some("2003-06-30"));
        assert_eq!(state.export_date.start, None);
    }

    #[test]
    fn db_table_set_rejects_duplicates() {
        let mut state = AppState::new();
        let pair = DbTable::new("hydro.db3", "Reach");
        state.add_selected_db_table(pair.clone());
        state.add_selected_db_table(pair.clone());
        assert_eq!(state.selected_dbs_tables.len(), 1);
        assert_eq!(state.selected_dbs_tables[0], pair);
    }

    #[test]
    fn removing_absent_db_table_twice_is_a_no_op() {
        let mut state = AppState::new();
        state.add_selected_db_table(DbTable::new("hydro.db3", "Reach"));
        let absent = DbTable::new("hydro.db3", "Subbasin");
        state.remove_selected_db_table(&absent);
        state.remove_selected_db_table(&absent);
        assert_eq!(
            state.selected_dbs_tables,
            vec![DbTable::new("hydro.db3", "Reach")]
        );
    }

    #[test]
    fn geo_folders_stay_duplicate_free() {
        let mut state = AppState::new();
        state.add_geo_folder("Watershed/Scenario_1".to_string());
        state.add_geo_folder("Watershed/Scenario_1".to_string());
        state.add_geo_folder("Watershed/Scenario_2".to_string());
        assert_eq!(state.selected_geo_folders.len(), 2);
        state.remove_geo_folder("Watershed/Scenario_1");
        assert_eq!(state.selected_geo_folders, vec!["Watershed/Scenario_2"]);
    }

    #[test]
    fn push_message_grows_queue_by_one_and_expires() {
        let mut state = AppState::new();
        let before = state.messages.len();
        state.push_message("export finished", NoticeKind::Info, NOTICE_DURATION);
        assert_eq!(state.messages.len(), before + 1);

        // Not yet expired at half time
        state.tick_messages(NOTICE_DURATION / 2);
        assert_eq!(state.messages.len(), before + 1);

        state.tick_messages(NOTICE_DURATION);
        assert_eq!(state.messages.len(), before);
    }

    #[test]
    fn messages_keep_insertion_order_and_slice_by_position() {
        let mut state = AppState::new();
        state.push_message("first", NoticeKind::Info, NOTICE_DURATION);
        state.push_message("second", NoticeKind::Warning, NOTICE_DURATION);
        state.push_message("third", NoticeKind::Error, NOTICE_DURATION);

        state.slice_message(1);
        let texts: Vec<&str> = state.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "third"]);

        // Out of range is ignored
        state.slice_message(10);
        assert_eq!(state.messages.len(), 2);

        state.clear_messages();
        assert!(state.messages.is_empty());
    }

    #[test]
    fn set_options_mirrors_live_values_into_export() {
        let mut state = AppState::new();
        state.set_options(
            vec!["1".to_string(), "2".to_string()],
            DateRange::new(Some("2001-01-01".into()), Some("2010-12-31".into())),
            Some("Time".to_string()),
            Some("monthly".to_string()),
        );
        assert_eq!(state.export_date, state.date_range);
        assert_eq!(state.export_date_type, state.date_type);
        assert_eq!(state.selected_interval, "monthly");
        assert_eq!(state.export_interval, "monthly");
    }
}
