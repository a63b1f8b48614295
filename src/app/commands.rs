//! Command handlers - business logic for processing UI events
//!
//! UI events mutate state directly; events that need the gateway return a
//! `GatewayCommand` for the actor to dispatch. Gateway responses are
//! committed here, one mutation batch per logical outcome: a failed fetch
//! commits nothing and surfaces a notice instead.

use crate::app::AppState;
use crate::constants::{DEFAULT_PROJECT_FOLDER, NOTICE_DURATION};
use crate::messages::ui_events::{EditTarget, InputMode, Pane};
use crate::messages::{GatewayCommand, GatewayResponse};
use crate::models::{scalar_to_string, DateRange, DbTable, NoticeKind};
use crate::router::Route;

impl AppState {
    // ========================
    // View navigation
    // ========================

    pub fn switch_route(&mut self, route: Route) {
        self.route = route;
        self.input_mode = InputMode::Normal;
        self.edit_target = None;
        self.page_title = route.title().to_string();
        self.pane = match route {
            Route::Table => Pane::Tables,
            Route::Graph => Pane::Columns,
            _ => Pane::Entries,
        };
    }

    pub fn next_route(&mut self) {
        self.switch_route(self.route.next());
    }

    pub fn prev_route(&mut self) {
        self.switch_route(self.route.prev());
    }

    pub fn next_pane(&mut self) {
        self.pane = self.pane.next();
    }

    pub fn prev_pane(&mut self) {
        self.pane = self.pane.prev();
    }

    // ========================
    // List navigation
    // ========================

    pub fn next_item(&mut self) {
        self.move_item(1);
    }

    pub fn prev_item(&mut self) {
        self.move_item(-1);
    }

    fn move_item(&mut self, delta: isize) {
        let folder_count = self.folder_count();
        let database_count = self.database_count();
        let (row, len) = match (self.route, self.pane) {
            (Route::Map, _) => (&mut self.entry_row, folder_count),
            (Route::Graph, _) => (&mut self.column_row, self.columns.len()),
            (_, Pane::Entries) => (&mut self.entry_row, database_count),
            (_, Pane::Tables) => (&mut self.table_row, self.tables.len()),
            (_, Pane::Columns) => (&mut self.column_row, self.columns.len()),
            (_, Pane::Ids) => (&mut self.id_row, self.ids.len()),
        };
        if len == 0 {
            return;
        }
        if delta > 0 {
            *row = (*row + 1) % len;
        } else {
            *row = row.checked_sub(1).unwrap_or(len - 1);
        }
    }

    fn database_count(&self) -> usize {
        self.databases
            .iter()
            .filter(|e| e.kind == crate::models::EntryKind::Database)
            .count()
    }

    fn folder_count(&self) -> usize {
        self.databases
            .iter()
            .filter(|e| e.kind == crate::models::EntryKind::Folder)
            .count()
    }

    // ========================
    // Selection
    // ========================

    /// Open the highlighted project entry; a database entry triggers a
    /// table listing fetch.
    pub fn open_entry(&mut self) -> Option<GatewayCommand> {
        if self.route == Route::Table && self.pane == Pane::Tables {
            return self.toggle_item();
        }
        let db = self.highlighted_database()?.name.clone();
        self.selected_db = Some(db.clone());
        self.tables.clear();
        self.table_row = 0;
        Some(GatewayCommand::FetchTables { db })
    }

    /// Toggle the highlighted item of the focused list. Toggling a table
    /// re-fetches details for the whole selection.
    pub fn toggle_item(&mut self) -> Option<GatewayCommand> {
        match (self.route, self.pane) {
            (Route::Map, _) => {
                let folder = self.highlighted_folder()?.name.clone();
                if self.selected_geo_folders.contains(&folder) {
                    self.remove_geo_folder(&folder);
                } else {
                    self.add_geo_folder(folder);
                }
                None
            }
            (_, Pane::Tables) => {
                let db = self.selected_db.clone()?;
                let table = self.tables.get(self.table_row)?.clone();
                let pair = DbTable::new(db, table);
                if self.selected_dbs_tables.contains(&pair) {
                    self.remove_selected_db_table(&pair);
                } else {
                    self.add_selected_db_table(pair);
                }
                self.prepare_fetch_details()
            }
            (_, Pane::Columns) => {
                let column = self.columns.get(self.column_row)?.clone();
                if self.route == Route::Graph {
                    self.toggle_y_axis_column(column);
                } else {
                    let mut selection = self.selected_columns.clone();
                    if let Some(pos) = selection.iter().position(|c| c == &column) {
                        selection.remove(pos);
                    } else {
                        selection.push(column);
                    }
                    self.set_selected_columns(selection);
                }
                None
            }
            (_, Pane::Ids) => {
                let id = self.ids.get(self.id_row)?.clone();
                let mut selection = self.selected_ids.clone();
                if let Some(pos) = selection.iter().position(|i| i == &id) {
                    selection.remove(pos);
                } else {
                    selection.push(id);
                }
                self.set_selected_ids(selection.clone());
                self.set_export_ids(selection);
                None
            }
            _ => None,
        }
    }

    pub fn select_all_columns(&mut self) {
        self.set_selected_columns(vec![crate::app::mutations::ALL_COLUMNS.to_string()]);
    }

    pub fn clear_columns(&mut self) {
        self.set_selected_columns(Vec::new());
    }

    // ========================
    // Plot axes
    // ========================

    pub fn set_x_from_highlight(&mut self) {
        if let Some(column) = self.columns.get(self.column_row).cloned() {
            self.set_x_axis(column);
            let y = self.y_axis.clone();
            // Re-derive the selection with the new x binding
            self.set_y_axis(y);
        }
    }

    pub fn toggle_y_from_highlight(&mut self) {
        if let Some(column) = self.columns.get(self.column_row).cloned() {
            self.toggle_y_axis_column(column);
        }
    }

    fn toggle_y_axis_column(&mut self, column: String) {
        let mut y = self.y_axis.clone();
        if let Some(pos) = y.iter().position(|c| c == &column) {
            y.remove(pos);
        } else {
            y.push(column);
        }
        self.set_y_axis(y);
    }

    pub fn cycle_graph_type(&mut self) {
        let next = match self.graph_type.as_str() {
            "scatter" => "line",
            "line" => "bar",
            _ => "scatter",
        };
        self.set_graph_type(next.to_string());
    }

    pub fn zoom_in(&mut self) {
        let start = (self.current_zoom_start + 5.0).min(self.current_zoom_end - 5.0);
        let end = (self.current_zoom_end - 5.0).max(start);
        self.set_current_zoom(start.max(0.0), end.min(100.0));
    }

    pub fn zoom_out(&mut self) {
        self.set_current_zoom(
            (self.current_zoom_start - 5.0).max(0.0),
            (self.current_zoom_end + 5.0).min(100.0),
        );
    }

    // ========================
    // Intervals and export configuration
    // ========================

    pub fn cycle_interval(&mut self) {
        let next = next_interval(&self.selected_interval);
        self.set_selected_interval(next);
    }

    pub fn cycle_export_interval(&mut self) {
        let next = next_interval(&self.export_interval);
        self.set_export_interval(next);
    }

    pub fn toggle_export_data(&mut self) {
        let mut options = self.export.options;
        options.data = !options.data;
        self.set_export_options(options);
    }

    pub fn toggle_export_stats(&mut self) {
        let mut options = self.export.options;
        options.stats = !options.stats;
        self.set_export_options(options);
    }

    pub fn cycle_export_format(&mut self) {
        let next = if self.export.format == "csv" { "txt" } else { "csv" };
        self.set_export_format(next.to_string());
    }

    // ========================
    // Field editing
    // ========================

    pub fn start_editing(&mut self, target: EditTarget) {
        self.edit_buffer = match target {
            EditTarget::DateStart => self.date_range.start.clone().unwrap_or_default(),
            EditTarget::DateEnd => self.date_range.end.clone().unwrap_or_default(),
            EditTarget::ExportDateStart => self.export_date.start.clone().unwrap_or_default(),
            EditTarget::ExportDateEnd => self.export_date.end.clone().unwrap_or_default(),
            EditTarget::ExportPath => self.export.path.clone(),
            EditTarget::ExportFilename => self.export.filename.clone(),
        };
        self.cursor_position = self.edit_buffer.len();
        self.edit_target = Some(target);
        self.input_mode = InputMode::Editing;
    }

    /// Commit the edit buffer into the targeted field
    pub fn stop_editing(&mut self) {
        let buffer = std::mem::take(&mut self.edit_buffer);
        match self.edit_target.take() {
            Some(EditTarget::DateStart) => self.set_selected_date(Some(buffer), None),
            Some(EditTarget::DateEnd) => self.set_selected_date(None, Some(buffer)),
            Some(EditTarget::ExportDateStart) => self.set_export_date(Some(buffer), None),
            Some(EditTarget::ExportDateEnd) => self.set_export_date(None, Some(buffer)),
            Some(EditTarget::ExportPath) => self.set_export_path(buffer),
            Some(EditTarget::ExportFilename) => self.set_export_filename(buffer),
            None => {}
        }
        self.input_mode = InputMode::Normal;
        self.cursor_position = 0;
    }

    pub fn enter_char(&mut self, c: char) {
        if self.cursor_position <= self.edit_buffer.len() {
            self.edit_buffer.insert(self.cursor_position, c);
            self.cursor_position += c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let prev = self.edit_buffer[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.edit_buffer.remove(prev);
            self.cursor_position = prev;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position = self.edit_buffer[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.edit_buffer.len() {
            self.cursor_position = self.edit_buffer[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(self.edit_buffer.len());
        }
    }

    // ========================
    // Notices
    // ========================

    pub fn dismiss_notice(&mut self) {
        self.slice_message(0);
    }

    // ========================
    // Gateway dispatch
    // ========================

    /// Initial project listing; retried inside the gateway client
    pub fn prepare_fetch_projects(&mut self) -> GatewayCommand {
        self.is_loading = true;
        GatewayCommand::FetchProjects {
            folder_path: DEFAULT_PROJECT_FOLDER.to_string(),
        }
    }

    /// Details fetch for the current selection; an empty selection clears
    /// the column universe locally instead
    fn prepare_fetch_details(&mut self) -> Option<GatewayCommand> {
        if self.selected_dbs_tables.is_empty() {
            self.set_columns(Vec::new());
            self.set_options(Vec::new(), DateRange::default(), None, None);
            return None;
        }
        self.is_loading = true;
        Some(GatewayCommand::FetchTableDetails {
            selection: self.selected_dbs_tables.clone(),
        })
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_gateway_response(&mut self, response: GatewayResponse) {
        match response {
            GatewayResponse::Projects { entries } => {
                self.is_loading = false;
                self.set_databases(entries);
            }
            GatewayResponse::ProjectsFailed { message } => {
                self.is_loading = false;
                self.push_message(message, NoticeKind::Error, NOTICE_DURATION);
            }
            GatewayResponse::Tables { db, tables } => {
                // A later OpenEntry supersedes this listing
                if self.selected_db.as_deref() == Some(db.as_str()) {
                    self.set_tables(tables);
                }
            }
            GatewayResponse::TablesFailed { db, message } => {
                tracing::warn!(db = %db, "table listing failed");
                self.push_message(message, NoticeKind::Error, NOTICE_DURATION);
            }
            GatewayResponse::TableDetails { selection, details } => {
                self.is_loading = false;
                tracing::info!(
                    tables = selection.len(),
                    columns = details.columns.len(),
                    "table details loaded"
                );
                self.global_columns = details.global_columns;
                self.set_columns(details.columns);
                let ids = details
                    .ids
                    .iter()
                    .filter_map(scalar_to_string)
                    .collect();
                let range = DateRange::new(
                    details.start_date.as_ref().and_then(scalar_to_string),
                    details.end_date.as_ref().and_then(scalar_to_string),
                );
                self.set_options(ids, range.clone(), details.date_type, details.interval);
                self.set_default_selections(
                    self.selected_interval.clone(),
                    range.start.unwrap_or_default(),
                    range.end.unwrap_or_default(),
                );
            }
            GatewayResponse::TableDetailsFailed { message } => {
                self.is_loading = false;
                self.push_message(message, NoticeKind::Error, NOTICE_DURATION);
            }
        }
    }
}

fn next_interval(current: &str) -> String {
    match current {
        "daily" => "monthly",
        "monthly" => "yearly",
        _ => "daily",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryKind, ProjectEntry, TableDetails};

    fn entry(kind: EntryKind, name: &str) -> ProjectEntry {
        ProjectEntry {
            kind,
            name: name.to_string(),
        }
    }

    #[test]
    fn failed_details_fetch_leaves_committed_state_untouched() {
        let mut state = AppState::new();
        state.handle_gateway_response(GatewayResponse::TableDetails {
            selection: vec![DbTable::new("hydro.db3", "Reach")],
            details: TableDetails {
                columns: vec!["Time".to_string(), "Flow".to_string()],
                date_type: Some("Time".to_string()),
                interval: Some("daily".to_string()),
                ..TableDetails::default()
            },
        });
        let columns_before = state.columns.clone();
        let range_before = state.date_range.clone();

        state.handle_gateway_response(GatewayResponse::TableDetailsFailed {
            message: "Tables have different date type".to_string(),
        });

        assert_eq!(state.columns, columns_before);
        assert_eq!(state.date_range, range_before);
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].kind, NoticeKind::Error);
    }

    #[test]
    fn projects_failure_surfaces_one_notice_and_keeps_databases() {
        let mut state = AppState::new();
        state.handle_gateway_response(GatewayResponse::ProjectsFailed {
            message: "Max retries reached. Failed to fetch databases.".to_string(),
        });
        assert!(state.databases.is_empty());
        assert_eq!(state.messages.len(), 1);
        assert!(!state.is_loading);
    }

    #[test]
    fn stale_table_listing_is_ignored() {
        let mut state = AppState::new();
        state.selected_db = Some("water.db3".to_string());
        state.handle_gateway_response(GatewayResponse::Tables {
            db: "hydro.db3".to_string(),
            tables: vec!["Reach".to_string()],
        });
        assert!(state.tables.is_empty());

        state.handle_gateway_response(GatewayResponse::Tables {
            db: "water.db3".to_string(),
            tables: vec!["Subbasin".to_string()],
        });
        assert_eq!(state.tables, vec!["Subbasin"]);
    }

    #[test]
    fn emptying_the_selection_clears_the_universe_without_a_fetch() {
        let mut state = AppState::new();
        state.set_databases(vec![entry(EntryKind::Database, "hydro.db3")]);
        state.selected_db = Some("hydro.db3".to_string());
        state.set_tables(vec!["Reach".to_string()]);
        state.route = Route::Table;
        state.pane = Pane::Tables;

        let cmd = state.toggle_item();
        assert!(matches!(
            cmd,
            Some(GatewayCommand::FetchTableDetails { .. })
        ));

        state.set_columns(vec!["Time".to_string(), "Flow".to_string()]);
        let cmd = state.toggle_item();
        assert!(cmd.is_none());
        assert!(state.selected_dbs_tables.is_empty());
        assert!(state.columns.is_empty());
    }

    #[test]
    fn details_commit_follows_mutation_order() {
        let mut state = AppState::new();
        state.handle_gateway_response(GatewayResponse::TableDetails {
            selection: vec![DbTable::new("hydro.db3", "Reach")],
            details: TableDetails {
                columns: vec!["Time".to_string(), "ID".to_string(), "Flow".to_string()],
                ids: vec![serde_json::json!(1), serde_json::json!(2)],
                start_date: Some(serde_json::json!("2001-01-01")),
                end_date: Some(serde_json::json!("2010-12-31")),
                date_type: Some("Time".to_string()),
                interval: Some("daily".to_string()),
                ..TableDetails::default()
            },
        });

        assert_eq!(state.columns, vec!["Time", "ID", "Flow"]);
        assert_eq!(state.ids, vec!["1", "2"]);
        assert_eq!(state.date_range.start.as_deref(), Some("2001-01-01"));
        assert_eq!(state.export_date.end.as_deref(), Some("2010-12-31"));
        assert_eq!(state.date_type.as_deref(), Some("Time"));
        assert_eq!(state.default_interval, "daily");
        assert_eq!(state.default_end_date, "2010-12-31");
        assert!(!state.is_loading);
    }
}
