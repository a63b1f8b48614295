//! App state - pure data structure with no I/O logic
//!
//! This is the single source of truth for view configuration and in-flight
//! notifications. It is owned exclusively by the app actor and mutated only
//! through the named methods in `mutations.rs`.

use crate::messages::ui_events::{EditTarget, InputMode, Pane};
use crate::messages::RenderState;
use crate::models::{DateRange, DbTable, ExportConfig, Notice, ProjectEntry, Theme};
use crate::router::Route;

/// Main application state - pure data, no I/O
pub struct AppState {
    // View
    pub route: Route,
    pub theme: Theme,
    pub page_title: String,

    // Project tree
    pub databases: Vec<ProjectEntry>,
    /// Database whose tables are currently listed
    pub selected_db: Option<String>,
    pub tables: Vec<String>,
    /// Ordered, duplicate-free set of (db, table) pairs chosen for viewing
    pub selected_dbs_tables: Vec<DbTable>,
    /// Ordered, duplicate-free set of folders chosen for map display
    pub selected_geo_folders: Vec<String>,

    // Column universe and selections; selections stay subsets of `columns`
    pub columns: Vec<String>,
    pub selected_columns: Vec<String>,
    pub export_columns: Vec<String>,
    pub ids: Vec<String>,
    pub selected_ids: Vec<String>,
    pub export_ids: Vec<String>,
    /// Column provenance per (db, table) key, as reported by the gateway
    pub global_columns: std::collections::HashMap<String, Vec<String>>,

    // Temporal
    pub date_range: DateRange,
    pub export_date: DateRange,
    pub date_type: Option<String>,
    pub export_date_type: Option<String>,
    pub selected_interval: String,
    pub export_interval: String,
    pub default_interval: String,
    pub default_start_date: String,
    pub default_end_date: String,

    // Plot
    pub x_axis: String,
    pub y_axis: Vec<String>,
    pub graph_type: String,
    pub current_zoom_start: f64,
    pub current_zoom_end: f64,

    // Aggregation
    pub selected_method: Vec<String>,
    pub selected_statistics: Vec<String>,

    // Export job
    pub export: ExportConfig,

    // Notices
    pub messages: Vec<Notice>,

    // UI state
    pub pane: Pane,
    pub input_mode: InputMode,
    pub edit_target: Option<EditTarget>,
    pub edit_buffer: String,
    pub cursor_position: usize,
    pub entry_row: usize,
    pub table_row: usize,
    pub column_row: usize,
    pub id_row: usize,
    pub is_loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            route: Route::Project,
            theme: Theme::Light,
            page_title: String::new(),
            databases: Vec::new(),
            selected_db: None,
            tables: Vec::new(),
            selected_dbs_tables: Vec::new(),
            selected_geo_folders: Vec::new(),
            columns: Vec::new(),
            selected_columns: Vec::new(),
            export_columns: Vec::new(),
            ids: Vec::new(),
            selected_ids: Vec::new(),
            export_ids: Vec::new(),
            global_columns: std::collections::HashMap::new(),
            date_range: DateRange::default(),
            export_date: DateRange::default(),
            date_type: None,
            export_date_type: None,
            selected_interval: String::from("daily"),
            export_interval: String::from("daily"),
            default_interval: String::new(),
            default_start_date: String::new(),
            default_end_date: String::new(),
            x_axis: String::new(),
            y_axis: Vec::new(),
            graph_type: String::from("scatter"),
            current_zoom_start: 0.0,
            current_zoom_end: 100.0,
            selected_method: vec![String::from("Equal")],
            selected_statistics: vec![String::from("None")],
            export: ExportConfig::default(),
            messages: Vec::new(),
            pane: Pane::Entries,
            input_mode: InputMode::Normal,
            edit_target: None,
            edit_buffer: String::new(),
            cursor_position: 0,
            entry_row: 0,
            table_row: 0,
            column_row: 0,
            id_row: 0,
            is_loading: false,
        }
    }

    /// Database entry currently highlighted in the project tree
    pub fn highlighted_database(&self) -> Option<&ProjectEntry> {
        self.databases
            .iter()
            .filter(|e| e.kind == crate::models::EntryKind::Database)
            .nth(self.entry_row)
    }

    /// Folder entry currently highlighted on the map view
    pub fn highlighted_folder(&self) -> Option<&ProjectEntry> {
        self.databases
            .iter()
            .filter(|e| e.kind == crate::models::EntryKind::Folder)
            .nth(self.entry_row)
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            route: self.route,
            theme: self.theme,
            page_title: self.page_title.clone(),
            databases: self.databases.clone(),
            selected_db: self.selected_db.clone(),
            tables: self.tables.clone(),
            selected_dbs_tables: self.selected_dbs_tables.clone(),
            selected_geo_folders: self.selected_geo_folders.clone(),
            columns: self.columns.clone(),
            selected_columns: self.selected_columns.clone(),
            export_columns: self.export_columns.clone(),
            ids: self.ids.clone(),
            selected_ids: self.selected_ids.clone(),
            date_range: self.date_range.clone(),
            export_date: self.export_date.clone(),
            date_type: self.date_type.clone(),
            selected_interval: self.selected_interval.clone(),
            export_interval: self.export_interval.clone(),
            x_axis: self.x_axis.clone(),
            y_axis: self.y_axis.clone(),
            graph_type: self.graph_type.clone(),
            current_zoom_start: self.current_zoom_start,
            current_zoom_end: self.current_zoom_end,
            export: self.export.clone(),
            messages: self.messages.clone(),
            pane: self.pane,
            input_mode: self.input_mode,
            edit_target: self.edit_target,
            edit_buffer: self.edit_buffer.clone(),
            cursor_position: self.cursor_position,
            entry_row: self.entry_row,
            table_row: self.table_row,
            column_row: self.column_row,
            id_row: self.id_row,
            is_loading: self.is_loading,
        }
    }
}
