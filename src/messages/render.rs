//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::{EditTarget, InputMode, Pane};
use crate::models::{DateRange, DbTable, ExportConfig, Notice, ProjectEntry, Theme};
use crate::router::Route;

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // View
    pub route: Route,
    pub theme: Theme,
    pub page_title: String,

    // Project tree
    pub databases: Vec<ProjectEntry>,
    pub selected_db: Option<String>,
    pub tables: Vec<String>,
    pub selected_dbs_tables: Vec<DbTable>,
    pub selected_geo_folders: Vec<String>,

    // Column universe and selections
    pub columns: Vec<String>,
    pub selected_columns: Vec<String>,
    pub export_columns: Vec<String>,
    pub ids: Vec<String>,
    pub selected_ids: Vec<String>,

    // Temporal
    pub date_range: DateRange,
    pub export_date: DateRange,
    pub date_type: Option<String>,
    pub selected_interval: String,
    pub export_interval: String,

    // Plot
    pub x_axis: String,
    pub y_axis: Vec<String>,
    pub graph_type: String,
    pub current_zoom_start: f64,
    pub current_zoom_end: f64,

    // Export
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

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
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
            date_range: DateRange::default(),
            export_date: DateRange::default(),
            date_type: None,
            selected_interval: String::from("daily"),
            export_interval: String::from("daily"),
            x_axis: String::new(),
            y_axis: Vec::new(),
            graph_type: String::from("scatter"),
            current_zoom_start: 0.0,
            current_zoom_end: 100.0,
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
}
