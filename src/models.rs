use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// A (database, table) pair selected for viewing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbTable {
    pub db: String,
    pub table: String,
}

impl DbTable {
    pub fn new(db: impl Into<String>, table: impl Into<String>) -> Self {
        DbTable {
            db: db.into(),
            table: table.into(),
        }
    }
}

/// Kind of entry returned by the project listing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Folder,
    Database,
    File,
}

/// One entry of the project file tree
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProjectEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub name: String,
}

/// Inclusive (start, end) pair; either bound may be unset
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DateRange {
    pub fn new(start: Option<String>, end: Option<String>) -> Self {
        DateRange { start, end }
    }
}

/// Metadata for the current table selection, as returned by the gateway
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TableDetails {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub ids: Vec<serde_json::Value>,
    #[serde(default)]
    pub start_date: Option<serde_json::Value>,
    #[serde(default)]
    pub end_date: Option<serde_json::Value>,
    #[serde(default)]
    pub date_type: Option<String>,
    #[serde(default)]
    pub interval: Option<String>,
    /// Column provenance per (db, table) key
    #[serde(default)]
    pub global_columns: HashMap<String, Vec<String>>,
}

/// Render a scalar JSON value the way the backend formats it.
///
/// Monthly/yearly tables report integer bounds, daily tables strings.
pub fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Severity of a transient notice
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Info => "info",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
        }
    }
}

/// A transient user-visible notification
#[derive(Clone, Debug)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub time_left: Duration,
    pub total_time: Duration,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Notice {
    pub fn new(text: impl Into<String>, kind: NoticeKind, duration: Duration) -> Self {
        Notice {
            text: text.into(),
            kind,
            time_left: duration,
            total_time: duration,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Which artifacts an export job should produce
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub data: bool,
    pub stats: bool,
}

/// Export-job configuration, independent of the live view
#[derive(Clone, Debug, PartialEq)]
pub struct ExportConfig {
    pub options: ExportOptions,
    pub path: String,
    pub filename: String,
    pub format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            options: ExportOptions::default(),
            path: String::from("dataExport"),
            filename: String::from("exported_data"),
            format: String::from("csv"),
        }
    }
}

/// UI theme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn next(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_entry_deserializes_backend_shape() {
        let json = r#"[
            {"type": "folder", "name": "Jenette_Creek_Watershed/Scenario_1"},
            {"type": "database", "name": "Jenette_Creek_Watershed/hydro.db3"},
            {"type": "file", "name": "Jenette_Creek_Watershed/subbasins.shp"}
        ]"#;
        let entries: Vec<ProjectEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].kind, EntryKind::Folder);
        assert_eq!(entries[1].kind, EntryKind::Database);
        assert_eq!(entries[2].name, "Jenette_Creek_Watershed/subbasins.shp");
    }

    #[test]
    fn table_details_accepts_numeric_date_bounds() {
        let json = r#"{
            "columns": ["Year", "ID", "Flow"],
            "ids": [1, 2, 3],
            "start_date": 1990,
            "end_date": 2005,
            "date_type": "Year",
            "interval": "yearly"
        }"#;
        let details: TableDetails = serde_json::from_str(json).unwrap();
        assert_eq!(
            details.start_date.as_ref().and_then(scalar_to_string),
            Some("1990".to_string())
        );
        assert_eq!(
            details.end_date.as_ref().and_then(scalar_to_string),
            Some("2005".to_string())
        );
        assert_eq!(details.interval.as_deref(), Some("yearly"));
    }
}
