//! Gateway messages - communication between App and Gateway layers

use crate::models::{DbTable, ProjectEntry, TableDetails};

/// Commands sent from the App layer to the Gateway layer
#[derive(Debug, Clone)]
pub enum GatewayCommand {
    /// List files and folders of a project directory (retried on failure)
    FetchProjects { folder_path: String },
    /// List table names of one database
    FetchTables { db: String },
    /// Fetch column/date metadata for the current table selection
    FetchTableDetails { selection: Vec<DbTable> },
    /// Shutdown the gateway actor
    Shutdown,
}

/// Responses sent from the Gateway layer back to the App layer
#[derive(Debug, Clone)]
pub enum GatewayResponse {
    /// Project listing succeeded
    Projects { entries: Vec<ProjectEntry> },
    /// Project listing exhausted all attempts
    ProjectsFailed { message: String },
    /// Table listing succeeded
    Tables { db: String, tables: Vec<String> },
    /// Table listing failed
    TablesFailed { db: String, message: String },
    /// Table details fetched for a selection
    TableDetails {
        selection: Vec<DbTable>,
        details: TableDetails,
    },
    /// Table details fetch failed
    TableDetailsFailed { message: String },
}
