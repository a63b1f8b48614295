//! # Basinview
//!
//! A terminal-based viewer for watershed model output databases.
//!
//! ## Features
//! - Project browser over the backend's folder listing
//! - Table, column and id selection with date filtering
//! - Graph axis binding, zoom and interval controls
//! - Geo folder selection for the map layer
//! - Data/statistics export configuration
//! - Backend sidecar lifecycle management
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Gateway Layer (Tokio runtime)

pub mod app;
pub mod constants;
pub mod gateway;
pub mod launcher;
pub mod messages;
pub mod models;
pub mod pack;
pub mod router;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use gateway::{GatewayActor, GatewayError};
pub use launcher::BackendLauncher;
pub use messages::{GatewayCommand, GatewayResponse, RenderState, UiEvent};
pub use models::{DbTable, ProjectEntry, TableDetails};
pub use router::Route;
