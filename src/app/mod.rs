//! App layer - central state management and command processing
//!
//! The App actor receives UI events and gateway responses,
//! updates state, and emits gateway commands and render state.

pub mod actor;
pub mod commands;
pub mod mutations;
pub mod state;

pub use actor::AppActor;
pub use state::AppState;
