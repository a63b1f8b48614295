//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::router::Route;

/// Events generated from user input in the UI layer
#[derive(Debug, Clone)]
pub enum UiEvent {
    // View navigation
    SwitchRoute(Route),
    NextRoute,
    PrevRoute,

    // Pane/list navigation
    NextPane,
    PrevPane,
    NextItem,
    PrevItem,

    // Selection
    ToggleItem,
    OpenEntry,
    SelectAllColumns,
    ClearColumns,

    // Plot axes
    SetXAxis,
    ToggleYAxis,
    CycleGraphType,
    ZoomIn,
    ZoomOut,

    // Temporal granularity
    CycleInterval,
    CycleExportInterval,

    // Export configuration
    ToggleExportData,
    ToggleExportStats,
    CycleExportFormat,

    // Field editing
    StartEditing(EditTarget),
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Notices
    DismissNotice,
    ClearNotices,

    // Misc
    RefreshProjects,
    CycleTheme,

    // System
    Quit,
}

/// Focused pane within the current view
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum Pane {
    #[default]
    Entries,
    Tables,
    Columns,
    Ids,
}

impl Pane {
    pub fn next(&self) -> Pane {
        match self {
            Pane::Entries => Pane::Tables,
            Pane::Tables => Pane::Columns,
            Pane::Columns => Pane::Ids,
            Pane::Ids => Pane::Entries,
        }
    }

    pub fn prev(&self) -> Pane {
        match self {
            Pane::Entries => Pane::Ids,
            Pane::Tables => Pane::Entries,
            Pane::Columns => Pane::Tables,
            Pane::Ids => Pane::Columns,
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Which state field an editing session writes to
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum EditTarget {
    DateStart,
    DateEnd,
    ExportDateStart,
    ExportDateEnd,
    ExportPath,
    ExportFilename,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, route: Route, input_mode: InputMode) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key.code {
            return Some(UiEvent::Quit);
        }
    }

    if input_mode == InputMode::Editing {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(UiEvent::StopEditing),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        };
    }

    // Route switching: number keys mirror the route table order
    if let KeyCode::Char(c) = key.code {
        if let Some(digit) = c.to_digit(10) {
            let routes = Route::all();
            if digit >= 1 && (digit as usize) <= routes.len() {
                return Some(UiEvent::SwitchRoute(routes[digit as usize - 1]));
            }
        }
    }

    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::SwitchRoute(Route::Help)),
        KeyCode::Tab => Some(UiEvent::NextPane),
        KeyCode::BackTab => Some(UiEvent::PrevPane),
        KeyCode::Right => Some(UiEvent::NextRoute),
        KeyCode::Left => Some(UiEvent::PrevRoute),
        KeyCode::Up => Some(UiEvent::PrevItem),
        KeyCode::Down => Some(UiEvent::NextItem),
        KeyCode::Char(' ') => Some(UiEvent::ToggleItem),
        KeyCode::Enter => Some(UiEvent::OpenEntry),
        KeyCode::Char('r') => Some(UiEvent::RefreshProjects),
        KeyCode::Char('t') => Some(UiEvent::CycleTheme),
        KeyCode::Char('m') => Some(UiEvent::ClearNotices),
        KeyCode::Char('n') => Some(UiEvent::DismissNotice),
        _ => route_keys(key, route),
    }
}

/// Keys whose meaning depends on the active view
fn route_keys(key: KeyEvent, route: Route) -> Option<UiEvent> {
    match route {
        Route::Table => match key.code {
            KeyCode::Char('a') => Some(UiEvent::SelectAllColumns),
            KeyCode::Char('c') => Some(UiEvent::ClearColumns),
            KeyCode::Char('i') => Some(UiEvent::CycleInterval),
            KeyCode::Char('I') => Some(UiEvent::CycleExportInterval),
            KeyCode::Char('d') => Some(UiEvent::StartEditing(EditTarget::DateStart)),
            KeyCode::Char('D') => Some(UiEvent::StartEditing(EditTarget::DateEnd)),
            KeyCode::Char('e') => Some(UiEvent::ToggleExportData),
            KeyCode::Char('s') => Some(UiEvent::ToggleExportStats),
            KeyCode::Char('f') => Some(UiEvent::CycleExportFormat),
            KeyCode::Char('p') => Some(UiEvent::StartEditing(EditTarget::ExportPath)),
            KeyCode::Char('o') => Some(UiEvent::StartEditing(EditTarget::ExportFilename)),
            KeyCode::Char('[') => Some(UiEvent::StartEditing(EditTarget::ExportDateStart)),
            KeyCode::Char(']') => Some(UiEvent::StartEditing(EditTarget::ExportDateEnd)),
            _ => None,
        },
        Route::Graph => match key.code {
            KeyCode::Char('x') => Some(UiEvent::SetXAxis),
            KeyCode::Char('y') => Some(UiEvent::ToggleYAxis),
            KeyCode::Char('g') => Some(UiEvent::CycleGraphType),
            KeyCode::Char('+') => Some(UiEvent::ZoomIn),
            KeyCode::Char('-') => Some(UiEvent::ZoomOut),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn release_events_are_ignored() {
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert!(key_to_ui_event(key, Route::Project, InputMode::Normal).is_none());
    }

    #[test]
    fn editing_mode_captures_characters() {
        let event = key_to_ui_event(
            press(KeyCode::Char('q')),
            Route::Table,
            InputMode::Editing,
        );
        assert!(matches!(event, Some(UiEvent::CharInput('q'))));
    }

    #[test]
    fn number_keys_switch_routes() {
        let event = key_to_ui_event(press(KeyCode::Char('3')), Route::Project, InputMode::Normal);
        assert!(matches!(event, Some(UiEvent::SwitchRoute(Route::Graph))));
    }

    #[test]
    fn axis_keys_only_bind_on_graph_view() {
        let on_graph = key_to_ui_event(press(KeyCode::Char('x')), Route::Graph, InputMode::Normal);
        assert!(matches!(on_graph, Some(UiEvent::SetXAxis)));
        let on_map = key_to_ui_event(press(KeyCode::Char('x')), Route::Map, InputMode::Normal);
        assert!(on_map.is_none());
    }
}
