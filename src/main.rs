//! Basinview - terminal viewer for watershed model output databases
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Gateway Layer (Tokio) - async HTTP access to the data backend

mod app;
mod constants;
mod gateway;
mod launcher;
mod messages;
mod models;
mod router;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use app::AppActor;
use gateway::GatewayActor;
use launcher::BackendLauncher;
use messages::ui_events::{key_to_ui_event, EditTarget, InputMode, Pane};
use messages::{GatewayCommand, GatewayResponse, RenderState, UiEvent};
use models::EntryKind;
use router::Route;
use ui::{notice_color, render_tabs};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file (the TUI owns the terminal)
    let file_appender = tracing_appender::rolling::never(".", "basinview.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let base_url = constants::api_base_url();

    // Start the backend sidecar when bundled; in dev the backend runs on
    // its own and the initial retry loop covers the gap either way.
    let backend_dir = std::env::var("BASINVIEW_BACKEND_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("backend"));
    let backend = match BackendLauncher::start(&backend_dir, base_url.clone()) {
        Ok(launcher) => Some(launcher),
        Err(e) => {
            tracing::warn!(error = %e, "backend not started; assuming it runs externally");
            None
        }
    };

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend_term = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_term)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (gw_cmd_tx, gw_cmd_rx) = mpsc::unbounded_channel::<GatewayCommand>();
    let (gw_resp_tx, gw_resp_rx) = mpsc::unbounded_channel::<GatewayResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn gateway actor
    let gateway_actor = GatewayActor::new(base_url, gw_resp_tx);
    tokio::spawn(gateway_actor.run(gw_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(gw_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, gw_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    // Notify the backend, then kill it
    if let Some(backend) = backend {
        backend.shutdown().await;
    }

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) =
                    key_to_ui_event(key, current_state.route, current_state.input_mode)
                {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let notice_rows = state.messages.len().min(3) as u16;
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Tab bar
            Constraint::Min(0),              // Content
            Constraint::Length(notice_rows), // Notices
            Constraint::Length(1),           // Status bar
        ])
        .split(area);

    draw_tab_bar(f, state, main_chunks[0]);

    match state.route {
        Route::Project => draw_project_view(f, state, main_chunks[1]),
        Route::Table => draw_table_view(f, state, main_chunks[1]),
        Route::Graph => draw_graph_view(f, state, main_chunks[1]),
        Route::Map => draw_map_view(f, state, main_chunks[1]),
        Route::Calibration | Route::Bmp | Route::Tools => {
            draw_placeholder_view(f, state, main_chunks[1])
        }
        Route::Help => draw_help_view(f, main_chunks[1]),
    }

    draw_notices(f, state, main_chunks[2]);
    draw_status_bar(f, state, main_chunks[3]);
}

fn draw_tab_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let titles: Vec<&str> = Route::all().iter().map(|r| r.title()).collect();
    let selected = Route::all()
        .iter()
        .position(|r| *r == state.route)
        .unwrap_or(0);
    f.render_widget(render_tabs(&titles, selected), area);
}

fn draw_project_view(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    // Databases of the project tree
    let databases: Vec<(String, bool)> = state
        .databases
        .iter()
        .filter(|e| e.kind == EntryKind::Database)
        .map(|e| {
            let open = state.selected_db.as_deref() == Some(e.name.as_str());
            (e.name.clone(), open)
        })
        .collect();
    let focused = state.pane == Pane::Entries;
    let title = if state.is_loading {
        " Databases [...] "
    } else {
        " Databases (Enter: open) "
    };
    f.render_widget(
        ui::render_check_list(&databases, title, state.entry_row, focused),
        chunks[0],
    );

    // Tables of the opened database
    let tables: Vec<ListItem> = state
        .tables
        .iter()
        .map(|t| ListItem::new(t.as_str()))
        .collect();
    let table_title = match &state.selected_db {
        Some(db) => format!(" Tables of {} ", db),
        None => String::from(" Tables "),
    };
    f.render_widget(
        List::new(tables).block(Block::default().borders(Borders::ALL).title(table_title)),
        chunks[1],
    );
}

fn draw_table_view(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(6)])
        .split(area);

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(chunks[0]);

    // Tables with their selection state
    let tables: Vec<(String, bool)> = state
        .tables
        .iter()
        .map(|t| {
            let selected = state
                .selected_dbs_tables
                .iter()
                .any(|p| Some(p.db.as_str()) == state.selected_db.as_deref() && p.table == *t);
            (t.clone(), selected)
        })
        .collect();
    f.render_widget(
        ui::render_check_list(
            &tables,
            " Tables (Space: toggle) ",
            state.table_row,
            state.pane == Pane::Tables,
        ),
        lists[0],
    );

    // Column universe with the live selection
    let columns: Vec<(String, bool)> = state
        .columns
        .iter()
        .map(|c| (c.clone(), state.selected_columns.contains(c)))
        .collect();
    f.render_widget(
        ui::render_check_list(
            &columns,
            " Columns (a: all, c: clear) ",
            state.column_row,
            state.pane == Pane::Columns,
        ),
        lists[1],
    );

    // Ids
    let ids: Vec<(String, bool)> = state
        .ids
        .iter()
        .map(|i| (i.clone(), state.selected_ids.contains(i)))
        .collect();
    f.render_widget(
        ui::render_check_list(&ids, " IDs ", state.id_row, state.pane == Pane::Ids),
        lists[2],
    );

    draw_selection_summary(f, state, chunks[1]);
}

fn draw_selection_summary(f: &mut Frame, state: &RenderState, area: Rect) {
    let range = format!(
        "{} .. {}",
        state.date_range.start.as_deref().unwrap_or("-"),
        state.date_range.end.as_deref().unwrap_or("-"),
    );
    let export_range = format!(
        "{} .. {}",
        state.export_date.start.as_deref().unwrap_or("-"),
        state.export_date.end.as_deref().unwrap_or("-"),
    );
    let mut lines = vec![
        Line::from(format!(
            "Dates: {}  interval: {}  type: {}",
            range,
            state.selected_interval,
            state.date_type.as_deref().unwrap_or("-"),
        )),
        Line::from(format!(
            "Export: {}  interval: {}  -> {}/{}.{}",
            export_range, state.export_interval, state.export.path, state.export.filename,
            state.export.format,
        )),
        Line::from(format!(
            "Export options: data [{}]  stats [{}]",
            if state.export.options.data { "x" } else { " " },
            if state.export.options.stats { "x" } else { " " },
        )),
    ];

    if state.input_mode == InputMode::Editing {
        let target = match state.edit_target {
            Some(EditTarget::DateStart) => "date start",
            Some(EditTarget::DateEnd) => "date end",
            Some(EditTarget::ExportDateStart) => "export date start",
            Some(EditTarget::ExportDateEnd) => "export date end",
            Some(EditTarget::ExportPath) => "export path",
            Some(EditTarget::ExportFilename) => "export filename",
            None => "",
        };
        lines.push(Line::from(Span::styled(
            format!("Editing {}: {}", target, state.edit_buffer),
            Style::default().fg(Color::Yellow),
        )));
    }

    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Selection ")),
        area,
    );
}

fn draw_graph_view(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Columns with their axis binding
    let items: Vec<ListItem> = state
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let marker = if *c == state.x_axis {
                "x"
            } else if state.y_axis.contains(c) {
                "y"
            } else {
                " "
            };
            let style = if i == state.column_row {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default()
            };
            ListItem::new(format!("[{}] {}", marker, c)).style(style)
        })
        .collect();
    f.render_widget(
        List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Axes (x: x-axis, y: y-axis) "),
        ),
        chunks[0],
    );

    let meta = vec![
        Line::from(format!("Graph type: {}", state.graph_type)),
        Line::from(format!("X axis: {}", state.x_axis)),
        Line::from(format!("Y axes: {}", state.y_axis.join(", "))),
        Line::from(format!(
            "Zoom: {:.0}% .. {:.0}%",
            state.current_zoom_start, state.current_zoom_end
        )),
        Line::from(format!("Plotted: {}", state.selected_columns.join(", "))),
    ];
    f.render_widget(
        Paragraph::new(meta)
            .block(Block::default().borders(Borders::ALL).title(" Plot "))
            .wrap(Wrap { trim: false }),
        chunks[1],
    );
}

fn draw_map_view(f: &mut Frame, state: &RenderState, area: Rect) {
    let folders: Vec<(String, bool)> = state
        .databases
        .iter()
        .filter(|e| e.kind == EntryKind::Folder)
        .map(|e| (e.name.clone(), state.selected_geo_folders.contains(&e.name)))
        .collect();
    f.render_widget(
        ui::render_check_list(
            &folders,
            " Geo folders (Space: toggle) ",
            state.entry_row,
            true,
        ),
        area,
    );
}

fn draw_placeholder_view(f: &mut Frame, state: &RenderState, area: Rect) {
    let text = format!(
        "{} is handled by the backend and has no terminal view yet.",
        state.route.title()
    );
    f.render_widget(
        Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(format!(
                " {} ",
                state.route.title()
            )))
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn draw_help_view(f: &mut Frame, area: Rect) {
    let help_text = r#"
 BASINVIEW - Keyboard Shortcuts

 NAVIGATION
   1-8 / Left / Right   Switch view
   Tab / Shift+Tab      Switch pane
   Up / Down            Move in list

 PROJECT
   Enter                Open database
   r                    Refresh project listing

 TABLE
   Space                Toggle table / column / id
   a / c                Select all columns / clear
   i / I                Cycle view / export interval
   d / D  [ / ]         Edit date bounds (view / export)
   e / s / f            Export data / stats / format
   p / o                Edit export path / filename

 GRAPH
   x / y                Bind x axis / toggle y axis
   g                    Cycle graph type
   + / -                Zoom in / out

 GENERAL
   n / m                Dismiss / clear notices
   t                    Toggle theme
   q / Ctrl+C           Quit
"#;
    f.render_widget(
        Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL).title(" Help "))
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn draw_notices(f: &mut Frame, state: &RenderState, area: Rect) {
    if area.height == 0 {
        return;
    }
    let lines: Vec<Line> = state
        .messages
        .iter()
        .take(area.height as usize)
        .map(|m| {
            Line::from(Span::styled(
                format!("[{}] {}", m.kind.as_str(), m.text),
                Style::default().fg(notice_color(m.kind)),
            ))
        })
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.is_loading {
        " Loading... "
    } else if state.input_mode == InputMode::Editing {
        " Esc/Enter: commit | arrows: move cursor "
    } else {
        " Tab: pane | Space: toggle | Enter: open | ?: help | q: quit "
    };
    f.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
