//! App actor - message loop processing UI events and gateway responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::constants::NOTICE_TICK;
use crate::messages::{GatewayCommand, GatewayResponse, RenderState, UiEvent};

/// App actor that processes UI events and gateway responses
pub struct AppActor {
    state: AppState,
    gateway_tx: mpsc::UnboundedSender<GatewayCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        gateway_tx: mpsc::UnboundedSender<GatewayCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(),
            gateway_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut gw_rx: mpsc::UnboundedReceiver<GatewayResponse>,
    ) {
        // Kick off the initial project listing and send the first frame
        let cmd = self.state.prepare_fetch_projects();
        let _ = self.gateway_tx.send(cmd);
        let _ = self.render_tx.send(self.state.to_render_state());

        let mut tick = tokio::time::interval(NOTICE_TICK);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.gateway_tx.send(GatewayCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = gw_rx.recv() => {
                    self.state.handle_gateway_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                _ = tick.tick() => {
                    if !self.state.messages.is_empty() {
                        self.state.tick_messages(NOTICE_TICK);
                        let _ = self.render_tx.send(self.state.to_render_state());
                    }
                }
                else => break,
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // View navigation
            UiEvent::SwitchRoute(route) => self.state.switch_route(route),
            UiEvent::NextRoute => self.state.next_route(),
            UiEvent::PrevRoute => self.state.prev_route(),
            UiEvent::NextPane => self.state.next_pane(),
            UiEvent::PrevPane => self.state.prev_pane(),
            UiEvent::NextItem => self.state.next_item(),
            UiEvent::PrevItem => self.state.prev_item(),

            // Selection
            UiEvent::ToggleItem => {
                if let Some(cmd) = self.state.toggle_item() {
                    let _ = self.gateway_tx.send(cmd);
                }
            }
            UiEvent::OpenEntry => {
                if let Some(cmd) = self.state.open_entry() {
                    let _ = self.gateway_tx.send(cmd);
                }
            }
            UiEvent::SelectAllColumns => self.state.select_all_columns(),
            UiEvent::ClearColumns => self.state.clear_columns(),

            // Plot axes
            UiEvent::SetXAxis => self.state.set_x_from_highlight(),
            UiEvent::ToggleYAxis => self.state.toggle_y_from_highlight(),
            UiEvent::CycleGraphType => self.state.cycle_graph_type(),
            UiEvent::ZoomIn => self.state.zoom_in(),
            UiEvent::ZoomOut => self.state.zoom_out(),

            // Temporal granularity
            UiEvent::CycleInterval => self.state.cycle_interval(),
            UiEvent::CycleExportInterval => self.state.cycle_export_interval(),

            // Export configuration
            UiEvent::ToggleExportData => self.state.toggle_export_data(),
            UiEvent::ToggleExportStats => self.state.toggle_export_stats(),
            UiEvent::CycleExportFormat => self.state.cycle_export_format(),

            // Field editing
            UiEvent::StartEditing(target) => self.state.start_editing(target),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Notices
            UiEvent::DismissNotice => self.state.dismiss_notice(),
            UiEvent::ClearNotices => self.state.clear_messages(),

            // Misc
            UiEvent::RefreshProjects => {
                let cmd = self.state.prepare_fetch_projects();
                let _ = self.gateway_tx.send(cmd);
            }
            UiEvent::CycleTheme => {
                let next = self.state.theme.next();
                self.state.set_theme(next);
            }

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
