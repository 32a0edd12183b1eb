// livetail - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the search bar, log view, status bar, and the stream
// lifecycle (subscription, reconnect countdown, debounce promotion).

use crate::app::state::AppState;
use crate::app::stream::StreamManager;
use crate::core::model::StreamEvent;
use crate::ui;
use crate::util::constants::{MAX_STREAM_MESSAGES_PER_FRAME, STREAM_REPAINT_INTERVAL_MS};
use std::time::{Duration, Instant};

/// The livetail application.
pub struct LivetailApp {
    pub state: AppState,
    pub stream_manager: StreamManager,
}

impl LivetailApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            stream_manager: StreamManager::new(),
        }
    }
}

impl eframe::App for LivetailApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Open the subscription on the first frame. The manager owns the
        // only live subscription; a restart always replaces the old one.
        if !self.stream_manager.is_active() {
            self.stream_manager.start(&self.state.endpoint);
        }

        // Drain stream events with a per-frame budget so a burst cannot
        // stall the render loop.
        let events = self.stream_manager.poll_events(MAX_STREAM_MESSAGES_PER_FRAME);
        let mut appended = false;
        for ev in events {
            match ev {
                StreamEvent::Connected { url } => {
                    self.state.connected = true;
                    self.state.retry_secs_remaining = None;
                    self.state.retry_notice = None;
                    self.state.status_message = format!("Connected to {url}.");
                }
                StreamEvent::Entry { entry } => {
                    self.state.entries.push(entry);
                    appended = true;
                }
                StreamEvent::ParseError { reason } => {
                    self.state.parse_error_count += 1;
                    if self.state.debug_mode {
                        self.state.status_message = format!("Skipped bad event: {reason}");
                    }
                }
                StreamEvent::Disconnected { reason } => {
                    self.state.connected = false;
                    self.state.status_message = format!("Disconnected: {reason}");
                }
                StreamEvent::RetryCountdown { secs_remaining } => {
                    self.state.retry_secs_remaining = Some(secs_remaining);
                    // Re-surface the notice every tick, even if dismissed.
                    self.state.retry_notice =
                        Some(format!("Disconnected, retrying in {secs_remaining}..."));
                }
            }
        }
        if appended {
            self.state.apply_filter();
            self.state.scroll_to_bottom = true;
        }

        // Promote the debounced query once the quiet period has elapsed;
        // keep repainting while a promotion is pending so it fires promptly.
        self.state.tick_debounce(Instant::now());
        if self.state.debounce_pending() {
            ctx.request_repaint_after(Duration::from_millis(25));
        }

        // The stream delivers between input events; poll it on a timer.
        ctx.request_repaint_after(Duration::from_millis(STREAM_REPAINT_INTERVAL_MS));

        // Reconnect countdown notice — dismissible, re-shown each tick.
        if self.state.retry_notice.is_some() {
            egui::TopBottomPanel::top("retry_notice").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let text = self.state.retry_notice.as_deref().unwrap_or_default();
                    ui.colored_label(ui.visuals().warn_fg_color, text);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("\u{2715}").clicked() {
                            self.state.retry_notice = None;
                        }
                    });
                });
            });
        }

        // Status bar.
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.state.connected {
                    ui.label(
                        egui::RichText::new(" \u{25cf} LIVE ")
                            .strong()
                            .color(egui::Color32::from_rgb(34, 197, 94)) // Green 500
                            .background_color(egui::Color32::from_rgba_premultiplied(
                                34, 197, 94, 30,
                            )),
                    );
                    ui.separator();
                }
                ui.label(&self.state.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let total = self.state.entries.len();
                    let filtered = self.state.filtered_indices.len();
                    if total > 0 {
                        ui.label(format!("{filtered}/{total} entries"));
                    }
                    if self.state.parse_error_count > 0 {
                        ui.separator();
                        ui.label(format!("{} bad events", self.state.parse_error_count));
                    }
                });
            });
        });

        // Search bar above the status bar.
        egui::TopBottomPanel::bottom("search_bar").show(ctx, |ui| {
            ui::panels::search::render(ui, &mut self.state);
        });

        // Central panel: the log list.
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::log_view::render(ui, &mut self.state);
        });
    }

    /// Called by eframe when the application window is about to close.
    ///
    /// Stops the stream worker so it does not outlive the window.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.stream_manager.stop();
    }
}
