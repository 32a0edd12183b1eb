// livetail - ui/panels/log_view.rs
//
// Virtual-scrolling log list (central area).
//
// Uses egui's `ScrollArea::show_rows` which renders only the rows currently
// visible in the viewport, giving O(1) rendering cost regardless of buffer
// size. The view sticks to the newest entry; a pending scroll_to_bottom
// request (new entry or debounce promotion) re-sticks it even if the user
// had scrolled away.
//
// Each row is a LayoutJob that colours only the level tag with the
// level-specific hue; timestamp and message body use the theme's
// high-contrast foreground so Error/Fatal rows stay readable.

use crate::app::state::AppState;
use crate::ui::theme;
use egui::text::{LayoutJob, TextFormat};

/// Render the log list panel.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let filtered = state.filtered_indices.len();

    if filtered == 0 {
        ui.centered_and_justified(|ui| {
            if state.entries.is_empty() {
                ui.label("Waiting for log entries...");
            } else {
                ui.label("No entries match the current search.");
            }
        });
        return;
    }

    let row_height = theme::ROW_HEIGHT;

    let mut scroll = egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .stick_to_bottom(true);
    if std::mem::take(&mut state.scroll_to_bottom) {
        // Force back to the newest entry even after the user scrolled away.
        scroll = scroll.vertical_scroll_offset(f32::MAX);
    }

    scroll.show_rows(ui, row_height, filtered, |ui, row_range| {
        for display_idx in row_range {
            let Some(&entry_idx) = state.filtered_indices.get(display_idx) else {
                continue;
            };
            let Some(entry) = state.entries.get(entry_idx) else {
                continue;
            };

            let font = egui::FontId::monospace(theme::MONO_FONT_SIZE);
            let body_colour = ui.visuals().strong_text_color();
            let ts = entry.timestamp.format("%H:%M:%S%.3f").to_string();
            let first_line = entry.message.lines().next().unwrap_or(&entry.message);

            let mut row_job = LayoutJob::default();
            row_job.append(
                &format!("{ts} "),
                0.0,
                TextFormat {
                    font_id: font.clone(),
                    color: body_colour,
                    ..Default::default()
                },
            );
            row_job.append(
                &format!("[{:<7}] ", entry.level.label()),
                0.0,
                TextFormat {
                    font_id: font.clone(),
                    color: theme::level_colour(entry.level),
                    ..Default::default()
                },
            );
            row_job.append(
                first_line,
                0.0,
                TextFormat {
                    font_id: font,
                    color: body_colour,
                    ..Default::default()
                },
            );

            let response = ui.label(row_job);

            // Full timestamp and complete message on hover.
            response.on_hover_ui(|ui| {
                ui.label(entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f UTC").to_string());
                if entry.message.lines().count() > 1 {
                    ui.label(egui::RichText::new(&entry.message).monospace().small());
                }
            });
        }
    });
}
