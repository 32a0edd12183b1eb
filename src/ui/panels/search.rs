// livetail - ui/panels/search.rs
//
// Search bar: mode selector (fuzzy/regex) plus query input.
//
// A keystroke only restamps the debounce clock; the query is applied by
// the update loop once the quiet period elapses. Switching modes
// re-filters immediately since no index/regex rebuild races a keystroke.

use crate::app::state::AppState;
use crate::core::model::SearchMode;

/// Render the search bar.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        let mut mode_changed = false;
        egui::ComboBox::from_id_salt("search_mode")
            .selected_text(state.search_mode.label())
            .width(80.0)
            .show_ui(ui, |ui| {
                for mode in SearchMode::all() {
                    if ui
                        .selectable_value(&mut state.search_mode, *mode, mode.label())
                        .changed()
                    {
                        mode_changed = true;
                    }
                }
            });

        let response = ui.add(
            egui::TextEdit::singleline(&mut state.search_query)
                .hint_text("Search")
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            state.note_query_edit();
        }

        if mode_changed {
            state.apply_filter();
            state.scroll_to_bottom = true;
        }
    });
}
