use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

const NOTES: [&str; 3] = [
    "Note: the data is from Census 2011 and has not been updated since then.",
    "Each row is one district.",
    "The table shows the first rows only; tick \"Show raw data\" for all of them.",
];

const ABOUT: &str = "This project previews India's 2011 Census data, one row per \
district, with population, literacy, sex ratio, SC/ST and household columns.\n\n\
Data source: Census 2011.";

// ---------------------------------------------------------------------------
// Left side panel – notes and view options
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading(&state.config.page_title);
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for note in NOTES {
                ui.label(note);
            }
            ui.add_space(4.0);

            egui::CollapsingHeader::new(RichText::new("About this project").strong())
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    ui.label(ABOUT);
                });
            ui.separator();

            if state.dataset.is_none() {
                ui.label("No dataset loaded.");
                return;
            }

            let mut show_raw = state.show_raw_data;
            if ui.checkbox(&mut show_raw, "Show raw data").changed() {
                state.toggle_raw_data();
            }
            ui.separator();

            // ---- Ranking column for the top-N table ----
            let Some(summary) = &state.summary else {
                return;
            };
            let columns: Vec<String> = summary.numeric_columns().map(str::to_string).collect();
            if columns.is_empty() {
                return;
            }

            ui.strong(format!("Top {} districts by", state.config.top_n));
            let current = state.top_column.clone().unwrap_or_default();
            let mut picked = None;
            egui::ComboBox::from_id_salt("top_column")
                .selected_text(&current)
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &columns {
                        if ui.selectable_label(current == *col, col).clicked() {
                            picked = Some(col.clone());
                        }
                    }
                });
            if let Some(col) = picked {
                state.set_top_column(col);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the status bar above the table.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new(state.config.data_path.display().to_string()).monospace());
        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!("{} rows × {} columns", ds.len(), ds.column_count()));
        }

        if let Some(err) = &state.error {
            ui.label(RichText::new(format!("{}: {err}", err.kind())).color(Color32::RED));
        }
    });
}
