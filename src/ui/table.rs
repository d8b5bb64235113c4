use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use census_preview::preview::Preview;
use census_preview::summary::{format_thousands, CorrelationMatrix, Summary, TopEntry};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 22.0;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the preview table and the summary, or the load error.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    if let Some(err) = &state.error {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(
                RichText::new(format!("{}\n\n{err}", err.kind()))
                    .heading()
                    .color(Color32::RED),
            );
        });
        return;
    }

    let Some(table) = state.visible_table() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No dataset loaded.");
        });
        return;
    };

    ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(if state.show_raw_data { "Raw Data" } else { "Preview" });
            ui.push_id("data_table", |ui: &mut Ui| preview_table(ui, table));
            ui.label(RichText::new(table.caption()).weak());

            if let Some(summary) = &state.summary {
                ui.add_space(12.0);
                summary_section(ui, state, summary);
            }
        });
}

/// Header plus rows of a [`Preview`], read-only.
fn preview_table(ui: &mut Ui, table: &Preview) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .columns(TableColumn::auto().at_least(48.0), table.columns.len())
        .header(HEADER_HEIGHT, |mut header| {
            for name in table.headers() {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, table.rows.len(), |mut row| {
                let cells = &table.rows[row.index()];
                for cell in cells {
                    row.col(|ui| {
                        ui.label(cell.to_string());
                    });
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

fn summary_section(ui: &mut Ui, state: &AppState, summary: &Summary) {
    ui.heading("Summary for Overall India");
    let m = &summary.metrics;
    ui.columns(3, |cols| {
        metric(
            &mut cols[0],
            "Total Population",
            m.total_population
                .map(format_thousands)
                .unwrap_or_else(|| "–".into()),
        );
        metric(
            &mut cols[1],
            "Average Literacy Rate",
            m.mean_literacy_rate
                .map(|r| format!("{r:.2}%"))
                .unwrap_or_else(|| "–".into()),
        );
        metric(&mut cols[2], "Total Districts", m.districts.to_string());
    });
    ui.add_space(8.0);

    if let Some(col) = &state.top_column {
        ui.strong(format!("Top {} Districts by {col}", state.config.top_n));
        ui.push_id("top_table", |ui: &mut Ui| top_table(ui, col, &state.top_entries));
        ui.add_space(8.0);
    }

    egui::CollapsingHeader::new(RichText::new("Column profiles").strong())
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.push_id("profile_table", |ui: &mut Ui| profile_table(ui, summary));
        });

    egui::CollapsingHeader::new(RichText::new("Correlation (numerical columns)").strong())
        .default_open(false)
        .show(ui, |ui: &mut Ui| match &summary.correlation {
            Some(corr) => {
                ui.push_id("corr_table", |ui: &mut Ui| correlation_table(ui, corr));
            }
            None => {
                ui.label(
                    RichText::new("Not enough numerical columns for a correlation table.")
                        .color(Color32::YELLOW),
                );
            }
        });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(22.0).strong());
    });
}

fn top_table(ui: &mut Ui, column: &str, entries: &[TopEntry]) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(TableColumn::auto().at_least(160.0))
        .column(TableColumn::auto().at_least(100.0))
        .header(HEADER_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.strong("District");
            });
            header.col(|ui| {
                ui.strong(column);
            });
        })
        .body(|mut body| {
            for entry in entries {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.label(&entry.label);
                    });
                    row.col(|ui| {
                        ui.label(format_number(entry.value));
                    });
                });
            }
        });
}

fn profile_table(ui: &mut Ui, summary: &Summary) {
    const HEADERS: [&str; 6] = ["Column", "Type", "Non-null", "Min", "Max", "Mean"];

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .columns(TableColumn::auto().at_least(70.0), HEADERS.len())
        .header(HEADER_HEIGHT, |mut header| {
            for name in HEADERS {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, summary.profiles.len(), |mut row| {
                let p = &summary.profiles[row.index()];
                let opt = |v: Option<f64>| v.map(format_number).unwrap_or_default();
                let cells = [
                    p.name.clone(),
                    p.dtype.to_string(),
                    p.non_null.to_string(),
                    opt(p.min),
                    opt(p.max),
                    opt(p.mean),
                ];
                for text in cells {
                    row.col(|ui| {
                        ui.label(text);
                    });
                }
            });
        });
}

fn correlation_table(ui: &mut Ui, corr: &CorrelationMatrix) {
    let labels = corr.short_labels();

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .columns(TableColumn::auto().at_least(56.0), labels.len() + 1)
        .header(HEADER_HEIGHT, |mut header| {
            header.col(|_ui| {});
            for label in &labels {
                header.col(|ui| {
                    ui.strong(*label);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, labels.len(), |mut row| {
                let i = row.index();
                row.col(|ui| {
                    ui.strong(labels[i]);
                });
                for value in &corr.values[i] {
                    row.col(|ui| {
                        if value.is_nan() {
                            ui.label(RichText::new("NaN").weak());
                        } else {
                            ui.label(format!("{value:.2}"));
                        }
                    });
                }
            });
        });
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format_thousands(v as i64)
    } else {
        format!("{v:.2}")
    }
}
