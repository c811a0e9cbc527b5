use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::fileset::FileSet;
use crate::export;
use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open file set…").clicked() {
                open_file_set_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Export slice…").clicked() {
                export_slice_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export statistics…").clicked() {
                export_stats_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} series, shape {}",
            state.comparison.series().len(),
            state.comparison.shape()
        ));

        ui.separator();

        if ui.selectable_label(state.show_stats, "Statistics").clicked() {
            state.show_stats = !state.show_stats;
        }
        if ui.selectable_label(state.show_profile, "Deviation profile").clicked() {
            state.show_profile = !state.show_profile;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Bottom panel – slice slider
// ---------------------------------------------------------------------------

/// Render the `D.z` slider.
pub fn slice_slider(ui: &mut Ui, state: &mut ViewerState) {
    let mut index = state.slider.index();
    let max = state.slider.max();
    let mut changed = false;

    ui.horizontal(|ui: &mut Ui| {
        ui.spacing_mut().slider_width = (ui.available_width() - 80.0).max(100.0);
        changed = ui
            .add(
                egui::Slider::new(&mut index, 0..=max)
                    .text("D.z")
                    .step_by(1.0),
            )
            .changed();
    });

    if changed {
        state.slider.set(index);
    }
}

// ---------------------------------------------------------------------------
// Right side panel – statistics table
// ---------------------------------------------------------------------------

/// Per-panel numbers for the current slice.
pub fn stats_panel(ui: &mut Ui, state: &ViewerState) {
    ui.heading(format!("Slice {}", state.slider.index()));
    ui.separator();

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(70.0))
        .columns(Column::auto().at_least(60.0), 4)
        .header(20.0, |mut header| {
            for name in ["panel", "mean", "std", "<|x|>", "max |x|"] {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for frame in &state.frames {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(frame.source.label());
                    });
                    for value in [
                        frame.stats.mean,
                        frame.stats.std,
                        frame.stats.mean_abs,
                        frame.stats.max_abs as f64,
                    ] {
                        row.col(|ui| {
                            ui.monospace(format!("{value:.4e}"));
                        });
                    }
                });
            }
        });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_set_dialog(state: &mut ViewerState) {
    let file = rfd::FileDialog::new()
        .set_title("Open any member of a file set")
        .add_filter("Noise dumps", &["bin"])
        .pick_file();

    let Some(path) = file else {
        return;
    };

    match FileSet::from_member(&path).and_then(|set| Ok((set.load()?, set))) {
        Ok((comparison, set)) => {
            log::info!("Loaded file set {set} with shape {}", comparison.shape());
            state.set_comparison(comparison, Some(set));
        }
        Err(e) => state.record_outcome("load file set", Err(e)),
    }
}

pub fn export_slice_dialog(state: &mut ViewerState) {
    let file = rfd::FileDialog::new()
        .set_title("Export slice as PNG")
        .set_file_name(format!("slice_{:03}.png", state.slider.index()))
        .add_filter("PNG", &["png"])
        .save_file();

    if let Some(path) = file {
        let grid = state.comparison.grid_size();
        let result = export::export_slice_png(&path, &state.frames, grid);
        state.record_outcome("export slice", result);
    }
}

pub fn export_stats_dialog(state: &mut ViewerState) {
    let file = rfd::FileDialog::new()
        .set_title("Export statistics")
        .set_file_name("stats.csv")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        let result = export::export_stats(&path, &state.comparison);
        state.record_outcome("export statistics", result);
    }
}
