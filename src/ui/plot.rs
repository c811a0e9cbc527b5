use eframe::egui::{self, Ui};
use egui_plot::{Line, Plot, PlotPoints, VLine};

use crate::color::line_color;
use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Deviation profile (floating window)
// ---------------------------------------------------------------------------

/// Show `max(|Da - Db|)` against slice index for every implementation pair,
/// with a marker at the current slice.
pub fn profile_window(ctx: &egui::Context, state: &mut ViewerState) {
    let mut open = state.show_profile;
    egui::Window::new("Deviation profile")
        .open(&mut open)
        .default_size([480.0, 300.0])
        .show(ctx, |ui: &mut Ui| {
            if state.profiles.is_empty() {
                ui.label("Single-series view has no pairs to compare.");
                return;
            }

            let current = state.slider.index() as f64;

            Plot::new("deviation_profile")
                .legend(egui_plot::Legend::default())
                .x_axis_label("D.z")
                .y_axis_label("max |Δ|")
                .allow_boxed_zoom(true)
                .allow_drag(true)
                .allow_scroll(true)
                .allow_zoom(true)
                .show(ui, |plot_ui| {
                    for (i, profile) in state.profiles.iter().enumerate() {
                        let points: PlotPoints = profile
                            .max_abs
                            .iter()
                            .enumerate()
                            .map(|(k, &v)| [k as f64, v as f64])
                            .collect();

                        plot_ui.line(
                            Line::new(points)
                                .name(&profile.label)
                                .color(line_color(i))
                                .width(1.5),
                        );
                    }
                    plot_ui.vline(VLine::new(current).color(egui::Color32::GRAY));
                });
        });
    state.show_profile = open;
}
