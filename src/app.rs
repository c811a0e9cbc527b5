use eframe::egui::{self, TextureHandle};

use crate::state::ViewerState;
use crate::ui::{input, panels, plot, slices};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PerlinDiffApp {
    pub state: ViewerState,
    textures: Vec<TextureHandle>,
    title: String,
}

impl PerlinDiffApp {
    pub fn new(state: ViewerState) -> Self {
        let title = state.title();
        Self {
            state,
            textures: Vec::new(),
            title,
        }
    }
}

impl eframe::App for PerlinDiffApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Keyboard: arrows move the slider, Escape closes ----
        if input::handle_keys(ctx, &mut self.state.slider) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: slice slider ----
        egui::TopBottomPanel::bottom("slider_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            panels::slice_slider(ui, &mut self.state);
            ui.add_space(4.0);
        });

        // A file set opened from the menu changes the title.
        let title = self.state.title();
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }

        self.state.refresh_frames();
        slices::sync_textures(ctx, &mut self.state, &mut self.textures);

        // ---- Right side panel: statistics ----
        if self.state.show_stats {
            egui::SidePanel::right("stats_panel")
                .default_width(360.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::stats_panel(ui, &self.state);
                });
        }

        if self.state.show_profile {
            plot::profile_window(ctx, &mut self.state);
        }

        // ---- Central panel: slice grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            slices::panel_grid(ui, &self.state, &self.textures);
        });
    }
}
