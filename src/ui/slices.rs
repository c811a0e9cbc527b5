use eframe::egui::{self, RichText, TextureHandle, TextureOptions, Ui, Vec2};

use crate::color::slice_image;
use crate::state::ViewerState;

/// Space reserved under each image for its caption.
const CAPTION_HEIGHT: f32 = 36.0;
const CAPTION_SIZE: f32 = 11.0;

// ---------------------------------------------------------------------------
// Texture cache
// ---------------------------------------------------------------------------

/// Upload the current frames as textures if they changed since last time.
pub fn sync_textures(ctx: &egui::Context, state: &mut ViewerState, textures: &mut Vec<TextureHandle>) {
    if !std::mem::take(&mut state.frames_changed) && textures.len() == state.frames.len() {
        return;
    }
    *textures = state
        .frames
        .iter()
        .enumerate()
        .map(|(n, frame)| {
            // Nearest filtering keeps sample boundaries crisp.
            ctx.load_texture(
                format!("panel_{n}"),
                slice_image(&frame.slice, &frame.stats),
                TextureOptions::NEAREST,
            )
        })
        .collect();
}

// ---------------------------------------------------------------------------
// Panel grid (central panel)
// ---------------------------------------------------------------------------

/// Render the panel grid: each cell is a colour-mapped slice with its
/// caption above it.
pub fn panel_grid(ui: &mut Ui, state: &ViewerState, textures: &[TextureHandle]) {
    let (rows, cols) = state.comparison.grid_size();
    let shape = state.comparison.shape();
    let spacing = ui.spacing().item_spacing;

    let avail = ui.available_size();
    let cell = Vec2::new(
        (avail.x - spacing.x * (cols as f32 - 1.0)) / cols as f32,
        (avail.y - spacing.y * (rows as f32 - 1.0)) / rows as f32 - CAPTION_HEIGHT,
    );
    let image_size = fit_equal_aspect(cell, shape.cols, shape.rows);

    egui::Grid::new("slice_panels")
        .num_columns(cols)
        .spacing(spacing)
        .show(ui, |ui: &mut Ui| {
            for (n, (frame, texture)) in state.frames.iter().zip(textures).enumerate() {
                ui.vertical(|ui: &mut Ui| {
                    ui.set_width(cell.x);
                    ui.add_sized(
                        [cell.x, CAPTION_HEIGHT],
                        egui::Label::new(RichText::new(&frame.caption).size(CAPTION_SIZE)),
                    );
                    ui.add(egui::Image::from_texture(texture).fit_to_exact_size(image_size))
                        .on_hover_text(frame.source.label());
                });
                if (n + 1) % cols == 0 {
                    ui.end_row();
                }
            }
        });
}

/// Largest `width × height` rectangle with the image's aspect that fits in `cell`.
pub fn fit_equal_aspect(cell: Vec2, width: usize, height: usize) -> Vec2 {
    if width == 0 || height == 0 || cell.x <= 0.0 || cell.y <= 0.0 {
        return Vec2::ZERO;
    }
    let scale = (cell.x / width as f32).min(cell.y / height as f32);
    Vec2::new(width as f32 * scale, height as f32 * scale)
}
