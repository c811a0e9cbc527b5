use std::path::Path;

use anyhow::{Context, Result, bail};
use image::{Rgba, RgbaImage};

use crate::color::slice_rgba;
use crate::data::compare::{Comparison, PanelFrame};

/// Gap between panels in exported images, in pixels.
const PANEL_GAP: u32 = 4;

// ---------------------------------------------------------------------------
// Slice PNG
// ---------------------------------------------------------------------------

/// Compose the current panels into one image laid out like the viewer grid.
/// Panels share the slice shape, so every cell has the same size.
pub fn compose_frames(frames: &[PanelFrame], grid: (usize, usize)) -> RgbaImage {
    let (rows, cols) = grid;
    let (cell_w, cell_h) = frames
        .first()
        .map(|f| (f.slice.cols as u32, f.slice.rows as u32))
        .unwrap_or((0, 0));

    let width = cols as u32 * cell_w + (cols as u32).saturating_sub(1) * PANEL_GAP;
    let height = rows as u32 * cell_h + (rows as u32).saturating_sub(1) * PANEL_GAP;
    let mut out = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));

    for (n, frame) in frames.iter().enumerate() {
        let x0 = (n % cols) as u32 * (cell_w + PANEL_GAP);
        let y0 = (n / cols) as u32 * (cell_h + PANEL_GAP);
        let pixels = slice_rgba(&frame.slice, &frame.stats);
        for (p, color) in pixels.iter().enumerate() {
            let x = x0 + (p % frame.slice.cols) as u32;
            let y = y0 + (p / frame.slice.cols) as u32;
            out.put_pixel(x, y, Rgba(color.to_srgba_unmultiplied()));
        }
    }
    out
}

pub fn export_slice_png(path: &Path, frames: &[PanelFrame], grid: (usize, usize)) -> Result<()> {
    let image = compose_frames(frames, grid);
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported {}x{} slice image to {}", image.width(), image.height(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Write per-slice, per-panel statistics. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – one header row, one row per (slice, panel)
/// * `.json` – `[{ "slice": 0, "panel": "D1", ... }, ...]`
pub fn export_stats(path: &Path, comparison: &Comparison) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = comparison.stats_records()?;

    match ext.as_str() {
        "csv" => {
            let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
            for record in &records {
                writer.serialize(record).context("writing CSV row")?;
            }
            writer.flush().context("flushing CSV")?;
        }
        "json" => {
            let file = std::fs::File::create(path).context("creating JSON file")?;
            serde_json::to_writer_pretty(std::io::BufWriter::new(file), &records)
                .context("writing JSON")?;
        }
        other => bail!("Unsupported file extension: .{other}"),
    }

    log::info!("Exported {} statistics rows to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::viridis;
    use crate::data::model::{Series, Shape, Volume};

    fn ramp_grid() -> Comparison {
        let shape = Shape::new(2, 3, 2);
        let series = std::array::from_fn(|n| {
            Series::new(
                Volume::from_fn(shape, |i, j, k| (i * 3 + j + k + n) as f32),
                format!("s{n}"),
            )
        });
        Comparison::grid(series).unwrap()
    }

    #[test]
    fn test_compose_grid_geometry() {
        let cmp = ramp_grid();
        let frames = cmp.frames(0).unwrap();
        let image = compose_frames(&frames, cmp.grid_size());

        assert_eq!(image.dimensions(), (3 * 3 + 2 * PANEL_GAP, 3 * 2 + 2 * PANEL_GAP));
        // gap stays white
        assert_eq!(image.get_pixel(3, 0), &Rgba([255, 255, 255, 255]));
        // top-left sample of the first panel is its minimum
        let low = viridis(0.0);
        assert_eq!(image.get_pixel(0, 0), &Rgba([low.r(), low.g(), low.b(), 255]));
    }

    #[test]
    fn test_export_stats_csv_and_json() {
        let cmp = ramp_grid();
        let dir = std::env::temp_dir();
        let stem = format!("perlin-diff-stats-{}", std::process::id());

        let csv_path = dir.join(format!("{stem}.csv"));
        export_stats(&csv_path, &cmp).unwrap();
        let text = std::fs::read_to_string(&csv_path).unwrap();
        std::fs::remove_file(&csv_path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("slice,panel,title,mean,std,mean_abs,max_abs"));
        assert_eq!(lines.count(), 2 * 9);

        let json_path = dir.join(format!("{stem}.json"));
        export_stats(&json_path, &cmp).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        std::fs::remove_file(&json_path).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 18);
        assert_eq!(rows[2]["panel"], "D1 - D2");
        assert_eq!(rows[2]["max_abs"], 1.0);
    }

    #[test]
    fn test_export_stats_rejects_unknown_extension() {
        let path = std::env::temp_dir().join("perlin-diff-stats.txt");
        let err = export_stats(&path, &ramp_grid()).unwrap_err();
        assert!(err.to_string().contains(".txt"));
    }
}
