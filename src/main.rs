mod app;
mod color;
mod data;
mod export;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use app::PerlinDiffApp;
use clap::Parser;
use eframe::egui;

use data::compare::Comparison;
use data::fileset::FileSet;
use data::loader::load_volume;
use data::model::Series;
use state::ViewerState;

#[derive(Parser, Debug)]
#[command(name = "perlin-diff")]
#[command(about = "Compare glm and cglm Perlin noise dumps slice by slice")]
struct Args {
    /// Selects the file set `{glm,cglm}_vec{4,3,2}_{suffix}.bin`.
    #[arg(long, default_value = "perlin")]
    suffix: String,

    /// Directory holding the file set.
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// View a single dump instead of the six-file comparison.
    #[arg(long, conflicts_with = "suffix")]
    single: Option<PathBuf>,
}

impl Args {
    /// Load and validate everything before the window opens.
    fn load(&self) -> Result<ViewerState> {
        if let Some(path) = &self.single {
            let volume = load_volume(path)?;
            let title = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            return Ok(ViewerState::new(
                Comparison::single(Series::new(volume, title)),
                None,
            ));
        }

        let set = FileSet::new(&self.dir, &self.suffix);
        let comparison = set.load()?;
        log::info!("Loaded file set {set} with shape {}", comparison.shape());
        Ok(ViewerState::new(comparison, Some(set)))
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let state = args.load()?;
    let title = state.title();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 960.0])
            .with_min_inner_size([480.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(PerlinDiffApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running viewer: {e}"))
}
