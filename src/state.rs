use crate::data::compare::{Comparison, DeviationProfile, PanelFrame};
use crate::data::fileset::FileSet;

// ---------------------------------------------------------------------------
// Slider state
// ---------------------------------------------------------------------------

/// Slice index selected by the `D.z` slider, always within `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderState {
    index: usize,
    max: usize,
}

impl SliderState {
    /// Slider over `slices` slices, starting at 0.
    pub fn new(slices: usize) -> Self {
        SliderState {
            index: 0,
            max: slices.saturating_sub(1),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn set(&mut self, index: usize) {
        self.index = index.min(self.max);
    }

    /// Move by `delta` slices, clamped at both ends.
    pub fn nudge(&mut self, delta: i64) {
        let target = self.index as i64 + delta;
        self.index = target.clamp(0, self.max as i64) as usize;
    }
}

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// Everything the viewer shows, independent of rendering.
pub struct ViewerState {
    /// Validated series being compared.
    pub comparison: Comparison,

    /// Where the comparison was loaded from (None for single-file mode).
    pub file_set: Option<FileSet>,

    pub slider: SliderState,

    /// Panels for `frames_index`, recomputed when the slider moves.
    pub frames: Vec<PanelFrame>,
    frames_index: Option<usize>,

    /// Set whenever `frames` is replaced; the renderer clears it after
    /// uploading textures.
    pub frames_changed: bool,

    /// Max |Da - Db| per slice, computed once per comparison.
    pub profiles: Vec<DeviationProfile>,

    pub show_stats: bool,
    pub show_profile: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl ViewerState {
    pub fn new(comparison: Comparison, file_set: Option<FileSet>) -> Self {
        let slider = SliderState::new(comparison.slice_count());
        let profiles = comparison.deviation_profiles();
        let mut state = ViewerState {
            comparison,
            file_set,
            slider,
            frames: Vec::new(),
            frames_index: None,
            frames_changed: false,
            profiles,
            show_stats: false,
            show_profile: false,
            status_message: None,
        };
        state.refresh_frames();
        state
    }

    /// Swap in a newly loaded comparison, restarting at slice 0.
    pub fn set_comparison(&mut self, comparison: Comparison, file_set: Option<FileSet>) {
        *self = ViewerState {
            show_stats: self.show_stats,
            show_profile: self.show_profile,
            ..ViewerState::new(comparison, file_set)
        };
    }

    /// Recompute frames if the slider moved since the last call.
    pub fn refresh_frames(&mut self) {
        let index = self.slider.index();
        if self.frames_index == Some(index) {
            return;
        }
        match self.comparison.frames(index) {
            Ok(frames) => {
                log::debug!("Showing slice {index}");
                self.frames = frames;
                self.frames_index = Some(index);
                self.frames_changed = true;
            }
            Err(e) => {
                log::error!("Failed to slice at {index}: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Show the outcome of a user action: an error stays in the status bar
    /// until the next action succeeds.
    pub fn record_outcome(&mut self, action: &str, result: anyhow::Result<()>) {
        match result {
            Ok(()) => self.status_message = None,
            Err(e) => {
                log::error!("Failed to {action}: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Window title for the current comparison.
    pub fn title(&self) -> String {
        match &self.file_set {
            Some(set) => format!("perlin-diff – {set}"),
            None => "perlin-diff".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Series, Shape, Volume};

    #[test]
    fn test_nudge_clamps_at_zero() {
        let mut slider = SliderState::new(5);
        for _ in 0..20 {
            slider.nudge(-1);
        }
        assert_eq!(slider.index(), 0);
        slider.nudge(-10);
        assert_eq!(slider.index(), 0);
    }

    #[test]
    fn test_nudge_clamps_at_end() {
        let mut slider = SliderState::new(101);
        slider.nudge(10);
        assert_eq!(slider.index(), 10);
        for _ in 0..50 {
            slider.nudge(10);
        }
        assert_eq!(slider.index(), 100);
        slider.nudge(1);
        assert_eq!(slider.index(), 100);
        slider.nudge(-1);
        assert_eq!(slider.index(), 99);
    }

    #[test]
    fn test_set_clamps() {
        let mut slider = SliderState::new(4);
        slider.set(99);
        assert_eq!(slider.index(), 3);
        assert_eq!(slider.max(), 3);
    }

    #[test]
    fn test_refresh_only_on_change() {
        let series = Series::new(Volume::zeros(Shape::new(2, 2, 3)), "z");
        let mut state = ViewerState::new(Comparison::single(series), None);
        assert_eq!(state.frames.len(), 1);
        assert!(std::mem::take(&mut state.frames_changed));

        state.refresh_frames();
        assert!(!state.frames_changed);

        state.slider.nudge(1);
        state.refresh_frames();
        assert!(std::mem::take(&mut state.frames_changed));
        state.refresh_frames();
        assert!(!state.frames_changed);
    }

    #[test]
    fn test_success_clears_previous_error() {
        let series = Series::new(Volume::zeros(Shape::new(2, 2, 3)), "z");
        let mut state = ViewerState::new(Comparison::single(series), None);

        state.record_outcome("export statistics", Err(anyhow::anyhow!("disk full")));
        assert_eq!(state.status_message.as_deref(), Some("Error: disk full"));

        state.record_outcome("export slice", Ok(()));
        assert_eq!(state.status_message, None);
    }
}
