use serde::Serialize;

use super::error::DataError;
use super::model::{Series, Shape, Slice, SliceStats, max_abs};

// ---------------------------------------------------------------------------
// Panel layout
// ---------------------------------------------------------------------------

/// What a panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSource {
    /// Series `Dn` (zero-based index into the comparison).
    Series(usize),
    /// `Da - Db`.
    Difference(usize, usize),
}

impl PanelSource {
    /// Short symbolic name, e.g. `D1` or `D1 - D2`.
    pub fn label(self) -> String {
        match self {
            PanelSource::Series(i) => format!("D{}", i + 1),
            PanelSource::Difference(a, b) => format!("D{} - D{}", a + 1, b + 1),
        }
    }
}

/// Rendered content of one panel for one slice index.
#[derive(Debug, Clone)]
pub struct PanelFrame {
    pub source: PanelSource,
    pub caption: String,
    pub slice: Slice,
    pub stats: SliceStats,
}

/// One row of the statistics export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsRecord {
    pub slice: usize,
    pub panel: String,
    pub title: String,
    pub mean: f64,
    pub std: f64,
    pub mean_abs: f64,
    pub max_abs: f32,
}

/// `max(|Da - Db|)` for every slice of one implementation pair.
#[derive(Debug, Clone)]
pub struct DeviationProfile {
    pub label: String,
    pub max_abs: Vec<f32>,
}

// ---------------------------------------------------------------------------
// Comparison – validated set of series
// ---------------------------------------------------------------------------

/// A validated set of series sharing one shape: either a single series or
/// three rows of (reference, port) pairs.
#[derive(Debug, Clone)]
pub struct Comparison {
    series: Vec<Series>,
    shape: Shape,
    rows: usize,
    cols: usize,
}

impl Comparison {
    /// Single-panel viewer.
    pub fn single(series: Series) -> Self {
        let shape = series.volume.shape();
        Comparison {
            series: vec![series],
            shape,
            rows: 1,
            cols: 1,
        }
    }

    /// 3×3 viewer: each row is `(D2r+1, D2r+2, D2r+1 - D2r+2)`.
    pub fn grid(series: [Series; 6]) -> Result<Self, DataError> {
        let shape = check_shapes(&series)?;
        Ok(Comparison {
            series: series.into(),
            shape,
            rows: 3,
            cols: 3,
        })
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn slice_count(&self) -> usize {
        self.shape.slices
    }

    /// Grid dimensions `(rows, cols)`.
    pub fn grid_size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_single(&self) -> bool {
        self.series.len() == 1
    }

    /// Panel sources in row-major grid order.
    pub fn panels(&self) -> Vec<PanelSource> {
        if self.is_single() {
            return vec![PanelSource::Series(0)];
        }
        (0..self.series.len() / 2)
            .flat_map(|row| {
                let (a, b) = (2 * row, 2 * row + 1);
                [
                    PanelSource::Series(a),
                    PanelSource::Series(b),
                    PanelSource::Difference(a, b),
                ]
            })
            .collect()
    }

    /// Compute every panel for slice `index`.
    pub fn frames(&self, index: usize) -> Result<Vec<PanelFrame>, DataError> {
        let slices = self
            .series
            .iter()
            .map(|s| s.volume.slice(index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self
            .panels()
            .into_iter()
            .map(|source| {
                let slice = match source {
                    PanelSource::Series(i) => slices[i].clone(),
                    PanelSource::Difference(a, b) => slices[a].difference(&slices[b]),
                };
                let stats = slice.stats();
                let caption = self.caption(source, &stats);
                PanelFrame {
                    source,
                    caption,
                    slice,
                    stats,
                }
            })
            .collect())
    }

    /// Panel title text for the given source.
    pub fn title(&self, source: PanelSource) -> &str {
        match source {
            PanelSource::Series(i) => &self.series[i].title,
            PanelSource::Difference(..) => "",
        }
    }

    fn caption(&self, source: PanelSource, stats: &SliceStats) -> String {
        match source {
            PanelSource::Series(i) => format!(
                "{}\n{:.2} +/- {:.2}; <|{}|> = {:.2}",
                self.series[i].title,
                stats.mean,
                stats.std,
                source.label(),
                stats.mean_abs
            ),
            PanelSource::Difference(..) => {
                format!("max(|{}|) = \n{}", source.label(), float32_repr(stats.max_abs))
            }
        }
    }

    /// Max absolute deviation per slice for each implementation pair.
    pub fn deviation_profiles(&self) -> Vec<DeviationProfile> {
        self.series
            .chunks_exact(2)
            .enumerate()
            .map(|(row, pair)| {
                let (a, b) = (&pair[0].volume, &pair[1].volume);
                let (rows, cols) = (self.shape.rows, self.shape.cols);
                let per_slice = (0..self.shape.slices)
                    .map(|k| {
                        max_abs((0..rows).flat_map(|i| {
                            (0..cols).map(move |j| a.get(i, j, k) - b.get(i, j, k))
                        }))
                    })
                    .collect();
                DeviationProfile {
                    label: format!(
                        "{} (D{} - D{})",
                        pair[0].title,
                        2 * row + 1,
                        2 * row + 2
                    ),
                    max_abs: per_slice,
                }
            })
            .collect()
    }

    /// Statistics for every `(slice, panel)` pair, slice-major.
    pub fn stats_records(&self) -> Result<Vec<StatsRecord>, DataError> {
        let mut records = Vec::with_capacity(self.slice_count() * self.panels().len());
        for k in 0..self.slice_count() {
            for frame in self.frames(k)? {
                records.push(StatsRecord {
                    slice: k,
                    panel: frame.source.label(),
                    title: self.title(frame.source).to_string(),
                    mean: frame.stats.mean,
                    std: frame.stats.std,
                    mean_abs: frame.stats.mean_abs,
                    max_abs: frame.stats.max_abs,
                });
            }
        }
        Ok(records)
    }
}

/// Shortest round-trip text for an `f32`, spelled the way NumPy prints a
/// float32 scalar: `0.0`, `0.5`, `1e-07`, `1.5e+16`, `nan`, `-inf`.
pub fn float32_repr(v: f32) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let text = format!("{v:?}");
    match text.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

/// Every series must match the first one's shape.
fn check_shapes(series: &[Series; 6]) -> Result<Shape, DataError> {
    let shape = series[0].volume.shape();
    for (i, s) in series.iter().enumerate().skip(1) {
        if s.volume.shape() != shape {
            return Err(DataError::ShapeMismatch {
                left_name: "D1".to_string(),
                left: shape,
                right_name: format!("D{}", i + 1),
                right: s.volume.shape(),
            });
        }
    }
    Ok(shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Volume;

    fn six(shape: Shape) -> [Series; 6] {
        std::array::from_fn(|i| Series::new(Volume::zeros(shape), format!("s{}", i + 1)))
    }

    #[test]
    fn test_zero_grid_reports_zero_deviation() {
        let cmp = Comparison::grid(six(Shape::new(4, 4, 5))).unwrap();
        assert_eq!(cmp.slice_count(), 5);

        for k in 0..5 {
            let frames = cmp.frames(k).unwrap();
            assert_eq!(frames.len(), 9);
            let diffs: Vec<&PanelFrame> = frames
                .iter()
                .filter(|f| matches!(f.source, PanelSource::Difference(..)))
                .collect();
            assert_eq!(diffs.len(), 3);
            for f in diffs {
                assert_eq!(f.stats.max_abs, 0.0);
                assert!(f.caption.ends_with("\n0.0"), "{}", f.caption);
            }
        }
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let mut series = six(Shape::new(4, 4, 5));
        series[5] = Series::new(Volume::zeros(Shape::new(4, 3, 5)), "odd");

        let err = Comparison::grid(series).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Data shapes must match. D1.shape = (4, 4, 5), D6.shape = (4, 3, 5)"
        );
    }

    #[test]
    fn test_layout_and_captions() {
        let shape = Shape::new(2, 2, 1);
        let mut series = six(shape);
        series[0] = Series::new(
            Volume::from_shape_vec(&[2, 2, 1], vec![1.0, -1.0, 3.0, -3.0]).unwrap(),
            "glm::perlin(vec4)",
        );
        series[1] = Series::new(
            Volume::from_shape_vec(&[2, 2, 1], vec![1.0, -1.0, 3.0, -2.5]).unwrap(),
            "glm_perlin_vec4",
        );
        let cmp = Comparison::grid(series).unwrap();
        assert_eq!(cmp.grid_size(), (3, 3));
        assert_eq!(
            cmp.panels()[..3],
            [
                PanelSource::Series(0),
                PanelSource::Series(1),
                PanelSource::Difference(0, 1)
            ]
        );

        let frames = cmp.frames(0).unwrap();
        assert_eq!(frames[0].caption, "glm::perlin(vec4)\n0.00 +/- 2.24; <|D1|> = 2.00");
        assert_eq!(frames[2].caption, "max(|D1 - D2|) = \n0.5");
        assert_eq!(frames[8].source, PanelSource::Difference(4, 5));

        let profiles = cmp.deviation_profiles();
        assert_eq!(profiles.len(), 3);
        assert_eq!(profiles[0].max_abs, vec![0.5]);
        assert_eq!(profiles[2].max_abs, vec![0.0]);
    }

    #[test]
    fn test_single_series() {
        let cmp = Comparison::single(Series::new(Volume::zeros(Shape::new(3, 3, 2)), "one"));
        assert!(cmp.is_single());
        assert_eq!(cmp.grid_size(), (1, 1));
        assert_eq!(cmp.frames(1).unwrap().len(), 1);
        assert!(cmp.deviation_profiles().is_empty());
        assert!(cmp.frames(2).is_err());
    }

    #[test]
    fn test_stats_records_cover_every_slice_and_panel() {
        let cmp = Comparison::grid(six(Shape::new(2, 2, 4))).unwrap();
        let records = cmp.stats_records().unwrap();
        assert_eq!(records.len(), 4 * 9);
        assert_eq!(records[9].slice, 1);
        assert_eq!(records[9].panel, "D1");
        assert_eq!(records[11].panel, "D1 - D2");
        assert_eq!(records[11].title, "");
    }

    #[test]
    fn test_profile_keeps_nan_like_caption() {
        let shape = Shape::new(2, 2, 2);
        let mut series = six(shape);
        let mut with_nan = vec![0.0f32; 8];
        with_nan[1] = f32::NAN; // (0, 0, 1)
        series[1] = Series::new(Volume::from_shape_vec(&[2, 2, 2], with_nan).unwrap(), "nan");
        let cmp = Comparison::grid(series).unwrap();

        let profile = &cmp.deviation_profiles()[0];
        assert_eq!(profile.max_abs[0], 0.0);
        assert!(profile.max_abs[1].is_nan());

        let frames = cmp.frames(1).unwrap();
        assert!(frames[2].stats.max_abs.is_nan());
        assert_eq!(frames[2].caption, "max(|D1 - D2|) = \nnan");
    }

    #[test]
    fn test_float32_repr_matches_numpy_spelling() {
        assert_eq!(float32_repr(0.0), "0.0");
        assert_eq!(float32_repr(0.5), "0.5");
        assert_eq!(float32_repr(1e-7), "1e-07");
        assert_eq!(float32_repr(2.5e-5), "2.5e-05");
        assert_eq!(float32_repr(1.5e16), "1.5e+16");
        assert_eq!(float32_repr(3.0e-12), "3e-12");
        assert_eq!(float32_repr(f32::NAN), "nan");
        assert_eq!(float32_repr(f32::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_small_deviation_caption() {
        let shape = Shape::new(1, 1, 1);
        let mut series = six(shape);
        series[3] = Series::new(Volume::from_shape_vec(&[1, 1, 1], vec![1e-7]).unwrap(), "tiny");
        let cmp = Comparison::grid(series).unwrap();
        assert_eq!(cmp.frames(0).unwrap()[5].caption, "max(|D3 - D4|) = \n1e-07");
    }
}
