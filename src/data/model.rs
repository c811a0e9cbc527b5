use std::fmt;

use super::error::DataError;

// ---------------------------------------------------------------------------
// Shape – (rows, cols, slices)
// ---------------------------------------------------------------------------

/// Logical extent of a sample volume: `(L, M, N)` = rows, columns, slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
    pub slices: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize, slices: usize) -> Self {
        Shape { rows, cols, slices }
    }

    /// Total number of samples, `L × M × N`.
    pub fn len(&self) -> usize {
        self.rows * self.cols * self.slices
    }

    /// Build a shape from a dynamic dimension list, rejecting anything but 3D.
    pub fn from_dims(dims: &[usize]) -> Result<Self, DataError> {
        match *dims {
            [rows, cols, slices] => Ok(Shape::new(rows, cols, slices)),
            _ => Err(DataError::NotThreeDimensional(dims.len())),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.rows, self.cols, self.slices)
    }
}

// ---------------------------------------------------------------------------
// Volume – one 3D sample array
// ---------------------------------------------------------------------------

/// A dense 3D `f32` array stored row-major: `(i, j, k)` lives at
/// `(i * cols + j) * slices + k`.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    shape: Shape,
    data: Vec<f32>,
}

impl Volume {
    /// Wrap `data` as a volume of the given dimensions.
    pub fn from_shape_vec(dims: &[usize], data: Vec<f32>) -> Result<Self, DataError> {
        let shape = Shape::from_dims(dims)?;
        let expected = dims
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .unwrap_or(usize::MAX);
        if expected != data.len() {
            return Err(DataError::ElementCount {
                shape,
                expected,
                actual: data.len(),
            });
        }
        Ok(Volume { shape, data })
    }

    #[cfg(test)]
    pub fn zeros(shape: Shape) -> Self {
        Volume {
            shape,
            data: vec![0.0; shape.len()],
        }
    }

    /// Fill a volume by evaluating `f(i, j, k)` for every sample.
    #[cfg(test)]
    pub fn from_fn(shape: Shape, mut f: impl FnMut(usize, usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(shape.len());
        for i in 0..shape.rows {
            for j in 0..shape.cols {
                for k in 0..shape.slices {
                    data.push(f(i, j, k));
                }
            }
        }
        Volume { shape, data }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn get(&self, i: usize, j: usize, k: usize) -> f32 {
        self.data[(i * self.shape.cols + j) * self.shape.slices + k]
    }

    /// Extract the 2D cross-section at slice index `k`.
    pub fn slice(&self, k: usize) -> Result<Slice, DataError> {
        if k >= self.shape.slices {
            return Err(DataError::SliceOutOfRange {
                index: k,
                slices: self.shape.slices,
            });
        }
        let values = self
            .data
            .iter()
            .skip(k)
            .step_by(self.shape.slices)
            .copied()
            .collect();
        Ok(Slice {
            rows: self.shape.rows,
            cols: self.shape.cols,
            values,
        })
    }
}

// ---------------------------------------------------------------------------
// Slice – a 2D cross-section
// ---------------------------------------------------------------------------

/// A `rows × cols` image, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub rows: usize,
    pub cols: usize,
    pub values: Vec<f32>,
}

impl Slice {
    /// Element-wise `self - other`. Both slices come from shape-checked volumes.
    pub fn difference(&self, other: &Slice) -> Slice {
        debug_assert_eq!((self.rows, self.cols), (other.rows, other.cols));
        Slice {
            rows: self.rows,
            cols: self.cols,
            values: self
                .values
                .iter()
                .zip(&other.values)
                .map(|(a, b)| a - b)
                .collect(),
        }
    }

    pub fn stats(&self) -> SliceStats {
        SliceStats::of(&self.values)
    }
}

// ---------------------------------------------------------------------------
// SliceStats – caption numbers
// ---------------------------------------------------------------------------

/// Summary numbers shown under each panel.
///
/// `std` is the population standard deviation. `min`/`max` skip NaN and are
/// used for colour normalisation; the other fields propagate NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceStats {
    pub mean: f64,
    pub std: f64,
    pub mean_abs: f64,
    pub max_abs: f32,
    pub min: f32,
    pub max: f32,
}

impl SliceStats {
    pub fn of(values: &[f32]) -> Self {
        if values.is_empty() {
            return SliceStats {
                mean: f64::NAN,
                std: f64::NAN,
                mean_abs: f64::NAN,
                max_abs: f32::NAN,
                min: f32::NAN,
                max: f32::NAN,
            };
        }

        let n = values.len() as f64;
        let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
        let var = values
            .iter()
            .map(|&v| (v as f64 - mean).powi(2))
            .sum::<f64>()
            / n;
        let mean_abs = values.iter().map(|&v| (v as f64).abs()).sum::<f64>() / n;

        let max_abs = max_abs(values.iter().copied());

        let (min, max) = values
            .iter()
            .filter(|v| !v.is_nan())
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let (min, max) = if min > max { (f32::NAN, f32::NAN) } else { (min, max) };

        SliceStats {
            mean,
            std: var.sqrt(),
            mean_abs,
            max_abs,
            min,
            max,
        }
    }
}

/// Largest absolute value; any NaN makes the result NaN.
pub fn max_abs(values: impl IntoIterator<Item = f32>) -> f32 {
    values.into_iter().map(f32::abs).fold(0.0f32, |acc, v| {
        if acc.is_nan() || v.is_nan() {
            f32::NAN
        } else {
            acc.max(v)
        }
    })
}

// ---------------------------------------------------------------------------
// Series – a volume with a display title
// ---------------------------------------------------------------------------

/// One named sample volume (one implementation for one dimensionality).
#[derive(Debug, Clone)]
pub struct Series {
    pub volume: Volume,
    pub title: String,
}

impl Series {
    pub fn new(volume: Volume, title: impl Into<String>) -> Self {
        Series {
            volume,
            title: title.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_shape_vec_rejects_non_3d() {
        let err = Volume::from_shape_vec(&[2, 2], vec![0.0; 4]).unwrap_err();
        assert_eq!(err, DataError::NotThreeDimensional(2));
        assert_eq!(err.to_string(), "Data must be 3D, got 2 dimensions");
    }

    #[test]
    fn test_from_shape_vec_rejects_wrong_count() {
        let err = Volume::from_shape_vec(&[2, 2, 2], vec![0.0; 7]).unwrap_err();
        assert!(matches!(
            err,
            DataError::ElementCount { expected: 8, actual: 7, .. }
        ));
    }

    #[test]
    fn test_slice_picks_third_axis() {
        // value encodes its own index as i*100 + j*10 + k
        let shape = Shape::new(2, 3, 4);
        let vol = Volume::from_fn(shape, |i, j, k| (i * 100 + j * 10 + k) as f32);
        assert_eq!(vol.get(1, 2, 3), 123.0);

        let s = vol.slice(2).unwrap();
        assert_eq!((s.rows, s.cols), (2, 3));
        assert_eq!(s.values, vec![2.0, 12.0, 22.0, 102.0, 112.0, 122.0]);

        assert!(matches!(
            vol.slice(4),
            Err(DataError::SliceOutOfRange { index: 4, slices: 4 })
        ));
    }

    #[test]
    fn test_stats() {
        let stats = SliceStats::of(&[-1.0, 1.0, -3.0, 3.0]);
        assert_eq!(stats.mean, 0.0);
        assert!((stats.std - 5.0f64.sqrt()).abs() < 1e-12);
        assert_eq!(stats.mean_abs, 2.0);
        assert_eq!(stats.max_abs, 3.0);
        assert_eq!((stats.min, stats.max), (-3.0, 3.0));
    }

    #[test]
    fn test_stats_skip_nan_for_range() {
        let stats = SliceStats::of(&[f32::NAN, 2.0, -1.0]);
        assert_eq!((stats.min, stats.max), (-1.0, 2.0));
        assert!(stats.mean.is_nan());
        assert!(stats.max_abs.is_nan());
    }

    #[test]
    fn test_difference() {
        let a = Slice { rows: 1, cols: 3, values: vec![1.0, 2.0, 3.0] };
        let b = Slice { rows: 1, cols: 3, values: vec![1.0, 0.5, 4.0] };
        assert_eq!(a.difference(&b).values, vec![0.0, 1.5, -1.0]);
    }
}
