use std::path::Path;

use anyhow::{Context, Result};

use super::error::DataError;
use super::model::Volume;

/// Number of float32 slots taken by the `(L, M, N)` header.
const HEADER_LEN: usize = 3;
const F32_SIZE: usize = std::mem::size_of::<f32>();

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a sample volume from a raw `.bin` dump.
///
/// Layout (little-endian):
/// ```text
///  ┌────────┬────────┬────────┬──────────────────────────────┐
///  │ L: i32 │ M: i32 │ N: i32 │ L·M·N × f32, row-major (i,j,k)│
///  └────────┴────────┴────────┴──────────────────────────────┘
/// ```
/// The header occupies the first three float32 slots; their bits are read
/// as `i32`.
pub fn load_volume(path: &Path) -> Result<Volume> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let volume = parse_volume(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    log::info!(
        "Loaded {} with shape {} ({} samples)",
        path.display(),
        volume.shape(),
        volume.shape().len()
    );
    Ok(volume)
}

/// Decode a volume from the raw bytes of a `.bin` dump.
pub fn parse_volume(bytes: &[u8]) -> Result<Volume, DataError> {
    if bytes.len() % F32_SIZE != 0 {
        return Err(DataError::Misaligned(bytes.len()));
    }

    let n_values = bytes.len() / F32_SIZE;
    if n_values < HEADER_LEN {
        return Err(DataError::TruncatedHeader(n_values));
    }

    let (header, payload) = bytes.split_at(HEADER_LEN * F32_SIZE);

    let mut dims_raw = [0i32; HEADER_LEN];
    for (dim, chunk) in dims_raw.iter_mut().zip(header.chunks_exact(F32_SIZE)) {
        // Reinterpret the float slot, not convert it.
        let slot = f32::from_le_bytes(word(chunk));
        *dim = slot.to_bits() as i32;
    }

    let dims: Vec<usize> = dims_raw
        .iter()
        .map(|&d| usize::try_from(d))
        .collect::<Result<_, _>>()
        .map_err(|_| DataError::NegativeDimension(dims_raw))?;

    let data: Vec<f32> = payload
        .chunks_exact(F32_SIZE)
        .map(|chunk| f32::from_le_bytes(word(chunk)))
        .collect();

    Volume::from_shape_vec(&dims, data)
}

fn word(chunk: &[u8]) -> [u8; F32_SIZE] {
    let mut w = [0u8; F32_SIZE];
    w.copy_from_slice(chunk);
    w
}

#[cfg(test)]
pub(crate) fn encode_volume(dims: [i32; 3], values: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity((HEADER_LEN + values.len()) * F32_SIZE);
    for d in dims {
        bytes.extend_from_slice(&d.to_le_bytes());
    }
    for v in values {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Shape;

    #[test]
    fn test_parse_header_and_payload() {
        let values: Vec<f32> = (0..24).map(|v| v as f32 * 0.5).collect();
        let bytes = encode_volume([2, 3, 4], &values);

        let vol = parse_volume(&bytes).unwrap();
        assert_eq!(vol.shape(), Shape::new(2, 3, 4));
        assert_eq!(vol.shape().len(), 2 * 3 * 4);
        assert_eq!(vol.get(0, 0, 1), 0.5);
        assert_eq!(vol.get(1, 2, 3), 11.5);
    }

    #[test]
    fn test_header_is_bit_reinterpreted() {
        // 5 written as an i32 reads back as a denormal float; the shape must
        // still be 5, not 0.
        let bytes = encode_volume([1, 1, 5], &[1.0; 5]);
        assert_eq!(parse_volume(&bytes).unwrap().shape(), Shape::new(1, 1, 5));
    }

    #[test]
    fn test_wrong_element_count() {
        let bytes = encode_volume([2, 2, 2], &[0.0; 7]);
        assert_eq!(
            parse_volume(&bytes).unwrap_err(),
            DataError::ElementCount {
                shape: Shape::new(2, 2, 2),
                expected: 8,
                actual: 7,
            }
        );
    }

    #[test]
    fn test_truncated_files() {
        assert_eq!(parse_volume(&[]).unwrap_err(), DataError::TruncatedHeader(0));
        assert_eq!(parse_volume(&[0u8; 8]).unwrap_err(), DataError::TruncatedHeader(2));

        let mut bytes = encode_volume([1, 1, 2], &[1.0, 2.0]);
        bytes.pop();
        assert_eq!(parse_volume(&bytes).unwrap_err(), DataError::Misaligned(19));
    }

    #[test]
    fn test_negative_dimension() {
        let bytes = encode_volume([-1, 2, 2], &[]);
        assert_eq!(
            parse_volume(&bytes).unwrap_err(),
            DataError::NegativeDimension([-1, 2, 2])
        );
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("perlin-diff-does-not-exist.bin");
        let err = load_volume(&path).unwrap_err();
        assert!(format!("{err:#}").contains("perlin-diff-does-not-exist.bin"));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("perlin-diff-load-{}.bin", std::process::id()));
        std::fs::write(&path, encode_volume([3, 1, 2], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])).unwrap();

        let vol = load_volume(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(vol.shape(), Shape::new(3, 1, 2));
        assert_eq!(vol.get(2, 0, 1), 6.0);
    }
}
