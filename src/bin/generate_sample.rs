//! Writes a synthetic `{glm,cglm}_vec{4,3,2}_{suffix}.bin` file set for
//! trying out the viewer without the C++ generator.
//!
//! The field is a smooth sum of sines sampled at the same coordinates the
//! noise generator uses; the `cglm` files add a tiny seeded perturbation so
//! the difference panels have something to show.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

/// Scale of the sample coordinates; higher is finer features.
const D: f32 = 10.0;
/// Fixed fourth coordinate for vec4 samples.
const W: f32 = 3.1415;

#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
#[command(about = "Write a synthetic file set for perlin-diff")]
struct Args {
    #[arg(long, default_value = "perlin")]
    suffix: String,

    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Grid size along each axis (L = M = N).
    #[arg(long, default_value_t = 101)]
    size: usize,

    /// Amplitude of the perturbation added to the cglm files.
    #[arg(long, default_value_t = 1e-6)]
    perturbation: f32,
}

fn field(p: &[f32]) -> f32 {
    p.iter()
        .enumerate()
        .map(|(d, &x)| (x * (0.7 + 0.3 * d as f32) + d as f32).sin())
        .sum::<f32>()
        / p.len() as f32
}

/// Sample coordinates for grid cell `(i, j, k)` with `dims` components.
fn coords(dims: usize, i: usize, j: usize, k: usize, n: usize) -> Vec<f32> {
    let s = |v: usize| v as f32 / n as f32 * D;
    match dims {
        4 => vec![s(i), s(j), s(k), W],
        3 => vec![s(i), s(j), s(k)],
        _ => vec![s(i), s(j) + s(k)],
    }
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `[-1, 1)`.
    fn next_signed(&mut self) -> f32 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        (unit * 2.0 - 1.0) as f32
    }
}

fn write_dump(path: &Path, n: usize, mut sample: impl FnMut(usize, usize, usize) -> f32) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);

    let dim = i32::try_from(n).context("grid size does not fit in the i32 header")?;
    for _ in 0..3 {
        out.write_all(&dim.to_le_bytes())?;
    }
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                out.write_all(&sample(i, j, k).to_le_bytes())?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let n = args.size;

    println!("Generating {} points per file", n * n * n);

    let mut rng = SimpleRng::new(42);
    for dims in [4usize, 3, 2] {
        let glm = args.dir.join(format!("glm_vec{dims}_{}.bin", args.suffix));
        write_dump(&glm, n, |i, j, k| field(&coords(dims, i, j, k, n)))?;
        log::info!("Wrote {}", glm.display());

        let cglm = args.dir.join(format!("cglm_vec{dims}_{}.bin", args.suffix));
        write_dump(&cglm, n, |i, j, k| {
            field(&coords(dims, i, j, k, n)) + args.perturbation * rng.next_signed()
        })?;
        log::info!("Wrote {}", cglm.display());
    }

    println!(
        "Wrote 6 files ({n}x{n}x{n}) with suffix '{}' to {}",
        args.suffix,
        args.dir.display()
    );
    Ok(())
}
