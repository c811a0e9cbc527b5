use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::compare::Comparison;
use super::loader::load_volume;
use super::model::Series;

/// Which noise implementation produced a dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Implementation {
    /// Reference C++ library.
    Glm,
    /// C port.
    Cglm,
}

impl Implementation {
    pub const ALL: [Implementation; 2] = [Implementation::Glm, Implementation::Cglm];

    pub fn prefix(self) -> &'static str {
        match self {
            Implementation::Glm => "glm",
            Implementation::Cglm => "cglm",
        }
    }

    /// Panel title, named after the function that produced the samples.
    pub fn title(self, dim: Dimensionality) -> String {
        match self {
            Implementation::Glm => format!("glm::perlin({dim})"),
            Implementation::Cglm => format!("glm_perlin_{dim}"),
        }
    }
}

/// Input vector width the noise function was sampled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimensionality {
    Vec4,
    Vec3,
    Vec2,
}

impl Dimensionality {
    /// Grid row order, top to bottom.
    pub const ALL: [Dimensionality; 3] = [
        Dimensionality::Vec4,
        Dimensionality::Vec3,
        Dimensionality::Vec2,
    ];
}

impl fmt::Display for Dimensionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimensionality::Vec4 => write!(f, "vec4"),
            Dimensionality::Vec3 => write!(f, "vec3"),
            Dimensionality::Vec2 => write!(f, "vec2"),
        }
    }
}

// ---------------------------------------------------------------------------
// FileSet – six companion dumps sharing a suffix
// ---------------------------------------------------------------------------

/// `{impl}_vec{4,3,2}_{suffix}.bin` inside `dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSet {
    pub dir: PathBuf,
    pub suffix: String,
}

impl FileSet {
    pub fn new(dir: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        FileSet {
            dir: dir.into(),
            suffix: suffix.into(),
        }
    }

    pub fn file_name(imp: Implementation, dim: Dimensionality, suffix: &str) -> String {
        format!("{}_{}_{}.bin", imp.prefix(), dim, suffix)
    }

    pub fn path(&self, imp: Implementation, dim: Dimensionality) -> PathBuf {
        self.dir.join(Self::file_name(imp, dim, &self.suffix))
    }

    /// Recover the set from any one of its member files.
    pub fn from_member(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("{} has no file name", path.display()))?;

        let Some(stem) = name.strip_suffix(".bin") else {
            bail!("{name}: expected a .bin file");
        };

        for imp in Implementation::ALL {
            for dim in Dimensionality::ALL {
                let prefix = format!("{}_{}_", imp.prefix(), dim);
                if let Some(suffix) = stem.strip_prefix(&prefix) {
                    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
                    return Ok(FileSet::new(dir, suffix));
                }
            }
        }
        bail!("{name}: expected a name like glm_vec4_<suffix>.bin")
    }

    /// Load all six dumps and validate them as one comparison grid.
    pub fn load(&self) -> Result<Comparison> {
        let mut series = Vec::with_capacity(6);
        for dim in Dimensionality::ALL {
            for imp in Implementation::ALL {
                let volume = load_volume(&self.path(imp, dim))?;
                series.push(Series::new(volume, imp.title(dim)));
            }
        }
        let series: [Series; 6] = series
            .try_into()
            .map_err(|_| anyhow::anyhow!("expected six series"))?;
        Ok(Comparison::grid(series)?)
    }
}

impl fmt::Display for FileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/*_{}.bin", self.dir.display(), self.suffix)
    }
}
