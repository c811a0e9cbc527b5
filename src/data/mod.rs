/// Data layer: core types, loading, and comparison.
///
/// Architecture:
/// ```text
///  {glm,cglm}_vec{4,3,2}_{suffix}.bin
///        │
///        ▼
///   ┌──────────┐
///   │ fileset  │  suffix + dir → six paths, titles
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  (L, M, N) header + f32 payload → Volume
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ compare  │  shape check → panels, captions, profiles
///   └──────────┘
/// ```

pub mod compare;
pub mod error;
pub mod fileset;
pub mod loader;
pub mod model;
