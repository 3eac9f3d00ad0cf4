/// Data layer: harvesting, the tabular model, and top-value selection.
///
/// Architecture:
/// ```text
///   <dir>/**/*.{nef,raw}
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  walk tree, read EXIF → Vec<TagRecord>
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ ExifDataset │  rows of Field → TagValue
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  top-10 values per field → row indices
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod synth;
