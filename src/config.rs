use serde::Serialize;

// ---------------------------------------------------------------------------
// Compiled-in settings
// ---------------------------------------------------------------------------

/// File extensions (lower-case, without the dot) treated as RAW photos.
pub const RAW_EXTENSIONS: [&str; 2] = ["nef", "raw"];

/// How many of the most frequent values each panel keeps.
pub const TOP_N: usize = 10;

/// Initial viewer window size in points.
pub const WINDOW_SIZE: [f32; 2] = [1200.0, 800.0];

/// Pixel size of the figure written by `--output *.png`.
pub const RASTER_SIZE: (u32, u32) = (1200, 800);

// ---------------------------------------------------------------------------
// Field – one tracked camera setting
// ---------------------------------------------------------------------------

/// The four camera settings that get tabulated, in panel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Field {
    ShutterSpeed,
    Iso,
    FocalLength,
    FNumber,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::ShutterSpeed,
        Field::Iso,
        Field::FocalLength,
        Field::FNumber,
    ];

    /// Key of the tag in a raw metadata record.
    pub fn tag_key(self) -> &'static str {
        match self {
            Field::ShutterSpeed => "EXIF ExposureTime",
            Field::Iso => "EXIF PhotographicSensitivity",
            Field::FocalLength => "EXIF FocalLength",
            Field::FNumber => "EXIF FNumber",
        }
    }

    /// Human readable column name.
    pub fn display_name(self) -> &'static str {
        match self {
            Field::ShutterSpeed => "Shutter Speed",
            Field::Iso => "ISO",
            Field::FocalLength => "Focal length",
            Field::FNumber => "F number",
        }
    }

    pub fn from_tag_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.tag_key() == key)
    }

    /// Normalized `[left, bottom, width, height]` of the field's panel,
    /// origin at the bottom-left of the figure.
    pub fn panel_rect(self) -> [f32; 4] {
        match self {
            Field::ShutterSpeed => [0.05, 0.55, 0.42, 0.4],
            Field::Iso => [0.05, 0.05, 0.42, 0.4],
            Field::FocalLength => [0.55, 0.55, 0.42, 0.4],
            Field::FNumber => [0.55, 0.05, 0.42, 0.4],
        }
    }
}

/// Tag keys handed to the collector by the harvester.
pub fn wanted_tag_keys() -> Vec<&'static str> {
    Field::ALL.iter().map(|f| f.tag_key()).collect()
}

/// Whether `ext` (no dot, any case) names a RAW photo.
pub fn is_raw_extension(ext: &str) -> bool {
    let ext = ext.to_ascii_lowercase();
    RAW_EXTENSIONS.contains(&ext.as_str())
}
