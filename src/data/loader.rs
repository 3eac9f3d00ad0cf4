use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::{Path, PathBuf};

use exif::{Context, In, Value};
use walkdir::WalkDir;

use super::filter::filter_tags;
use super::model::{parse_ratio, TagRecord, TagValue};
use crate::config::{self, Field};
use crate::error::{HarvestError, Result};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct HarvestOptions {
    /// Log and step over files that cannot be opened or decoded instead of
    /// aborting the whole harvest.
    pub skip_unreadable: bool,
}

#[derive(Debug, Clone, Default)]
pub struct HarvestSummary {
    /// One record per RAW file, in walk order. Partial records are kept.
    pub records: Vec<TagRecord>,
    /// Files (or directory entries) stepped over in skip mode.
    pub skipped: Vec<PathBuf>,
}

/// Collect the tracked tags of every RAW file under `root`, failing on the
/// first file that cannot be read.
pub fn harvest_dir(root: &Path) -> Result<Vec<TagRecord>> {
    harvest_dir_with(root, HarvestOptions::default()).map(|summary| summary.records)
}

/// Walk `root` recursively and collect the tracked tags of every file whose
/// extension is one of [`config::RAW_EXTENSIONS`]. Other files are ignored.
///
/// Entries are visited depth-first with siblings sorted by file name.
pub fn harvest_dir_with(root: &Path, options: HarvestOptions) -> Result<HarvestSummary> {
    let wanted = config::wanted_tag_keys();
    let mut summary = HarvestSummary::default();

    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let result = entry.map_err(HarvestError::from).and_then(|entry| {
            if entry.file_type().is_dir() || !has_raw_extension(entry.path()) {
                return Ok(None);
            }
            log::debug!("reading tags of {}", entry.path().display());
            harvest_file(entry.path(), &wanted).map(Some)
        });

        match result {
            Ok(Some(record)) => summary.records.push(record),
            Ok(None) => {}
            Err(e) if options.skip_unreadable && e.is_per_file() => {
                let path = error_path(&e).unwrap_or_else(|| root.to_path_buf());
                log::warn!("skipping {}: {e}", path.display());
                summary.skipped.push(path);
            }
            Err(e) => return Err(e),
        }
    }

    log::info!(
        "harvested {} RAW file(s) under {} ({} skipped)",
        summary.records.len(),
        root.display(),
        summary.skipped.len()
    );
    Ok(summary)
}

/// Extract the metadata of one open file and keep the `wanted` tags.
///
/// Values become their text form, except the aperture which is evaluated
/// as a ratio (`"28/10"` → `2.8`). `origin` only labels errors.
pub fn collect_tags<R: BufRead + Seek>(
    origin: &Path,
    reader: &mut R,
    wanted: &[&str],
) -> Result<TagRecord> {
    let exif = exif::Reader::new()
        .read_from_container(reader)
        .map_err(|source| HarvestError::Decode {
            path: origin.to_path_buf(),
            source,
        })?;

    let raw = raw_tags(&exif);
    let selected = filter_tags(&raw, |key, _| wanted.contains(&key.as_str()));

    selected
        .into_iter()
        .map(|(key, field)| {
            let text = render_value(field);
            let value = if key == Field::FNumber.tag_key() {
                let number = parse_ratio(&text)
                    .ok_or_else(|| HarvestError::malformed_in(origin, &key, &text))?;
                TagValue::Number(number)
            } else {
                TagValue::Text(text)
            };
            Ok((key, value))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn harvest_file(path: &Path, wanted: &[&str]) -> Result<TagRecord> {
    let file = File::open(path).map_err(|source| HarvestError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    collect_tags(path, &mut reader, wanted)
}

fn has_raw_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(config::is_raw_extension)
}

fn error_path(e: &HarvestError) -> Option<PathBuf> {
    match e {
        HarvestError::Decode { path, .. } | HarvestError::FileAccess { path, .. } => {
            Some(path.clone())
        }
        HarvestError::MalformedTag { path, .. } => path.clone(),
        HarvestError::Walk(err) => err.path().map(Path::to_path_buf),
        _ => None,
    }
}

/// Every field of the file keyed `"<group> <TagName>"`; first occurrence wins.
fn raw_tags(exif: &exif::Exif) -> BTreeMap<String, &exif::Field> {
    let mut tags = BTreeMap::new();
    for field in exif.fields() {
        tags.entry(tag_key(field)).or_insert(field);
    }
    tags
}

#[allow(unreachable_patterns)]
fn tag_key(field: &exif::Field) -> String {
    let group = if field.ifd_num == In::THUMBNAIL {
        "Thumbnail"
    } else {
        match field.tag.context() {
            Context::Tiff => "Image",
            Context::Exif => "EXIF",
            Context::Gps => "GPS",
            Context::Interop => "Interoperability",
            _ => "Unknown",
        }
    };
    format!("{group} {}", field.tag)
}

/// Text form of a tag value: rationals as reduced `n/d`, integers in
/// decimal, ASCII trimmed. Multi-valued tags become `[a, b, …]`.
fn render_value(field: &exif::Field) -> String {
    let parts: Vec<String> = match &field.value {
        Value::Rational(v) => v
            .iter()
            .map(|r| render_fraction(i64::from(r.num), i64::from(r.denom)))
            .collect(),
        Value::SRational(v) => v
            .iter()
            .map(|r| render_fraction(i64::from(r.num), i64::from(r.denom)))
            .collect(),
        Value::Short(v) => v.iter().map(u16::to_string).collect(),
        Value::Long(v) => v.iter().map(u32::to_string).collect(),
        Value::SShort(v) => v.iter().map(i16::to_string).collect(),
        Value::SLong(v) => v.iter().map(i32::to_string).collect(),
        Value::Ascii(v) => {
            return v
                .iter()
                .map(|s| String::from_utf8_lossy(s).trim_end_matches('\0').trim().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        }
        _ => return field.display_value().to_string(),
    };
    match parts.as_slice() {
        [single] => single.clone(),
        _ => format!("[{}]", parts.join(", ")),
    }
}

fn render_fraction(num: i64, den: i64) -> String {
    if den == 0 {
        return format!("{num}/0");
    }
    let g = gcd(num.unsigned_abs(), den.unsigned_abs()) as i64;
    let (mut num, mut den) = (num / g, den / g);
    if den < 0 {
        num = -num;
        den = -den;
    }
    if den == 1 {
        format!("{num}")
    } else {
        format!("{num}/{den}")
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_are_reduced() {
        assert_eq!(render_fraction(10, 2500), "1/250");
        assert_eq!(render_fraction(28, 10), "14/5");
        assert_eq!(render_fraction(500, 10), "50");
        assert_eq!(render_fraction(0, 1), "0");
        assert_eq!(render_fraction(-1, -3), "1/3");
        assert_eq!(render_fraction(7, 0), "7/0");
    }

    #[test]
    fn only_raw_extensions_are_harvested() {
        assert!(has_raw_extension(Path::new("shots/a.NEF")));
        assert!(has_raw_extension(Path::new("b.raw")));
        assert!(!has_raw_extension(Path::new("c.jpg")));
        assert!(!has_raw_extension(Path::new("nef")));
    }
}
