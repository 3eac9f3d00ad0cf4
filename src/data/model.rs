use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::config::Field;

// ---------------------------------------------------------------------------
// TagValue – a single cell of the dataset
// ---------------------------------------------------------------------------

/// A normalized tag value: the tag's text, or a number for ratio-valued
/// fields that get evaluated (the aperture).
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    Number(f64),
    Text(String),
}

// -- Manual Eq/Ord so TagValue can key BTreeMaps and HashMaps --

impl PartialEq for TagValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TagValue {}

impl PartialOrd for TagValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TagValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (TagValue::Number(a), TagValue::Number(b)) => a.total_cmp(b),
            (TagValue::Text(a), TagValue::Text(b)) => a.cmp(b),
            (TagValue::Number(_), TagValue::Text(_)) => Ordering::Less,
            (TagValue::Text(_), TagValue::Number(_)) => Ordering::Greater,
        }
    }
}

impl std::hash::Hash for TagValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            TagValue::Number(v) => v.to_bits().hash(state),
            TagValue::Text(s) => s.hash(state),
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Number(v) => write!(f, "{v}"),
            TagValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl TagValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TagValue::Number(v) => Some(*v),
            TagValue::Text(_) => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, TagValue::Number(_))
    }
}

// ---------------------------------------------------------------------------
// Ratio parsing
// ---------------------------------------------------------------------------

/// Parse `"n/d"` or a plain decimal into a number.
///
/// Both sides must be finite and the denominator non-zero; any other shape
/// yields `None`.
pub fn parse_ratio(s: &str) -> Option<f64> {
    let s = s.trim();
    let value = match s.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => s.parse().ok()?,
    };
    value.is_finite().then_some(value)
}

// ---------------------------------------------------------------------------
// Records and the dataset
// ---------------------------------------------------------------------------

/// The wanted tags of one file, keyed by tag key (`"EXIF FNumber"`, …).
/// Tags the file does not carry are simply absent.
pub type TagRecord = BTreeMap<String, TagValue>;

/// One dataset row: one harvested file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoRow {
    /// Cells keyed by field. A missing key is a missing cell.
    pub cells: BTreeMap<Field, TagValue>,
}

impl PhotoRow {
    pub fn get(&self, field: Field) -> Option<&TagValue> {
        self.cells.get(&field)
    }
}

/// All harvested files as a table with the four fixed columns.
#[derive(Debug, Clone, Default)]
pub struct ExifDataset {
    pub rows: Vec<PhotoRow>,
}

impl ExifDataset {
    /// Rename tag keys to fields. Keys that name no tracked field are dropped.
    pub fn from_records(records: Vec<TagRecord>) -> Self {
        let rows = records
            .into_iter()
            .map(|record| PhotoRow {
                cells: record
                    .into_iter()
                    .filter_map(|(key, value)| Some((Field::from_tag_key(&key)?, value)))
                    .collect(),
            })
            .collect();
        ExifDataset { rows }
    }

    /// Column names, always the four fixed ones even when there are no rows.
    pub fn column_names(&self) -> Vec<&'static str> {
        Field::ALL.iter().map(|f| f.display_name()).collect()
    }

    /// The column as one optional cell per row.
    pub fn column(&self, field: Field) -> impl Iterator<Item = Option<&TagValue>> + '_ {
        self.rows.iter().map(move |row| row.get(field))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_parses_fractions_and_decimals() {
        assert_eq!(parse_ratio("28/10"), Some(2.8));
        assert_eq!(parse_ratio("40/10"), Some(4.0));
        assert_eq!(parse_ratio(" 1/250 "), Some(0.004));
        assert_eq!(parse_ratio("5.6"), Some(5.6));
        assert_eq!(parse_ratio("30"), Some(30.0));
    }

    #[test]
    fn ratio_rejects_other_shapes() {
        assert_eq!(parse_ratio(""), None);
        assert_eq!(parse_ratio("1/0"), None);
        assert_eq!(parse_ratio("1/2/3"), None);
        assert_eq!(parse_ratio("__import__('os')"), None);
        assert_eq!(parse_ratio("inf"), None);
        assert_eq!(parse_ratio("f/2.8"), None);
    }

    #[test]
    fn numbers_order_before_text() {
        let mut values = vec![
            TagValue::Text("100".into()),
            TagValue::Number(4.0),
            TagValue::Number(2.8),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                TagValue::Number(2.8),
                TagValue::Number(4.0),
                TagValue::Text("100".into()),
            ]
        );
    }

    #[test]
    fn number_display_has_no_trailing_noise() {
        assert_eq!(TagValue::Number(2.8).to_string(), "2.8");
        assert_eq!(TagValue::Number(4.0).to_string(), "4");
    }

    #[test]
    fn records_are_renamed_to_fields() {
        let mut record = TagRecord::new();
        record.insert("EXIF ExposureTime".into(), TagValue::Text("1/125".into()));
        record.insert("EXIF FNumber".into(), TagValue::Number(2.8));
        record.insert("Image Make".into(), TagValue::Text("NIKON".into()));

        let ds = ExifDataset::from_records(vec![record, TagRecord::new()]);
        assert_eq!(ds.len(), 2);
        assert_eq!(
            ds.rows[0].get(Field::ShutterSpeed),
            Some(&TagValue::Text("1/125".into()))
        );
        assert_eq!(ds.rows[0].cells.len(), 2);
        assert!(ds.rows[1].cells.is_empty());
    }

    #[test]
    fn empty_dataset_keeps_fixed_columns() {
        let ds = ExifDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(
            ds.column_names(),
            vec!["Shutter Speed", "ISO", "Focal length", "F number"]
        );
    }
}
