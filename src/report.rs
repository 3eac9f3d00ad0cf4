//! Count-plot model: the four panels of the figure and their bars.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::Field;
use crate::data::filter::top_value_indices;
use crate::data::model::{parse_ratio, ExifDataset, TagValue};
use crate::error::{HarvestError, Result};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One bar: a distinct value and how many files used it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub count: usize,
}

/// One count plot.
#[derive(Debug, Clone, Serialize)]
pub struct Panel {
    pub field: Field,
    pub title: &'static str,
    /// Normalized `[left, bottom, width, height]`, origin bottom-left.
    pub rect: [f32; 4],
    pub bars: Vec<Bar>,
}

impl Panel {
    pub fn max_count(&self) -> usize {
        self.bars.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

/// The whole figure.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Number of harvested files (dataset rows).
    pub files: usize,
    pub panels: Vec<Panel>,
}

// ---------------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------------

impl Report {
    /// Lay out one panel per tracked field, each restricted to the field's
    /// top-10 subset.
    pub fn build(dataset: &ExifDataset) -> Result<Self> {
        let panels = Field::ALL
            .into_iter()
            .map(|field| -> Result<Panel> {
                let values = top_subset(dataset, field)?;
                Ok(Panel {
                    field,
                    title: field.display_name(),
                    rect: field.panel_rect(),
                    bars: count_bars(&values),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Report {
            files: dataset.len(),
            panels,
        })
    }

    pub fn panel(&self, field: Field) -> Option<&Panel> {
        self.panels.iter().find(|p| p.field == field)
    }
}

/// Values of the top-10 rows of `field`, in the order they are plotted.
///
/// Shutter speeds are reordered by their numeric value so the axis reads
/// from fastest to slowest.
pub fn top_subset(dataset: &ExifDataset, field: Field) -> Result<Vec<&TagValue>> {
    let values: Vec<&TagValue> = top_value_indices(dataset, field)
        .into_iter()
        .filter_map(|i| dataset.rows[i].get(field))
        .collect();

    match field {
        Field::ShutterSpeed => sort_by_ratio(field, values),
        _ => Ok(values),
    }
}

/// Stable ascending sort by the value read as a `n/d` fraction.
pub fn sort_by_ratio(field: Field, values: Vec<&TagValue>) -> Result<Vec<&TagValue>> {
    let mut keyed = values
        .into_iter()
        .map(|v| {
            let key = match v {
                TagValue::Number(n) => Some(*n),
                TagValue::Text(s) => parse_ratio(s),
            };
            key.map(|k| (k, v))
                .ok_or_else(|| HarvestError::malformed(field.tag_key(), v.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    Ok(keyed.into_iter().map(|(_, v)| v).collect())
}

/// Tally `values` into bars. Categories appear in first-seen order, or in
/// ascending order when every value is numeric.
pub fn count_bars(values: &[&TagValue]) -> Vec<Bar> {
    let mut order: Vec<&TagValue> = Vec::new();
    let mut counts: HashMap<&TagValue, usize> = HashMap::new();
    for &v in values {
        *counts.entry(v).or_insert_with(|| {
            order.push(v);
            0
        }) += 1;
    }

    if !order.is_empty() && order.iter().all(|v| v.is_numeric()) {
        order.sort();
    }

    order
        .into_iter()
        .map(|v| Bar {
            label: v.to_string(),
            count: counts[v],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{PhotoRow, TagRecord};

    fn text(s: &str) -> TagValue {
        TagValue::Text(s.to_string())
    }

    fn labels(bars: &[Bar]) -> Vec<&str> {
        bars.iter().map(|b| b.label.as_str()).collect()
    }

    #[test]
    fn shutter_speeds_sort_by_numeric_value() {
        let values = [text("1/500"), text("1/60"), text("1/250")];
        let sorted = sort_by_ratio(Field::ShutterSpeed, values.iter().collect()).unwrap();
        assert_eq!(sorted, vec![&text("1/500"), &text("1/250"), &text("1/60")]);
    }

    #[test]
    fn whole_second_exposures_sort_after_fractions() {
        let values = [text("2"), text("1/8000"), text("1/2")];
        let sorted = sort_by_ratio(Field::ShutterSpeed, values.iter().collect()).unwrap();
        assert_eq!(sorted, vec![&text("1/8000"), &text("1/2"), &text("2")]);
    }

    #[test]
    fn unparsable_shutter_speed_is_malformed() {
        let values = [text("1/125"), text("bulb")];
        let err = sort_by_ratio(Field::ShutterSpeed, values.iter().collect()).unwrap_err();
        assert!(matches!(err, HarvestError::MalformedTag { ref value, .. } if value == "bulb"));
    }

    #[test]
    fn text_bars_keep_first_seen_order() {
        let values = [text("200"), text("100"), text("200"), text("1600")];
        let refs: Vec<&TagValue> = values.iter().collect();
        let bars = count_bars(&refs);
        assert_eq!(labels(&bars), vec!["200", "100", "1600"]);
        assert_eq!(bars[0].count, 2);
    }

    #[test]
    fn numeric_bars_are_ascending() {
        let values = [TagValue::Number(5.6), TagValue::Number(2.8), TagValue::Number(5.6)];
        let refs: Vec<&TagValue> = values.iter().collect();
        let bars = count_bars(&refs);
        assert_eq!(
            bars,
            vec![
                Bar { label: "2.8".into(), count: 1 },
                Bar { label: "5.6".into(), count: 2 },
            ]
        );
    }

    #[test]
    fn three_exposures_scenario() {
        let records: Vec<TagRecord> = ["1/125", "1/125", "1/250"]
            .iter()
            .map(|s| {
                let mut r = TagRecord::new();
                r.insert(Field::ShutterSpeed.tag_key().into(), text(s));
                r
            })
            .collect();
        let ds = ExifDataset::from_records(records);
        assert_eq!(top_subset(&ds, Field::ShutterSpeed).unwrap().len(), 3);

        let report = Report::build(&ds).unwrap();
        assert_eq!(report.files, 3);

        let shutter = report.panel(Field::ShutterSpeed).unwrap();
        assert_eq!(
            shutter.bars,
            vec![
                Bar { label: "1/250".into(), count: 1 },
                Bar { label: "1/125".into(), count: 2 },
            ]
        );
        for field in [Field::Iso, Field::FocalLength, Field::FNumber] {
            assert!(report.panel(field).unwrap().bars.is_empty());
        }
    }

    #[test]
    fn panels_sit_in_a_two_by_two_grid() {
        let report = Report::build(&ExifDataset { rows: vec![PhotoRow::default()] }).unwrap();
        let rects: Vec<[f32; 4]> = report.panels.iter().map(|p| p.rect).collect();
        assert_eq!(rects[0], [0.05, 0.55, 0.42, 0.4]);
        assert_eq!(rects[1], [0.05, 0.05, 0.42, 0.4]);
        assert_eq!(rects[2], [0.55, 0.55, 0.42, 0.4]);
        assert_eq!(rects[3], [0.55, 0.05, 0.42, 0.4]);
        assert_eq!(report.panels[0].title, "Shutter Speed");
        assert_eq!(report.panels[3].title, "F number");
    }
}
