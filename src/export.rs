//! Writing the figure to a file instead of the screen.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::config::RASTER_SIZE;
use crate::error::{HarvestError, Result};
use crate::report::Report;
use crate::ui::raster;

/// Output formats recognised by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Csv,
    Json,
}

impl OutputFormat {
    pub const EXTENSIONS: [&'static str; 3] = ["png", "csv", "json"];

    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "png" => Ok(OutputFormat::Png),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(HarvestError::UnsupportedOutput(other.to_string())),
        }
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    panel: &'a str,
    value: &'a str,
    count: usize,
}

/// Save `report` to `path` in the format its extension names.
pub fn save_report(report: &Report, path: &Path) -> Result<()> {
    match OutputFormat::from_path(path)? {
        OutputFormat::Png => {
            let (w, h) = RASTER_SIZE;
            raster::render(report, w, h)
                .save(path)
                .map_err(|e| HarvestError::export(path, e))?;
        }
        OutputFormat::Csv => write_csv(report, path)?,
        OutputFormat::Json => {
            let file = File::create(path).map_err(|e| HarvestError::export(path, e))?;
            serde_json::to_writer_pretty(BufWriter::new(file), report)
                .map_err(|e| HarvestError::export(path, e))?;
        }
    }
    log::info!("wrote figure to {}", path.display());
    Ok(())
}

/// One CSV row per bar: `panel,value,count`.
fn write_csv(report: &Report, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| HarvestError::export(path, e))?;
    for panel in &report.panels {
        for bar in &panel.bars {
            writer
                .serialize(CsvRow {
                    panel: panel.title,
                    value: &bar.label,
                    count: bar.count,
                })
                .map_err(|e| HarvestError::export(path, e))?;
        }
    }
    writer.flush().map_err(|e| HarvestError::export(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Field;
    use crate::report::{Bar, Panel};

    fn sample_report() -> Report {
        let panels = Field::ALL
            .into_iter()
            .map(|field| Panel {
                field,
                title: field.display_name(),
                rect: field.panel_rect(),
                bars: match field {
                    Field::ShutterSpeed => vec![
                        Bar { label: "1/250".into(), count: 1 },
                        Bar { label: "1/125".into(), count: 2 },
                    ],
                    Field::FNumber => vec![Bar { label: "2.8".into(), count: 3 }],
                    _ => Vec::new(),
                },
            })
            .collect();
        Report { files: 3, panels }
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a.PNG")).unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("a.csv")).unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_path(Path::new("a.json")).unwrap(), OutputFormat::Json);
        assert!(matches!(
            OutputFormat::from_path(Path::new("a.svg")),
            Err(HarvestError::UnsupportedOutput(ext)) if ext == "svg"
        ));
    }

    #[test]
    fn csv_lists_every_bar() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counts.csv");
        save_report(&sample_report(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "panel,value,count\nShutter Speed,1/250,1\nShutter Speed,1/125,2\nF number,2.8,3\n"
        );
    }

    #[test]
    fn json_carries_panels_and_file_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        save_report(&sample_report(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["files"], 3);
        assert_eq!(value["panels"][0]["title"], "Shutter Speed");
        assert_eq!(value["panels"][0]["field"], "ShutterSpeed");
        assert_eq!(value["panels"][0]["bars"][1]["count"], 2);
        assert_eq!(value["panels"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn png_has_the_configured_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.png");
        save_report(&sample_report(), &path).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), RASTER_SIZE);
    }
}
