//! Tally the camera settings used across a folder of RAW photos.
//!
//! The pipeline is: [`data::loader::harvest_dir`] walks the tree and reads the
//! tracked EXIF tags of every `.nef` / `.raw` file, [`data::model::ExifDataset`]
//! holds them as a four-column table, [`report::Report::build`] keeps the ten
//! most used values per column, and the figure is shown by [`app`] or written
//! by [`export`].

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod report;
pub mod state;
pub mod ui;

pub use error::{HarvestError, Result};
