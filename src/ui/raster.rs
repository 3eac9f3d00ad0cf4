//! Headless rendering of the figure to a bitmap.

use image::{Rgb, RgbImage};

use crate::color::generate_palette;
use crate::report::{Panel, Report};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([60, 60, 60]);
const GRID: Rgb<u8> = Rgb([225, 225, 225]);

/// Draw every panel of `report` into a `width` × `height` image: axes, one
/// horizontal grid line per count step (when there are few enough) and the
/// bars.
pub fn render(report: &Report, width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);
    for panel in &report.panels {
        draw_panel(&mut img, panel);
    }
    img
}

/// Pixel box `(x0, y0, x1, y1)` of a normalized bottom-left rect.
pub fn pixel_rect(rect: [f32; 4], width: u32, height: u32) -> (u32, u32, u32, u32) {
    let [left, bottom, w, h] = rect;
    let (fw, fh) = (width as f32, height as f32);
    let x0 = (left * fw).round() as u32;
    let x1 = ((left + w) * fw).round() as u32;
    let y0 = ((1.0 - bottom - h) * fh).round() as u32;
    let y1 = ((1.0 - bottom) * fh).round() as u32;
    (x0, y0, x1.min(width), y1.min(height))
}

fn draw_panel(img: &mut RgbImage, panel: &Panel) {
    let (x0, y0, x1, y1) = pixel_rect(panel.rect, img.width(), img.height());
    if x1 <= x0 + 2 || y1 <= y0 + 2 {
        return;
    }
    let plot_h = (y1 - y0 - 1) as f32;

    let max = panel.max_count();
    if max > 0 && max <= 50 {
        for step in 1..=max {
            let y = y1 - 1 - (step as f32 / max as f32 * plot_h) as u32;
            fill(img, x0, y, x1, y + 1, GRID);
        }
    }

    let n = panel.bars.len() as u32;
    if n > 0 {
        let colors = generate_palette(panel.bars.len());
        let slot = (x1 - x0) as f32 / n as f32;
        for (i, (bar, [r, g, b])) in panel.bars.iter().zip(colors).enumerate() {
            let left = x0 + (i as f32 * slot + slot * 0.1) as u32;
            let right = x0 + (i as f32 * slot + slot * 0.9) as u32;
            let top = y1 - 1 - (bar.count as f32 / max as f32 * plot_h) as u32;
            fill(img, left, top, right.max(left + 1), y1, Rgb([r, g, b]));
        }
    }

    // axes
    fill(img, x0, y0, x0 + 1, y1, AXIS);
    fill(img, x0, y1 - 1, x1, y1, AXIS);
}

fn fill(img: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Field;
    use crate::report::Bar;

    fn report_with_one_bar() -> Report {
        let panels = Field::ALL
            .into_iter()
            .map(|field| Panel {
                field,
                title: field.display_name(),
                rect: field.panel_rect(),
                bars: if field == Field::ShutterSpeed {
                    vec![Bar { label: "1/250".into(), count: 3 }]
                } else {
                    Vec::new()
                },
            })
            .collect();
        Report { files: 3, panels }
    }

    #[test]
    fn top_left_panel_maps_to_upper_left_pixels() {
        assert_eq!(pixel_rect([0.05, 0.55, 0.42, 0.4], 1000, 1000), (50, 50, 470, 450));
        assert_eq!(pixel_rect([0.55, 0.05, 0.42, 0.4], 1000, 1000), (550, 550, 970, 950));
    }

    #[test]
    fn bars_are_painted_inside_their_panel() {
        let img = render(&report_with_one_bar(), 1000, 1000);
        // centre of the single shutter-speed bar
        assert_ne!(*img.get_pixel(260, 300), BACKGROUND);
        // the empty F-number panel has only its axes
        assert_eq!(*img.get_pixel(760, 700), BACKGROUND);
        assert_eq!(*img.get_pixel(550, 700), AXIS);
    }
}
