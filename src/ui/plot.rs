use eframe::egui::{self, Pos2, Rect, Ui, UiBuilder};
use egui_plot::{uniform_grid_spacer, Bar, BarChart, Plot};

use crate::color::generate_palette32;
use crate::report::Panel;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Figure (central panel)
// ---------------------------------------------------------------------------

/// Place the four count plots at their normalized rectangles inside the
/// available area.
pub fn figure(ui: &mut Ui, state: &AppState) {
    let area = ui.available_rect_before_wrap();

    for panel in &state.report.panels {
        let rect = panel_rect(area, panel.rect);
        ui.scope_builder(UiBuilder::new().max_rect(rect), |ui: &mut Ui| {
            count_plot(ui, panel);
        });
    }
}

/// Screen rect of a normalized `[left, bottom, width, height]` box.
fn panel_rect(area: Rect, [left, bottom, w, h]: [f32; 4]) -> Rect {
    let min = Pos2::new(
        area.left() + left * area.width(),
        area.top() + (1.0 - bottom - h) * area.height(),
    );
    Rect::from_min_size(min, egui::vec2(w * area.width(), h * area.height()))
}

fn count_plot(ui: &mut Ui, panel: &Panel) {
    let colors = generate_palette32(panel.bars.len());
    let bars: Vec<Bar> = panel
        .bars
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(i, (bar, color))| {
            Bar::new(i as f64, bar.count as f64)
                .name(&bar.label)
                .width(0.8)
                .fill(color)
        })
        .collect();

    let labels: Vec<String> = panel.bars.iter().map(|b| b.label.clone()).collect();
    let n = labels.len().max(1) as f64;

    Plot::new(panel.title)
        .x_axis_label(panel.title)
        .y_axis_label("count")
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            labels.get(i as usize).cloned().unwrap_or_default()
        })
        .include_x(-0.5)
        .include_x(n - 0.5)
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}
