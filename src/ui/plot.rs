use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Plot};

use billionaire_os::data::query::{GroupTotal, ViewModel};

use crate::color::ColorScale;
use crate::ui::panels::format_thousands;

const CHART_HEIGHT: f32 = 280.0;
const UNKNOWN: &str = "(unknown)";

// ---------------------------------------------------------------------------
// Dashboard sections (central panel)
// ---------------------------------------------------------------------------

/// Top 10 titans: bar chart plus a detail table.
pub fn titans_section(ui: &mut Ui, view: &ViewModel) {
    ui.heading("Top 10 Global Titans");

    let labels: Vec<String> = view.top_titans.iter().map(|r| r.name.clone()).collect();
    let values: Vec<f64> = view
        .top_titans
        .iter()
        .map(|r| r.net_worth.unwrap_or(0.0))
        .collect();
    bar_chart(ui, "titans_chart", labels, values);

    ui.push_id("titans_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::exact(28.0))
            .column(Column::remainder().at_least(160.0))
            .column(Column::auto().at_least(100.0))
            .column(Column::auto().at_least(120.0))
            .column(Column::auto().at_least(90.0))
            .header(20.0, |mut header| {
                for title in ["#", "Name", "Country", "Industry", "Worth ($M)"] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for (rank, record) in view.top_titans.iter().enumerate() {
                    body.row(18.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label((rank + 1).to_string());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(record.name.as_str());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(record.country.as_deref().unwrap_or(UNKNOWN));
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(record.category.as_deref().unwrap_or(UNKNOWN));
                        });
                        row.col(|ui: &mut Ui| {
                            let worth = record.net_worth.unwrap_or(f64::NAN);
                            ui.label(format_thousands(worth, 0));
                        });
                    });
                }
            });
    });
}

/// Total worth per industry, largest first.
pub fn industry_section(ui: &mut Ui, view: &ViewModel) {
    ui.heading("Industry Wealth Distribution");
    group_chart(ui, "industry_chart", &view.category_totals);
}

/// Top 15 countries by total worth.
pub fn country_section(ui: &mut Ui, view: &ViewModel) {
    ui.heading("Country Wealth Power");
    group_chart(ui, "country_chart", &view.country_totals);
}

fn group_chart(ui: &mut Ui, id: &str, groups: &[GroupTotal]) {
    let labels = groups
        .iter()
        .map(|g| g.key.clone().unwrap_or_else(|| UNKNOWN.to_string()))
        .collect();
    let values = groups.iter().map(|g| g.total).collect();
    bar_chart(ui, id, labels, values);
}

/// Vertical bars, one per label, coloured by value.
fn bar_chart(ui: &mut Ui, id: &str, labels: Vec<String>, values: Vec<f64>) {
    if values.is_empty() {
        ui.label("No matching records.");
        return;
    }

    let scale = ColorScale::from_values(values.iter().copied());
    let bars: Vec<Bar> = labels
        .iter()
        .zip(&values)
        .enumerate()
        .map(|(i, (label, &value))| {
            Bar::new(i as f64, value)
                .name(label)
                .fill(scale.color_for(value))
        })
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .y_axis_label("Worth ($M)")
        .x_axis_formatter(move |mark, _range| axis_label(&labels, mark.value))
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).width(0.7));
        });
}

/// Category name under integer ticks, nothing elsewhere.
fn axis_label(labels: &[String], position: f64) -> String {
    if position.fract() != 0.0 || position < 0.0 {
        return String::new();
    }
    labels.get(position as usize).cloned().unwrap_or_default()
}
