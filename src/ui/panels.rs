use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use billionaire_os::data::query::Kpis;
use billionaire_os::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Which multi-select a widget event belongs to.
#[derive(Clone, Copy)]
enum Dimension {
    Country,
    Category,
}

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Control Panel");
    ui.separator();

    let Some(view) = &state.view else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state after the widgets.
    let countries = view.country_options.clone();
    let categories = view.category_options.clone();
    let selection = state.selection.clone();

    let mut toggled: Vec<(Dimension, String)> = Vec::new();
    let mut cleared: Vec<Dimension> = Vec::new();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            multi_select(
                ui,
                "Select Country",
                &countries,
                &selection.countries,
                Dimension::Country,
                &mut toggled,
                &mut cleared,
            );
            multi_select(
                ui,
                "Select Industry",
                &categories,
                &selection.categories,
                Dimension::Category,
                &mut toggled,
                &mut cleared,
            );
        });

    for dim in cleared {
        match dim {
            Dimension::Country => state.clear_countries(),
            Dimension::Category => state.clear_categories(),
        }
    }
    for (dim, value) in toggled {
        match dim {
            Dimension::Country => state.toggle_country(&value),
            Dimension::Category => state.toggle_category(&value),
        }
    }
}

/// One collapsible checkbox list. Nothing ticked means no filter.
fn multi_select(
    ui: &mut Ui,
    title: &str,
    options: &[String],
    selected: &BTreeSet<String>,
    dim: Dimension,
    toggled: &mut Vec<(Dimension, String)>,
    cleared: &mut Vec<Dimension>,
) {
    let header_text = if selected.is_empty() {
        format!("{title}  (all)")
    } else {
        format!("{title}  ({}/{})", selected.len(), options.len())
    };

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if ui
                .add_enabled(!selected.is_empty(), egui::Button::new("Clear").small())
                .clicked()
            {
                cleared.push(dim);
            }

            for value in options {
                let mut checked = selected.contains(value);
                if ui.checkbox(&mut checked, value.as_str()).changed() {
                    toggled.push((dim, value.clone()));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(view)) = (&state.dataset, &state.view) {
            ui.label(format!(
                "{} records loaded, {} match filters",
                ds.len(),
                view.kpis.count
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

/// Four metric tiles across the top of the central panel.
pub fn kpi_row(ui: &mut Ui, kpis: &Kpis) {
    ui.columns(4, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total Billionaires", kpis.count.to_string());
        metric(
            &mut cols[1],
            "Total Wealth ($M)",
            format_thousands(kpis.total_worth, 0),
        );
        metric(
            &mut cols[2],
            "Average Wealth ($M)",
            format_thousands(kpis.avg_worth, 1),
        );
        metric(&mut cols[3], "Top Country", kpis.modal_country.clone());
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.label(RichText::new(label).strong());
        ui.label(RichText::new(value).size(24.0).strong());
    });
}

/// `1234567.891` with 1 decimal → `"1,234,567.9"`. NaN renders as "N/A".
pub fn format_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let text = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + text.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    if value < 0.0 && grouped.chars().any(|c| c.is_ascii_digit() && c != '0') {
        grouped.insert(0, '-');
    }
    grouped
}

// ---------------------------------------------------------------------------
// Fatal error screen
// ---------------------------------------------------------------------------

/// Shown instead of the dashboard when the dataset is missing.
pub fn fatal_screen(ui: &mut Ui, message: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading(RichText::new(message).color(Color32::RED));
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open billionaire dataset")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        // Errors are recorded on the state and shown by the UI.
        if let Err(e) = state.open(&path) {
            log::error!("Failed to open {}: {e}", path.display());
        }
    }
}
