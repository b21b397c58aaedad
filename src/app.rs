use eframe::egui::{self, ScrollArea, Ui};

use billionaire_os::state::AppState;

use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BillionaireApp {
    pub state: AppState,
}

impl BillionaireApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for BillionaireApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Missing dataset: report and render nothing else ----
        if let Some(msg) = &self.state.fatal_error {
            egui::CentralPanel::default().show(ctx, |ui| {
                panels::fatal_screen(ui, msg);
            });
            return;
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(view) = &self.state.view else {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a dataset to begin  (File → Open…)");
                });
                return;
            };

            ScrollArea::vertical().show(ui, |ui: &mut Ui| {
                ui.heading("Billionaire Intelligence Command Center");
                panels::kpi_row(ui, &view.kpis);
                ui.separator();
                plot::titans_section(ui, view);
                ui.separator();
                plot::industry_section(ui, view);
                ui.separator();
                plot::country_section(ui, view);
            });
        });
    }
}
