use eframe::egui;

use crate::data::model::ListingTable;
use crate::state::{AppState, Page};
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StayLensApp {
    pub state: AppState,
}

impl StayLensApp {
    pub fn new(table: &'static ListingTable) -> Self {
        Self {
            state: AppState::new(table),
        }
    }
}

impl eframe::App for StayLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: page menu ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: cascading filters (exploration only) ----
        if self.state.page == Page::Explore {
            egui::SidePanel::left("filter_panel")
                .default_width(220.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::explore_side_panel(ui, &mut self.state);
                });
        }

        // ---- Central panel: one render per page variant ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.page {
            Page::Home => panels::home_page(ui),
            Page::Explore => panels::explore_page(ui, &self.state),
            Page::About => panels::about_page(ui),
        });
    }
}
