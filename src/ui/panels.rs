use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, Page};
use crate::ui::charts;
use crate::views;

// ---------------------------------------------------------------------------
// Top bar – page menu
// ---------------------------------------------------------------------------

/// Render the top menu bar: page selector plus dataset summary.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("StayLens");
        ui.separator();

        for page in Page::ALL {
            if ui
                .selectable_label(state.page == page, page.title())
                .clicked()
            {
                state.page = page;
            }
        }

        ui.separator();
        ui.label(format!("{} listings loaded", state.table.len()));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Static pages
// ---------------------------------------------------------------------------

pub fn home_page(ui: &mut Ui) {
    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.heading("About Airbnb");
        ui.add_space(8.0);
        ui.label(
            "Airbnb is an online marketplace that connects people who want to rent out \
             their property with people who are looking for accommodations, typically \
             for short stays. Airbnb offers hosts a relatively easy way to earn some \
             income from their property, while guests often find rentals that are \
             cheaper and homier than hotels.",
        );
        ui.add_space(8.0);
        ui.label(
            "The platform lets hosts list their properties for lease and enables guests \
             to rent on a short-term basis, covering vacation rentals, apartment \
             rentals, homestays, castles, tree houses and hotel rooms, with a presence \
             in dozens of countries across the world.",
        );
        ui.add_space(16.0);

        ui.heading("Background");
        ui.add_space(8.0);
        ui.label(
            "Airbnb was born in 2007 when two hosts welcomed three guests to their \
             San Francisco home, and has since grown to over 4 million hosts who have \
             welcomed over 1.5 billion guest arrivals in almost every country across \
             the globe.",
        );
    });
}

pub fn about_page(ui: &mut Ui) {
    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.heading("About This Project");
        ui.add_space(8.0);

        let steps: [(&str, &str); 5] = [
            (
                "1. Data Collection",
                "Gather listing, host, review, pricing and location data from \
                 publicly available sources.",
            ),
            (
                "2. Data Cleaning and Preprocessing",
                "Handle missing values, outliers and duplicates; convert data types \
                 and standardize formats.",
            ),
            (
                "3. Exploratory Data Analysis",
                "Understand the distribution and patterns in the data and explore \
                 relationships between variables.",
            ),
            (
                "4. Visualization",
                "Represent key metrics and trends with charts, graphs and maps.",
            ),
            (
                "5. Geospatial Analysis",
                "Map out popular areas, analyze neighborhood characteristics and \
                 visualize pricing variations.",
            ),
        ];

        for (title, body) in steps {
            ui.strong(title);
            ui.label(body);
            ui.add_space(8.0);
        }
    });
}

// ---------------------------------------------------------------------------
// Data exploration
// ---------------------------------------------------------------------------

/// Left panel with the cascading country → room-type dropdowns.
pub fn explore_side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.schema.is_err() {
        ui.label("Filters unavailable: dataset schema is incomplete.");
        return;
    }

    ui.strong("Country");
    let selected_country = state
        .country
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_default();
    let countries = state.country_options();
    egui::ComboBox::from_id_salt("country_select")
        .selected_text(selected_country)
        .show_ui(ui, |ui: &mut Ui| {
            for value in countries {
                let label = value.to_string();
                if ui
                    .selectable_label(state.country.as_ref() == Some(&value), label)
                    .clicked()
                {
                    state.select_country(value);
                }
            }
        });
    ui.add_space(8.0);

    // Second stage only offers room types present in the country subset.
    ui.strong("Room type");
    let selected_room = state
        .room_type
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_default();
    let room_types = state.room_type_options();
    egui::ComboBox::from_id_salt("room_type_select")
        .selected_text(selected_room)
        .show_ui(ui, |ui: &mut Ui| {
            for value in room_types {
                let label = value.to_string();
                if ui
                    .selectable_label(state.room_type.as_ref() == Some(&value), label)
                    .clicked()
                {
                    state.select_room_type(value);
                }
            }
        });

    ui.add_space(12.0);
    ui.separator();
    ui.label(format!(
        "{} listings in country,\n{} after room type",
        state.country_subset.len(),
        state.room_subset.len()
    ));
}

/// Central exploration page: the five chart sections.
pub fn explore_page(ui: &mut Ui, state: &AppState) {
    ui.heading("Data Exploration");

    if let Err(err) = &state.schema {
        ui.add_space(8.0);
        ui.label(RichText::new(err.to_string()).color(Color32::RED));
        return;
    }

    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        section(ui, "Price Analysis", |ui| {
            charts::render(ui, "price_bar", &state.room_subset, &views::PRICE_BY_PROPERTY_TYPE);
        });

        section(ui, "Availability Analysis", |ui| {
            charts::render(
                ui,
                "availability_sunburst",
                &state.country_subset,
                &views::AVAILABILITY_SUNBURST,
            );
        });

        section(ui, "Location Based Analysis", |ui| {
            charts::render(ui, "price_map", &state.country_subset, &views::PRICE_MAP);
        });

        section(ui, "Geospatial Visualization", |ui| {
            charts::render(ui, "geo_scatter", &state.country_subset, &views::GEO_SCATTER);
        });

        section(ui, "Top Charts", |ui| {
            charts::render(ui, "top_bar_chart", &state.country_subset, &views::TOP_CHARTS);
        });
    });
}

fn section(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    ui.add_space(12.0);
    ui.heading(title);
    ui.add_space(4.0);
    add_contents(ui);
    ui.add_space(4.0);
    ui.separator();
}
