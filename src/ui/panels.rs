use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::data::filter::{FilterRanges, InclusiveRange};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter sliders
// ---------------------------------------------------------------------------

/// Render the filter panel. Slider changes recompute the report right away.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🔍 Filter Options");
    ui.separator();

    let (Some(age_bounds), Some(mut filters)) =
        (state.age_slider_bounds(), state.selection.filters)
    else {
        ui.label("No dataset loaded.");
        return;
    };
    let hours_bounds = state.config.filters.hours_bounds;
    let hours_step = state.config.filters.hours_step;

    ui.strong("Select Age Range");
    range_sliders(ui, &mut filters.age, age_bounds, 1.0);
    ui.add_space(8.0);

    ui.strong("Select Listening Hours per Day");
    range_sliders(ui, &mut filters.hours_per_day, hours_bounds, hours_step);
    ui.add_space(8.0);

    if ui.small_button("Reset").clicked() {
        let defaults = &state.config.filters;
        filters = FilterRanges {
            age: defaults.age.clamped_to(age_bounds),
            hours_per_day: defaults.hours.clamped_to(hours_bounds),
        };
    }

    state.set_filters(filters);
}

/// Two sliders editing one inclusive range; the ends never cross.
fn range_sliders(ui: &mut Ui, range: &mut InclusiveRange, bounds: InclusiveRange, step: f64) {
    let mut lo = range.lo;
    let mut hi = range.hi;
    let lo_changed = ui
        .add(Slider::new(&mut lo, bounds.lo..=bounds.hi).step_by(step).text("from"))
        .changed();
    let hi_changed = ui
        .add(Slider::new(&mut hi, bounds.lo..=bounds.hi).step_by(step).text("to"))
        .changed();

    if lo_changed && lo > hi {
        hi = lo;
    } else if hi_changed && hi < lo {
        lo = hi;
    }
    *range = InclusiveRange::new(lo, hi);
}

// ---------------------------------------------------------------------------
// Page header – title, intro, genre selector
// ---------------------------------------------------------------------------

pub fn header(ui: &mut Ui, state: &mut AppState) {
    ui.heading(RichText::new(state.config.page_title()).size(26.0));
    ui.add_space(4.0);
    ui.label(state.config.intro_text());
    ui.add_space(8.0);

    let Some(genres) = state.dataset.as_ref().map(|ds| ds.genres().to_vec()) else {
        return;
    };

    let current = state.selection.genre.clone().unwrap_or_default();
    let mut picked: Option<String> = None;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Choose a genre to highlight:");
        egui::ComboBox::from_id_salt("genre_select")
            .selected_text(&current)
            .width(180.0)
            .show_ui(ui, |ui: &mut Ui| {
                for genre in &genres {
                    if ui.selectable_label(current == *genre, genre).clicked() {
                        picked = Some(genre.clone());
                    }
                }
            });
    });

    if let Some(genre) = picked {
        state.select_genre(&genre);
    }
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
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(view)) = (&state.dataset, &state.view) {
            ui.label(format!(
                "{} respondents loaded, {} match filters",
                ds.len(),
                view.visible_rows
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open survey data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
