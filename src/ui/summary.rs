use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::config::{AUTHOR, DATASET_URL};
use crate::data::aggregate::GenreStats;
use crate::report::{Summary, format_score};

// ---------------------------------------------------------------------------
// Insight block
// ---------------------------------------------------------------------------

pub fn insight(ui: &mut Ui, summary: &Summary) {
    ui.heading(summary.heading());
    let color = match summary {
        Summary::Available { .. } => ui.visuals().text_color(),
        _ => Color32::GRAY,
    };
    for line in summary.lines() {
        ui.label(RichText::new(format!("• {line}")).size(14.0).color(color));
    }
}

// ---------------------------------------------------------------------------
// Per-genre table
// ---------------------------------------------------------------------------

pub fn genre_table(ui: &mut Ui, rows: &[GenreStats]) {
    if rows.is_empty() {
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Genre", "Respondents", "Avg Anxiety", "Avg Depression"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for stats in rows {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&stats.genre);
                    });
                    row.col(|ui| {
                        ui.label(stats.respondents.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format_score(stats.mean_anxiety));
                    });
                    row.col(|ui| {
                        ui.label(format_score(stats.mean_depression));
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Footer
// ---------------------------------------------------------------------------

/// Author and tooling credits shown above the dataset link.
fn credits() -> [String; 2] {
    [
        format!("🔗 Created by {AUTHOR}"),
        "📊 Powered by Rust, egui and egui_plot".to_string(),
    ]
}

pub fn footer(ui: &mut Ui) {
    ui.separator();
    let [author, tooling] = credits();
    ui.label(RichText::new(author).strong());
    ui.label(tooling);
    ui.horizontal(|ui| {
        ui.label("📁 Dataset:");
        ui.hyperlink_to("MXMH Music & Mental Health Survey (Kaggle)", DATASET_URL);
    });
    ui.label(
        RichText::new(
            "This project explores the quiet power of music in mental wellness, \
             where every beat, lyric, and rhythm tells a story about the listener.",
        )
        .italics()
        .color(Color32::GRAY),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credits_name_author_first() {
        let [author, tooling] = credits();
        assert_eq!(author, "🔗 Created by Siri Meghana Annamdevula");
        assert!(tooling.starts_with("📊 Powered by"));
    }
}
