use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, GridInput, GridMark, Legend, LineStyle, Plot, VLine};

use crate::color::{GradientPalette, MARKER_COLOR};
use crate::report::ChartSeries;

const BAR_HEIGHT_PX: f32 = 26.0;
const MIN_PLOT_HEIGHT: f32 = 160.0;

// ---------------------------------------------------------------------------
// Genre bar chart (central panel)
// ---------------------------------------------------------------------------

/// Horizontal bars, one per genre in ascending order, with a dashed marker
/// at the selected genre's mean.
pub fn genre_bar_chart(ui: &mut Ui, series: &ChartSeries, palette: GradientPalette) {
    ui.label(RichText::new(series.title()).strong().size(16.0));

    if series.bars.is_empty() {
        ui.label("No respondents match the current filters.");
        return;
    }

    let entries = series.bars.entries();
    let colors = palette.colors(series.bars.len());
    let count = entries.len();
    let labels = labels_by_position(series);

    let bars: Vec<Bar> = entries
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(i, ((genre, mean), color))| {
            Bar::new(bar_position(i, count), *mean)
                .name(genre)
                .fill(color)
                .width(0.7)
        })
        .collect();

    let metric = series.metric();
    let height = (count as f32 * BAR_HEIGHT_PX + 60.0).max(MIN_PLOT_HEIGHT);

    Plot::new(format!("genre_chart_{metric}"))
        .legend(Legend::default())
        .height(height)
        .x_axis_label(format!("Mean {metric} score"))
        .include_x(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .y_grid_spacer(category_spacer(count))
        .y_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .horizontal()
                    .name(metric.label()),
            );

            if let Some(marker) = &series.marker {
                plot_ui.vline(
                    VLine::new(marker.value)
                        .name(&marker.genre)
                        .color(MARKER_COLOR)
                        .width(1.5)
                        .style(LineStyle::dashed_loose()),
                );
            }
        });
}

/// Y position of the `index`-th bar in ascending order. The lowest mean is
/// drawn at the top.
fn bar_position(index: usize, count: usize) -> f64 {
    (count - 1 - index) as f64
}

/// Genre labels indexed by y position, bottom to top.
fn labels_by_position(series: &ChartSeries) -> Vec<String> {
    let mut labels: Vec<String> = series.bars.genres().map(str::to_string).collect();
    labels.reverse();
    labels
}

/// One grid line per bar so every genre gets its label.
fn category_spacer(count: usize) -> impl Fn(GridInput) -> Vec<GridMark> + 'static {
    move |_input| {
        (0..count)
            .map(|i| GridMark {
                value: i as f64,
                step_size: 1.0,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::{GenreAggregate, Metric};
    use crate::data::model::SurveyRow;

    fn series() -> ChartSeries {
        let rows: Vec<SurveyRow> = [("Rock", 6.0), ("Jazz", 2.0), ("Pop", 4.0)]
            .into_iter()
            .map(|(genre, anxiety)| SurveyRow {
                fav_genre: genre.to_string(),
                anxiety,
                depression: anxiety,
                age: None,
                hours_per_day: None,
            })
            .collect();
        ChartSeries {
            bars: GenreAggregate::from_rows(&rows).ordered(Metric::Anxiety),
            marker: None,
        }
    }

    #[test]
    fn test_lowest_mean_is_drawn_on_top() {
        let series = series();
        let labels = labels_by_position(&series);
        let count = series.bars.len();

        // Jazz has the lowest mean and sits at the highest y.
        assert_eq!(bar_position(0, count), 2.0);
        assert_eq!(bar_position(2, count), 0.0);
        assert_eq!(labels, vec!["Rock", "Pop", "Jazz"]);
        for (i, genre) in series.bars.genres().enumerate() {
            assert_eq!(labels[bar_position(i, count) as usize], genre);
        }
    }
}
