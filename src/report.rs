//! Pure report pipeline: dataset + selection → everything the page shows.
//!
//! Nothing here touches egui, so the whole view is testable and two runs on
//! the same inputs compare equal.

use crate::data::aggregate::{GenreAggregate, GenreMeans, GenreStats, Metric};
use crate::data::filter::{FilterRanges, filtered_indices};
use crate::data::model::SurveyDataset;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Current genre choice and, when the variant has them, the slider ranges.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    pub genre: Option<String>,
    pub filters: Option<FilterRanges>,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Dashed reference line drawn at the selected genre's mean.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub genre: String,
    pub value: f64,
}

/// One bar chart: ascending genre means plus the optional marker.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub bars: GenreMeans,
    pub marker: Option<Marker>,
}

impl ChartSeries {
    fn new(aggregate: &GenreAggregate, metric: Metric, genre: Option<&str>) -> Self {
        let bars = aggregate.ordered(metric);
        let marker = genre.and_then(|g| match bars.get(g) {
            Ok(value) => Some(Marker {
                genre: g.to_string(),
                value,
            }),
            Err(e) => {
                log::debug!("Hiding marker: {e}");
                None
            }
        });
        ChartSeries { bars, marker }
    }

    pub fn metric(&self) -> Metric {
        self.bars.metric
    }

    pub fn title(&self) -> String {
        format!("Average {} Score by Genre", self.metric())
    }
}

/// The insight block under the charts.
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    NoSelection,
    /// The selected genre has no rows under the current filters.
    NoData { genre: String },
    Available {
        genre: String,
        anxiety: f64,
        depression: f64,
    },
}

impl Summary {
    fn for_selection(aggregate: &GenreAggregate, genre: Option<&str>) -> Self {
        let Some(genre) = genre else {
            return Summary::NoSelection;
        };
        let means = aggregate.mean(genre, Metric::Anxiety).and_then(|anxiety| {
            aggregate
                .mean(genre, Metric::Depression)
                .map(|depression| (anxiety, depression))
        });
        match means {
            Ok((anxiety, depression)) => Summary::Available {
                genre: genre.to_string(),
                anxiety,
                depression,
            },
            Err(e) => {
                log::debug!("{e}");
                Summary::NoData {
                    genre: genre.to_string(),
                }
            }
        }
    }

    pub fn heading(&self) -> String {
        match self {
            Summary::NoSelection => "🔍 Insight".to_string(),
            Summary::NoData { genre } | Summary::Available { genre, .. } => {
                format!("🔍 Insight for {genre}")
            }
        }
    }

    /// Bullet lines shown under the heading.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Summary::NoSelection => vec!["Choose a genre to see its averages.".to_string()],
            Summary::NoData { .. } => vec!["No data for current filters.".to_string()],
            Summary::Available {
                anxiety,
                depression,
                ..
            } => vec![
                format!("Avg Anxiety Score: {}", format_score(*anxiety)),
                format!("Avg Depression Score: {}", format_score(*depression)),
            ],
        }
    }

    /// Single-line form, e.g. `Avg Anxiety Score: 6.0, Avg Depression Score: 4.0`.
    pub fn one_line(&self) -> String {
        self.lines().join(", ")
    }
}

/// Round to two decimals and print like a decimal literal (`6.0`, `5.67`).
pub fn format_score(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.1}")
    } else {
        format!("{rounded}")
    }
}

/// Everything rendered for one (dataset, selection) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    /// Rows left after filtering.
    pub visible_rows: usize,
    pub anxiety: ChartSeries,
    pub depression: ChartSeries,
    pub summary: Summary,
    /// Per-genre table, alphabetical.
    pub table: Vec<GenreStats>,
}

/// filter → aggregate → charts + summary.
pub fn build_report(dataset: &SurveyDataset, selection: &Selection) -> ReportView {
    let indices = filtered_indices(dataset, selection.filters.as_ref());
    let aggregate = GenreAggregate::from_rows(indices.iter().map(|&i| &dataset.rows[i]));
    let genre = selection.genre.as_deref();
    if aggregate.is_empty() {
        log::debug!("No respondents match the current filters");
    } else {
        log::trace!("{} genres after filtering", aggregate.len());
    }

    ReportView {
        visible_rows: indices.len(),
        anxiety: ChartSeries::new(&aggregate, Metric::Anxiety, genre),
        depression: ChartSeries::new(&aggregate, Metric::Depression, genre),
        summary: Summary::for_selection(&aggregate, genre),
        table: aggregate.iter().cloned().collect(),
    }
}
