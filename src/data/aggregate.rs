use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use super::model::SurveyRow;

// ---------------------------------------------------------------------------
// Metric
// ---------------------------------------------------------------------------

/// The two wellbeing scores the dashboard averages per genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Anxiety,
    Depression,
}

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Metric::Anxiety => "Anxiety",
            Metric::Depression => "Depression",
        }
    }

    fn of(self, stats: &GenreStats) -> f64 {
        match self {
            Metric::Anxiety => stats.mean_anxiety,
            Metric::Depression => stats.mean_depression,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The selected genre has no rows in the current (filtered) aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no {metric} average for genre '{genre}' under the current filters")]
pub struct SelectionNotFoundError {
    pub genre: String,
    pub metric: Metric,
}

// ---------------------------------------------------------------------------
// Per-genre statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct GenreStats {
    pub genre: String,
    pub respondents: usize,
    pub mean_anxiety: f64,
    pub mean_depression: f64,
}

/// Group-by-genre means over a set of rows. Genres without rows are absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenreAggregate {
    by_genre: BTreeMap<String, GenreStats>,
}

impl GenreAggregate {
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a SurveyRow>) -> Self {
        // genre -> (count, anxiety sum, depression sum)
        let mut sums: BTreeMap<&str, (usize, f64, f64)> = BTreeMap::new();
        for row in rows {
            let entry = sums.entry(row.fav_genre.as_str()).or_default();
            entry.0 += 1;
            entry.1 += row.anxiety;
            entry.2 += row.depression;
        }

        let by_genre = sums
            .into_iter()
            .map(|(genre, (count, anxiety, depression))| {
                let n = count as f64;
                let stats = GenreStats {
                    genre: genre.to_string(),
                    respondents: count,
                    mean_anxiety: anxiety / n,
                    mean_depression: depression / n,
                };
                (genre.to_string(), stats)
            })
            .collect();

        GenreAggregate { by_genre }
    }

    pub fn get(&self, genre: &str) -> Option<&GenreStats> {
        self.by_genre.get(genre)
    }

    pub fn mean(&self, genre: &str, metric: Metric) -> Result<f64, SelectionNotFoundError> {
        self.get(genre)
            .map(|stats| metric.of(stats))
            .ok_or_else(|| SelectionNotFoundError {
                genre: genre.to_string(),
                metric,
            })
    }

    /// Genres in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = &GenreStats> {
        self.by_genre.values()
    }

    pub fn len(&self) -> usize {
        self.by_genre.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_genre.is_empty()
    }

    /// Means for one metric, ascending by value (ties by genre name).
    pub fn ordered(&self, metric: Metric) -> GenreMeans {
        let mut entries: Vec<(String, f64)> = self
            .iter()
            .map(|stats| (stats.genre.clone(), metric.of(stats)))
            .collect();
        entries.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        GenreMeans { metric, entries }
    }
}

// ---------------------------------------------------------------------------
// Ordered genre -> mean mapping for one chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct GenreMeans {
    pub metric: Metric,
    entries: Vec<(String, f64)>,
}

impl GenreMeans {
    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(g, _)| g.as_str())
    }

    pub fn get(&self, genre: &str) -> Result<f64, SelectionNotFoundError> {
        self.entries
            .iter()
            .find(|(g, _)| g == genre)
            .map(|(_, v)| *v)
            .ok_or_else(|| SelectionNotFoundError {
                genre: genre.to_string(),
                metric: self.metric,
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(genre: &str, anxiety: f64, depression: f64) -> SurveyRow {
        SurveyRow {
            fav_genre: genre.to_string(),
            anxiety,
            depression,
            age: None,
            hours_per_day: None,
        }
    }

    fn example_rows() -> Vec<SurveyRow> {
        vec![
            row("Rock", 5.0, 3.0),
            row("Rock", 7.0, 5.0),
            row("Jazz", 2.0, 1.0),
        ]
    }

    #[test]
    fn test_means_per_genre() {
        let rows = example_rows();
        let agg = GenreAggregate::from_rows(&rows);

        assert_eq!(agg.len(), 2);
        assert_eq!(agg.mean("Rock", Metric::Anxiety), Ok(6.0));
        assert_eq!(agg.mean("Rock", Metric::Depression), Ok(4.0));
        assert_eq!(agg.mean("Jazz", Metric::Anxiety), Ok(2.0));
        assert_eq!(agg.mean("Jazz", Metric::Depression), Ok(1.0));
        assert_eq!(agg.get("Rock").map(|s| s.respondents), Some(2));
    }

    #[test]
    fn test_mean_matches_manual_average() {
        let rows = vec![
            row("Pop", 1.0, 9.0),
            row("Pop", 2.0, 8.0),
            row("Pop", 6.0, 1.0),
            row("EDM", 10.0, 0.0),
        ];
        let agg = GenreAggregate::from_rows(&rows);

        for stats in agg.iter() {
            let group: Vec<&SurveyRow> =
                rows.iter().filter(|r| r.fav_genre == stats.genre).collect();
            let n = group.len() as f64;
            let anxiety = group.iter().map(|r| r.anxiety).sum::<f64>() / n;
            let depression = group.iter().map(|r| r.depression).sum::<f64>() / n;
            assert!((stats.mean_anxiety - anxiety).abs() < 1e-12);
            assert!((stats.mean_depression - depression).abs() < 1e-12);
        }
    }

    #[test]
    fn test_orderings_are_independent_per_metric() {
        let rows = vec![
            row("Rock", 2.0, 8.0),
            row("Jazz", 5.0, 1.0),
            row("Pop", 9.0, 4.0),
        ];
        let agg = GenreAggregate::from_rows(&rows);

        let anxiety_means = agg.ordered(Metric::Anxiety);
        let depression_means = agg.ordered(Metric::Depression);
        let anxiety: Vec<&str> = anxiety_means.genres().collect();
        let depression: Vec<&str> = depression_means.genres().collect();
        assert_eq!(anxiety, vec!["Rock", "Jazz", "Pop"]);
        assert_eq!(depression, vec!["Jazz", "Pop", "Rock"]);
    }

    #[test]
    fn test_ties_are_broken_by_name() {
        let rows = vec![row("Rock", 3.0, 3.0), row("Folk", 3.0, 3.0)];
        let means = GenreAggregate::from_rows(&rows).ordered(Metric::Anxiety);
        assert_eq!(means.genres().collect::<Vec<_>>(), vec!["Folk", "Rock"]);
    }

    #[test]
    fn test_missing_genre_is_selection_not_found() {
        let rows = example_rows();
        let agg = GenreAggregate::from_rows(&rows);

        let err = agg.mean("Metal", Metric::Anxiety).unwrap_err();
        assert_eq!(err.genre, "Metal");
        assert_eq!(
            agg.ordered(Metric::Depression).get("Metal"),
            Err(SelectionNotFoundError {
                genre: "Metal".to_string(),
                metric: Metric::Depression,
            })
        );
    }

    #[test]
    fn test_empty_rows_give_empty_aggregate() {
        let rows: Vec<SurveyRow> = Vec::new();
        let agg = GenreAggregate::from_rows(&rows);
        assert!(agg.is_empty());
        assert!(agg.ordered(Metric::Anxiety).is_empty());
    }
}
