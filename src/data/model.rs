use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Column names (after normalization)
// ---------------------------------------------------------------------------

pub mod columns {
    pub const FAV_GENRE: &str = "fav_genre";
    pub const ANXIETY: &str = "anxiety";
    pub const DEPRESSION: &str = "depression";
    pub const AGE: &str = "age";
    pub const HOURS_PER_DAY: &str = "hours_per_day";
}

// ---------------------------------------------------------------------------
// CellValue – a single raw cell before cleaning
// ---------------------------------------------------------------------------

/// A raw cell as read from the source file, before any coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Null,
}

impl CellValue {
    /// Lenient numeric coercion: anything that does not parse to a finite
    /// number is treated as missing.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v).filter(|v| v.is_finite()),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            CellValue::Null => None,
        }
    }

    /// Categorical view of the cell. Blank text counts as missing.
    pub fn to_text(&self) -> Option<String> {
        match self {
            CellValue::Text(s) if !s.trim().is_empty() => Some(s.clone()),
            CellValue::Number(v) if v.is_finite() => Some(v.to_string()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// RawTable – header + cells, straight out of a loader
// ---------------------------------------------------------------------------

/// Column-named grid of cells produced by the format-specific readers.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    /// Position of the first column with exactly this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

// ---------------------------------------------------------------------------
// SurveyRow – one respondent
// ---------------------------------------------------------------------------

/// One cleaned respondent record.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyRow {
    pub fav_genre: String,
    /// Self-reported score, 0–10.
    pub anxiety: f64,
    /// Self-reported score, 0–10.
    pub depression: f64,
    pub age: Option<f64>,
    pub hours_per_day: Option<f64>,
}

// ---------------------------------------------------------------------------
// SurveyDataset – the complete cleaned dataset
// ---------------------------------------------------------------------------

/// The cleaned dataset with its genre list and age bounds precomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyDataset {
    pub rows: Vec<SurveyRow>,
    genres: Vec<String>,
    age_bounds: Option<(f64, f64)>,
}

impl SurveyDataset {
    pub fn from_rows(rows: Vec<SurveyRow>) -> Self {
        let genres: BTreeSet<&str> = rows.iter().map(|r| r.fav_genre.as_str()).collect();
        let genres = genres.into_iter().map(str::to_string).collect();

        let age_bounds = rows
            .iter()
            .filter_map(|r| r.age)
            .fold(None, |acc: Option<(f64, f64)>, age| match acc {
                Some((lo, hi)) => Some((lo.min(age), hi.max(age))),
                None => Some((age, age)),
            });

        SurveyDataset {
            rows,
            genres,
            age_bounds,
        }
    }

    /// Sorted unique genres of the whole (unfiltered) dataset.
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// Smallest and largest observed age, if any row has one.
    pub fn age_bounds(&self) -> Option<(f64, f64)> {
        self.age_bounds
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(genre: &str, age: Option<f64>) -> SurveyRow {
        SurveyRow {
            fav_genre: genre.to_string(),
            anxiety: 1.0,
            depression: 1.0,
            age,
            hours_per_day: None,
        }
    }

    #[test]
    fn test_lenient_numeric_coercion() {
        assert_eq!(CellValue::Text(" 4.5 ".into()).to_number(), Some(4.5));
        assert_eq!(CellValue::Number(7.0).to_number(), Some(7.0));
        assert_eq!(CellValue::Text("N/A".into()).to_number(), None);
        assert_eq!(CellValue::Text("NaN".into()).to_number(), None);
        assert_eq!(CellValue::Number(f64::NAN).to_number(), None);
        assert_eq!(CellValue::Null.to_number(), None);
    }

    #[test]
    fn test_blank_text_is_missing() {
        assert_eq!(CellValue::Text("   ".into()).to_text(), None);
        assert_eq!(CellValue::Null.to_text(), None);
        assert_eq!(CellValue::Text("Rock".into()).to_text().as_deref(), Some("Rock"));
    }

    #[test]
    fn test_dataset_genres_sorted_and_unique() {
        let ds = SurveyDataset::from_rows(vec![
            row("Rock", Some(30.0)),
            row("Jazz", Some(18.0)),
            row("Rock", None),
        ]);
        assert_eq!(ds.genres(), ["Jazz".to_string(), "Rock".to_string()]);
        assert_eq!(ds.age_bounds(), Some((18.0, 30.0)));
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn test_empty_dataset_has_no_bounds() {
        let ds = SurveyDataset::from_rows(Vec::new());
        assert!(ds.is_empty());
        assert!(ds.genres().is_empty());
        assert_eq!(ds.age_bounds(), None);
    }
}
