use serde::{Deserialize, Serialize};

use super::model::{SurveyDataset, SurveyRow};

// ---------------------------------------------------------------------------
// Range predicate
// ---------------------------------------------------------------------------

/// Inclusive `[lo, hi]` bound on a numeric column.
///
/// Serialized as a two-element array so config files can say `age = [18, 30]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct InclusiveRange {
    pub lo: f64,
    pub hi: f64,
}

impl InclusiveRange {
    /// Build a range, swapping the ends if they arrive reversed.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            InclusiveRange { lo: a, hi: b }
        } else {
            InclusiveRange { lo: b, hi: a }
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }

    /// Clamp both ends into `bounds`, keeping `lo <= hi`.
    pub fn clamped_to(&self, bounds: InclusiveRange) -> Self {
        InclusiveRange::new(
            self.lo.clamp(bounds.lo, bounds.hi),
            self.hi.clamp(bounds.lo, bounds.hi),
        )
    }
}

impl From<[f64; 2]> for InclusiveRange {
    fn from([a, b]: [f64; 2]) -> Self {
        InclusiveRange::new(a, b)
    }
}

impl From<InclusiveRange> for [f64; 2] {
    fn from(range: InclusiveRange) -> Self {
        [range.lo, range.hi]
    }
}

// ---------------------------------------------------------------------------
// Filter state: age and listening-hours ranges
// ---------------------------------------------------------------------------

/// The two slider ranges of the filtered dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterRanges {
    pub age: InclusiveRange,
    pub hours_per_day: InclusiveRange,
}

impl FilterRanges {
    /// A row passes when both its age and its hours fall inside the ranges.
    /// Rows lacking either value never pass.
    pub fn matches(&self, row: &SurveyRow) -> bool {
        match (row.age, row.hours_per_day) {
            (Some(age), Some(hours)) => self.age.contains(age) && self.hours_per_day.contains(hours),
            _ => false,
        }
    }
}

/// Return indices of rows that pass the filters (all rows when `None`).
pub fn filtered_indices(dataset: &SurveyDataset, filters: Option<&FilterRanges>) -> Vec<usize> {
    dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| filters.map_or(true, |f| f.matches(row)))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(age: Option<f64>, hours: Option<f64>) -> SurveyRow {
        SurveyRow {
            fav_genre: "Rock".to_string(),
            anxiety: 5.0,
            depression: 5.0,
            age,
            hours_per_day: hours,
        }
    }

    fn ranges(age: [f64; 2], hours: [f64; 2]) -> FilterRanges {
        FilterRanges {
            age: age.into(),
            hours_per_day: hours.into(),
        }
    }

    #[test]
    fn test_range_is_inclusive_and_ordered() {
        let r = InclusiveRange::new(30.0, 18.0);
        assert_eq!(r, InclusiveRange { lo: 18.0, hi: 30.0 });
        assert!(r.contains(18.0));
        assert!(r.contains(30.0));
        assert!(!r.contains(30.5));
    }

    #[test]
    fn test_clamped_to_bounds() {
        let r = InclusiveRange::new(18.0, 30.0).clamped_to(InclusiveRange::new(20.0, 25.0));
        assert_eq!(r, InclusiveRange::new(20.0, 25.0));

        let outside = InclusiveRange::new(80.0, 90.0).clamped_to(InclusiveRange::new(10.0, 60.0));
        assert_eq!(outside, InclusiveRange::new(60.0, 60.0));
    }

    #[test]
    fn test_filtered_indices() {
        let ds = SurveyDataset::from_rows(vec![
            row(Some(18.0), Some(1.0)),
            row(Some(30.0), Some(5.0)),
            row(Some(31.0), Some(3.0)),
            row(Some(20.0), Some(5.5)),
            row(None, Some(2.0)),
        ]);
        let f = ranges([18.0, 30.0], [1.0, 5.0]);
        assert_eq!(filtered_indices(&ds, Some(&f)), vec![0, 1]);
        assert_eq!(filtered_indices(&ds, None), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_range_yields_no_rows() {
        let ds = SurveyDataset::from_rows(vec![row(Some(18.0), Some(1.0))]);
        let f = ranges([90.0, 99.0], [0.0, 10.0]);
        assert!(filtered_indices(&ds, Some(&f)).is_empty());
    }
}
