//! Dashboard configuration.
//!
//! The three page variants share one component; a variant picks the copy and
//! whether the sidebar filters exist. Optional overrides come from a TOML file
//! (`mxmh-dashboard.toml` in the working directory, or `--config FILE`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::filter::InclusiveRange;
use crate::data::loader::CleaningPolicy;

pub const DEFAULT_CONFIG_FILE: &str = "mxmh-dashboard.toml";
pub const DEFAULT_DATA_FILE: &str = "mxmh_survey_results.csv";
pub const AUTHOR: &str = "Siri Meghana Annamdevula";
pub const DATASET_URL: &str =
    "https://www.kaggle.com/datasets/catherinerasgaitis/mxmh-survey-results";

const FILTERED_INTRO: &str = "\
Welcome to a data exploration of how music genres relate to mental well-being. \
This dashboard is built using real-world survey data to uncover:

• 🎵 Which music genres are associated with lower anxiety or depression?
• 💡 Can our listening habits say something about our emotional health?
• 🔍 What patterns can we discover in how people use music as a coping tool?

Use the filters on the left and pick a genre to highlight it in both charts.";

const CLASSIC_INTRO: &str = "\
Explore how favourite music genres line up with self-reported anxiety and \
depression scores (0–10) from the MXMH survey. Pick a genre to highlight it.";

const COMPACT_INTRO: &str = "Average anxiety and depression scores per favourite genre.";

// ---------------------------------------------------------------------------
// Variant
// ---------------------------------------------------------------------------

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Age and listening-hours sliders in a side panel.
    #[default]
    Filtered,
    /// Genre selector only.
    Classic,
    /// Genre selector only, short copy.
    Compact,
}

impl Variant {
    pub fn has_filters(self) -> bool {
        matches!(self, Variant::Filtered)
    }

    pub fn cleaning_policy(self) -> CleaningPolicy {
        CleaningPolicy {
            require_filter_columns: self.has_filters(),
        }
    }

    pub fn default_title(self) -> &'static str {
        match self {
            Variant::Filtered => "🎧 The Healing Power of Music",
            Variant::Classic => "🎧 Music & Mental Health",
            Variant::Compact => "🎧 Genre vs. Wellbeing",
        }
    }

    pub fn default_intro(self) -> &'static str {
        match self {
            Variant::Filtered => FILTERED_INTRO,
            Variant::Classic => CLASSIC_INTRO,
            Variant::Compact => COMPACT_INTRO,
        }
    }
}

// ---------------------------------------------------------------------------
// Config file
// ---------------------------------------------------------------------------

/// Main dashboard configuration (loaded from `mxmh-dashboard.toml`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub variant: Variant,

    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Overrides the variant's page title.
    #[serde(default)]
    pub title: Option<String>,

    /// Overrides the variant's intro text.
    #[serde(default)]
    pub intro: Option<String>,

    #[serde(default)]
    pub filters: FilterDefaults,
}

/// Initial slider positions and the fixed hours slider geometry.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct FilterDefaults {
    #[serde(default = "default_age")]
    pub age: InclusiveRange,
    #[serde(default = "default_hours")]
    pub hours: InclusiveRange,
    #[serde(default = "default_hours_bounds")]
    pub hours_bounds: InclusiveRange,
    #[serde(default = "default_hours_step")]
    pub hours_step: f64,
}

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_age() -> InclusiveRange {
    InclusiveRange::new(18.0, 30.0)
}

fn default_hours() -> InclusiveRange {
    InclusiveRange::new(1.0, 5.0)
}

fn default_hours_bounds() -> InclusiveRange {
    InclusiveRange::new(0.0, 10.0)
}

fn default_hours_step() -> f64 {
    0.5
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            age: default_age(),
            hours: default_hours(),
            hours_bounds: default_hours_bounds(),
            hours_step: default_hours_step(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            data_path: default_data_path(),
            title: None,
            intro: None,
            filters: FilterDefaults::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("parsing dashboard config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml_str(&contents).with_context(|| format!("in {}", path.display()))
    }

    /// Load `path` (or the default file if present). Problems are logged and
    /// the defaults used instead.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Self::default();
                }
                default
            }
        };

        match Self::load(&path) {
            Ok(config) => {
                log::info!("Using config {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }

    pub fn page_title(&self) -> &str {
        self.title
            .as_deref()
            .unwrap_or_else(|| self.variant.default_title())
    }

    pub fn intro_text(&self) -> &str {
        self.intro
            .as_deref()
            .unwrap_or_else(|| self.variant.default_intro())
    }
}
