mod app;
mod color;
mod config;
mod data;
mod report;
mod state;
mod ui;

use std::path::PathBuf;

use app::DashboardApp;
use clap::Parser;
use config::{DashboardConfig, Variant};
use eframe::egui;
use state::AppState;

/// Music & mental health dashboard
#[derive(Parser, Debug)]
#[command(name = "mxmh-dashboard")]
#[command(about = "Average anxiety and depression scores per favourite music genre", long_about = None)]
#[command(version)]
struct Args {
    /// Survey file to open (CSV, JSON or Parquet)
    #[arg(value_name = "DATA")]
    data: Option<PathBuf>,

    /// Path to configuration file (mxmh-dashboard.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Page variant to show
    #[arg(long, value_enum)]
    variant: Option<Variant>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Command-line values win over the config file.
    fn apply(&self, config: &mut DashboardConfig) {
        if let Some(data) = &self.data {
            config.data_path = data.clone();
        }
        if let Some(variant) = self.variant {
            config.variant = variant;
        }
    }

    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

fn main() -> eframe::Result {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .init();

    let mut config = DashboardConfig::load_or_default(args.config.as_deref());
    args.apply(&mut config);

    let mut state = AppState::new(config);
    state.reload();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Music & Mental Health",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::parse_from(["mxmh-dashboard", "other.csv", "--variant", "compact"]);
        let mut config = DashboardConfig::default();
        args.apply(&mut config);
        assert_eq!(config.data_path, PathBuf::from("other.csv"));
        assert_eq!(config.variant, Variant::Compact);
    }

    #[test]
    fn test_no_args_keeps_config() {
        let args = Args::parse_from(["mxmh-dashboard"]);
        let mut config = DashboardConfig {
            variant: Variant::Classic,
            ..DashboardConfig::default()
        };
        args.apply(&mut config);
        assert_eq!(config.variant, Variant::Classic);
        assert_eq!(config.data_path, PathBuf::from(config::DEFAULT_DATA_FILE));
        assert_eq!(args.log_level(), "info");
    }

    #[test]
    fn test_verbosity() {
        let args = Args::parse_from(["mxmh-dashboard", "-vv", "--config", "dash.toml"]);
        assert_eq!(args.log_level(), "trace");
        assert_eq!(args.config, Some(PathBuf::from("dash.toml")));
    }
}
