use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Write a synthetic MXMH-style survey for trying out the dashboard.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Output file; `.parquet` writes Parquet, anything else CSV
    #[arg(default_value = "mxmh_survey_results.csv")]
    output: PathBuf,

    /// Number of respondents
    #[arg(long, default_value_t = 736)]
    rows: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// (genre, anxiety baseline, depression baseline, popularity weight)
const GENRES: [(&str, f64, f64, u32); 16] = [
    ("Classical", 4.9, 3.6, 53),
    ("Country", 5.0, 3.9, 25),
    ("EDM", 5.2, 5.1, 37),
    ("Folk", 6.3, 4.9, 30),
    ("Gospel", 4.0, 3.0, 6),
    ("Hip hop", 6.1, 5.3, 35),
    ("Jazz", 5.5, 4.4, 20),
    ("K pop", 6.0, 3.8, 26),
    ("Latin", 3.7, 2.7, 3),
    ("Lofi", 5.6, 6.6, 10),
    ("Metal", 6.1, 5.2, 88),
    ("Pop", 6.0, 4.2, 114),
    ("R&B", 5.6, 4.4, 35),
    ("Rap", 5.4, 4.6, 22),
    ("Rock", 6.1, 5.1, 188),
    ("Video game music", 5.3, 5.0, 44),
];

const SERVICES: [&str; 6] = [
    "Spotify",
    "YouTube Music",
    "I do not use a streaming service.",
    "Apple Music",
    "Pandora",
    "Other streaming service",
];

const EFFECTS: [&str; 3] = ["Improve", "No effect", "Worsen"];

/// One row, with the column headers of the original survey export.
#[derive(Debug, Serialize)]
struct Respondent {
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "Age")]
    age: Option<f64>,
    #[serde(rename = "Primary streaming service")]
    service: String,
    #[serde(rename = "Hours per day")]
    hours_per_day: f64,
    #[serde(rename = "While working")]
    while_working: String,
    #[serde(rename = "Instrumentalist")]
    instrumentalist: String,
    #[serde(rename = "Fav genre")]
    fav_genre: String,
    #[serde(rename = "BPM")]
    bpm: Option<f64>,
    #[serde(rename = "Anxiety")]
    anxiety: f64,
    #[serde(rename = "Depression")]
    depression: f64,
    #[serde(rename = "Insomnia")]
    insomnia: f64,
    #[serde(rename = "OCD")]
    ocd: f64,
    #[serde(rename = "Music effects")]
    music_effects: String,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn yes_no(&mut self, p: f64) -> String {
        let answer = if self.chance(p) { "Yes" } else { "No" };
        answer.to_string()
    }
}

fn pick_genre(rng: &mut SimpleRng) -> (&'static str, f64, f64) {
    let total: u32 = GENRES.iter().map(|g| g.3).sum();
    let mut ticket = rng.below(total as usize) as u32;
    for &(name, anxiety, depression, weight) in &GENRES {
        if ticket < weight {
            return (name, anxiety, depression);
        }
        ticket -= weight;
    }
    let (name, anxiety, depression, _) = GENRES[GENRES.len() - 1];
    (name, anxiety, depression)
}

/// Survey scores are whole numbers from 0 to 10.
fn score(rng: &mut SimpleRng, mean: f64) -> f64 {
    rng.gauss(mean, 2.5).round().clamp(0.0, 10.0)
}

fn generate(rows: usize, seed: u64) -> Vec<Respondent> {
    let mut rng = SimpleRng::new(seed);
    (0..rows)
        .map(|i| {
            let (genre, anxiety, depression) = pick_genre(&mut rng);
            let hours = (rng.gauss(3.5, 2.5).abs() * 2.0).round() / 2.0;
            // A few blank ages, like the real export.
            let age = if rng.chance(0.01) {
                None
            } else {
                Some(rng.gauss(25.0, 11.0).round().clamp(10.0, 89.0))
            };
            let bpm = if rng.chance(0.15) {
                None
            } else {
                Some(rng.gauss(120.0, 30.0).round().clamp(40.0, 220.0))
            };

            Respondent {
                timestamp: format!("8/{}/2022 {}:{:02}:00", 27 + i % 4, 8 + i % 12, i % 60),
                age,
                service: SERVICES[rng.below(SERVICES.len())].to_string(),
                hours_per_day: hours.min(24.0),
                while_working: rng.yes_no(0.78),
                instrumentalist: rng.yes_no(0.32),
                fav_genre: genre.to_string(),
                bpm,
                anxiety: score(&mut rng, anxiety + (hours - 3.5) * 0.2),
                depression: score(&mut rng, depression + (hours - 3.5) * 0.25),
                insomnia: score(&mut rng, 3.7),
                ocd: score(&mut rng, 2.6),
                music_effects: EFFECTS[rng.below(EFFECTS.len())].to_string(),
            }
        })
        .collect()
}

fn write_csv(path: &Path, respondents: &[Respondent]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for r in respondents {
        writer.serialize(r).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, respondents: &[Respondent]) -> Result<()> {
    let text = |f: fn(&Respondent) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(respondents.iter().map(f).collect::<Vec<_>>()))
    };
    let number = |f: fn(&Respondent) -> Option<f64>| -> ArrayRef {
        Arc::new(Float64Array::from(respondents.iter().map(f).collect::<Vec<_>>()))
    };

    let columns: Vec<(&str, ArrayRef)> = vec![
        ("Timestamp", text(|r| r.timestamp.as_str())),
        ("Age", number(|r| r.age)),
        ("Primary streaming service", text(|r| r.service.as_str())),
        ("Hours per day", number(|r| Some(r.hours_per_day))),
        ("While working", text(|r| r.while_working.as_str())),
        ("Instrumentalist", text(|r| r.instrumentalist.as_str())),
        ("Fav genre", text(|r| r.fav_genre.as_str())),
        ("BPM", number(|r| r.bpm)),
        ("Anxiety", number(|r| Some(r.anxiety))),
        ("Depression", number(|r| Some(r.depression))),
        ("Insomnia", number(|r| Some(r.insomnia))),
        ("OCD", number(|r| Some(r.ocd))),
        ("Music effects", text(|r| r.music_effects.as_str())),
    ];

    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
            .collect::<Vec<_>>(),
    ));
    let batch = RecordBatch::try_new(
        schema.clone(),
        columns.into_iter().map(|(_, array)| array).collect(),
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let respondents = generate(args.rows, args.seed);

    let is_parquet = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet") || e.eq_ignore_ascii_case("pq"));

    if is_parquet {
        write_parquet(&args.output, &respondents)?;
    } else {
        write_csv(&args.output, &respondents)?;
    }

    println!(
        "Wrote {} respondents ({} genres) to {}",
        respondents.len(),
        GENRES.len(),
        args.output.display()
    );
    Ok(())
}
