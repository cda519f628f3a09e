use crate::pilots::pilot_ids;
use crate::runner::{run_pilot, RunMetrics};
use crate::util::{seed_to_hex, viewport_label};
use anyhow::{anyhow, Context, Result};
use galaga_core::Viewport;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub const REPORT_FILE: &str = "summary.json";

#[derive(Clone, Debug)]
pub struct BenchmarkConfig {
    pub pilots: Vec<String>,
    pub seeds: Vec<u32>,
    pub viewports: Vec<Viewport>,
    pub max_frames: u32,
    pub out_dir: PathBuf,
    pub jobs: Option<usize>,
}

#[derive(Clone, Debug, Serialize)]
pub struct RunRecord {
    pub pilot_id: String,
    pub seed: u32,
    pub seed_hex: String,
    pub viewport: String,
    pub frame_count: u32,
    pub final_score: u32,
    pub final_wave: u32,
    pub waves_cleared: u32,
    pub game_over: bool,
    pub shots_fired: u32,
    pub accuracy: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct PilotAggregate {
    pub pilot_id: String,
    pub runs: usize,
    pub avg_score: f64,
    pub max_score: u32,
    pub avg_wave: f64,
    pub max_wave: u32,
    pub avg_frames: f64,
    pub survival_rate: f64,
    pub avg_accuracy: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct BenchmarkReport {
    pub generated_unix_s: u64,
    pub max_frames: u32,
    pub jobs: Option<usize>,
    pub pilots: Vec<String>,
    pub seeds: Vec<u32>,
    pub viewports: Vec<String>,
    pub run_count: usize,
    pub pilot_rankings: Vec<PilotAggregate>,
    pub runs: Vec<RunRecord>,
}

pub fn resolve_pilots(input: Option<&str>) -> Result<Vec<String>> {
    let Some(raw) = input else {
        return Ok(pilot_ids().iter().map(|id| (*id).to_string()).collect());
    };
    let pilots: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();
    if pilots.is_empty() {
        return Err(anyhow!("--pilots resolved to empty list"));
    }
    if let Some(unknown) = pilots.iter().find(|id| !pilot_ids().contains(&id.as_str())) {
        return Err(anyhow!(
            "unknown pilot '{unknown}'. available: {}",
            pilot_ids().join(", ")
        ));
    }
    Ok(pilots)
}

/// Runs every pilot × seed × viewport combination in parallel and writes
/// `summary.json` into `out_dir`.
pub fn run_benchmark(config: BenchmarkConfig) -> Result<BenchmarkReport> {
    if config.seeds.is_empty() {
        return Err(anyhow!("benchmark requires at least one seed"));
    }
    if config.pilots.is_empty() {
        return Err(anyhow!("benchmark requires at least one pilot"));
    }
    if config.viewports.is_empty() {
        return Err(anyhow!("benchmark requires at least one viewport"));
    }
    if config.jobs == Some(0) {
        return Err(anyhow!("benchmark --jobs must be >= 1 when provided"));
    }
    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("failed creating {}", config.out_dir.display()))?;

    let viewports = &config.viewports;
    let run_jobs: Vec<(&str, u32, Viewport)> = config
        .pilots
        .iter()
        .flat_map(|pilot| {
            config.seeds.iter().flat_map(move |seed| {
                viewports
                    .iter()
                    .map(move |viewport| (pilot.as_str(), *seed, *viewport))
            })
        })
        .collect();

    let run_one = |(pilot_id, seed, viewport): &(&str, u32, Viewport)| -> Result<RunMetrics> {
        run_pilot(pilot_id, *seed, *viewport, config.max_frames).with_context(|| {
            format!(
                "benchmark run failed for pilot={pilot_id} seed={} viewport={}",
                seed_to_hex(*seed),
                viewport_label(viewport)
            )
        })
    };

    let results: Vec<Result<RunMetrics>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| run_jobs.par_iter().map(run_one).collect())
    } else {
        run_jobs.par_iter().map(run_one).collect()
    };
    let runs = results.into_iter().collect::<Result<Vec<_>>>()?;

    let mut pilot_rankings = aggregate(&runs);
    pilot_rankings.sort_by(|a, b| {
        b.avg_score
            .total_cmp(&a.avg_score)
            .then_with(|| b.avg_frames.total_cmp(&a.avg_frames))
            .then_with(|| a.pilot_id.cmp(&b.pilot_id))
    });

    let mut run_records: Vec<RunRecord> = runs.iter().map(RunRecord::from).collect();
    run_records.sort_by(|a, b| {
        b.final_score
            .cmp(&a.final_score)
            .then_with(|| b.frame_count.cmp(&a.frame_count))
            .then_with(|| a.pilot_id.cmp(&b.pilot_id))
            .then_with(|| a.seed.cmp(&b.seed))
    });

    let report = BenchmarkReport {
        generated_unix_s: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
        max_frames: config.max_frames,
        jobs: config.jobs,
        pilots: config.pilots,
        seeds: config.seeds,
        viewports: config.viewports.iter().map(viewport_label).collect(),
        run_count: run_records.len(),
        pilot_rankings,
        runs: run_records,
    };

    let report_path = config.out_dir.join(REPORT_FILE);
    fs::write(
        &report_path,
        serde_json::to_vec_pretty(&report).context("failed to serialize summary json")?,
    )
    .with_context(|| format!("failed writing {}", report_path.display()))?;

    Ok(report)
}

impl From<&RunMetrics> for RunRecord {
    fn from(metrics: &RunMetrics) -> Self {
        Self {
            pilot_id: metrics.pilot_id.clone(),
            seed: metrics.seed,
            seed_hex: seed_to_hex(metrics.seed),
            viewport: viewport_label(&metrics.viewport),
            frame_count: metrics.frame_count,
            final_score: metrics.final_score,
            final_wave: metrics.final_wave,
            waves_cleared: metrics.waves_cleared,
            game_over: metrics.game_over,
            shots_fired: metrics.shots_fired,
            accuracy: metrics.accuracy(),
        }
    }
}

fn aggregate(runs: &[RunMetrics]) -> Vec<PilotAggregate> {
    let mut grouped: BTreeMap<&str, Vec<&RunMetrics>> = BTreeMap::new();
    for run in runs {
        grouped.entry(run.pilot_id.as_str()).or_default().push(run);
    }

    grouped
        .into_iter()
        .map(|(pilot_id, pilot_runs)| {
            let n = pilot_runs.len() as f64;
            let mean = |f: fn(&RunMetrics) -> f64| pilot_runs.iter().map(|r| f(r)).sum::<f64>() / n;
            let survived = pilot_runs.iter().filter(|r| !r.game_over).count();
            PilotAggregate {
                pilot_id: pilot_id.to_string(),
                runs: pilot_runs.len(),
                avg_score: mean(|r| f64::from(r.final_score)),
                max_score: pilot_runs.iter().map(|r| r.final_score).max().unwrap_or_default(),
                avg_wave: mean(|r| f64::from(r.final_wave)),
                max_wave: pilot_runs.iter().map(|r| r.final_wave).max().unwrap_or_default(),
                avg_frames: mean(|r| f64::from(r.frame_count)),
                survival_rate: survived as f64 / n,
                avg_accuracy: mean(RunMetrics::accuracy),
            }
        })
        .collect()
}
