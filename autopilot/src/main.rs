use anyhow::{anyhow, Result};
use autopilot::benchmark::{resolve_pilots, run_benchmark, BenchmarkConfig, REPORT_FILE};
use autopilot::pilots::{create_pilot, describe_pilots, pilot_ids};
use autopilot::runner::run_pilot;
use autopilot::util::{
    parse_seed, parse_seed_csv, parse_viewport, parse_viewport_csv, seed_range, seed_to_hex,
    viewport_label,
};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Parser, Debug)]
#[command(name = "autopilot")]
#[command(about = "Headless pilots for the Galaga core: single runs and parallel benchmarks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available pilots
    ListPilots,
    /// Play one session and print its metrics
    Run {
        #[arg(long)]
        pilot: String,
        #[arg(long)]
        seed: String,
        #[arg(long, default_value = "1920x1080")]
        viewport: String,
        #[arg(long, default_value_t = 18_000)]
        max_frames: u32,
        /// Write the metrics as JSON instead of key=value lines
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run pilots across seeds and viewports in parallel
    Bench {
        #[arg(long)]
        pilots: Option<String>,
        #[arg(long)]
        seeds: Option<String>,
        #[arg(long, default_value = "0x00000001")]
        seed_start: String,
        #[arg(long, default_value_t = 12)]
        seed_count: u32,
        #[arg(long, default_value = "1920x1080")]
        viewports: String,
        #[arg(long, default_value_t = 18_000)]
        max_frames: u32,
        #[arg(long)]
        out_dir: Option<PathBuf>,
        #[arg(long)]
        jobs: Option<usize>,
    },
}

fn main() -> Result<()> {
    let Cli { command } = Cli::parse();

    match command {
        Commands::ListPilots => {
            for (id, description) in describe_pilots() {
                println!("{id:12} {description}");
            }
        }
        Commands::Run {
            pilot,
            seed,
            viewport,
            max_frames,
            output,
        } => {
            if create_pilot(&pilot).is_none() {
                let available = pilot_ids().join(", ");
                return Err(anyhow!("unknown pilot '{pilot}'. available: {available}"));
            }
            let seed = parse_seed(&seed)?;
            let viewport = parse_viewport(&viewport)?;
            let metrics = run_pilot(&pilot, seed, viewport, max_frames)?;

            if let Some(path) = output {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&path, serde_json::to_vec_pretty(&metrics)?)?;
                println!("wrote={}", path.display());
            } else {
                println!("pilot={}", metrics.pilot_id);
                println!("seed={}", seed_to_hex(metrics.seed));
                println!("viewport={}", viewport_label(&metrics.viewport));
                println!("frames={}", metrics.frame_count);
                println!("score={}", metrics.final_score);
                println!("wave={}", metrics.final_wave);
                println!("shots={}", metrics.shots_fired);
                println!("game_over={}", metrics.game_over);
            }
        }
        Commands::Bench {
            pilots,
            seeds,
            seed_start,
            seed_count,
            viewports,
            max_frames,
            out_dir,
            jobs,
        } => {
            let pilots = resolve_pilots(pilots.as_deref())?;
            let seeds = match seeds {
                Some(csv) => parse_seed_csv(&csv)?,
                None => seed_range(parse_seed(&seed_start)?, seed_count),
            };
            let viewports = parse_viewport_csv(&viewports)?;
            let out_dir = out_dir.unwrap_or_else(|| {
                let stamp = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_secs();
                PathBuf::from(format!("benchmarks/bench-{stamp}"))
            });

            let report = run_benchmark(BenchmarkConfig {
                pilots,
                seeds,
                viewports,
                max_frames,
                out_dir: out_dir.clone(),
                jobs,
            })?;

            println!("runs={}", report.run_count);
            for (rank, agg) in report.pilot_rankings.iter().enumerate() {
                println!(
                    "{:>2}. {:12} avg_score={:.2} max_score={} avg_wave={:.2} survival={:.0}% accuracy={:.3}",
                    rank + 1,
                    agg.pilot_id,
                    agg.avg_score,
                    agg.max_score,
                    agg.avg_wave,
                    agg.survival_rate * 100.0,
                    agg.avg_accuracy
                );
            }
            println!("summary={}", out_dir.join(REPORT_FILE).display());
        }
    }

    Ok(())
}
