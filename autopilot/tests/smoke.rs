use anyhow::Result;
use autopilot::benchmark::{run_benchmark, BenchmarkConfig, REPORT_FILE};
use autopilot::runner::run_pilot;
use galaga_core::Viewport;
use std::fs;

#[test]
fn idle_pilot_is_overrun_before_the_frame_budget() -> Result<()> {
    let metrics = run_pilot("idle", 0x1234, Viewport::REFERENCE, 18_000)?;
    assert!(metrics.game_over);
    assert!(metrics.frame_count < 18_000);
    assert_eq!(metrics.final_score, 0);
    assert_eq!(metrics.final_wave, 1);
    Ok(())
}

#[test]
fn sweeper_scores_kills() -> Result<()> {
    let metrics = run_pilot("sweeper", 0xDEAD_BEEF, Viewport::REFERENCE, 3_000)?;
    assert!(metrics.shots_fired > 0);
    assert!(metrics.final_score > 0);
    assert!(u64::from(metrics.final_score) <= u64::from(metrics.shots_fired));
    Ok(())
}

#[test]
fn bench_writes_a_ranked_report() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let report = run_benchmark(BenchmarkConfig {
        pilots: vec!["idle".into(), "spray".into()],
        seeds: vec![1, 2],
        viewports: vec![Viewport::REFERENCE, Viewport::new(800.0, 600.0)],
        max_frames: 600,
        out_dir: dir.path().to_path_buf(),
        jobs: Some(2),
    })?;

    assert_eq!(report.run_count, 8);
    assert_eq!(report.pilot_rankings.len(), 2);
    assert!(report.pilot_rankings.iter().all(|agg| agg.runs == 4));
    assert!(report
        .pilot_rankings
        .windows(2)
        .all(|pair| pair[0].avg_score >= pair[1].avg_score));

    let written: serde_json::Value =
        serde_json::from_slice(&fs::read(dir.path().join(REPORT_FILE))?)?;
    assert_eq!(written["run_count"], 8);
    assert_eq!(written["viewports"][1], "800x600");
    Ok(())
}
