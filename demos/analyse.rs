//! Cluster recorded traces by shape.
//!
//! ```text
//! cargo run --example analyse -- <dir-with-csv-files> [clusters]
//! ```
//!
//! Every `*.csv` file in the directory (columns `x`, `y`) becomes one trace;
//! `human_seed_*` / `automated_seed_*` file names mark the trace origin.
//! Without a directory, a synthetic set of traces is used. Set
//! `RUST_LOG=info` to follow the pipeline.

use std::env;
use std::fs;
use std::path::Path;

use aimtrace::trajectory::read_samples_path;
use aimtrace::{Analysis, AnalysisParams, RawSample, Trace};
use log::{info, warn};

fn load_dir(dir: &Path) -> Result<Vec<Trace>, Box<dyn std::error::Error>> {
    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    paths.sort();

    let mut traces = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match read_samples_path(&path) {
            Ok(samples) => {
                info!("{name}: {} samples", samples.len());
                traces.push(Trace::new(name, samples));
            }
            Err(err) => warn!("skipping {name}: {err}"),
        }
    }
    Ok(traces)
}

fn synthetic() -> Vec<Trace> {
    let ramp = |slope: f64, wobble: f64| -> Vec<RawSample> {
        (0..30)
            .map(|i| {
                let t = i as f64;
                RawSample::new(t, t * slope + (t * 0.7).sin() * wobble)
            })
            .collect()
    };
    vec![
        Trace::new("human_seed_1.csv", ramp(1.0, 0.8)),
        Trace::new("human_seed_2.csv", ramp(1.1, 0.9)),
        Trace::new("automated_seed_0.15.csv", ramp(1.0, 0.0)),
        Trace::new("automated_seed_0.55.csv", ramp(4.0, 0.0)),
        Trace::new("human_seed_3.csv", ramp(4.2, 1.2)),
        Trace::new("automated_seed_0.9.csv", ramp(-3.0, 0.0)),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let traces = match args.next() {
        Some(dir) => load_dir(Path::new(&dir))?,
        None => synthetic(),
    };
    let clusters = match args.next() {
        Some(k) => k.parse()?,
        None => AnalysisParams::default().n_clusters,
    };

    let report = Analysis::new(AnalysisParams::default().with_clusters(clusters)).run(traces)?;

    for skipped in &report.excluded {
        println!("skipped {}: {}", skipped.name, skipped.reason);
    }

    println!("=== Assignments ===");
    let leaves = report.leaf_labels();
    for ((leaf, cluster), trace) in leaves
        .iter()
        .zip(report.assignment.labels())
        .zip(&report.traces)
    {
        let colour = trace
            .seed_bucket()
            .map(|b| format!(" (seed bucket {b})"))
            .unwrap_or_default();
        println!("  {leaf:<32} => cluster {cluster}{colour}");
    }

    println!("\n=== Clusters ===");
    for summary in &report.clusters {
        let quality = summary
            .silhouette
            .map(|s| format!("{s:.3}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  cluster {}: {} traces ({} human, {} automated), silhouette {quality}",
            summary.id,
            summary.members.len(),
            summary.human,
            summary.automated,
        );
    }

    match report.silhouette {
        Some(score) => println!("\nsilhouette score: {score:.3}"),
        None => println!("\nsilhouette score: undefined"),
    }

    let merges = report.tree.to_matrix();
    if let Some(last) = merges.last() {
        println!(
            "dendrogram: {:?} linkage over {} leaves, height {:.3}",
            report.tree.linkage(),
            report.tree.n_leaves(),
            last[2]
        );
    }

    Ok(())
}
