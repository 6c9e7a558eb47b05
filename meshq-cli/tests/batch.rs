use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use meshq_cli::batch::discover_meshes;
use meshq_cli::{BatchConfig, BatchRunner};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn scratch_dir(tag: &str) -> PathBuf {
    let n = DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!("meshq-{}-{}-{}", tag, std::process::id(), n));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn config(input: &PathBuf, jobs: usize, plots: bool) -> BatchConfig {
    BatchConfig {
        input_dir: input.clone(),
        output_dir: input.join("outputs"),
        bins: 1024,
        jobs,
        plots,
        extension: "obj".to_string(),
    }
}

fn seed_meshes(dir: &PathBuf) {
    fs::write(dir.join("b_tetra.obj"), "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\nf 1 2 3\n").unwrap();
    fs::write(dir.join("a_empty.obj"), "# nothing here\nvn 0 0 1\n").unwrap();
    fs::write(dir.join("c_noisy.obj"), "v 1 2\nv 0.5 -3 9\nv bad 1 1\nv 4 4 4\nv -2 0 1\n").unwrap();
    fs::write(dir.join("notes.txt"), "v 1 1 1\n").unwrap();
}

#[test]
fn discovery_is_sorted_and_filtered() {
    let dir = scratch_dir("discover");
    seed_meshes(&dir);
    let names: Vec<String> = discover_meshes(&dir, "obj")
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a_empty.obj", "b_tetra.obj", "c_noisy.obj"]);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn batch_skips_empty_meshes_and_writes_summary() {
    let dir = scratch_dir("batch");
    seed_meshes(&dir);

    let report = BatchRunner::new(config(&dir, 3, true)).unwrap().run().unwrap();
    assert_eq!(report.skipped, vec!["a_empty.obj".to_string()]);
    assert!(report.failed.is_empty());

    let files: Vec<&str> = report.results.iter().map(|r| r.file.as_str()).collect();
    assert_eq!(files, vec!["b_tetra.obj", "c_noisy.obj"]);
    assert_eq!(report.results[1].vertices, 3);

    let out = dir.join("outputs");
    for name in [
        "b_tetra_minmax.ply",
        "b_tetra_unitsphere.ply",
        "b_tetra_mse.svg",
        "b_tetra_mae.svg",
        "b_tetra_minmax_scatter.svg",
        "c_noisy_unitsphere_scatter.svg",
        "summary.json",
    ] {
        assert!(out.join(name).is_file(), "missing {}", name);
    }

    let summary: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report.summary_path).unwrap()).unwrap();
    let rows = summary.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["file"], "b_tetra.obj");
    assert_eq!(rows[0]["vertices"], 4);
    assert_eq!(rows[0]["minmax_mse"], serde_json::json!([0.0, 0.0, 0.0]));
    assert!(rows[0]["mse_plot"].as_str().unwrap().ends_with("b_tetra_mse.svg"));

    let ply = fs::read_to_string(out.join("b_tetra_minmax.ply")).unwrap();
    assert!(ply.contains("element vertex 4"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn failing_mesh_does_not_abort_the_batch() {
    let dir = scratch_dir("failure");
    fs::write(dir.join("a.obj"), "v 0 0 0\nv 1 1 1\n").unwrap();
    fs::write(dir.join("b.obj"), "v 0 0 0\nv 2 0 1\nv 1 3 0\n").unwrap();
    // A directory where a.obj's reconstruction should go makes its PLY write fail.
    fs::create_dir_all(dir.join("outputs").join("a_minmax.ply")).unwrap();

    let report = BatchRunner::new(config(&dir, 2, false)).unwrap().run().unwrap();
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "a.obj");
    assert!(report.failed[0].1.contains("a_minmax.ply"), "reason: {}", report.failed[0].1);

    let files: Vec<&str> = report.results.iter().map(|r| r.file.as_str()).collect();
    assert_eq!(files, vec!["b.obj"]);

    let summary: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report.summary_path).unwrap()).unwrap();
    let rows = summary.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["file"], "b.obj");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn worker_count_does_not_change_the_summary() {
    let dir_a = scratch_dir("jobs1");
    let dir_b = scratch_dir("jobs4");
    seed_meshes(&dir_a);
    seed_meshes(&dir_b);

    let one = BatchRunner::new(config(&dir_a, 1, false)).unwrap().run().unwrap();
    let many = BatchRunner::new(config(&dir_b, 4, false)).unwrap().run().unwrap();

    assert_eq!(one.results.len(), many.results.len());
    for (a, b) in one.results.iter().zip(many.results.iter()) {
        assert_eq!(a.file, b.file);
        assert_eq!(a.minmax_mse, b.minmax_mse);
        assert_eq!(a.unitsphere_mae, b.unitsphere_mae);
        assert!(a.artifacts.mse_plot.is_none());
    }

    let _ = fs::remove_dir_all(&dir_a);
    let _ = fs::remove_dir_all(&dir_b);
}

#[test]
fn missing_input_directory_is_an_error() {
    let dir = std::env::temp_dir().join(format!("meshq-absent-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    assert!(BatchRunner::new(config(&dir, 1, false)).unwrap().run().is_err());
}

#[test]
fn single_bin_is_rejected_up_front() {
    let dir = scratch_dir("bins");
    let mut cfg = config(&dir, 1, false);
    cfg.bins = 1;
    assert!(BatchRunner::new(cfg).is_err());
    let _ = fs::remove_dir_all(&dir);
}
