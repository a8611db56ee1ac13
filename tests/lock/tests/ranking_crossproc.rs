//! Cross-process determinism test.
//!
//! Spawns the `ranking_fixture` binary under several environment variants
//! and asserts that all produce identical output. This proves that ranking
//! and report production are not influenced by process-level state.

use std::path::Path;
use std::process::Command;

/// Resolve the path to the compiled `ranking_fixture` binary.
fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("ranking_fixture");
    path.to_string_lossy().to_string()
}

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn run_variant(work_dir: &str, args: &[&str], env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();

    let mut command = Command::new(&bin);
    command.current_dir(work_dir).args(args);
    command
        .env_remove("LC_ALL")
        .env_remove("LANG")
        .env_remove("RUST_LOG");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });
    assert!(
        output.status.success(),
        "ranking_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_env_variants() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[], &[]);

    assert!(baseline.contains("report_digest=sha256:"));
    assert!(baseline.contains("config_hash=sha256:"));
    assert!(baseline.contains("artifact_count=3"));
    assert_eq!(baseline.matches("termination=exhausted").count(), 5);

    let variant_cwd = run_variant("/tmp", &[], &[]);
    assert_eq!(baseline, variant_cwd, "output differs when cwd changes");

    let variant_locale = run_variant(&root, &[], &[("LC_ALL", "C"), ("LANG", "C")]);
    assert_eq!(baseline, variant_locale, "output differs when LC_ALL=C LANG=C");

    // Verbose logging must stay on stderr.
    let variant_logging = run_variant(&root, &[], &[("RUST_LOG", "debug")]);
    assert_eq!(baseline, variant_logging, "output differs with RUST_LOG=debug");

    let variant_threads = run_variant(&root, &[], &[("RAYON_NUM_THREADS", "1")]);
    assert_eq!(baseline, variant_threads, "output differs on one rayon thread");
}

#[test]
fn crossproc_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.json");
    std::fs::write(
        &path,
        br#"{"chain_length": 1, "strategies": ["Range First"], "parallel": false}"#,
    )
    .unwrap();
    let path = path.to_string_lossy().to_string();

    let root = workspace_root();
    let out = run_variant(&root, &[&path], &[]);
    assert_eq!(out.matches("strategy=").count(), 1);
    assert!(out.contains("strategy=Range First termination=exhausted"));
    assert_eq!(out, run_variant("/tmp", &[&path], &[]));
}
