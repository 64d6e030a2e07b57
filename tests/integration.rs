use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn dna_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("dna");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    // Create config
    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    // Create sample matrices
    let samples_dir = root.join("samples");
    fs::create_dir_all(&samples_dir).unwrap();
    fs::write(
        samples_dir.join("mutant.txt"),
        "ATGCGA\nCAGTGC\nTTATGT\nAGAAGG\nCCCCTA\nTCACTG\n",
    )
    .unwrap();
    fs::write(
        samples_dir.join("human.txt"),
        "ATGCGA\nCAGTGC\nTTATTT\nAGACGG\nGCGTCA\nTCACTG\n",
    )
    .unwrap();
    fs::write(
        samples_dir.join("invalid.txt"),
        "ATGCGA\nCAGTXC\nTTATGT\nAGAAGG\nCCCCTA\nTCACTG\n",
    )
    .unwrap();
    fs::write(
        samples_dir.join("mutant.json"),
        r#"["AAAA", "CCCC", "TTAT", "AGAC"]"#,
    )
    .unwrap();

    let config_content = format!(
        r#"[db]
path = "{}/data/dna.sqlite"

[analysis]
max_size = 10
"#,
        root.display()
    );

    let config_path = config_dir.join("dna.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn sample(config_path: &Path, name: &str) -> PathBuf {
    config_path
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("samples")
        .join(name)
}

fn db_path(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("data")
        .join("dna.sqlite")
}

fn run_dna(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = dna_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run dna binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_init_creates_database() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_dna(&config_path, &["init"]);
    assert!(success, "init failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("initialized"));
    assert!(db_path(&config_path).exists());
}

#[test]
fn test_init_idempotent() {
    let (_tmp, config_path) = setup_test_env();

    let (_, _, success1) = run_dna(&config_path, &["init"]);
    assert!(success1, "First init failed");

    let (_, _, success2) = run_dna(&config_path, &["init"]);
    assert!(success2, "Second init failed (not idempotent)");
}

#[test]
fn test_analyze_mutant() {
    let (_tmp, config_path) = setup_test_env();
    run_dna(&config_path, &["init"]);

    let mutant = sample(&config_path, "mutant.txt");
    let (stdout, stderr, success) = run_dna(&config_path, &["analyze", mutant.to_str().unwrap()]);
    assert!(success, "analyze failed: stdout={}, stderr={}", stdout, stderr);
    assert_eq!(stdout.trim(), "mutant");
}

#[test]
fn test_analyze_human() {
    let (_tmp, config_path) = setup_test_env();
    run_dna(&config_path, &["init"]);

    let human = sample(&config_path, "human.txt");
    let (stdout, _, success) = run_dna(&config_path, &["analyze", human.to_str().unwrap()]);
    assert!(success);
    assert_eq!(stdout.trim(), "human");
}

#[test]
fn test_analyze_invalid_alphabet_collapses_to_human() {
    let (_tmp, config_path) = setup_test_env();
    run_dna(&config_path, &["init"]);

    let invalid = sample(&config_path, "invalid.txt");
    let (stdout, _, success) = run_dna(&config_path, &["analyze", invalid.to_str().unwrap()]);
    assert!(success, "malformed DNA must not be a process error");
    assert_eq!(stdout.trim(), "human");
}

#[test]
fn test_analyze_json_matrix_file() {
    let (_tmp, config_path) = setup_test_env();
    run_dna(&config_path, &["init"]);

    let mutant = sample(&config_path, "mutant.json");
    let (stdout, _, success) = run_dna(&config_path, &["analyze", mutant.to_str().unwrap()]);
    assert!(success);
    assert_eq!(stdout.trim(), "mutant");
}

#[test]
fn test_analyze_json_output() {
    let (_tmp, config_path) = setup_test_env();
    run_dna(&config_path, &["init"]);

    let mutant = sample(&config_path, "mutant.txt");
    let (stdout, _, success) =
        run_dna(&config_path, &["analyze", mutant.to_str().unwrap(), "--json"]);
    assert!(success);
    assert!(stdout.contains("\"is_mutant\": true"));
    assert!(stdout.contains("\"verdict\": \"mutant\""));
    assert!(stdout.contains("\"fingerprint\""));
}

#[test]
fn test_dedup_counts_each_matrix_once() {
    let (_tmp, config_path) = setup_test_env();
    run_dna(&config_path, &["init"]);

    let mutant = sample(&config_path, "mutant.txt");
    let human = sample(&config_path, "human.txt");

    // Same matrix three times across separate processes, one other matrix
    run_dna(&config_path, &["analyze", mutant.to_str().unwrap()]);
    run_dna(&config_path, &["analyze", mutant.to_str().unwrap()]);
    run_dna(&config_path, &["analyze", mutant.to_str().unwrap()]);
    run_dna(&config_path, &["analyze", human.to_str().unwrap()]);

    let (stdout, _, success) = run_dna(&config_path, &["stats", "--json"]);
    assert!(success);
    assert!(stdout.contains("\"count_mutant_dna\": 1"), "stats: {}", stdout);
    assert!(stdout.contains("\"count_human_dna\": 1"), "stats: {}", stdout);
}

#[test]
fn test_case_insensitive_dedup_across_processes() {
    let (_tmp, config_path) = setup_test_env();
    run_dna(&config_path, &["init"]);

    let lower = config_path
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("samples")
        .join("mutant_lower.txt");
    fs::write(&lower, "atgcga\ncagtgc\nttatgt\nagaagg\nccccta\ntcactg\n").unwrap();

    let mutant = sample(&config_path, "mutant.txt");
    let (stdout, _, _) = run_dna(&config_path, &["analyze", lower.to_str().unwrap()]);
    assert_eq!(stdout.trim(), "mutant");
    run_dna(&config_path, &["analyze", mutant.to_str().unwrap()]);

    let (stdout, _, _) = run_dna(&config_path, &["stats", "--json"]);
    assert!(stdout.contains("\"count_mutant_dna\": 1"), "stats: {}", stdout);
}

#[test]
fn test_stats_text_report() {
    let (_tmp, config_path) = setup_test_env();
    run_dna(&config_path, &["init"]);

    let mutant = sample(&config_path, "mutant.txt");
    run_dna(&config_path, &["analyze", mutant.to_str().unwrap()]);

    let (stdout, stderr, success) = run_dna(&config_path, &["stats"]);
    assert!(success, "stats failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Mutant:"));
    assert!(stdout.contains("Human:"));
    assert!(stdout.contains("Ratio:"));
}

#[test]
fn test_stats_empty_database() {
    let (_tmp, config_path) = setup_test_env();
    run_dna(&config_path, &["init"]);

    let (stdout, _, success) = run_dna(&config_path, &["stats", "--json"]);
    assert!(success);
    assert!(stdout.contains("\"count_mutant_dna\": 0"));
    assert!(stdout.contains("\"count_human_dna\": 0"));
    assert!(stdout.contains("\"ratio\": 0.0"));
}

#[test]
fn test_oversize_matrix_is_rejected() {
    let (_tmp, config_path) = setup_test_env();
    run_dna(&config_path, &["init"]);

    // 11 rows against the configured max_size = 10
    let big = config_path
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("samples")
        .join("big.txt");
    fs::write(&big, "ATGCGATGCGA\n".repeat(11)).unwrap();

    let (_, stderr, success) = run_dna(&config_path, &["analyze", big.to_str().unwrap()]);
    assert!(!success, "oversize input must be a reportable error");
    assert!(stderr.contains("maximum"), "stderr: {}", stderr);
}

#[test]
fn test_check_does_not_touch_database() {
    let (_tmp, config_path) = setup_test_env();
    // No init on purpose

    let mutant = sample(&config_path, "mutant.txt");
    let (stdout, stderr, success) = run_dna(&config_path, &["check", mutant.to_str().unwrap()]);
    assert!(success, "check failed: stdout={}, stderr={}", stdout, stderr);
    assert_eq!(stdout.trim(), "mutant");
    assert!(!db_path(&config_path).exists());
}
