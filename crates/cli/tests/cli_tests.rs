// Integration tests for the bizlink binary.
// Run with: cargo test -p bizlink-cli --test cli_tests

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn bizlink() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bizlink"));
    cmd.env_remove("BIZLINK_THRESHOLD");
    cmd.env("RUST_LOG", "warn");
    cmd
}

const LEFT: &str = "\
business_id,name,address,city,state,zip_code,size
B1,joes pizza,100 n main st,erie,PA,16501-1234,small
B2,acme hardware,1 main st,erie,PA,16501,large
B3,sunrise diner,12 pine st,erie,PA,16502,small
B4,lakeside bait,3 shore dr,cleveland,OH,44114,small
";

const RIGHT: &str = "\
entity_id,name,address,city,state,postal_code,categories
E1,joe's pizza and grill,100 N. Main Street,Erie,PA,16501.0,Pizza
E2,sunny nails,1 main street,erie,PA,16501.0,Beauty
E3,sunrise diner,12 pine st,erie,NY,16502.0,Diner
E4,lakeside bait,3 shore drive,cleveland,OH,44114.0,Outdoors
";

const CONFIG: &str = r#"
name = "cli test"

[left]
file = "left.csv"
postal_format = "range"
[left.columns]
id = "business_id"
name = "name"
address = "address"
city = "city"
state = "state"
postal = "zip_code"

[right]
file = "right.csv"
postal_format = "decimal"
[right.columns]
id = "entity_id"
name = "name"
address = "address"
city = "city"
state = "state"
postal = "postal_code"

[blocking]
regions = ["PA", "FL", "MO", "TN", "IN"]
"#;

fn workspace(config: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("left.csv"), LEFT).unwrap();
    std::fs::write(dir.path().join("right.csv"), RIGHT).unwrap();
    std::fs::write(dir.path().join("test.link.toml"), config).unwrap();
    dir
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    bizlink().current_dir(dir).args(args).output().unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

// -------------------------------------------------------------------------
// run
// -------------------------------------------------------------------------

#[test]
fn run_prints_csv_to_stdout() {
    let dir = workspace(CONFIG);
    let out = run_in(dir.path(), &["run", "test.link.toml"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(
        stdout(&out),
        "business_id,entity_id,confidence_score\nB1,E1,90\n"
    );
    assert!(stderr(&out).contains("2 candidate pair(s), 1 matched, 1 below threshold 80"));
}

#[test]
fn run_writes_output_file() {
    let dir = workspace(CONFIG);
    let out = run_in(dir.path(), &["run", "test.link.toml", "--output", "matches.csv"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stdout(&out).is_empty());
    let written = std::fs::read_to_string(dir.path().join("matches.csv")).unwrap();
    assert_eq!(written, "business_id,entity_id,confidence_score\nB1,E1,90\n");
}

#[test]
fn config_output_is_relative_to_config() {
    let config = format!("{CONFIG}\n[output]\nfile = \"out/matches.csv\"\n");
    let dir = workspace(&config);
    std::fs::create_dir(dir.path().join("out")).unwrap();
    let config_path = dir.path().join("test.link.toml");
    let out = bizlink()
        .args(["run", config_path.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(dir.path().join("out/matches.csv").exists());
}

#[test]
fn config_output_dash_is_stdout() {
    let config = format!("{CONFIG}\n[output]\nfile = \"-\"\n");
    let dir = workspace(&config);
    let config_path = dir.path().join("test.link.toml");
    let out = bizlink()
        .args(["run", config_path.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(
        stdout(&out),
        "business_id,entity_id,confidence_score\nB1,E1,90\n"
    );
    assert!(!dir.path().join("-").exists());
}

#[test]
fn duplicate_ids_reported_once() {
    let dir = workspace(CONFIG);
    let left = format!("{LEFT}B1,joes pizza,100 n main st,erie,PA,16501,small\n");
    std::fs::write(dir.path().join("left.csv"), left).unwrap();
    let out = bizlink()
        .current_dir(dir.path())
        .env("RUST_LOG", "info")
        .args(["run", "test.link.toml"])
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stderr(&out).matches("repeat an earlier id").count(), 1);
    assert!(!stderr(&out).contains("duplicate id(s) kept"));
    assert_eq!(stdout(&out).lines().count(), 3);
}

#[test]
fn run_json_report() {
    let dir = workspace(CONFIG);
    let out = run_in(dir.path(), &["run", "test.link.toml", "--json"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let report: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(report["meta"]["config_name"], "cli test");
    assert_eq!(report["summary"]["candidate_pairs"], 2);
    assert_eq!(report["summary"]["left"]["excluded_by_region"], 1);
    assert_eq!(report["summary"]["right"]["excluded_by_region"], 2);
    assert_eq!(report["matches"][0]["entity_id"], "E1");
}

#[test]
fn run_report_file_and_csv_file() {
    let dir = workspace(CONFIG);
    let out = run_in(
        dir.path(),
        &["run", "test.link.toml", "-o", "m.csv", "--report", "r.json"],
    );
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let report = std::fs::read_to_string(dir.path().join("r.json")).unwrap();
    assert!(report.contains("\"accepted\": 1"));
    assert!(dir.path().join("m.csv").exists());
}

#[test]
fn threshold_flag_overrides_config() {
    let dir = workspace(CONFIG);
    let out = run_in(dir.path(), &["run", "test.link.toml", "--threshold", "95"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "business_id,entity_id,confidence_score\n");
}

#[test]
fn threshold_env_overrides_config() {
    let dir = workspace(CONFIG);
    let out = bizlink()
        .current_dir(dir.path())
        .env("BIZLINK_THRESHOLD", "10")
        .args(["run", "test.link.toml"])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(stdout(&out).lines().count(), 3);
}

#[test]
fn threshold_out_of_range_is_config_error() {
    let dir = workspace(CONFIG);
    let out = run_in(dir.path(), &["run", "test.link.toml", "--threshold", "101"]);
    assert_eq!(out.status.code(), Some(3));
    assert!(stderr(&out).contains("between 0 and 100"));
}

#[test]
fn fail_on_empty() {
    let dir = workspace(CONFIG);
    let out = run_in(
        dir.path(),
        &["run", "test.link.toml", "--threshold", "100", "--fail-on-empty"],
    );
    assert_eq!(out.status.code(), Some(5));
}

#[test]
fn missing_input_file_is_runtime_error() {
    let dir = workspace(CONFIG);
    std::fs::remove_file(dir.path().join("right.csv")).unwrap();
    let out = run_in(dir.path(), &["run", "test.link.toml"]);
    assert_eq!(out.status.code(), Some(4));
    assert!(stderr(&out).contains("right.csv"));
}

#[test]
fn missing_column_is_runtime_error() {
    let dir = workspace(CONFIG);
    std::fs::write(dir.path().join("left.csv"), "business_id,name\nB1,x\n").unwrap();
    let out = run_in(dir.path(), &["run", "test.link.toml"]);
    assert_eq!(out.status.code(), Some(4));
    assert!(stderr(&out).contains("left dataset: missing column 'address'"));
}

// -------------------------------------------------------------------------
// validate + normalize
// -------------------------------------------------------------------------

#[test]
fn validate_ok() {
    let dir = workspace(CONFIG);
    let out = run_in(dir.path(), &["validate", "test.link.toml"]);
    assert!(out.status.success());
    assert!(stderr(&out).contains("valid: 'cli test' blocking on address in regions [PA, FL, MO, TN, IN]"));
    assert!(stderr(&out).contains("36 abbreviation(s)"));
}

#[test]
fn validate_rejects_bad_config() {
    let dir = workspace("name = \"broken\"\n");
    let out = run_in(dir.path(), &["validate", "test.link.toml"]);
    assert_eq!(out.status.code(), Some(3));
    assert!(stderr(&out).contains("config parse error"));
}

#[test]
fn normalize_prints_each_argument() {
    let out = bizlink()
        .args(["normalize", "100 N. Main St.", "Joe's Pizza"])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(stdout(&out), "100 north main street\njoe's pizza\n");
}

#[test]
fn normalize_requires_text() {
    let out = bizlink().arg("normalize").output().unwrap();
    assert_eq!(out.status.code(), Some(2));
}
