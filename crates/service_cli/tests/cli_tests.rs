//! Command-line smoke tests for the `eva` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// 1000 days from 01/01/2020, zero except five spikes at least two days apart.
fn five_spikes_csv(values: [u32; 5]) -> String {
    let days = [10usize, 250, 253, 600, 999];
    let mut out = String::from("Date,Fatalities\n");
    let start = chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    for (day, value) in days.iter().zip(values) {
        let date = start + chrono::Duration::days(*day as i64);
        out.push_str(&format!("{},{}\n", date.format("%d/%m/%Y"), value));
    }
    // Anchor the first day so the span is exactly 999 days
    out.push_str("01/01/2020,0\n");
    out
}

fn workspace() -> TempDir {
    tempfile::tempdir().unwrap()
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path.display().to_string()
}

fn eva(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("eva").unwrap();
    cmd.current_dir(dir)
        .env_remove("EVA_THRESHOLD")
        .env_remove("EVA_WINDOW_HOURS")
        .env_remove("EVA_CONFIDENCE")
        .env_remove("EVA_OUTPUT_DIR")
        .env_remove("EVA_LOG_LEVEL");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = workspace();
    eva(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyse"))
        .stdout(predicate::str::contains("extremes"))
        .stdout(predicate::str::contains("describe"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_analyse_reports_var_and_writes_plots() {
    let dir = workspace();
    let input = write(dir.path(), "data.csv", &five_spikes_csv([180, 190, 200, 210, 220]));

    eva(dir.path())
        .args(["analyse", "--input", &input, "--confidence", "0.99", "--output-dir", "plots"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GPD fit (location = 160)"))
        .stdout(predicate::str::contains("VaR = "))
        .stdout(predicate::str::contains("ES  = "));

    assert!(dir.path().join("plots/timeseries.svg").exists());
    assert!(dir.path().join("plots/diagnostics.svg").exists());
}

#[test]
fn test_analyse_short_return_period_fails_after_printing_fit() {
    let dir = workspace();
    let input = write(dir.path(), "data.csv", &five_spikes_csv([200; 5]));

    eva(dir.path())
        .args(["analyse", "--input", &input, "--no-plots"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("GPD fit"))
        .stdout(predicate::str::contains("Kolmogorov-Smirnov"))
        .stderr(predicate::str::contains("shorter than the mean time between extremes"));
}

/// Ten days with a single value above the default threshold.
const SINGLE_EXCEEDANCE_CSV: &str = "Date,Fatalities\n\
01/03/2021,4\n\
04/03/2021,200\n\
10/03/2021,7\n";

#[test]
fn test_failed_fit_still_reports_the_series() {
    let dir = workspace();
    let input = write(dir.path(), "data.csv", SINGLE_EXCEEDANCE_CSV);

    eva(dir.path())
        .args(["analyse", "--input", &input, "--output-dir", "plots"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Daily series: 10 days from 2021-03-01 to 2021-03-10"))
        .stdout(predicate::str::contains("Descriptive statistics"))
        .stdout(predicate::str::contains("1 extremes above 160"))
        .stderr(predicate::str::contains("Insufficient data"));

    assert!(dir.path().join("plots/timeseries.svg").exists());
    assert!(!dir.path().join("plots/diagnostics.svg").exists());
}

#[test]
fn test_failed_fit_json_document() {
    let dir = workspace();
    let input = write(dir.path(), "data.csv", SINGLE_EXCEEDANCE_CSV);

    let output = eva(dir.path())
        .args(["analyse", "--input", &input, "--format", "json", "--no-plots"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["outcome"]["status"], "fit_failed");
    assert_eq!(value["series"]["days"], 10);
    assert_eq!(value["statistics"]["max"], 200.0);
}

#[test]
fn test_oversized_window_is_a_validation_error() {
    let dir = workspace();
    let input = write(dir.path(), "data.csv", &five_spikes_csv([200; 5]));

    eva(dir.path())
        .args(["analyse", "--input", &input, "--window-hours", "1e16", "--no-plots"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("declustering_window_hours must not exceed"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_threshold_above_max_is_not_an_error() {
    let dir = workspace();
    let input = write(dir.path(), "data.csv", &five_spikes_csv([200; 5]));

    eva(dir.path())
        .args(["analyse", "--input", &input, "--threshold", "500", "--no-plots"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No value exceeds the threshold 500"));
}

#[test]
fn test_json_output_is_a_single_document() {
    let dir = workspace();
    let input = write(dir.path(), "data.csv", &five_spikes_csv([180, 190, 200, 210, 220]));

    let output = eva(dir.path())
        .args([
            "analyse", "--input", &input, "--confidence", "0.99", "--format", "json", "--no-plots",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["outcome"]["status"], "fitted");
    assert_eq!(value["series"]["days"], 1000);
    assert!(value["outcome"]["risk"]["return_value"]["value"].is_number());
}

#[test]
fn test_extremes_lists_declustered_events() {
    let dir = workspace();
    let input = write(
        dir.path(),
        "data.csv",
        "Date,Fatalities\n01/01/2024,170\n02/01/2024,190\n03/01/2024,0\n04/01/2024,165\n",
    );

    eva(dir.path())
        .args(["extremes", "--input", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 extremes above 160"))
        .stdout(predicate::str::contains("2024-01-02"))
        .stdout(predicate::str::contains("2024-01-04"))
        .stdout(predicate::str::contains("2024-01-01").not());
}

#[test]
fn test_describe_fills_gaps() {
    let dir = workspace();
    let input = write(dir.path(), "data.csv", "Date,Fatalities\n01/01/2024,4\n05/01/2024,8\n");

    eva(dir.path())
        .args(["describe", "--input", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains("5 days from 2024-01-01 to 2024-01-05"))
        .stdout(predicate::str::contains("Descriptive statistics"));
}

#[test]
fn test_missing_input_file() {
    let dir = workspace();
    eva(dir.path())
        .args(["describe", "--input", "nope.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_malformed_date_is_fatal() {
    let dir = workspace();
    let input = write(dir.path(), "data.csv", "Date,Fatalities\n2024-01-01,4\n");

    eva(dir.path())
        .args(["describe", "--input", &input])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Line 2"))
        .stderr(predicate::str::contains("2024-01-01"));
}

#[test]
fn test_check_defaults() {
    let dir = workspace();
    eva(dir.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("threshold = 160"))
        .stdout(predicate::str::contains("Configuration OK"));
}

#[test]
fn test_check_reports_every_violation() {
    let dir = workspace();
    write(
        dir.path(),
        "eva.toml",
        "log_level = \"loud\"\n\n[analysis]\nconfidence_level = 1.5\nks_significance = 0.0\n",
    );

    eva(dir.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("log_level"))
        .stderr(predicate::str::contains("confidence_level"))
        .stderr(predicate::str::contains("ks_significance"));
}

#[test]
fn test_piped_logs_have_no_colour_codes() {
    let dir = workspace();
    let input = write(dir.path(), "data.csv", &five_spikes_csv([200; 5]));

    eva(dir.path())
        .env_remove("RUST_LOG")
        .args(["--verbose", "extremes", "--input", &input])
        .assert()
        .success()
        .stderr(predicate::str::contains("Extremes extracted"))
        .stderr(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn test_env_override_applies() {
    let dir = workspace();
    eva(dir.path())
        .env("EVA_THRESHOLD", "90")
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("threshold = 90"));
}

#[test]
fn test_cli_flag_beats_config_file() {
    let dir = workspace();
    let input = write(dir.path(), "data.csv", &five_spikes_csv([200; 5]));
    write(dir.path(), "custom.toml", "[analysis]\nthreshold = 500.0\n");

    eva(dir.path())
        .args(["--config", "custom.toml", "extremes", "--input", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains("No value exceeds the threshold 500"));

    eva(dir.path())
        .args(["--config", "custom.toml", "extremes", "--input", &input, "-u", "150"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5 extremes above 150"));
}
