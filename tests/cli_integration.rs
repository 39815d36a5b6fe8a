//! End-to-end tests that run the `microgrid-sizer` binary.

use std::process::{Command, Output};

use serde_json::Value;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_microgrid-sizer"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("microgrid-sizer process should run")
}

fn stdout_of(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout should be valid UTF-8")
}

fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid format for line `{line}`"));

    let numeric = raw.strip_suffix(unit).unwrap_or(raw).trim();
    numeric
        .parse::<f64>()
        .unwrap_or_else(|_| panic!("failed parsing `{numeric}` from line `{line}`"))
}

#[test]
fn default_run_prints_reference_sizes_and_details() {
    let stdout = stdout_of(&[]);
    assert_eq!(parse_metric(&stdout, "Battery Storage:", "kWh"), 172.5);
    assert_eq!(parse_metric(&stdout, "Solar PV Array:", "kW"), 27.6);
    assert_eq!(parse_metric(&stdout, "Inverter Size:", "kW"), 20.7);
    assert!(stdout.contains("Calculation Details"));
    assert!(stdout.contains("Battery Depth of Discharge"));
}

#[test]
fn profile_flag_selects_preset() {
    let stdout = stdout_of(&["--profile", "Restaurant"]);
    assert_eq!(parse_metric(&stdout, "Battery Storage:", "kWh"), 345.0);
    assert_eq!(parse_metric(&stdout, "Solar PV Array:", "kW"), 55.2);
    assert_eq!(parse_metric(&stdout, "Inverter Size:", "kW"), 34.5);
}

#[test]
fn site_file_and_override_produce_json() {
    let stdout = stdout_of(&[
        "--site",
        "sites/restaurant.toml",
        "--backup-hours",
        "48",
        "--format",
        "json",
    ]);
    let json: Value = serde_json::from_str(&stdout).expect("stdout should be JSON");
    assert_eq!(json["profile"], "restaurant");
    assert_eq!(json["configuration"]["backup_hours"], 48.0);
    assert_eq!(json["result"]["battery_capacity_kwh"], 690.0);
}

#[test]
fn csv_format_has_header_and_row() {
    let stdout = stdout_of(&["--daily-kwh", "100", "--peak-kw", "15", "--format", "csv"]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("profile,"));
    assert!(lines[1].starts_with("custom,100,15,"));
    assert!(lines[1].ends_with("172.5,27.6,20.7"));
}

#[test]
fn list_profiles_prints_catalogue() {
    let stdout = stdout_of(&["--list-profiles"]);
    for name in ["Small Retail Store", "Restaurant", "Small Office", "Custom"] {
        assert!(stdout.contains(name), "missing {name}");
    }
}

#[test]
fn zero_usage_exits_with_error() {
    let output = run(&["--daily-kwh", "0"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("site.daily_energy_usage_kwh"), "stderr: {stderr}");
}

#[test]
fn overflowing_load_exits_with_error() {
    let output = run(&[
        "--daily-kwh",
        "1e307",
        "--backup-hours",
        "72",
        "--format",
        "json",
    ]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("too large"), "stderr: {stderr}");
}

#[test]
fn out_of_domain_assumptions_are_all_reported() {
    let output = run(&["--backup-hours", "6", "--safety-factor", "3"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("assumptions.backup_hours"), "stderr: {stderr}");
    assert!(stderr.contains("assumptions.safety_factor"), "stderr: {stderr}");
}

#[test]
fn unknown_profile_exits_with_error() {
    let output = run(&["--profile", "bakery"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown profile"));
}
