//! End-to-end tests that drive the `RefundCalculator` binary.
//!
//! These complement the unit tests in the library by checking flag parsing,
//! exit codes and the stdout/stderr split of the real executable.

use std::io::Write;

use assert_cmd::Command;
use assert_cmd::cargo_bin;
use predicates::prelude::*;

fn calculator() -> Command {
    let mut cmd = Command::new(cargo_bin!("RefundCalculator"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn sample_args(cmd: &mut Command) -> &mut Command {
    cmd.args([
        "--total-cost",
        "1000",
        "--amount-paid",
        "900",
        "--tpp",
        "50",
        "--deposit",
        "300",
    ])
}

#[test]
fn one_shot_threshold_prints_classic_summary() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = calculator();
    sample_args(&mut cmd).args(["--policy", "threshold"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("=== Calculation Summary ==="))
        .stdout(predicate::str::contains("Total Non-Refundable (TNR): $350.00"))
        .stdout(predicate::str::contains("Refund Due: $550.00"));

    Ok(())
}

#[test]
fn one_shot_additive_ignores_deposit() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = calculator();
    sample_args(&mut cmd).args(["--policy", "1.3.3"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("   Total Non-Refundable $250.00"))
        .stdout(predicate::str::contains("   Refund Due           $650.00"));

    Ok(())
}

#[test]
fn one_shot_default_policy_reports_tie_break() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = calculator();
    sample_args(&mut cmd);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Deposit used ($300.00 > $200.00)"))
        .stdout(predicate::str::contains("Refund Due:             $   550.00"));

    Ok(())
}

#[test]
fn one_shot_layout_flag_overrides_policy_layout() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = calculator();
    sample_args(&mut cmd).args(["--policy", "max-with-reason", "--layout", "classic"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Total Paid: $900.00"))
        .stdout(predicate::str::contains("Deposit used ($300.00 > $200.00)"));

    Ok(())
}

#[test]
fn one_shot_negative_value_exits_with_invalid_input() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = calculator();
    cmd.args([
        "--total-cost",
        "1000",
        "--amount-paid",
        "900",
        "--tpp",
        "50",
        "--deposit",
        "-1",
    ]);

    cmd.assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Please enter valid non-negative numeric values.",
        ));

    Ok(())
}

#[test]
fn one_shot_missing_field_exits_with_invalid_input() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = calculator();
    cmd.args(["--total-cost", "1000", "--amount-paid", "900"]);

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Please enter valid"));

    Ok(())
}

#[test]
fn one_shot_json_output() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = calculator();
    sample_args(&mut cmd).args(["--policy", "max-with-reason", "--json"]);

    let output = cmd.output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["policy"], "max-with-reason");
    assert_eq!(value["refund_due"], "550.00");
    assert_eq!(value["non_refundable"], "350.00");
    assert_eq!(value["tie_break"], "deposit");
    assert_eq!(value["is_zero_refund"], false);
    assert!(value["calculated_at"].is_string());

    Ok(())
}

#[test]
fn one_shot_zero_refund_note() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = calculator();
    cmd.args([
        "--policy",
        "threshold",
        "--total-cost",
        "1000",
        "--amount-paid",
        "200",
        "--tpp",
        "50",
        "--deposit",
        "300",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Refund Due: $0.00"))
        .stdout(predicate::str::contains("No refund is due"));

    Ok(())
}

#[test]
fn config_file_selects_policy() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = tempfile::NamedTempFile::new()?;
    writeln!(config, "policy = \"additive\"")?;
    writeln!(config, "layout = \"aligned\"")?;

    let mut cmd = calculator();
    sample_args(&mut cmd).arg("--config").arg(config.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Non-Refundable Total:   $   250.00"));

    Ok(())
}

#[test]
fn bad_config_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = tempfile::NamedTempFile::new()?;
    writeln!(config, "policy = \"greedy\"")?;

    let mut cmd = calculator();
    sample_args(&mut cmd).arg("--config").arg(config.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid calculator settings"));

    Ok(())
}

#[test]
fn unknown_policy_flag_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = calculator();
    sample_args(&mut cmd).args(["--policy", "greedy"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown policy 'greedy'"));

    Ok(())
}

#[test]
fn interactive_session_computes_and_quits() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = calculator();
    cmd.args(["--policy", "threshold"])
        .write_stdin("1000\n900\n50\n300\nn\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("TPP Refund Calculator (policy: threshold, v1.01)"))
        .stdout(predicate::str::contains("Refund Due: $550.00"))
        .stdout(predicate::str::contains("Calculate another? (y/n): "));

    Ok(())
}

#[test]
fn interactive_quit_without_confirmation() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = calculator();
    cmd.arg("--no-confirm").write_stdin("quit\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Are you sure").not());

    Ok(())
}

#[test]
fn log_file_from_config_receives_records() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let log_path = dir.path().join("refund.log");
    let mut config = tempfile::NamedTempFile::new()?;
    writeln!(config, "log_level = \"info\"")?;
    writeln!(config, "log_file = {:?}", log_path.display().to_string())?;

    let mut cmd = calculator();
    sample_args(&mut cmd).arg("--config").arg(config.path()).arg("--quiet");

    cmd.assert().success().stderr(predicate::str::is_empty());

    let log = std::fs::read_to_string(&log_path)?;
    assert!(log.contains("calculation complete"), "log was: {log}");

    Ok(())
}

#[test]
fn console_logs_go_to_stderr() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = calculator();
    sample_args(&mut cmd).args(["--log-level", "info"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("starting").not())
        .stderr(predicate::str::contains("calculation complete"));

    Ok(())
}
