use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("winding.toml");
    fs::write(&path, body).unwrap();
    path
}

fn winding() -> Command {
    let mut cmd = Command::cargo_bin("winding").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[rstest]
#[case(&["--help"], 0, "Usage:", "stdout")]
#[case(&["calc"], 0, "Integer-slot, Full-pitch", "stdout")]
#[case(&["calc", "--pitch", "short", "--offset", "1"], 0, "y = τ - 1", "stdout")]
#[case(&["calc", "--slots", "10", "--poles", "4"], 0, "Fractional-slot, Full-pitch", "stdout")]
#[case(&["calc", "-z", "36", "-p", "4", "-m", "3"], 0, "A=12 B=12 C=12", "stdout")]
#[case(&["calc", "-z", "6", "-p", "8"], 0, "Fractional-slot, Full-pitch", "stdout")]
#[case(&["calc", "--poles", "3"], 2, "What happened: Invalid machine configuration", "stderr")]
#[case(&["calc", "--slots", "-24"], 2, "positive integers", "stderr")]
#[case(&["calc", "--phases", "2"], 2, "m >= 3", "stderr")]
#[case(&["table", "--phase", "A", "--layer", "TOP"], 0, "A+ p1 ->7", "stdout")]
#[case(&["table", "--layer", "middle"], 2, "unknown layer filter", "stderr")]
#[case(&["chains", "--phase", "B"], 0, "B+ pole  1", "stdout")]
#[case(&["animate", "--steps", "3"], 0, "revealed 3/24 coils in 2 chain(s)", "stdout")]
#[case(&["animate", "--steps", "100"], 0, "layout complete", "stdout")]
fn cli_table_cases(
    #[case] args: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
    #[case] stream: &str,
) {
    let mut cmd = winding();
    for a in args {
        cmd.arg(a);
    }

    let assert = cmd.assert().code(exit_code);

    match stream {
        "stdout" => {
            assert.stdout(predicate::str::contains(needle));
        }
        "stderr" => {
            assert.stderr(predicate::str::contains(needle));
        }
        other => panic!("unknown stream: {other}"),
    }
}

#[rstest]
fn invalid_machine_prints_no_results() {
    winding()
        .args(["calc", "--slots", "5"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());
}

#[rstest]
fn incomplete_fractional_layout_is_not_a_warning() {
    winding()
        .args(["calc", "--slots", "10", "--poles", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("top layer full   no"))
        .stderr(predicate::str::contains("WARN").not());
}

#[rstest]
fn config_supplies_machine_and_flags_override() {
    let dir = tempdir().unwrap();
    let cfg = write_config(
        &dir,
        r#"
[machine]
slots = 36
poles = 4

[pitch]
mode = "short"
offset = 2
"#,
    );

    winding()
        .arg("--config")
        .arg(&cfg)
        .arg("calc")
        .assert()
        .success()
        .stdout(predicate::str::contains("Z=36 2p=4 m=3 short offset=2"))
        .stdout(predicate::str::contains("y = τ - 2"));

    winding()
        .arg("--config")
        .arg(&cfg)
        .args(["calc", "--pitch", "full"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Integer-slot, Full-pitch"));
}

#[rstest]
fn config_output_filters_apply_to_table() {
    let dir = tempdir().unwrap();
    let cfg = write_config(
        &dir,
        r#"
[machine]
slots = 24
poles = 4

[output]
phase_filter = "C"
layer_filter = "BOTTOM"
"#,
    );

    winding()
        .arg("--config")
        .arg(&cfg)
        .arg("table")
        .assert()
        .success()
        .stdout(predicate::str::contains("phase=C layer=BOTTOM"))
        .stdout(predicate::str::contains("A+").not());
}

#[rstest]
fn malformed_config_is_reported() {
    let dir = tempdir().unwrap();
    let cfg = write_config(&dir, "[machine]\nslots = \"many\"\n");

    winding()
        .arg("--config")
        .arg(&cfg)
        .arg("calc")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration file is invalid"));
}

#[rstest]
fn config_validation_failure_is_reported() {
    let dir = tempdir().unwrap();
    let cfg = write_config(
        &dir,
        r#"
[machine]
slots = 24
poles = 4

[logging]
rotation = "weekly"
"#,
    );

    winding()
        .arg("--config")
        .arg(&cfg)
        .arg("calc")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("logging.rotation"));
}

#[rstest]
fn missing_config_file_is_reported() {
    let dir = tempdir().unwrap();
    winding()
        .arg("--config")
        .arg(dir.path().join("nope.toml"))
        .arg("calc")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not read an input file"));
}

#[rstest]
fn batch_reports_bad_rows_without_aborting() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("machines.csv");
    let mut f = fs::File::create(&csv).unwrap();
    writeln!(f, "slots,poles,phases,pitch,offset").unwrap();
    writeln!(f, "24,4,3,full,").unwrap();
    writeln!(f, "24,3,3,full,").unwrap();
    writeln!(f, "24,4,3,short,1").unwrap();
    drop(f);

    winding()
        .arg("batch")
        .arg("--csv")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("row 1: Z=24 2p=4 m=3 full"))
        .stdout(predicate::str::contains("row 2: Z=24 2p=3 m=3 full | error"))
        .stdout(predicate::str::contains("Integer-slot, Short-pitch"));
}

#[rstest]
fn cli_reports_bad_batch_header() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("machines.csv");
    let mut f = fs::File::create(&csv).unwrap();
    writeln!(f, "z,p2,m").unwrap();
    writeln!(f, "24,4,3").unwrap();
    drop(f);

    winding()
        .arg("batch")
        .arg("--csv")
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid headers"));
}

#[rstest]
fn log_file_receives_json_lines() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("winding.log");
    let cfg = write_config(
        &dir,
        &format!(
            r#"
[machine]
slots = 24
poles = 4

[logging]
file = "{}"
level = "info"
rotation = "never"
"#,
            log.display().to_string().replace('\\', "/")
        ),
    );

    winding()
        .arg("--config")
        .arg(&cfg)
        .arg("calc")
        .assert()
        .success();

    let text = fs::read_to_string(&log).unwrap();
    let line = text
        .lines()
        .find(|l| l.contains("generating layout"))
        .unwrap_or_else(|| panic!("no log line found; log was: {text}"));
    let v: serde_json::Value = serde_json::from_str(line).expect("valid JSON");
    assert_eq!(v["level"], "INFO");
}
