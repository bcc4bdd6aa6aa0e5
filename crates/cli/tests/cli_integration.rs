use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn make_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before UNIX_EPOCH")
        .as_nanos();
    let pid = std::process::id();
    let dir = std::env::temp_dir().join(format!("schemargs-integ-{prefix}-{pid}-{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

fn schemargs() -> Command {
    Command::new(env!("CARGO_BIN_EXE_schemargs"))
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("failed to run schemargs")
}

fn stdout_json(out: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&out.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("invalid JSON ({e}):\n{stdout}"))
}

#[test]
fn help_works() {
    let out = run(schemargs().arg("--help"));
    assert!(
        out.status.success(),
        "schemargs --help failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stderr),
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("schemargs") && stdout.contains("parse") && stdout.contains("check"),
        "unexpected help output:\n{stdout}"
    );
}

#[test]
fn parse_reports_values_and_positionals_as_json() {
    let out = run(schemargs().args([
        "parse", "--schema", "x,y*", "--json", "--", "-x", "-y", "alpha", "beta",
    ]));
    assert!(
        out.status.success(),
        "parse failed:\nstderr:\n{}",
        String::from_utf8_lossy(&out.stderr)
    );

    let json = stdout_json(&out);
    assert_eq!(json["valid"], true);
    assert_eq!(json["cardinality"], 2);
    assert_eq!(json["values"]["x"], true);
    assert_eq!(json["values"]["y"], "alpha");
    assert_eq!(json["nextArgument"], 3);
    assert_eq!(json["rest"], serde_json::json!(["beta"]));
}

#[test]
fn parse_json_failure_exits_nonzero_with_error_fields() {
    let out = run(schemargs().args([
        "parse", "-s", "x#", "--json", "--", "-x", "Forty two",
    ]));
    assert!(!out.status.success(), "expected failure for invalid integer");

    let json = stdout_json(&out);
    assert_eq!(json["valid"], false);
    assert_eq!(json["error"]["code"], "INVALID_INTEGER");
    assert_eq!(json["error"]["argument"], "x");
    assert_eq!(json["error"]["parameter"], "Forty two");
}

#[test]
fn parse_human_failure_prints_message() {
    let out = run(schemargs().args(["parse", "-s", "x##", "--", "-x"]));
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(
        stderr.matches("Could not find double parameter for -x.").count(),
        1,
        "unexpected stderr:\n{stderr}"
    );
    assert!(!stderr.contains("Error:"), "unexpected stderr:\n{stderr}");
}

#[test]
fn check_rejects_malformed_schema() {
    let out = run(schemargs().args(["check", "--schema", "f~"]));
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("'~' is not a valid argument format."),
        "unexpected stderr:\n{stderr}"
    );
}

#[test]
fn check_lists_declared_flags() {
    let out = run(schemargs().args(["check", "--schema", "l p# d* f[*]", "--json"]));
    assert!(out.status.success());

    let json = stdout_json(&out);
    assert_eq!(json["schema"], "l,p#,d*,f[*]");
    let flags = json["flags"].as_array().expect("flags array");
    assert_eq!(flags.len(), 4);
    assert_eq!(flags[1]["flag"], "p");
    assert_eq!(flags[1]["kind"], "integer");
}

#[test]
fn parse_uses_schema_from_config_file() {
    let dir = make_temp_dir("config");
    fs::write(dir.join("schemargs.json"), r#"{ "schema": "n#, m&" }"#).unwrap();

    let out = run(schemargs()
        .current_dir(&dir)
        .args(["parse", "--json", "--", "-n", "5", "-m", "a:1,b:2"]));
    assert!(
        out.status.success(),
        "parse with config failed:\nstderr:\n{}",
        String::from_utf8_lossy(&out.stderr)
    );

    let json = stdout_json(&out);
    assert_eq!(json["values"]["n"], 5);
    assert_eq!(json["values"]["m"]["a"], "1");
    assert_eq!(json["values"]["m"]["b"], "2");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn explicit_missing_config_is_an_error() {
    let dir = make_temp_dir("missing-config");
    let out = run(schemargs()
        .current_dir(&dir)
        .args(["check", "--config", "absent.json"]));
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("config not found"), "unexpected stderr:\n{stderr}");

    let _ = fs::remove_dir_all(&dir);
}
