use std::process::Command;

fn xtask() -> Command {
    Command::new(env!("CARGO_BIN_EXE_xtask"))
}

#[test]
fn xtask_help_runs() {
    let output = xtask().arg("help").output().expect("run xtask");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("xtask commands"));
}

#[test]
fn emitted_schemas_validate() {
    let tmp = tempfile::tempdir().expect("temp dir");

    let emit = xtask()
        .arg("emit-schemas")
        .arg(tmp.path())
        .output()
        .expect("run emit-schemas");
    assert!(emit.status.success(), "{}", String::from_utf8_lossy(&emit.stderr));
    for name in [
        "attendguard.request.v1.json",
        "attendguard.result.v1.json",
        "attendguard.config.v1.json",
    ] {
        assert!(tmp.path().join(name).exists(), "missing {name}");
    }

    let validate = xtask()
        .arg("validate-schemas")
        .arg(tmp.path())
        .output()
        .expect("run validate-schemas");
    assert!(validate.status.success());
}

#[test]
fn validate_fails_on_missing_schemas() {
    let tmp = tempfile::tempdir().expect("temp dir");

    let output = xtask()
        .arg("validate-schemas")
        .arg(tmp.path())
        .output()
        .expect("run validate-schemas");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("attendguard.config.v1.json"));
}

#[test]
fn unknown_command_fails() {
    let output = xtask().arg("nope").output().expect("run xtask");
    assert!(!output.status.success());
}
